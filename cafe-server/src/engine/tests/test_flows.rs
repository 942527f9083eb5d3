use shared::{DomainEventPayload, OrderStatus, RedemptionStatus, ReviewCreate, ReviewUpdate};

use super::*;

#[test]
fn placement_freezes_cart_into_order() {
    let engine = create_test_engine();
    let pilau = seed_item(&engine, "Pilau", 350);
    let chips = seed_item(&engine, "Chips", 150);
    let soda = seed_item(&engine, "Soda", 100);

    engine.add_cart_line("alice", &pilau.id, 2, T0).unwrap();
    engine.add_cart_line("alice", &chips.id, 1, T0).unwrap();
    engine.add_cart_line("alice", &soda.id, 2, T0).unwrap();

    let order = engine.place_order("alice", T0).unwrap();
    assert_eq!(order.total_price, Decimal::from(1050));
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(!order.is_paid);
    assert_eq!(order.lines.len(), 3);

    // The cart is emptied in the same transaction
    assert!(engine.view_cart("alice", T0).unwrap().lines.is_empty());
    assert_eq!(engine.cached_cart_total("alice").unwrap(), Decimal::ZERO);
}

#[test]
fn placed_orders_ignore_later_offer_changes() {
    let engine = create_test_engine();
    let item = seed_item(&engine, "Pilau", 500);

    engine.add_cart_line("alice", &item.id, 1, T0).unwrap();
    let order = engine.place_order("alice", T0).unwrap();
    assert_eq!(order.total_price, Decimal::from(500));

    // An offer created after placement does not reprice the order
    seed_offer(&engine, &item.id, 50, T0 - HOUR_MS, T0 + HOUR_MS);
    let reloaded = engine.get_order("alice", &order.id).unwrap();
    assert_eq!(reloaded.total_price, Decimal::from(500));
    assert_eq!(reloaded.lines[0].unit_price, Decimal::from(500));
}

#[test]
fn payment_awards_points_once() {
    let engine = create_test_engine();
    let table = seed_table(&engine, 4);
    let order = place_order_with_total(&engine, "alice", 250);

    let mut events = engine.subscribe();
    let (paid, awarded) = engine
        .confirm_payment("alice", &order.id, &table.id, T0 + HOUR_MS)
        .unwrap();
    assert!(paid.is_paid);
    assert_eq!(paid.table_number, Some(4));
    assert_eq!(awarded, 2);
    assert_eq!(engine.balance("alice").unwrap(), 2);

    // The confirmation event carries the award
    match events.try_recv().unwrap().payload {
        DomainEventPayload::PaymentConfirmed {
            order_id,
            points_awarded,
            table_number,
            ..
        } => {
            assert_eq!(order_id, order.id);
            assert_eq!(points_awarded, 2);
            assert_eq!(table_number, 4);
        }
        other => panic!("unexpected event: {other}"),
    }

    // A retry is rejected and never double-awards
    let result = engine.confirm_payment("alice", &order.id, &table.id, T0 + 2 * HOUR_MS);
    assert!(matches!(result, Err(EngineError::AlreadyPaid(_))));
    assert_eq!(engine.balance("alice").unwrap(), 2);
    assert_eq!(engine.points_history("alice").unwrap().len(), 1);
}

#[test]
fn sub_threshold_total_leaves_no_ledger_row() {
    let engine = create_test_engine();
    let table = seed_table(&engine, 1);
    let order = place_order_with_total(&engine, "alice", 50);

    let (_, awarded) = engine
        .confirm_payment("alice", &order.id, &table.id, T0)
        .unwrap();
    assert_eq!(awarded, 0);
    assert_eq!(engine.balance("alice").unwrap(), 0);

    // A zero award is a no-op: nothing in the history
    assert!(engine.points_history("alice").unwrap().is_empty());

    // Retrying is blocked by the paid flag, not by a ledger row
    let result = engine.confirm_payment("alice", &order.id, &table.id, T0 + HOUR_MS);
    assert!(matches!(result, Err(EngineError::AlreadyPaid(_))));
    assert!(engine.points_history("alice").unwrap().is_empty());
}

#[test]
fn status_moves_forward_only() {
    let engine = create_test_engine();
    let order = place_order_with_total(&engine, "alice", 300);

    let order = engine
        .advance_status(&order.id, OrderStatus::Ready, Some(15), T0)
        .unwrap();
    assert_eq!(order.status, OrderStatus::Ready);
    assert_eq!(order.estimated_time, 15);

    let result = engine.advance_status(&order.id, OrderStatus::Pending, None, T0);
    assert!(matches!(
        result,
        Err(EngineError::InvalidTransition {
            from: OrderStatus::Ready,
            to: OrderStatus::Pending,
        })
    ));

    // Skipping forward is fine
    let order = engine
        .advance_status(&order.id, OrderStatus::Delivered, None, T0)
        .unwrap();
    assert_eq!(order.status, OrderStatus::Delivered);
}

#[test]
fn reaching_complete_emits_an_event() {
    let engine = create_test_engine();
    let order = place_order_with_total(&engine, "alice", 300);

    let mut events = engine.subscribe();
    engine
        .advance_status(&order.id, OrderStatus::Complete, None, T0)
        .unwrap();

    match events.try_recv().unwrap().payload {
        DomainEventPayload::OrderCompleted { order_id } => assert_eq!(order_id, order.id),
        other => panic!("unexpected event: {other}"),
    }
}

#[test]
fn review_window_is_the_payment_day() {
    let engine = create_test_engine();
    let table = seed_table(&engine, 2);
    let order = place_order_with_total(&engine, "alice", 400);

    // Unpaid orders cannot be reviewed
    let result = engine.create_review(
        "alice",
        &order.id,
        ReviewCreate {
            rating: 5,
            comment: "Great".to_string(),
        },
        T0,
    );
    assert!(matches!(result, Err(EngineError::ReviewWindowClosed(_))));

    engine
        .confirm_payment("alice", &order.id, &table.id, T0)
        .unwrap();

    // Same business day: allowed
    let review = engine
        .create_review(
            "alice",
            &order.id,
            ReviewCreate {
                rating: 5,
                comment: "Great".to_string(),
            },
            T0 + 2 * HOUR_MS,
        )
        .unwrap();
    assert_eq!(review.rating, 5);

    // A second review of the same order is rejected
    let result = engine.create_review(
        "alice",
        &order.id,
        ReviewCreate {
            rating: 3,
            comment: "Changed my mind".to_string(),
        },
        T0 + 2 * HOUR_MS,
    );
    assert!(matches!(result, Err(EngineError::AlreadyReviewed(_))));

    // Edits are allowed while the window is open...
    let review = engine
        .update_review(
            "alice",
            &review.id,
            ReviewUpdate {
                rating: Some(4),
                comment: None,
            },
            T0 + 3 * HOUR_MS,
        )
        .unwrap();
    assert_eq!(review.rating, 4);
    assert_eq!(review.comment, "Great");

    // ...but not the next day
    let result = engine.update_review(
        "alice",
        &review.id,
        ReviewUpdate {
            rating: Some(1),
            comment: None,
        },
        T0 + DAY_MS,
    );
    assert!(matches!(result, Err(EngineError::ReviewWindowClosed(_))));
}

#[test]
fn next_day_review_is_rejected() {
    let engine = create_test_engine();
    let table = seed_table(&engine, 2);
    let order = place_order_with_total(&engine, "alice", 400);
    engine
        .confirm_payment("alice", &order.id, &table.id, T0)
        .unwrap();

    let result = engine.create_review(
        "alice",
        &order.id,
        ReviewCreate {
            rating: 5,
            comment: "Too late".to_string(),
        },
        T0 + DAY_MS,
    );
    assert!(matches!(result, Err(EngineError::ReviewWindowClosed(_))));
}

#[test]
fn review_listing_is_scoped_to_the_user() {
    let engine = create_test_engine();
    let table = seed_table(&engine, 2);

    for (user, rating, at) in [("alice", 5u8, T0), ("alice", 3, T0 + HOUR_MS), ("bob", 1, T0)] {
        let order = place_order_with_total(&engine, user, 300);
        engine.confirm_payment(user, &order.id, &table.id, at).unwrap();
        engine
            .create_review(
                user,
                &order.id,
                ReviewCreate {
                    rating,
                    comment: String::new(),
                },
                at,
            )
            .unwrap();
    }

    let mine = engine.list_reviews("alice").unwrap();
    assert_eq!(mine.len(), 2);
    // Newest first
    assert_eq!(mine[0].rating, 3);
    assert_eq!(mine[1].rating, 5);
    assert_eq!(engine.list_reviews("bob").unwrap().len(), 1);
    assert!(engine.list_reviews("mallory").unwrap().is_empty());
}

#[test]
fn cancellation_deletes_unpaid_orders_only() {
    let engine = create_test_engine();
    let table = seed_table(&engine, 3);

    let unpaid = place_order_with_total(&engine, "alice", 300);
    engine.cancel_order("alice", &unpaid.id).unwrap();
    assert!(matches!(
        engine.get_order("alice", &unpaid.id),
        Err(EngineError::OrderNotFound(_))
    ));

    let paid = place_order_with_total(&engine, "alice", 300);
    engine
        .confirm_payment("alice", &paid.id, &table.id, T0)
        .unwrap();
    assert!(matches!(
        engine.cancel_order("alice", &paid.id),
        Err(EngineError::AlreadyPaid(_))
    ));
    assert!(engine.get_order("alice", &paid.id).is_ok());
}

#[test]
fn redemption_lifecycle() {
    let engine = create_test_engine();
    let item = seed_item(&engine, "Free Chai", 50);
    let reward = seed_reward(&engine, &item.id, 40);
    give_points(&engine, "alice", 50);

    let mut events = engine.subscribe();
    let (redemption, remaining) = engine.redeem("alice", &reward.id, T0).unwrap();
    assert_eq!(redemption.status, RedemptionStatus::Pending);
    assert_eq!(redemption.points_redeemed, 40);
    assert_eq!(remaining, 10);
    assert_eq!(engine.balance("alice").unwrap(), 10);

    match events.try_recv().unwrap().payload {
        DomainEventPayload::PointsRedeemed {
            points_redeemed,
            remaining_points,
            ..
        } => {
            assert_eq!(points_redeemed, 40);
            assert_eq!(remaining_points, 10);
        }
        other => panic!("unexpected event: {other}"),
    }

    // Deleting before delivery is rejected
    assert!(matches!(
        engine.delete_redemption(&redemption.id),
        Err(EngineError::RedemptionNotDelivered(_))
    ));

    // Delivery is idempotent
    let delivered = engine.mark_delivered(&redemption.id).unwrap();
    assert!(delivered.is_delivered());
    let again = engine.mark_delivered(&redemption.id).unwrap();
    assert!(again.is_delivered());

    engine.delete_redemption(&redemption.id).unwrap();
    assert!(engine.list_redemptions("alice").unwrap().is_empty());
}

#[test]
fn order_listings_filter_and_sort() {
    let engine = create_test_engine();
    let item = seed_item(&engine, "Pilau", 350);

    engine.add_cart_line("alice", &item.id, 1, T0).unwrap();
    let first = engine.place_order("alice", T0).unwrap();
    engine.add_cart_line("alice", &item.id, 1, T0).unwrap();
    let second = engine.place_order("alice", T0 + HOUR_MS).unwrap();
    engine.add_cart_line("bob", &item.id, 1, T0).unwrap();
    engine.place_order("bob", T0).unwrap();

    engine
        .advance_status(&first.id, OrderStatus::Ready, None, T0 + 2 * HOUR_MS)
        .unwrap();

    let mine = engine.list_orders("alice", None).unwrap();
    assert_eq!(mine.len(), 2);
    // Newest activity first: the Ready transition bumped `first`
    assert_eq!(mine[0].id, first.id);
    assert_eq!(mine[1].id, second.id);

    let ready = engine.list_orders("alice", Some(OrderStatus::Ready)).unwrap();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].id, first.id);

    let all = engine.list_all_orders(None).unwrap();
    assert_eq!(all.len(), 3);
}

use shared::{OrderStatus, ReviewCreate};

use super::*;

#[test]
fn placing_an_empty_cart_fails() {
    let engine = create_test_engine();
    assert!(matches!(
        engine.place_order("alice", T0),
        Err(EngineError::EmptyCart)
    ));
}

#[test]
fn malformed_offer_windows_never_discount() {
    let engine = create_test_engine();
    let item = seed_item(&engine, "Pilau", 500);

    // Inverted window
    seed_offer(&engine, &item.id, 20, T0 + HOUR_MS, T0 - HOUR_MS);
    let line = engine.add_cart_line("alice", &item.id, 1, T0).unwrap();
    assert_eq!(line.unit_price, Decimal::from(500));

    // Empty window
    seed_offer(&engine, &item.id, 20, T0, T0);
    assert_eq!(
        engine.view_cart("alice", T0).unwrap().total,
        Decimal::from(500)
    );
}

#[test]
fn offer_window_end_is_exclusive() {
    let engine = create_test_engine();
    let item = seed_item(&engine, "Pilau", 500);
    seed_offer(&engine, &item.id, 20, T0, T0 + HOUR_MS);

    engine.add_cart_line("alice", &item.id, 1, T0).unwrap();
    assert_eq!(
        engine.view_cart("alice", T0).unwrap().total,
        Decimal::from(400)
    );
    assert_eq!(
        engine.view_cart("alice", T0 + HOUR_MS).unwrap().total,
        Decimal::from(500)
    );
}

#[test]
fn other_users_orders_are_invisible() {
    let engine = create_test_engine();
    let table = seed_table(&engine, 1);
    let order = place_order_with_total(&engine, "alice", 300);

    assert!(matches!(
        engine.get_order("mallory", &order.id),
        Err(EngineError::OrderNotFound(_))
    ));
    assert!(matches!(
        engine.confirm_payment("mallory", &order.id, &table.id, T0),
        Err(EngineError::OrderNotFound(_))
    ));
    assert!(matches!(
        engine.cancel_order("mallory", &order.id),
        Err(EngineError::OrderNotFound(_))
    ));
    assert!(matches!(
        engine.create_review(
            "mallory",
            &order.id,
            ReviewCreate {
                rating: 1,
                comment: String::new(),
            },
            T0,
        ),
        Err(EngineError::OrderNotFound(_))
    ));
}

#[test]
fn payment_requires_an_existing_table() {
    let engine = create_test_engine();
    let order = place_order_with_total(&engine, "alice", 300);

    assert!(matches!(
        engine.confirm_payment("alice", &order.id, "no-such-table", T0),
        Err(EngineError::TableNotFound(_))
    ));
    // The failed attempt left the order unpaid
    assert!(!engine.get_order("alice", &order.id).unwrap().is_paid);
}

#[test]
fn points_are_floor_divided() {
    let engine = create_test_engine();
    let table = seed_table(&engine, 1);

    for (price, expected) in [(99u32, 0u32), (100, 1), (199, 1), (250, 2), (1000, 10)] {
        let user = format!("user-{price}");
        let order = place_order_with_total(&engine, &user, price);
        let (_, awarded) = engine
            .confirm_payment(&user, &order.id, &table.id, T0)
            .unwrap();
        assert_eq!(awarded, expected, "total {price}");
        assert_eq!(engine.balance(&user).unwrap(), expected);
    }
}

#[test]
fn redeem_shortfall_is_spelled_out() {
    let engine = create_test_engine();
    let item = seed_item(&engine, "Free Chai", 50);
    let reward = seed_reward(&engine, &item.id, 40);
    give_points(&engine, "alice", 30);

    let result = engine.redeem("alice", &reward.id, T0);
    match result {
        Err(EngineError::InsufficientPoints {
            required,
            available,
        }) => {
            assert_eq!(required, 40);
            assert_eq!(available, 30);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    // The failed redeem did not touch the balance
    assert_eq!(engine.balance("alice").unwrap(), 30);
    assert!(engine.list_redemptions("alice").unwrap().is_empty());
}

#[test]
fn unknown_reward_and_redemption_ids() {
    let engine = create_test_engine();
    give_points(&engine, "alice", 100);

    assert!(matches!(
        engine.redeem("alice", "ghost", T0),
        Err(EngineError::RewardNotFound(_))
    ));
    assert!(matches!(
        engine.mark_delivered("ghost"),
        Err(EngineError::RedemptionNotFound(_))
    ));
    assert!(matches!(
        engine.delete_redemption("ghost"),
        Err(EngineError::RedemptionNotFound(_))
    ));
}

#[test]
fn review_rating_bounds() {
    let engine = create_test_engine();
    let table = seed_table(&engine, 1);
    let order = place_order_with_total(&engine, "alice", 300);
    engine
        .confirm_payment("alice", &order.id, &table.id, T0)
        .unwrap();

    for rating in [0u8, 6] {
        let result = engine.create_review(
            "alice",
            &order.id,
            ReviewCreate {
                rating,
                comment: String::new(),
            },
            T0,
        );
        assert!(matches!(result, Err(EngineError::InvalidRating(r)) if r == rating));
    }
}

#[test]
fn advancing_a_missing_order_is_not_found() {
    let engine = create_test_engine();
    assert!(matches!(
        engine.advance_status("ghost", OrderStatus::Ready, None, T0),
        Err(EngineError::OrderNotFound(_))
    ));
}

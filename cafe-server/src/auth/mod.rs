//! Request identity
//!
//! Authentication itself happens upstream; requests arrive with
//! `X-User-Id` / `X-User-Role` headers already verified. This module
//! resolves them once per request into a [`RequestContext`] that is
//! passed explicitly into core operations.

mod extractor;

pub use extractor::RequestContext;

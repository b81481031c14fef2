#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based test suite entry point.
//!
//! ```bash
//! cargo test --test property
//! ```
//!
//! Every case deploys fresh contracts and signs with secp256k1, so the
//! default case count is kept low. Raise it with `PROPTEST_CASES`.

#[path = "../common/mod.rs"]
mod common;

mod encoding;
mod intake;

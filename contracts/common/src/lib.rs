//! Shared primitives for the festival ballot contracts.
//!
//! This crate provides:
//! - [`CommonError`]: standardised error codes shared by every contract.
//! - [`encoding`]: the canonical, versioned byte layout voters and booths sign.
//! - [`eth_sig`]: EIP-191 personal-message signer recovery (secp256k1).
//! - [`nonce`]: the system-wide single-use nonce ledger.
//!
//! Contract-specific errors extend the range starting at code **100** and
//! above, ensuring no collisions with the common set.

#![cfg_attr(not(feature = "std"), no_std)]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod encoding;
pub mod eth_sig;
pub mod nonce;

pub use encoding::*;
pub use eth_sig::*;
pub use nonce::*;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by every ballot contract.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 30 – 39 | Validation / input             |
/// | 100+    | Reserved for contract-specific |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    // ── Validation (30–39) ───────────────────────────────────
    /// Structurally invalid input (mismatched lengths, negative weight).
    InvalidInput = 30,

    /// The nonce has already been consumed by an accepted message.
    NonceAlreadyUsed = 31,

    /// The signature is malformed or does not recover to an address.
    InvalidSignature = 32,
}

//! # Single-use Nonce Ledger
//!
//! Nonces are consumed **system-wide**: once any sender has an accepted
//! message carrying nonce `N`, every later message carrying `N` is rejected,
//! whichever sender presents it. Consumed nonces live in persistent storage
//! and are never removed; each write extends the entry's TTL.
//!
//! ## Usage pattern
//!
//! Check early, consume only once everything else has succeeded:
//! ```ignore
//! nonce::ensure_nonce_unused(&env, &ballot.nonce)?;
//! // ... remaining checks and side effects
//! nonce::consume_nonce(&env, &ballot.nonce, &ballot.sender)?;
//! ```

use soroban_sdk::{contracttype, BytesN, Env};

use crate::CommonError;

// ── Storage key ──────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum NonceKey {
    Used(BytesN<32>),
}

/// Who consumed a nonce, and when.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NonceRecord {
    pub sender: BytesN<20>,
    pub ledger: u32,
    pub timestamp: u64,
}

// ── TTL constants (mirror common convention) ─────────────────────────────────

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Internal helpers ─────────────────────────────────────────────────────────

fn nonce_key(nonce: &BytesN<32>) -> NonceKey {
    NonceKey::Used(nonce.clone())
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Returns `true` if `nonce` has been consumed by any sender.
pub fn is_nonce_used(env: &Env, nonce: &BytesN<32>) -> bool {
    env.storage().persistent().has(&nonce_key(nonce))
}

/// Returns the record of the message that consumed `nonce`, if any.
pub fn nonce_record(env: &Env, nonce: &BytesN<32>) -> Option<NonceRecord> {
    env.storage().persistent().get(&nonce_key(nonce))
}

/// Read-only check that `nonce` is still available.
///
/// # Errors
/// [`CommonError::NonceAlreadyUsed`] if the nonce was consumed before.
pub fn ensure_nonce_unused(env: &Env, nonce: &BytesN<32>) -> Result<(), CommonError> {
    if is_nonce_used(env, nonce) {
        return Err(CommonError::NonceAlreadyUsed);
    }
    Ok(())
}

/// Marks `nonce` as consumed by `sender`.
///
/// Re-checks availability so that the check and the write happen in the
/// same invocation.
///
/// # Errors
/// [`CommonError::NonceAlreadyUsed`] if the nonce was consumed before.
pub fn consume_nonce(
    env: &Env,
    nonce: &BytesN<32>,
    sender: &BytesN<20>,
) -> Result<NonceRecord, CommonError> {
    ensure_nonce_unused(env, nonce)?;
    let record = NonceRecord {
        sender: sender.clone(),
        ledger: env.ledger().sequence(),
        timestamp: env.ledger().timestamp(),
    };
    let key = nonce_key(nonce);
    env.storage().persistent().set(&key, &record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(record)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

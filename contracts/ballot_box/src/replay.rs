//! Replay guard: the nonce ledger plus the per-question "already voted"
//! ledger. It is the only owner of both.
//!
//! Reservation is read-only. Nothing is written until [`ReplayGuard::commit`],
//! which the orchestrator calls only after the vote has been submitted, so a
//! ballot rejected anywhere earlier leaves both ledgers untouched.

use ballot_common::nonce;
use soroban_sdk::{Address, BytesN, Env};

use crate::ballot::{Ballot, DataKey, VoteReceipt};
use crate::errors::VoteError;

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// Outcome of a successful replay check. Consumed by [`ReplayGuard::commit`];
/// dropping it releases nothing because nothing was written.
#[derive(Debug)]
pub struct Reservation {
    question: Address,
    festival: BytesN<32>,
    sender: BytesN<20>,
    booth: BytesN<20>,
    nonce: BytesN<32>,
}

pub struct ReplayGuard;

impl ReplayGuard {
    /// Checks the nonce first, then the sender's vote on the question.
    pub fn reserve(env: &Env, ballot: &Ballot) -> Result<Reservation, VoteError> {
        nonce::ensure_nonce_unused(env, &ballot.nonce)?;
        if Self::has_voted(env, &ballot.question, &ballot.sender) {
            return Err(VoteError::AlreadyVoted);
        }
        Ok(Reservation {
            question: ballot.question.clone(),
            festival: ballot.festival.clone(),
            sender: ballot.sender.clone(),
            booth: ballot.booth.clone(),
            nonce: ballot.nonce.clone(),
        })
    }

    /// Consumes the nonce, marks the sender as voted and stores the receipt.
    ///
    /// Both checks are repeated against current storage, in the same order
    /// as [`ReplayGuard::reserve`], before anything is written.
    pub fn commit(
        env: &Env,
        reservation: Reservation,
        tx_ref: BytesN<32>,
    ) -> Result<VoteReceipt, VoteError> {
        nonce::ensure_nonce_unused(env, &reservation.nonce)?;
        if Self::has_voted(env, &reservation.question, &reservation.sender) {
            return Err(VoteError::AlreadyVoted);
        }
        nonce::consume_nonce(env, &reservation.nonce, &reservation.sender)?;

        let receipt = VoteReceipt {
            receipt_id: next_receipt_id(env),
            question: reservation.question,
            festival: reservation.festival,
            sender: reservation.sender,
            booth: reservation.booth,
            nonce: reservation.nonce,
            tx_ref,
            ledger: env.ledger().sequence(),
            timestamp: env.ledger().timestamp(),
        };

        let key = DataKey::Voted(receipt.question.clone(), receipt.sender.clone());
        env.storage().persistent().set(&key, &receipt);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

        Ok(receipt)
    }

    pub fn has_voted(env: &Env, question: &Address, sender: &BytesN<20>) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Voted(question.clone(), sender.clone()))
    }

    pub fn vote_receipt(env: &Env, question: &Address, sender: &BytesN<20>) -> Option<VoteReceipt> {
        env.storage()
            .persistent()
            .get(&DataKey::Voted(question.clone(), sender.clone()))
    }

    pub fn receipt_count(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::ReceiptCount)
            .unwrap_or(0)
    }
}

fn next_receipt_id(env: &Env) -> u64 {
    let id = ReplayGuard::receipt_count(env).saturating_add(1);
    env.storage().instance().set(&DataKey::ReceiptCount, &id);
    id
}

// ── Tests ─────────────────────────────────────────────────────────────────────

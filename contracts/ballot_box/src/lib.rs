#![no_std]

pub mod ballot;
pub mod errors;
pub mod events;
pub mod orchestrator;
pub mod readers;
pub mod replay;


use ballot_common::{nonce, NonceRecord, ENCODING_VERSION};
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, Vec};

pub use ballot::{AnswerRecord, Ballot, DataKey, VotePolicy, VoteReceipt};
pub use errors::{ErrorCategory, VoteError};
pub use orchestrator::{Rejection, Stage};
pub use readers::{
    AnswerCatalog, AnswerCatalogClient, AnswerCatalogInterface, AnswerCatalogReader, ChainState,
    ChainStateReader, QuestionClient, QuestionInterface, VoteSubmitter,
};
pub use replay::ReplayGuard;

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// Extends the time-to-live (TTL) for instance storage.
fn extend_ttl_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

#[contract]
pub struct BallotBoxContract;

#[contractimpl]
impl BallotBoxContract {
    /// Initialize the contract with an admin and the answer catalog it reads.
    pub fn initialize(env: Env, admin: Address, catalog: Address) -> Result<(), VoteError> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(VoteError::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::AnswerCatalog, &catalog);
        env.storage()
            .instance()
            .set(&DataKey::Policy, &VotePolicy::default());
        env.storage().instance().set(&DataKey::Initialized, &true);
        extend_ttl_instance(&env);

        events::publish_initialized(&env, admin, catalog);

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    pub fn get_admin(env: Env) -> Result<Address, VoteError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(VoteError::NotInitialized)
    }

    /// Replace the limits applied to every ballot. Admin only.
    pub fn set_vote_policy(env: Env, caller: Address, policy: VotePolicy) -> Result<(), VoteError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        if !policy.is_valid() {
            return Err(VoteError::InvalidPolicy);
        }
        env.storage().instance().set(&DataKey::Policy, &policy);
        extend_ttl_instance(&env);

        events::publish_policy_updated(&env, &policy);
        Ok(())
    }

    pub fn get_vote_policy(env: Env) -> VotePolicy {
        env.storage()
            .instance()
            .get(&DataKey::Policy)
            .unwrap_or_default()
    }

    /// Point the contract at another answer catalog. Admin only.
    pub fn set_answer_catalog(env: Env, caller: Address, catalog: Address) -> Result<(), VoteError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        env.storage()
            .instance()
            .set(&DataKey::AnswerCatalog, &catalog);
        extend_ttl_instance(&env);

        events::publish_catalog_updated(&env, catalog);
        Ok(())
    }

    pub fn get_answer_catalog(env: Env) -> Result<Address, VoteError> {
        env.storage()
            .instance()
            .get(&DataKey::AnswerCatalog)
            .ok_or(VoteError::NotInitialized)
    }

    /// Validate a signed ballot and, if every check passes, record it on the
    /// question contract.
    ///
    /// Anyone may relay a ballot; authenticity comes from the sender and
    /// booth signatures. On failure exactly one [`VoteError`] is returned and
    /// no replay state is written.
    pub fn submit_vote(env: Env, ballot: Ballot) -> Result<VoteReceipt, VoteError> {
        if !Self::is_initialized(env.clone()) {
            return Err(VoteError::NotInitialized);
        }
        let policy = Self::get_vote_policy(env.clone());
        let catalog = AnswerCatalog::new(&env, Self::get_answer_catalog(env.clone())?);
        let chain = ChainState::new(&env);

        let receipt = orchestrator::process(&env, &ballot, &policy, &chain, &catalog, &chain)
            .map_err(|rejection| rejection.reason)?;

        extend_ttl_instance(&env);
        events::publish_vote_accepted(&env, &receipt);
        Ok(receipt)
    }

    // ── Ledger inspection ─────────────────────────────────────────────────

    pub fn is_nonce_used(env: Env, nonce: BytesN<32>) -> bool {
        nonce::is_nonce_used(&env, &nonce)
    }

    pub fn get_nonce_record(env: Env, nonce: BytesN<32>) -> Option<NonceRecord> {
        nonce::nonce_record(&env, &nonce)
    }

    pub fn has_voted(env: Env, question: Address, sender: BytesN<20>) -> bool {
        ReplayGuard::has_voted(&env, &question, &sender)
    }

    pub fn get_vote_receipt(
        env: Env,
        question: Address,
        sender: BytesN<20>,
    ) -> Option<VoteReceipt> {
        ReplayGuard::vote_receipt(&env, &question, &sender)
    }

    pub fn receipt_count(env: Env) -> u64 {
        ReplayGuard::receipt_count(&env)
    }

    // ── Client tooling ────────────────────────────────────────────────────

    /// Digest a voter must sign for `answers` / `vote_tokens`.
    pub fn vote_payload(
        env: Env,
        answers: Vec<u64>,
        vote_tokens: Vec<i128>,
    ) -> Result<BytesN<32>, VoteError> {
        ballot_common::encode_vote_payload(&env, &answers, &vote_tokens).map_err(VoteError::from)
    }

    /// Digest a booth must sign for `answers` / `nonce`.
    pub fn booth_payload(env: Env, answers: Vec<u64>, nonce: BytesN<32>) -> BytesN<32> {
        ballot_common::encode_booth_payload(&env, &answers, &nonce)
    }

    pub fn encoding_version(_env: Env) -> u32 {
        ENCODING_VERSION
    }

    // ── Internal helpers ──────────────────────────────────────────────────

    fn require_admin(env: &Env, caller: &Address) -> Result<(), VoteError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(VoteError::NotInitialized)?;
        if caller != &admin {
            return Err(VoteError::Unauthorized);
        }
        Ok(())
    }
}

//! Read-only adapters over state the ballot box does not own, plus the
//! single write capability used at commit.
//!
//! The orchestrator depends only on the traits below. The live
//! implementations reach the question and answer-catalog contracts through
//! `try_*` cross-contract calls so that a failing or missing collaborator
//! surfaces as a typed rejection instead of aborting the invocation.

use soroban_sdk::{contractclient, Address, Bytes, BytesN, Env, Map, Vec};

use crate::ballot::AnswerRecord;
use crate::errors::VoteError;

// ── Collaborator contract interfaces ─────────────────────────────────────────

/// Interface exposed by every question contract.
#[contractclient(name = "QuestionClient")]
pub trait QuestionInterface {
    /// Festival the question belongs to.
    fn festival(env: Env) -> BytesN<32>;
    /// Whether the question currently accepts votes.
    fn is_active(env: Env) -> bool;
    /// Whether `booth` may co-sign ballots for this question.
    fn is_booth(env: Env, booth: BytesN<20>) -> bool;
    /// Records a vote and returns a reference to it.
    fn vote(
        env: Env,
        answers: Vec<u32>,
        vote_tokens: Vec<i128>,
        sender: BytesN<20>,
        signature: Bytes,
    ) -> BytesN<32>;
}

/// Interface exposed by the answer catalog.
#[contractclient(name = "AnswerCatalogClient")]
pub trait AnswerCatalogInterface {
    fn get_answer(env: Env, id: u64) -> Option<AnswerRecord>;
}

// ── Seams used by the orchestrator ───────────────────────────────────────────

pub trait ChainStateReader {
    fn is_booth_authorized(&self, question: &Address, booth: &BytesN<20>)
        -> Result<bool, VoteError>;

    /// `true` when the question is active and belongs to `festival`.
    fn is_question_active(&self, question: &Address, festival: &BytesN<32>)
        -> Result<bool, VoteError>;
}

pub trait AnswerCatalogReader {
    /// Resolves every id, failing with [`VoteError::UnknownAnswer`] on the
    /// first id the catalog does not hold.
    fn resolve_answers(&self, ids: &Vec<u64>) -> Result<Map<u64, AnswerRecord>, VoteError>;
}

pub trait VoteSubmitter {
    fn submit_vote(
        &self,
        question: &Address,
        answers: &Vec<u32>,
        vote_tokens: &Vec<i128>,
        sender: &BytesN<20>,
        signature: &Bytes,
    ) -> Result<BytesN<32>, VoteError>;
}

// ── Live implementations ─────────────────────────────────────────────────────

/// Question contracts on the current ledger.
pub struct ChainState<'a> {
    env: &'a Env,
}

impl<'a> ChainState<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }
}

impl ChainStateReader for ChainState<'_> {
    fn is_booth_authorized(
        &self,
        question: &Address,
        booth: &BytesN<20>,
    ) -> Result<bool, VoteError> {
        let client = QuestionClient::new(self.env, question);
        match client.try_is_booth(booth) {
            Ok(Ok(authorized)) => Ok(authorized),
            _ => Err(VoteError::Unavailable),
        }
    }

    fn is_question_active(
        &self,
        question: &Address,
        festival: &BytesN<32>,
    ) -> Result<bool, VoteError> {
        let client = QuestionClient::new(self.env, question);
        let owner = match client.try_festival() {
            Ok(Ok(owner)) => owner,
            _ => return Err(VoteError::Unavailable),
        };
        if &owner != festival {
            return Ok(false);
        }
        match client.try_is_active() {
            Ok(Ok(active)) => Ok(active),
            _ => Err(VoteError::Unavailable),
        }
    }
}

impl VoteSubmitter for ChainState<'_> {
    fn submit_vote(
        &self,
        question: &Address,
        answers: &Vec<u32>,
        vote_tokens: &Vec<i128>,
        sender: &BytesN<20>,
        signature: &Bytes,
    ) -> Result<BytesN<32>, VoteError> {
        let client = QuestionClient::new(self.env, question);
        match client.try_vote(answers, vote_tokens, sender, signature) {
            Ok(Ok(tx_ref)) => Ok(tx_ref),
            // The question contract rejected or trapped; nothing was recorded.
            _ => Err(VoteError::CommitFailed),
        }
    }
}

/// Answer catalog contract configured on the ballot box.
pub struct AnswerCatalog<'a> {
    env: &'a Env,
    catalog: Address,
}

impl<'a> AnswerCatalog<'a> {
    pub fn new(env: &'a Env, catalog: Address) -> Self {
        Self { env, catalog }
    }
}

impl AnswerCatalogReader for AnswerCatalog<'_> {
    fn resolve_answers(&self, ids: &Vec<u64>) -> Result<Map<u64, AnswerRecord>, VoteError> {
        let client = AnswerCatalogClient::new(self.env, &self.catalog);
        let mut resolved = Map::new(self.env);
        for id in ids.iter() {
            let record = match client.try_get_answer(&id) {
                Ok(Ok(record)) => record,
                _ => return Err(VoteError::Unavailable),
            };
            match record {
                Some(record) if record.id == id => resolved.set(id, record),
                _ => return Err(VoteError::UnknownAnswer),
            }
        }
        Ok(resolved)
    }
}

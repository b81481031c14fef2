//! Ballot intake state machine.
//!
//! ```text
//! Received → StructurallyValid → AnswersResolved → SignaturesVerified
//!          → BoothAuthorized → ChainConsistent → ReplayChecked
//!          → BudgetChecked → Committed
//! ```
//!
//! Each transition runs one check and the pipeline stops at the first
//! failure, so a ballot violating several rules always reports the same,
//! earliest reason. Only the final transition writes anything.

use ballot_common::{encode_booth_payload, encode_vote_payload, recover_signer};
use soroban_sdk::{log, Bytes, BytesN, Env, Vec};

use crate::ballot::{Ballot, VotePolicy, VoteReceipt};
use crate::errors::VoteError;
use crate::readers::{AnswerCatalogReader, ChainStateReader, VoteSubmitter};
use crate::replay::ReplayGuard;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Stage {
    Received = 0,
    StructurallyValid = 1,
    AnswersResolved = 2,
    SignaturesVerified = 3,
    BoothAuthorized = 4,
    ChainConsistent = 5,
    ReplayChecked = 6,
    BudgetChecked = 7,
    Committed = 8,
}

/// Terminal rejected state: the last stage reached and the single reason.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rejection {
    pub stage: Stage,
    pub reason: VoteError,
}

struct Pipeline<'a> {
    env: &'a Env,
    stage: Stage,
}

impl<'a> Pipeline<'a> {
    fn advance(&mut self, next: Stage) {
        self.stage = next;
    }

    fn reject(&self, reason: VoteError) -> Rejection {
        log!(
            self.env,
            "ballot rejected",
            self.stage as u32,
            reason as u32
        );
        Rejection {
            stage: self.stage,
            reason,
        }
    }
}

/// Runs every check against `ballot` in order and commits it on success.
pub fn process<C, A, S>(
    env: &Env,
    ballot: &Ballot,
    policy: &VotePolicy,
    chain: &C,
    catalog: &A,
    submitter: &S,
) -> Result<VoteReceipt, Rejection>
where
    C: ChainStateReader,
    A: AnswerCatalogReader,
    S: VoteSubmitter,
{
    let mut pipeline = Pipeline {
        env,
        stage: Stage::Received,
    };

    check_structure(ballot, policy).map_err(|e| pipeline.reject(e))?;
    pipeline.advance(Stage::StructurallyValid);

    let chain_indices = resolve_answers(env, ballot, catalog).map_err(|e| pipeline.reject(e))?;
    pipeline.advance(Stage::AnswersResolved);

    verify_signatures(env, ballot).map_err(|e| pipeline.reject(e))?;
    pipeline.advance(Stage::SignaturesVerified);

    match chain.is_booth_authorized(&ballot.question, &ballot.booth) {
        Ok(true) => {}
        Ok(false) => return Err(pipeline.reject(VoteError::UnauthorizedBooth)),
        Err(e) => return Err(pipeline.reject(e)),
    }
    pipeline.advance(Stage::BoothAuthorized);

    match chain.is_question_active(&ballot.question, &ballot.festival) {
        Ok(true) => {}
        Ok(false) => return Err(pipeline.reject(VoteError::InactiveQuestion)),
        Err(e) => return Err(pipeline.reject(e)),
    }
    pipeline.advance(Stage::ChainConsistent);

    let reservation = ReplayGuard::reserve(env, ballot).map_err(|e| pipeline.reject(e))?;
    pipeline.advance(Stage::ReplayChecked);

    check_budget(ballot, policy).map_err(|e| pipeline.reject(e))?;
    pipeline.advance(Stage::BudgetChecked);

    let tx_ref = submitter
        .submit_vote(
            &ballot.question,
            &chain_indices,
            &ballot.vote_tokens,
            &ballot.sender,
            &ballot.signature,
        )
        .map_err(|e| pipeline.reject(e))?;
    let receipt = ReplayGuard::commit(env, reservation, tx_ref).map_err(|e| pipeline.reject(e))?;
    pipeline.advance(Stage::Committed);

    Ok(receipt)
}

/// Lengths, bounds, duplicates and sign of every weight.
pub fn check_structure(ballot: &Ballot, policy: &VotePolicy) -> Result<(), VoteError> {
    let count = ballot.answers.len();
    if count != ballot.vote_tokens.len() || count == 0 || count > policy.max_items {
        return Err(VoteError::MalformedInput);
    }
    for i in 0..count {
        let id = ballot.answers.get_unchecked(i);
        for j in (i + 1)..count {
            if ballot.answers.get_unchecked(j) == id {
                return Err(VoteError::MalformedInput);
            }
        }
    }
    if ballot.vote_tokens.iter().any(|weight| weight < 0) {
        return Err(VoteError::MalformedInput);
    }
    Ok(())
}

/// Resolves answers and returns their chain indices in ballot order.
///
/// Unknown ids are reported before any mismatch, and a question mismatch
/// before a festival mismatch.
fn resolve_answers<A: AnswerCatalogReader>(
    env: &Env,
    ballot: &Ballot,
    catalog: &A,
) -> Result<Vec<u32>, VoteError> {
    let records = catalog.resolve_answers(&ballot.answers)?;

    let mut chain_indices = Vec::new(env);
    for id in ballot.answers.iter() {
        let record = records.get(id).ok_or(VoteError::UnknownAnswer)?;
        if record.question != ballot.question {
            return Err(VoteError::QuestionMismatch);
        }
        chain_indices.push_back(record.chain_index);
    }
    for id in ballot.answers.iter() {
        let record = records.get(id).ok_or(VoteError::UnknownAnswer)?;
        if record.festival != ballot.festival {
            return Err(VoteError::FestivalMismatch);
        }
    }
    Ok(chain_indices)
}

fn digest_bytes(env: &Env, digest: &BytesN<32>) -> Bytes {
    Bytes::from_array(env, &digest.to_array())
}

/// Sender over the vote payload, then booth over the booth payload.
fn verify_signatures(env: &Env, ballot: &Ballot) -> Result<(), VoteError> {
    let vote_digest = encode_vote_payload(env, &ballot.answers, &ballot.vote_tokens)?;
    let signer = recover_signer(env, &digest_bytes(env, &vote_digest), &ballot.signature)?;
    if signer != ballot.sender {
        return Err(VoteError::InvalidSignature);
    }

    let booth_digest = encode_booth_payload(env, &ballot.answers, &ballot.nonce);
    let booth = recover_signer(env, &digest_bytes(env, &booth_digest), &ballot.booth_signature)?;
    if booth != ballot.booth {
        return Err(VoteError::InvalidSignature);
    }
    Ok(())
}

/// Sum of weights against the policy budget; overflow counts as exceeded.
pub fn check_budget(ballot: &Ballot, policy: &VotePolicy) -> Result<(), VoteError> {
    let mut total: i128 = 0;
    for weight in ballot.vote_tokens.iter() {
        total = total
            .checked_add(weight)
            .ok_or(VoteError::BudgetExceeded)?;
    }
    if total > policy.max_budget {
        return Err(VoteError::BudgetExceeded);
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

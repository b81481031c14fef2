//! # Canonical Ballot Encoding
//!
//! Voters and booths sign a keccak-256 digest of a fixed, versioned byte
//! layout. Layout version 1 is byte-identical to Solidity's
//! `keccak256(abi.encodePacked(uint256[] a, uint256[] b))` so that web3 /
//! ethers clients can produce it with `soliditySha3`:
//!
//! ```text
//! vote  : be256(answers[0]) ‖ … ‖ be256(answers[n-1]) ‖ be256(tokens[0]) ‖ … ‖ be256(tokens[n-1])
//! booth : be256(answers[0]) ‖ … ‖ be256(answers[n-1]) ‖ nonce(32)
//! ```
//!
//! Every element is a 32-byte big-endian word. Order is significant:
//! reordering the same answers yields a different digest.

use soroban_sdk::{Bytes, BytesN, Env, Vec};

use crate::CommonError;

/// Version of the byte layout documented above.
pub const ENCODING_VERSION: u32 = 1;

const WORD: usize = 32;

fn push_word(msg: &mut Bytes, value: u128) {
    let mut word = [0u8; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    msg.extend_from_array(&word);
}

fn push_answers(msg: &mut Bytes, answers: &Vec<u64>) {
    for id in answers.iter() {
        push_word(msg, u128::from(id));
    }
}

/// Builds the raw vote pre-image (answers followed by vote tokens).
///
/// # Errors
/// [`CommonError::InvalidInput`] if the sequences differ in length or any
/// weight is negative. Nothing is encoded in that case.
pub fn vote_preimage(
    env: &Env,
    answers: &Vec<u64>,
    vote_tokens: &Vec<i128>,
) -> Result<Bytes, CommonError> {
    if answers.len() != vote_tokens.len() {
        return Err(CommonError::InvalidInput);
    }
    if vote_tokens.iter().any(|weight| weight < 0) {
        return Err(CommonError::InvalidInput);
    }

    let mut msg = Bytes::new(env);
    push_answers(&mut msg, answers);
    for weight in vote_tokens.iter() {
        // Non-negative, checked above.
        push_word(&mut msg, weight as u128);
    }
    Ok(msg)
}

/// Builds the raw booth pre-image (answers followed by the nonce).
pub fn booth_preimage(env: &Env, answers: &Vec<u64>, nonce: &BytesN<32>) -> Bytes {
    let mut msg = Bytes::new(env);
    push_answers(&mut msg, answers);
    msg.extend_from_array(&nonce.to_array());
    msg
}

/// Digest the sender signs: `keccak256(vote_preimage(answers, vote_tokens))`.
pub fn encode_vote_payload(
    env: &Env,
    answers: &Vec<u64>,
    vote_tokens: &Vec<i128>,
) -> Result<BytesN<32>, CommonError> {
    let msg = vote_preimage(env, answers, vote_tokens)?;
    Ok(env.crypto().keccak256(&msg).into())
}

/// Digest the booth signs: `keccak256(booth_preimage(answers, nonce))`.
pub fn encode_booth_payload(env: &Env, answers: &Vec<u64>, nonce: &BytesN<32>) -> BytesN<32> {
    let msg = booth_preimage(env, answers, nonce);
    env.crypto().keccak256(&msg).into()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

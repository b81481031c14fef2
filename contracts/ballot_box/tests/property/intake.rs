//! Property-based tests for ballot intake.
//!
//! Invariants tested:
//! - a ballot with exactly one fault is rejected with that fault's error
//! - a rejected ballot leaves the nonce ledger, the voted ledger and the
//!   question contract untouched
//! - a ballot is accepted iff the sum of its weights is within the budget

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::{vec, Bytes};

use ballot_box::VoteError;
use crate::common::{eth_address, setup_test_env, sign, wallet, FOREIGN_ANSWER, TestContext};

#[derive(Arbitrary, Clone, Copy, Debug)]
enum Fault {
    Clean,
    DuplicateAnswer,
    UnknownAnswer,
    ForeignAnswer,
    TamperedWeights,
    ShortSignature,
    OffCurveSignature,
    RogueBooth,
    Inactive,
    OverBudget,
    QuestionDown,
    CatalogDown,
}

impl Fault {
    fn expected(self) -> Option<VoteError> {
        match self {
            Fault::Clean => None,
            Fault::DuplicateAnswer => Some(VoteError::MalformedInput),
            Fault::UnknownAnswer => Some(VoteError::UnknownAnswer),
            Fault::ForeignAnswer => Some(VoteError::QuestionMismatch),
            Fault::TamperedWeights | Fault::ShortSignature | Fault::OffCurveSignature => {
                Some(VoteError::InvalidSignature)
            }
            Fault::RogueBooth => Some(VoteError::UnauthorizedBooth),
            Fault::Inactive => Some(VoteError::InactiveQuestion),
            Fault::OverBudget => Some(VoteError::BudgetExceeded),
            Fault::QuestionDown => Some(VoteError::CommitFailed),
            Fault::CatalogDown => Some(VoteError::Unavailable),
        }
    }

    fn apply(self, ctx: &TestContext, nonce: u8) -> ballot_box::Ballot {
        let env = &ctx.env;
        match self {
            Fault::Clean => ctx.ballot(&[1, 2], &[3, 4], nonce),
            Fault::DuplicateAnswer => ctx.ballot(&[2, 2], &[3, 4], nonce),
            Fault::UnknownAnswer => ctx.ballot(&[1, 4242], &[3, 4], nonce),
            Fault::ForeignAnswer => ctx.ballot(&[FOREIGN_ANSWER], &[1], nonce),
            Fault::TamperedWeights => {
                let mut ballot = ctx.ballot(&[1, 2], &[3, 4], nonce);
                ballot.vote_tokens = vec![env, 4i128, 3i128];
                ballot
            }
            Fault::ShortSignature => {
                let mut ballot = ctx.ballot(&[1, 2], &[3, 4], nonce);
                ballot.signature = Bytes::from_array(env, &[0x1b; 64]);
                ballot
            }
            Fault::OffCurveSignature => {
                // No curve point has x = 5.
                let mut ballot = ctx.ballot(&[1, 2], &[3, 4], nonce);
                let mut raw = [0u8; 65];
                ballot.signature.copy_into_slice(&mut raw);
                raw[..32].copy_from_slice(&[0u8; 32]);
                raw[31] = 5;
                ballot.signature = Bytes::from_array(env, &raw);
                ballot
            }
            Fault::RogueBooth => {
                let rogue = wallet(&[0x5e; 32]);
                let mut ballot = ctx.ballot(&[1, 2], &[3, 4], nonce);
                let digest = ctx.client.booth_payload(&ballot.answers, &ballot.nonce);
                ballot.booth = eth_address(env, &rogue);
                ballot.booth_signature = sign(env, &rogue, &digest);
                ballot
            }
            Fault::Inactive => {
                ctx.question.set_active(&false);
                ctx.ballot(&[1, 2], &[3, 4], nonce)
            }
            Fault::OverBudget => ctx.ballot(&[1, 2], &[60, 41], nonce),
            Fault::QuestionDown => {
                ctx.question.set_failing(&true);
                ctx.ballot(&[1, 2], &[3, 4], nonce)
            }
            Fault::CatalogDown => {
                ctx.catalog.set_offline(&true);
                ctx.ballot(&[1, 2], &[3, 4], nonce)
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_single_fault_single_reason(fault in any::<Fault>(), nonce in any::<u8>()) {
        let ctx = setup_test_env();
        let ballot = fault.apply(&ctx, nonce);

        match fault.expected() {
            None => {
                let receipt = ctx.client.submit_vote(&ballot);
                prop_assert_eq!(receipt.receipt_id, 1);
                prop_assert!(ctx.client.is_nonce_used(&ballot.nonce));
                prop_assert!(ctx.client.has_voted(&ballot.question, &ballot.sender));
            }
            Some(expected) => {
                prop_assert_eq!(ctx.client.try_submit_vote(&ballot), Err(Ok(expected)));
                prop_assert!(ctx.ledger_untouched(&ballot));
            }
        }
    }

    #[test]
    fn prop_budget_boundary(weights in prop::collection::vec(0i128..=60, 1..=3)) {
        let ctx = setup_test_env();
        let answers: std::vec::Vec<u64> = (1..=weights.len() as u64).collect();
        let ballot = ctx.ballot(&answers, &weights, 1);
        let total: i128 = weights.iter().sum();

        let result = ctx.client.try_submit_vote(&ballot);
        if total <= ctx.client.get_vote_policy().max_budget {
            prop_assert!(result.is_ok());
            prop_assert_eq!(ctx.client.receipt_count(), 1);
        } else {
            prop_assert_eq!(result, Err(Ok(VoteError::BudgetExceeded)));
            prop_assert!(ctx.ledger_untouched(&ballot));
        }
    }
}

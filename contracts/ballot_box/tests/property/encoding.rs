//! Payload digests against an independent `abi.encodePacked` + keccak256.
//!
//! Invariants tested:
//! - the vote payload is keccak256 over 32-byte big-endian answers then weights
//! - the booth payload is keccak256 over the same answers then the raw nonce
//! - swapping two different answers changes the vote payload

use ethers_core::utils::keccak256;
use proptest::prelude::*;
use soroban_sdk::{BytesN, Env, Vec};

use ballot_common::{encode_booth_payload, encode_vote_payload};

fn word_u64(out: &mut std::vec::Vec<u8>, v: u64) {
    out.extend_from_slice(&[0u8; 24]);
    out.extend_from_slice(&v.to_be_bytes());
}

fn word_i128(out: &mut std::vec::Vec<u8>, v: i128) {
    out.extend_from_slice(&[0u8; 16]);
    out.extend_from_slice(&v.to_be_bytes());
}

fn items() -> impl Strategy<Value = (std::vec::Vec<u64>, std::vec::Vec<i128>)> {
    (1usize..=10).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<u64>(), n),
            prop::collection::vec(0i128..=i128::MAX, n),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_vote_payload_is_packed_keccak((answers, tokens) in items()) {
        let env = Env::default();
        let digest = encode_vote_payload(
            &env,
            &Vec::from_slice(&env, &answers),
            &Vec::from_slice(&env, &tokens),
        )
        .unwrap();

        let mut packed = std::vec::Vec::new();
        answers.iter().for_each(|a| word_u64(&mut packed, *a));
        tokens.iter().for_each(|t| word_i128(&mut packed, *t));
        prop_assert_eq!(digest.to_array(), keccak256(&packed));
    }

    #[test]
    fn prop_booth_payload_is_packed_keccak(
        answers in prop::collection::vec(any::<u64>(), 0..10),
        nonce in prop::array::uniform32(any::<u8>()),
    ) {
        let env = Env::default();
        let digest = encode_booth_payload(
            &env,
            &Vec::from_slice(&env, &answers),
            &BytesN::from_array(&env, &nonce),
        );

        let mut packed = std::vec::Vec::new();
        answers.iter().for_each(|a| word_u64(&mut packed, *a));
        packed.extend_from_slice(&nonce);
        prop_assert_eq!(digest.to_array(), keccak256(&packed));
    }

    #[test]
    fn prop_answer_order_is_signed(a in any::<u64>(), b in any::<u64>(), w in 0i128..1000) {
        prop_assume!(a != b);
        let env = Env::default();
        let tokens = Vec::from_slice(&env, &[w, w]);
        let forward = encode_vote_payload(&env, &Vec::from_slice(&env, &[a, b]), &tokens).unwrap();
        let reverse = encode_vote_payload(&env, &Vec::from_slice(&env, &[b, a]), &tokens).unwrap();
        prop_assert_ne!(forward, reverse);
    }
}

use crate::ballot::{VotePolicy, VoteReceipt};
use soroban_sdk::{symbol_short, Address, BytesN, Env};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub catalog: Address,
    pub timestamp: u64,
}

/// Event published when the admin changes the vote policy.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyUpdatedEvent {
    pub max_items: u32,
    pub max_budget: i128,
    pub timestamp: u64,
}

/// Event published when the admin points the contract at another catalog.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CatalogUpdatedEvent {
    pub catalog: Address,
    pub timestamp: u64,
}

/// Event published once per accepted ballot.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteAcceptedEvent {
    pub receipt_id: u64,
    pub festival: BytesN<32>,
    pub sender: BytesN<20>,
    pub booth: BytesN<20>,
    pub nonce: BytesN<32>,
    pub tx_ref: BytesN<32>,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, catalog: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        catalog,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_policy_updated(env: &Env, policy: &VotePolicy) {
    let topics = (symbol_short!("POLICY"),);
    let data = PolicyUpdatedEvent {
        max_items: policy.max_items,
        max_budget: policy.max_budget,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_catalog_updated(env: &Env, catalog: Address) {
    let topics = (symbol_short!("CATALOG"),);
    let data = CatalogUpdatedEvent {
        catalog,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a ballot is accepted.
/// Topics carry the question so indexers can filter per poll.
pub fn publish_vote_accepted(env: &Env, receipt: &VoteReceipt) {
    let topics = (symbol_short!("VOTE"), receipt.question.clone());
    let data = VoteAcceptedEvent {
        receipt_id: receipt.receipt_id,
        festival: receipt.festival.clone(),
        sender: receipt.sender.clone(),
        booth: receipt.booth.clone(),
        nonce: receipt.nonce.clone(),
        tx_ref: receipt.tx_ref.clone(),
        timestamp: receipt.timestamp,
    };
    env.events().publish(topics, data);
}

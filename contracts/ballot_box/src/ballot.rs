use soroban_sdk::{contracttype, Address, Bytes, BytesN, Vec};

/// Default upper bound on answers per ballot.
pub const DEFAULT_MAX_ITEMS: u32 = 10;
/// Default upper bound on the sum of vote tokens per ballot.
pub const DEFAULT_MAX_BUDGET: i128 = 100;

/// Storage keys for the contract
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    Initialized,
    AnswerCatalog,
    Policy,
    ReceiptCount,
    /// `(question, sender)` → [`VoteReceipt`]
    Voted(Address, BytesN<20>),
}

/// One inbound vote submission, immutable once received.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ballot {
    pub festival: BytesN<32>,
    pub question: Address,
    pub booth: BytesN<20>,
    pub sender: BytesN<20>,
    pub answers: Vec<u64>,
    pub vote_tokens: Vec<i128>,
    pub nonce: BytesN<32>,
    /// Sender's EIP-191 signature over the vote payload.
    pub signature: Bytes,
    /// Booth's EIP-191 signature over the booth payload.
    pub booth_signature: Bytes,
}

/// Catalog entry for an answer, as returned by the answer catalog.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnswerRecord {
    pub id: u64,
    pub question: Address,
    pub festival: BytesN<32>,
    /// Position of the answer inside the question contract.
    pub chain_index: u32,
}

/// Proof of an accepted ballot.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteReceipt {
    pub receipt_id: u64,
    pub question: Address,
    pub festival: BytesN<32>,
    pub sender: BytesN<20>,
    pub booth: BytesN<20>,
    pub nonce: BytesN<32>,
    /// Reference returned by the question contract for the submitted vote.
    pub tx_ref: BytesN<32>,
    pub ledger: u32,
    pub timestamp: u64,
}

/// Admin-managed limits applied to every ballot.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VotePolicy {
    pub max_items: u32,
    pub max_budget: i128,
}

impl Default for VotePolicy {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            max_budget: DEFAULT_MAX_BUDGET,
        }
    }
}

impl VotePolicy {
    pub fn is_valid(&self) -> bool {
        self.max_items >= 1 && self.max_budget >= 1
    }
}

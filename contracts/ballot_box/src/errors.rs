use ballot_common::CommonError;
use soroban_sdk::contracttype;

/// Error categories for classifying rejections.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Validation errors: malformed or inconsistent ballots
    Validation = 1,
    /// Authorization errors: bad signatures, unknown booths, non-admin callers
    Authorization = 2,
    /// Not found errors: references to data the catalog does not hold
    NotFound = 3,
    /// State conflict errors: replays, double votes, closed questions
    StateConflict = 4,
    /// Transient errors: temporary failures that may succeed on retry
    Transient = 5,
    /// System errors: contract lifecycle and configuration
    System = 6,
}

/// Every reason a call into the ballot box can fail.
///
/// Codes 1–49 follow the shared [`CommonError`] ranges; ballot rejections
/// start at 100. A rejected ballot always carries exactly one code.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VoteError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 10,
    InvalidPolicy = 30,
    MalformedInput = 100,
    UnknownAnswer = 101,
    QuestionMismatch = 102,
    FestivalMismatch = 103,
    InvalidSignature = 104,
    UnauthorizedBooth = 105,
    InactiveQuestion = 106,
    ReplayedNonce = 107,
    AlreadyVoted = 108,
    BudgetExceeded = 109,
    CommitFailed = 110,
    Unavailable = 111,
}

impl VoteError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            VoteError::MalformedInput
            | VoteError::QuestionMismatch
            | VoteError::FestivalMismatch
            | VoteError::BudgetExceeded => ErrorCategory::Validation,
            VoteError::Unauthorized
            | VoteError::InvalidSignature
            | VoteError::UnauthorizedBooth => ErrorCategory::Authorization,
            VoteError::UnknownAnswer => ErrorCategory::NotFound,
            VoteError::InactiveQuestion
            | VoteError::ReplayedNonce
            | VoteError::AlreadyVoted => ErrorCategory::StateConflict,
            VoteError::CommitFailed | VoteError::Unavailable => ErrorCategory::Transient,
            VoteError::NotInitialized
            | VoteError::AlreadyInitialized
            | VoteError::InvalidPolicy => ErrorCategory::System,
        }
    }

    /// Returns whether resubmitting may succeed.
    ///
    /// Everything else is a permanent rejection: the identical ballot will
    /// fail identically. Callers retry with a fresh nonce.
    pub fn retryable(&self) -> bool {
        matches!(self, VoteError::CommitFailed | VoteError::Unavailable)
    }

    /// Returns the static human-readable message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            VoteError::NotInitialized => "Contract has not been initialized",
            VoteError::AlreadyInitialized => "Contract is already initialized",
            VoteError::Unauthorized => "Caller is not authorized for this operation",
            VoteError::InvalidPolicy => "Vote policy limits must be at least 1",
            VoteError::MalformedInput => "Ballot is malformed",
            VoteError::UnknownAnswer => "Ballot references an unknown answer",
            VoteError::QuestionMismatch => "Answer does not belong to the question",
            VoteError::FestivalMismatch => "Answer does not belong to the festival",
            VoteError::InvalidSignature => "Signature is invalid",
            VoteError::UnauthorizedBooth => "Booth is not authorized for the question",
            VoteError::InactiveQuestion => "Question is not active for the festival",
            VoteError::ReplayedNonce => "Nonce has already been used",
            VoteError::AlreadyVoted => "Sender has already voted on this question",
            VoteError::BudgetExceeded => "Vote tokens exceed the allowed budget",
            VoteError::CommitFailed => "Vote could not be committed, retry with a new nonce",
            VoteError::Unavailable => "Chain state is unavailable, please retry later",
        }
    }
}

impl From<CommonError> for VoteError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::InvalidInput => VoteError::MalformedInput,
            CommonError::NonceAlreadyUsed => VoteError::ReplayedNonce,
            CommonError::InvalidSignature => VoteError::InvalidSignature,
        }
    }
}

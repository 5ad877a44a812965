//! Error types for ledger, terms, and membership operations.
//!
//! Every failure is fatal to the call that raised it: the host discards all
//! effects of a call that returns an error, so no variant is retried or
//! recovered from inside this crate.

use crate::types::{Account, Asset, Symbol, SymbolCode};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error raised by a ledger, terms, membership, or configuration operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    // Validation
    /// Malformed account name
    #[error("invalid account name: {0}")]
    InvalidAccount(String),

    /// Malformed symbol code or precision
    #[error("invalid symbol name: {0}")]
    InvalidSymbol(String),

    /// Malformed or non-positive quantity
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Quantity symbol does not match the supply record's symbol exactly
    #[error("symbol precision mismatch: expected {expected}, got {got}")]
    PrecisionMismatch { expected: Symbol, got: Symbol },

    /// Amount arithmetic overflowed
    #[error("amount overflow")]
    AmountOverflow,

    /// Terms document reference is empty
    #[error("member terms cannot be empty")]
    EmptyTerms,

    /// Terms document reference exceeds the length limit
    #[error("member terms document url should be at most {0} characters long")]
    TermsTooLong(usize),

    /// Terms document hash is empty
    #[error("member terms document hash cannot be empty")]
    EmptyTermsHash,

    /// Terms document hash exceeds the length limit
    #[error("member terms document hash should be at most {0} characters long")]
    TermsHashTooLong(usize),

    // Authorization
    /// The current call does not carry the required identity's authority
    #[error("missing required authority of {0}")]
    MissingAuthority(Account),

    // State
    /// A supply record already exists for the symbol
    #[error("token with symbol {0} already exists")]
    SymbolExists(SymbolCode),

    /// No supply record exists for the symbol
    #[error("token with symbol {code} does not exist, create token before {action}")]
    SymbolNotFound {
        code: SymbolCode,
        action: &'static str,
    },

    /// Burn-path variant of a missing supply record
    #[error("attempting to burn a token unknown to this contract: {0}")]
    UnknownToContract(SymbolCode),

    /// Issuance would push supply past the ceiling
    #[error("quantity exceeds available supply: {available} available")]
    ExceedsAvailableSupply { available: Asset },

    /// Debit against a missing or short balance record
    #[error("overdrawn balance: {account} has {have}, needs {need}")]
    OverdrawnBalance {
        account: Account,
        have: Asset,
        need: Asset,
    },

    /// Ordinary movement attempted while the symbol is transfer-locked
    #[error("token {0} is transfer locked, the issuer must unlock first")]
    TransferLocked(SymbolCode),

    /// Transfer where sender and recipient are the same account
    #[error("cannot transfer to self")]
    SelfTransfer,

    /// Transfer recipient is not a resolvable account
    #[error("to account does not exist: {0}")]
    UnknownAccount(Account),

    /// Proposed terms equal the latest entry exactly
    #[error("next member terms cannot be a duplicate of the latest")]
    DuplicateTerms,

    /// The terms log is empty
    #[error("no valid member terms found")]
    NoTermsDefined,

    /// No terms record exists at the given version
    #[error("existing terms not found for version {0}")]
    TermsVersionNotFound(u64),

    /// Agreed hash does not match the latest terms hash
    #[error("agreed terms are not the latest")]
    StaleAgreement,

    /// Unregistration for an account with no membership record
    #[error("member {0} is not registered")]
    NotRegistered(Account),
}

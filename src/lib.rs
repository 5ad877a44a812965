//! Fungible-token accounting core with a member-terms agreement workflow.
//!
//! This crate tracks per-symbol token supply, per-account balances, an
//! append-only versioned log of member terms documents, and the set of
//! accounts that have agreed to the latest terms. Calls arrive one at a
//! time from a host that handles authentication, durability, and replay
//! protection; the host is modeled by the [`Host`] trait.
//!
//! # Key Components
//!
//! - [`Contract`]: one deployment - owner identity plus all persisted state
//! - [`TokenLedger`]: supply and balance accounting (create/issue/transfer/burn/unlock)
//! - [`TermsLog`]: append-only, version-numbered member terms documents
//! - [`MembershipRegistry`]: which terms version each account agreed to
//! - [`ContractConfig`]: singleton notification-target configuration
//! - [`CallContext`]: in-process [`Host`] implementation for tests and embedding
//!
//! # Example
//!
//! ```
//! use accord_ledger::{Account, Asset, CallContext, Contract, Symbol};
//!
//! let owner = Account::new("accord").unwrap();
//! let issuer = Account::new("issuer").unwrap();
//! let symbol = Symbol::new("TOK", 4).unwrap();
//!
//! let mut contract = Contract::new(owner.clone());
//! let host = CallContext::new()
//!     .with_auth(owner)
//!     .with_auth(issuer.clone());
//!
//! contract
//!     .create(&host, issuer.clone(), Asset::new(1_000_0000, symbol), false)
//!     .unwrap();
//! contract
//!     .issue(&host, issuer.clone(), Asset::new(400_0000, symbol), "genesis")
//!     .unwrap();
//! assert_eq!(contract.balance_of(&issuer, &symbol.code()).unwrap().amount(), 400_0000);
//! ```

pub mod config;
pub mod contract;
pub mod error;
pub mod host;
pub mod ledger;
pub mod membership;
pub mod store;
pub mod terms;
pub mod types;

// Re-export main types
pub use config::{ConfigRecord, ContractConfig};
pub use contract::Contract;
pub use error::{LedgerError, Result};
pub use host::{CallContext, Host, Notification};
pub use ledger::{BalanceRecord, SupplyRecord, TokenLedger};
pub use membership::{MembershipRecord, MembershipRegistry};
pub use store::Table;
pub use terms::{content_hash, TermsLog, TermsRecord};
pub use types::{Account, Asset, Symbol, SymbolCode};

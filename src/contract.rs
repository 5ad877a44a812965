//! One deployment of the contract: owner identity plus all persisted state.
//!
//! [`Contract`] is the call surface a host dispatches into. Each method is
//! one externally visible operation; it either completes and commits its
//! writes or returns an error having written nothing.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigRecord, ContractConfig};
use crate::error::Result;
use crate::host::Host;
use crate::ledger::{SupplyRecord, TokenLedger};
use crate::membership::{MembershipRecord, MembershipRegistry};
use crate::terms::{TermsLog, TermsRecord};
use crate::types::{Account, Asset, SymbolCode};

/// Full contract state for one deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    owner: Account,
    ledger: TokenLedger,
    terms: TermsLog,
    members: MembershipRegistry,
    config: ContractConfig,
}

impl Contract {
    /// A fresh deployment owned by `owner`, with no tokens, terms, or
    /// members.
    pub fn new(owner: Account) -> Self {
        Self {
            owner,
            ledger: TokenLedger::new(),
            terms: TermsLog::new(),
            members: MembershipRegistry::new(),
            config: ContractConfig::new(),
        }
    }

    /// The deployment owner.
    pub fn owner(&self) -> &Account {
        &self.owner
    }

    // --- token operations ---

    /// Create a new token with a fixed supply ceiling. Owner-only.
    pub fn create(
        &mut self,
        host: &dyn Host,
        issuer: Account,
        max_supply: Asset,
        transfer_locked: bool,
    ) -> Result<()> {
        self.ledger
            .create(host, &self.owner, issuer, max_supply, transfer_locked)
    }

    /// Issue tokens to `to`, growing circulating supply. Issuer-only.
    pub fn issue(
        &mut self,
        host: &dyn Host,
        to: Account,
        quantity: Asset,
        memo: &str,
    ) -> Result<()> {
        self.ledger
            .issue(host, &mut self.config, &self.owner, to, quantity, memo)
    }

    /// Move tokens `from` → `to`. Sender-authorized; issuer-sanctioned
    /// while the token is transfer-locked.
    pub fn transfer(
        &mut self,
        host: &dyn Host,
        from: &Account,
        to: &Account,
        quantity: Asset,
        memo: &str,
    ) -> Result<()> {
        self.ledger
            .transfer(host, &mut self.config, &self.owner, from, to, quantity, memo)
    }

    /// Destroy tokens from `from`'s balance, shrinking supply.
    pub fn burn(&mut self, host: &dyn Host, from: &Account, quantity: Asset) -> Result<()> {
        self.ledger.burn(host, from, quantity)
    }

    /// Clear a token's transfer lock. Issuer-only, idempotent.
    pub fn unlock(&mut self, host: &dyn Host, code: &SymbolCode) -> Result<()> {
        self.ledger.unlock(host, code)
    }

    // --- terms and membership operations ---

    /// Publish a new terms version. Owner-only. Returns the version number.
    pub fn new_terms(
        &mut self,
        host: &dyn Host,
        terms: impl Into<String>,
        hash: impl Into<String>,
    ) -> Result<u64> {
        self.terms.append(host, &self.owner, terms, hash)
    }

    /// Correct the document reference of an existing terms version in
    /// place. Owner-only. The hash is immutable.
    pub fn update_terms(
        &mut self,
        host: &dyn Host,
        version: u64,
        new_terms: impl Into<String>,
    ) -> Result<()> {
        self.terms.amend(host, &self.owner, version, new_terms)
    }

    /// Record `sender`'s agreement to the latest terms. `agreed_hash`
    /// must match the latest version's hash exactly.
    pub fn register(&mut self, host: &dyn Host, sender: &Account, agreed_hash: &str) -> Result<()> {
        self.members.register(host, &self.terms, sender, agreed_hash)
    }

    /// Remove `sender` from the member registry.
    pub fn unregister(&mut self, host: &dyn Host, sender: &Account) -> Result<()> {
        self.members.unregister(host, sender)
    }

    /// Replace the notification-target configuration. Owner-only.
    pub fn update_config(
        &mut self,
        host: &dyn Host,
        notify_target: Option<Account>,
    ) -> Result<()> {
        self.config.update(host, &self.owner, notify_target)
    }

    // --- read accessors ---

    /// An account's balance of a symbol. `None` when no row exists.
    pub fn balance_of(&self, account: &Account, code: &SymbolCode) -> Option<Asset> {
        self.ledger.balance_of(account, code)
    }

    /// The supply record for a symbol, if the token exists.
    pub fn supply_of(&self, code: &SymbolCode) -> Option<&SupplyRecord> {
        self.ledger.supply_of(code)
    }

    /// The latest published terms, if any.
    pub fn latest_terms(&self) -> Option<&TermsRecord> {
        self.terms.latest().ok()
    }

    /// A specific terms version.
    pub fn terms_version(&self, version: u64) -> Option<&TermsRecord> {
        self.terms.get(version)
    }

    /// An account's membership record, if registered.
    pub fn member(&self, account: &Account) -> Option<&MembershipRecord> {
        self.members.get(account)
    }

    /// Number of registered members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// The singleton configuration, if it has been written.
    pub fn config(&self) -> Option<&ConfigRecord> {
        self.config.get()
    }

    /// Direct read access to the token ledger.
    pub fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }
}

//! The host execution environment seam.
//!
//! The host delivers authenticated calls one at a time and persists state
//! between them. This crate only needs three things from it: authorization
//! assertions, account resolution, and a best-effort notification channel.
//! [`CallContext`] is the in-process implementation used by tests and
//! embedders that drive the contract directly.

use std::cell::RefCell;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::types::{Account, Asset};

/// Event payload delivered to notified accounts' observers.
///
/// Best-effort side channel; never used for control flow and carries no
/// return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// Tokens moved between two accounts.
    Transfer {
        from: Account,
        to: Account,
        quantity: Asset,
        memo: String,
    },
    /// Tokens destroyed from an account's balance.
    Burn { from: Account, quantity: Asset },
}

/// Host collaborator contract.
///
/// One implementation per embedding: the production host wires these to its
/// signature checks and observer registry, [`CallContext`] answers from
/// in-memory sets.
pub trait Host {
    /// Abort the call unless the current invocation carries `account`'s
    /// authority.
    fn require_auth(&self, account: &Account) -> Result<()>;

    /// Whether `account` resolves to a known account.
    fn is_account(&self, account: &Account) -> bool;

    /// Inform the listed accounts' observers of an event. Best effort.
    fn notify(&self, recipients: &[&Account], event: &Notification);
}

/// In-process [`Host`] carrying the authority set of one call.
///
/// Accounts added with [`with_auth`](Self::with_auth) are both authorized
/// and resolvable; [`with_account`](Self::with_account) adds resolvable
/// accounts with no authority. Emitted notifications are recorded for
/// inspection.
#[derive(Debug, Default)]
pub struct CallContext {
    authorized: BTreeSet<Account>,
    known: BTreeSet<Account>,
    notifications: RefCell<Vec<(Vec<Account>, Notification)>>,
}

impl CallContext {
    /// An empty context: no authority, no known accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account whose authority the current call carries.
    pub fn with_auth(mut self, account: Account) -> Self {
        self.known.insert(account.clone());
        self.authorized.insert(account);
        self
    }

    /// Add a resolvable account that has not authorized the call.
    pub fn with_account(mut self, account: Account) -> Self {
        self.known.insert(account);
        self
    }

    /// Notifications emitted so far, oldest first.
    pub fn notifications(&self) -> Vec<(Vec<Account>, Notification)> {
        self.notifications.borrow().clone()
    }
}

impl Host for CallContext {
    fn require_auth(&self, account: &Account) -> Result<()> {
        if self.authorized.contains(account) {
            Ok(())
        } else {
            Err(LedgerError::MissingAuthority(account.clone()))
        }
    }

    fn is_account(&self, account: &Account) -> bool {
        self.known.contains(account)
    }

    fn notify(&self, recipients: &[&Account], event: &Notification) {
        tracing::debug!(recipients = recipients.len(), event = ?event, "notify");
        self.notifications.borrow_mut().push((
            recipients.iter().map(|a| (*a).clone()).collect(),
            event.clone(),
        ));
    }
}

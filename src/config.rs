//! Singleton contract configuration.
//!
//! One `ConfigRecord` per deployment holds the account notified alongside
//! the two parties of every transfer. The record is created lazily with its
//! default value the first time the transfer path reads it, and persisted
//! immediately (owner pays) so later reads are plain lookups.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::host::Host;
use crate::types::Account;

/// The persisted configuration value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    /// Extra account informed of every transfer. `None` means only the two
    /// transfer parties are notified.
    pub notify_target: Option<Account>,
}

/// Singleton holder with lazy init-on-first-read semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractConfig {
    record: Option<ConfigRecord>,
    payer: Option<Account>,
}

impl ContractConfig {
    /// An unset configuration; the first read materializes the default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration, inserting a persisted default (owner pays)
    /// when none exists yet.
    pub fn get_or_init(&mut self, owner: &Account) -> &ConfigRecord {
        if self.record.is_none() {
            tracing::debug!(owner = %owner, "materializing default contract config");
            self.payer = Some(owner.clone());
        }
        self.record.get_or_insert_with(ConfigRecord::default)
    }

    /// Replace the singleton. Owner-only.
    pub fn update(
        &mut self,
        host: &dyn Host,
        owner: &Account,
        notify_target: Option<Account>,
    ) -> Result<()> {
        host.require_auth(owner)?;
        tracing::info!(notify_target = ?notify_target, "contract config updated");
        self.record = Some(ConfigRecord { notify_target });
        self.payer = Some(owner.clone());
        Ok(())
    }

    /// The current record without materializing a default.
    pub fn get(&self) -> Option<&ConfigRecord> {
        self.record.as_ref()
    }

    /// Storage payer recorded for the singleton, if it exists.
    pub fn payer(&self) -> Option<&Account> {
        self.payer.as_ref()
    }
}

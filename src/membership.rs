//! The membership registry.
//!
//! Records which terms version each account has agreed to. An account may
//! only agree to the current latest terms; re-registering after a new terms
//! append bumps the recorded version in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::host::Host;
use crate::store::Table;
use crate::terms::TermsLog;
use crate::types::Account;

/// One account's standing agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRecord {
    /// The terms log version the account last agreed to.
    pub agreed_terms_version: u64,
    /// When the account first registered. Preserved across re-registration.
    pub registered_at: DateTime<Utc>,
}

/// Per-account registry of terms agreements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipRegistry {
    members: Table<Account, MembershipRecord>,
}

impl MembershipRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            members: Table::new("members"),
        }
    }

    /// Register `sender`'s agreement to the latest terms.
    ///
    /// `agreed_hash` must equal the latest entry's hash exactly; agreeing to
    /// a stale version is rejected. Re-registration updates the recorded
    /// version in place without creating a second row.
    pub fn register(
        &mut self,
        host: &dyn Host,
        terms: &TermsLog,
        sender: &Account,
        agreed_hash: &str,
    ) -> Result<()> {
        host.require_auth(sender)?;

        let latest = terms.latest()?;
        if latest.hash != agreed_hash {
            return Err(LedgerError::StaleAgreement);
        }

        let version = latest.version;
        if self
            .members
            .modify(sender, Some(sender.clone()), |member| {
                member.agreed_terms_version = version;
            })
        {
            tracing::info!(sender = %sender, version, "member re-registered");
        } else {
            tracing::info!(sender = %sender, version, "member registered");
            self.members.insert(
                sender.clone(),
                MembershipRecord {
                    agreed_terms_version: version,
                    registered_at: Utc::now(),
                },
                sender.clone(),
            );
        }
        Ok(())
    }

    /// Remove `sender`'s membership record.
    pub fn unregister(&mut self, host: &dyn Host, sender: &Account) -> Result<()> {
        host.require_auth(sender)?;
        if self.members.erase(sender).is_none() {
            return Err(LedgerError::NotRegistered(sender.clone()));
        }
        tracing::info!(sender = %sender, "member unregistered");
        Ok(())
    }

    /// Look up an account's membership record.
    pub fn get(&self, account: &Account) -> Option<&MembershipRecord> {
        self.members.find(account)
    }

    /// Number of registered members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether nobody is registered.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Default for MembershipRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CallContext;

    fn acct(name: &str) -> Account {
        Account::new(name).unwrap()
    }

    fn log_with_terms(host: &CallContext, owner: &Account, pairs: &[(&str, &str)]) -> TermsLog {
        let mut log = TermsLog::new();
        for (terms, hash) in pairs {
            log.append(host, owner, *terms, *hash).unwrap();
        }
        log
    }

    #[test]
    fn test_register_requires_terms() {
        let sender = acct("alice");
        let host = CallContext::new().with_auth(sender.clone());
        let log = TermsLog::new();
        let mut registry = MembershipRegistry::new();
        assert_eq!(
            registry.register(&host, &log, &sender, "any"),
            Err(LedgerError::NoTermsDefined)
        );
    }

    #[test]
    fn test_register_rejects_stale_hash() {
        let owner = acct("owner");
        let sender = acct("alice");
        let host = CallContext::new()
            .with_auth(owner.clone())
            .with_auth(sender.clone());
        let log = log_with_terms(&host, &owner, &[("url-a", "hash-a"), ("url-b", "hash-b")]);
        let mut registry = MembershipRegistry::new();

        assert_eq!(
            registry.register(&host, &log, &sender, "hash-a"),
            Err(LedgerError::StaleAgreement)
        );
        assert!(registry.is_empty());

        registry.register(&host, &log, &sender, "hash-b").unwrap();
        assert_eq!(registry.get(&sender).unwrap().agreed_terms_version, 2);
    }

    #[test]
    fn test_reregistration_bumps_version_in_place() {
        let owner = acct("owner");
        let sender = acct("alice");
        let host = CallContext::new()
            .with_auth(owner.clone())
            .with_auth(sender.clone());
        let mut log = log_with_terms(&host, &owner, &[("url-a", "hash-a")]);
        let mut registry = MembershipRegistry::new();

        registry.register(&host, &log, &sender, "hash-a").unwrap();
        let first = registry.get(&sender).unwrap().clone();
        assert_eq!(first.agreed_terms_version, 1);

        log.append(&host, &owner, "url-b", "hash-b").unwrap();
        registry.register(&host, &log, &sender, "hash-b").unwrap();

        assert_eq!(registry.len(), 1);
        let second = registry.get(&sender).unwrap();
        assert_eq!(second.agreed_terms_version, 2);
        assert_eq!(second.registered_at, first.registered_at);
    }

    #[test]
    fn test_register_is_self_authorized() {
        let owner = acct("owner");
        let sender = acct("alice");
        let host = CallContext::new().with_auth(owner.clone());
        let log = log_with_terms(&host, &owner, &[("url-a", "hash-a")]);
        let mut registry = MembershipRegistry::new();

        assert_eq!(
            registry.register(&host, &log, &sender, "hash-a"),
            Err(LedgerError::MissingAuthority(sender))
        );
    }

    #[test]
    fn test_unregister() {
        let owner = acct("owner");
        let sender = acct("alice");
        let host = CallContext::new()
            .with_auth(owner.clone())
            .with_auth(sender.clone());
        let log = log_with_terms(&host, &owner, &[("url-a", "hash-a")]);
        let mut registry = MembershipRegistry::new();

        assert_eq!(
            registry.unregister(&host, &sender),
            Err(LedgerError::NotRegistered(sender.clone()))
        );

        registry.register(&host, &log, &sender, "hash-a").unwrap();
        registry.unregister(&host, &sender).unwrap();
        assert!(registry.get(&sender).is_none());
    }
}

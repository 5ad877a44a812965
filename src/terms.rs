//! The member terms log.
//!
//! An append-only sequence of terms documents, each a reference URL plus a
//! content digest, numbered by a version that starts at 1 and increases by
//! exactly one per append. The newest entry is what the membership registry
//! checks agreements against. The reference text of an existing entry can be
//! corrected in place; its hash and version never change, so agreements
//! keyed on the hash stay valid.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{LedgerError, Result};
use crate::host::Host;
use crate::store::Table;
use crate::types::Account;

/// Maximum length of a terms document reference.
pub const MAX_TERMS_LEN: usize = 256;

/// Maximum length of a terms document hash.
pub const MAX_HASH_LEN: usize = 32;

/// One published terms document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsRecord {
    /// Monotonically increasing version, starting at 1.
    pub version: u64,
    /// Reference to the document (URL or content address).
    pub terms: String,
    /// Content digest of the document.
    pub hash: String,
    /// When this version was appended.
    pub published_at: DateTime<Utc>,
}

/// Append-only, version-numbered log of terms documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermsLog {
    entries: Table<u64, TermsRecord>,
}

impl TermsLog {
    /// An empty log.
    pub fn new() -> Self {
        Self {
            entries: Table::new("memberterms"),
        }
    }

    /// Append a new terms document. Owner-only.
    ///
    /// Rejects a proposal identical to the current latest entry. Returns the
    /// new version number.
    pub fn append(
        &mut self,
        host: &dyn Host,
        owner: &Account,
        terms: impl Into<String>,
        hash: impl Into<String>,
    ) -> Result<u64> {
        host.require_auth(owner)?;

        let terms = terms.into();
        let hash = hash.into();
        validate_terms(&terms)?;
        validate_hash(&hash)?;

        // Guard against a duplicate of the latest entry.
        let version = match self.entries.latest() {
            Some((latest_version, latest)) => {
                if latest.terms == terms && latest.hash == hash {
                    return Err(LedgerError::DuplicateTerms);
                }
                latest_version + 1
            }
            None => 1,
        };

        tracing::info!(version, hash = %hash, "appending member terms");
        self.entries.insert(
            version,
            TermsRecord {
                version,
                terms,
                hash,
                published_at: Utc::now(),
            },
            owner.clone(),
        );
        Ok(version)
    }

    /// Replace the reference text of an existing entry. Owner-only.
    ///
    /// The entry's hash and version are untouched.
    pub fn amend(
        &mut self,
        host: &dyn Host,
        owner: &Account,
        version: u64,
        new_terms: impl Into<String>,
    ) -> Result<()> {
        host.require_auth(owner)?;

        let new_terms = new_terms.into();
        validate_terms(&new_terms)?;

        if !self
            .entries
            .modify(&version, None, |record| record.terms = new_terms)
        {
            return Err(LedgerError::TermsVersionNotFound(version));
        }
        tracing::info!(version, "amended member terms reference");
        Ok(())
    }

    /// The highest-version entry.
    pub fn latest(&self) -> Result<&TermsRecord> {
        self.entries
            .latest()
            .map(|(_, record)| record)
            .ok_or(LedgerError::NoTermsDefined)
    }

    /// Look up an entry by version.
    pub fn get(&self, version: u64) -> Option<&TermsRecord> {
        self.entries.find(&version)
    }

    /// Number of published versions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no terms have been published yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TermsLog {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_terms(terms: &str) -> Result<()> {
    if terms.is_empty() {
        return Err(LedgerError::EmptyTerms);
    }
    if terms.len() > MAX_TERMS_LEN {
        return Err(LedgerError::TermsTooLong(MAX_TERMS_LEN));
    }
    Ok(())
}

fn validate_hash(hash: &str) -> Result<()> {
    if hash.is_empty() {
        return Err(LedgerError::EmptyTermsHash);
    }
    if hash.len() > MAX_HASH_LEN {
        return Err(LedgerError::TermsHashTooLong(MAX_HASH_LEN));
    }
    Ok(())
}

/// Compute the digest string for a terms document's content.
///
/// SHA-256, hex-encoded and truncated to the hash length limit, so the
/// result is always a valid `TermsRecord::hash`.
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(MAX_HASH_LEN);
    digest
}

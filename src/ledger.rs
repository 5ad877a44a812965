//! Supply and balance accounting for fungible tokens.
//!
//! One [`SupplyRecord`] per symbol bounds circulating supply; one
//! [`BalanceRecord`] per (account, symbol) pair holds a strictly positive
//! balance. All movement funnels through the `credit`/`debit` primitives,
//! which keep the conservation invariant: a symbol's supply always equals
//! the sum of its balance rows.

use serde::{Deserialize, Serialize};

use crate::config::ContractConfig;
use crate::error::{LedgerError, Result};
use crate::host::{Host, Notification};
use crate::store::Table;
use crate::types::{Account, Asset, SymbolCode};

/// Per-symbol circulating supply and issuance policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyRecord {
    /// Current circulating amount.
    pub supply: Asset,
    /// Ceiling fixed at creation.
    pub max_supply: Asset,
    /// The only identity allowed to issue and unlock.
    pub issuer: Account,
    /// While true, ordinary transfers need issuer sanction and burns are
    /// blocked entirely. One-way: cleared by unlock, never re-set.
    pub transfer_locked: bool,
}

/// One account's holding of one symbol. Always strictly positive; a balance
/// debited to zero is erased instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    /// The held amount.
    pub balance: Asset,
}

/// The token ledger: supply records plus balance records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenLedger {
    stats: Table<SymbolCode, SupplyRecord>,
    balances: Table<(Account, SymbolCode), BalanceRecord>,
}

impl TokenLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self {
            stats: Table::new("stat"),
            balances: Table::new("accounts"),
        }
    }

    /// Create a new token. Owner-only.
    ///
    /// `max_supply` must be strictly positive; its symbol (code plus
    /// precision) becomes the token's symbol. Fails if a supply record
    /// already exists for the code.
    pub fn create(
        &mut self,
        host: &dyn Host,
        owner: &Account,
        issuer: Account,
        max_supply: Asset,
        transfer_locked: bool,
    ) -> Result<()> {
        host.require_auth(owner)?;
        if !max_supply.is_positive() {
            return Err(LedgerError::InvalidQuantity(
                "max-supply must be positive".to_string(),
            ));
        }

        let code = max_supply.symbol().code();
        if self.stats.contains(&code) {
            return Err(LedgerError::SymbolExists(code));
        }

        tracing::info!(symbol = %code, max_supply = %max_supply, issuer = %issuer, transfer_locked, "token created");
        self.stats.insert(
            code,
            SupplyRecord {
                supply: Asset::zero(max_supply.symbol()),
                max_supply,
                issuer,
                transfer_locked,
            },
            owner.clone(),
        );
        Ok(())
    }

    /// Issue new tokens into circulation. Issuer-only.
    ///
    /// The quantity is credited to the issuer; when `to` is someone else,
    /// the tokens then move issuer→`to` through the same transition as a
    /// direct transfer under the issuer's already-proved authority.
    pub fn issue(
        &mut self,
        host: &dyn Host,
        config: &mut ContractConfig,
        owner: &Account,
        to: Account,
        quantity: Asset,
        memo: &str,
    ) -> Result<()> {
        let code = quantity.symbol().code();
        let st = self
            .stats
            .find(&code)
            .ok_or(LedgerError::SymbolNotFound {
                code,
                action: "issue",
            })?
            .clone();

        host.require_auth(&st.issuer)?;
        validate_quantity(&quantity, &st, "must issue positive quantity")?;

        let available = st.max_supply.amount() - st.supply.amount();
        if quantity.amount() > available {
            return Err(LedgerError::ExceedsAvailableSupply {
                available: Asset::new(available, st.supply.symbol()),
            });
        }
        // Validate the forwarding leg up front so a failure cannot follow
        // the supply write.
        if to != st.issuer && !host.is_account(&to) {
            return Err(LedgerError::UnknownAccount(to));
        }

        let new_supply = st.supply.checked_add(&quantity)?;
        self.stats.modify(&code, None, |s| s.supply = new_supply);
        tracing::info!(symbol = %code, quantity = %quantity, supply = %new_supply, "tokens issued");

        self.credit(&st.issuer, quantity, st.issuer.clone())?;

        if to != st.issuer {
            let issuer = st.issuer.clone();
            self.transfer_unchecked(host, config, owner, &issuer, &to, quantity, memo)?;
        }
        Ok(())
    }

    /// Clear a symbol's transfer lock. Issuer-only, idempotent.
    pub fn unlock(&mut self, host: &dyn Host, code: &SymbolCode) -> Result<()> {
        let issuer = self
            .stats
            .find(code)
            .ok_or(LedgerError::SymbolNotFound {
                code: *code,
                action: "unlock",
            })?
            .issuer
            .clone();
        host.require_auth(&issuer)?;

        self.stats.modify(code, None, |s| s.transfer_locked = false);
        tracing::info!(symbol = %code, "token unlocked");
        Ok(())
    }

    /// Move tokens between two distinct accounts.
    ///
    /// The caller must hold `from`'s authority, and additionally the
    /// issuer's while the symbol is transfer-locked. `from`, `to`, and the
    /// configured notify target are informed once the movement commits.
    pub fn transfer(
        &mut self,
        host: &dyn Host,
        config: &mut ContractConfig,
        owner: &Account,
        from: &Account,
        to: &Account,
        quantity: Asset,
        memo: &str,
    ) -> Result<()> {
        if from == to {
            return Err(LedgerError::SelfTransfer);
        }
        host.require_auth(from)?;
        self.transfer_unchecked(host, config, owner, from, to, quantity, memo)
    }

    /// Destroy tokens from `from`'s balance, shrinking supply.
    ///
    /// Blocked entirely while the symbol is transfer-locked; unlike
    /// transfer there is no issuer override.
    pub fn burn(
        &mut self,
        host: &dyn Host,
        from: &Account,
        quantity: Asset,
    ) -> Result<()> {
        host.require_auth(from)?;

        let code = quantity.symbol().code();
        let st = self
            .stats
            .find(&code)
            .ok_or(LedgerError::UnknownToContract(code))?
            .clone();
        if st.transfer_locked {
            return Err(LedgerError::TransferLocked(code));
        }
        validate_quantity(&quantity, &st, "must burn positive quantity")?;

        self.debit(from, quantity)?;
        let new_supply = st.supply.checked_sub(&quantity)?;
        self.stats.modify(&code, None, |s| s.supply = new_supply);
        tracing::info!(symbol = %code, quantity = %quantity, supply = %new_supply, "tokens burned");

        host.notify(
            &[from],
            &Notification::Burn {
                from: from.clone(),
                quantity,
            },
        );
        Ok(())
    }

    /// The transfer transition minus the `require_auth(from)` and self-send
    /// checks, shared by `transfer` and `issue`'s forwarding leg.
    fn transfer_unchecked(
        &mut self,
        host: &dyn Host,
        config: &mut ContractConfig,
        owner: &Account,
        from: &Account,
        to: &Account,
        quantity: Asset,
        memo: &str,
    ) -> Result<()> {
        if !host.is_account(to) {
            return Err(LedgerError::UnknownAccount(to.clone()));
        }

        let code = quantity.symbol().code();
        let st = self
            .stats
            .find(&code)
            .ok_or(LedgerError::SymbolNotFound {
                code,
                action: "transfer",
            })?
            .clone();

        // Locked tokens move only under issuer sanction.
        if st.transfer_locked {
            host.require_auth(&st.issuer)?;
        }
        validate_quantity(&quantity, &st, "must transfer positive quantity")?;

        self.debit(from, quantity)?;
        self.credit(to, quantity, from.clone())?;
        tracing::debug!(symbol = %code, from = %from, to = %to, quantity = %quantity, "tokens transferred");

        let target = config.get_or_init(owner).notify_target.clone();
        let mut recipients = vec![from, to];
        if let Some(ref target) = target {
            recipients.push(target);
        }
        host.notify(
            &recipients,
            &Notification::Transfer {
                from: from.clone(),
                to: to.clone(),
                quantity,
                memo: memo.to_string(),
            },
        );
        Ok(())
    }

    /// Add to an account's balance, creating the row (billed to `payer`)
    /// when none exists.
    fn credit(&mut self, account: &Account, amount: Asset, payer: Account) -> Result<()> {
        let key = (account.clone(), amount.symbol().code());
        match self.balances.find(&key) {
            Some(record) => {
                let balance = record.balance.checked_add(&amount)?;
                self.balances.modify(&key, None, |r| r.balance = balance);
            }
            None => {
                self.balances.insert(key, BalanceRecord { balance: amount }, payer);
            }
        }
        Ok(())
    }

    /// Subtract from an account's balance, erasing the row when it reaches
    /// exactly zero.
    fn debit(&mut self, account: &Account, amount: Asset) -> Result<()> {
        let key = (account.clone(), amount.symbol().code());
        let have = match self.balances.find(&key) {
            Some(record) => record.balance,
            None => Asset::zero(amount.symbol()),
        };
        if have.amount() < amount.amount() {
            return Err(LedgerError::OverdrawnBalance {
                account: account.clone(),
                have,
                need: amount,
            });
        }
        if have.amount() == amount.amount() {
            self.balances.erase(&key);
        } else {
            let balance = have.checked_sub(&amount)?;
            self.balances.modify(&key, None, |r| r.balance = balance);
        }
        Ok(())
    }

    /// The supply record for a symbol, if the token exists.
    pub fn supply_of(&self, code: &SymbolCode) -> Option<&SupplyRecord> {
        self.stats.find(code)
    }

    /// An account's balance of a symbol. `None` when no row exists.
    pub fn balance_of(&self, account: &Account, code: &SymbolCode) -> Option<Asset> {
        self.balances
            .find(&(account.clone(), *code))
            .map(|record| record.balance)
    }

    /// Ascending iteration over all balance rows.
    pub fn balances(&self) -> impl Iterator<Item = (&(Account, SymbolCode), &BalanceRecord)> {
        self.balances.iter()
    }
}

impl Default for TokenLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_quantity(quantity: &Asset, st: &SupplyRecord, positive_reason: &str) -> Result<()> {
    if !quantity.is_positive() {
        return Err(LedgerError::InvalidQuantity(positive_reason.to_string()));
    }
    if quantity.symbol() != st.supply.symbol() {
        return Err(LedgerError::PrecisionMismatch {
            expected: st.supply.symbol(),
            got: quantity.symbol(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CallContext;
    use crate::types::Symbol;

    fn acct(name: &str) -> Account {
        Account::new(name).unwrap()
    }

    fn sym() -> Symbol {
        Symbol::new("TOK", 4).unwrap()
    }

    fn tok(amount: i64) -> Asset {
        Asset::new(amount, sym())
    }

    struct Fixture {
        ledger: TokenLedger,
        config: ContractConfig,
        owner: Account,
        issuer: Account,
    }

    fn fixture(transfer_locked: bool) -> Fixture {
        let owner = acct("owner");
        let issuer = acct("issuer");
        let host = CallContext::new().with_auth(owner.clone());
        let mut ledger = TokenLedger::new();
        ledger
            .create(&host, &owner, issuer.clone(), tok(1_000_0000), transfer_locked)
            .unwrap();
        Fixture {
            ledger,
            config: ContractConfig::new(),
            owner,
            issuer,
        }
    }

    fn assert_conservation(ledger: &TokenLedger, code: &SymbolCode) {
        let supply = ledger.supply_of(code).map(|s| s.supply.amount()).unwrap_or(0);
        let held: i64 = ledger
            .balances()
            .filter(|((_, c), _)| c == code)
            .map(|(_, r)| r.balance.amount())
            .sum();
        assert_eq!(supply, held, "supply must equal the sum of balances");
    }

    #[test]
    fn test_create_duplicate_fails() {
        let mut fx = fixture(false);
        let host = CallContext::new().with_auth(fx.owner.clone());
        assert_eq!(
            fx.ledger
                .create(&host, &fx.owner, fx.issuer.clone(), tok(500), false),
            Err(LedgerError::SymbolExists(sym().code()))
        );
    }

    #[test]
    fn test_create_requires_owner_and_positive_max() {
        let owner = acct("owner");
        let issuer = acct("issuer");
        let mut ledger = TokenLedger::new();

        let stranger = CallContext::new().with_auth(issuer.clone());
        assert!(ledger
            .create(&stranger, &owner, issuer.clone(), tok(100), false)
            .is_err());

        let host = CallContext::new().with_auth(owner.clone());
        assert!(matches!(
            ledger.create(&host, &owner, issuer.clone(), tok(0), false),
            Err(LedgerError::InvalidQuantity(_))
        ));
        assert!(matches!(
            ledger.create(&host, &owner, issuer, tok(-5), false),
            Err(LedgerError::InvalidQuantity(_))
        ));
        assert!(ledger.supply_of(&sym().code()).is_none());
    }

    #[test]
    fn test_issue_before_create_fails() {
        let owner = acct("owner");
        let issuer = acct("issuer");
        let host = CallContext::new().with_auth(issuer.clone());
        let mut ledger = TokenLedger::new();
        let mut config = ContractConfig::new();
        assert_eq!(
            ledger.issue(&host, &mut config, &owner, issuer, tok(100), ""),
            Err(LedgerError::SymbolNotFound {
                code: sym().code(),
                action: "issue",
            })
        );
    }

    #[test]
    fn test_issue_to_issuer() {
        let mut fx = fixture(false);
        let host = CallContext::new().with_auth(fx.issuer.clone());
        fx.ledger
            .issue(&host, &mut fx.config, &fx.owner, fx.issuer.clone(), tok(400_0000), "genesis")
            .unwrap();

        let st = fx.ledger.supply_of(&sym().code()).unwrap();
        assert_eq!(st.supply, tok(400_0000));
        assert_eq!(
            fx.ledger.balance_of(&fx.issuer, &sym().code()),
            Some(tok(400_0000))
        );
        assert_conservation(&fx.ledger, &sym().code());
        // No forwarding leg, so no transfer notification.
        assert!(host.notifications().is_empty());
    }

    #[test]
    fn test_issue_requires_issuer_auth() {
        let mut fx = fixture(false);
        let host = CallContext::new().with_auth(fx.owner.clone());
        assert_eq!(
            fx.ledger
                .issue(&host, &mut fx.config, &fx.owner, fx.issuer.clone(), tok(100), ""),
            Err(LedgerError::MissingAuthority(fx.issuer.clone()))
        );
    }

    #[test]
    fn test_issue_respects_ceiling() {
        let mut fx = fixture(false);
        let host = CallContext::new().with_auth(fx.issuer.clone());

        assert_eq!(
            fx.ledger.issue(
                &host,
                &mut fx.config,
                &fx.owner,
                fx.issuer.clone(),
                tok(1_000_0001),
                ""
            ),
            Err(LedgerError::ExceedsAvailableSupply {
                available: tok(1_000_0000),
            })
        );

        // Exactly the remaining capacity succeeds and caps supply.
        fx.ledger
            .issue(&host, &mut fx.config, &fx.owner, fx.issuer.clone(), tok(1_000_0000), "")
            .unwrap();
        let st = fx.ledger.supply_of(&sym().code()).unwrap();
        assert_eq!(st.supply, st.max_supply);

        assert_eq!(
            fx.ledger
                .issue(&host, &mut fx.config, &fx.owner, fx.issuer.clone(), tok(1), ""),
            Err(LedgerError::ExceedsAvailableSupply { available: tok(0) })
        );
    }

    #[test]
    fn test_issue_precision_must_match() {
        let mut fx = fixture(false);
        let host = CallContext::new().with_auth(fx.issuer.clone());
        let wrong = Asset::new(100, Symbol::new("TOK", 2).unwrap());
        assert!(matches!(
            fx.ledger
                .issue(&host, &mut fx.config, &fx.owner, fx.issuer.clone(), wrong, ""),
            Err(LedgerError::PrecisionMismatch { .. })
        ));
    }

    #[test]
    fn test_issue_forwards_to_recipient() {
        let mut fx = fixture(false);
        let to = acct("alice");
        let host = CallContext::new()
            .with_auth(fx.issuer.clone())
            .with_account(to.clone());

        fx.ledger
            .issue(&host, &mut fx.config, &fx.owner, to.clone(), tok(250), "welcome")
            .unwrap();

        // Issuer balance passes through zero and the row is erased.
        assert_eq!(fx.ledger.balance_of(&fx.issuer, &sym().code()), None);
        assert_eq!(fx.ledger.balance_of(&to, &sym().code()), Some(tok(250)));
        assert_conservation(&fx.ledger, &sym().code());

        let notifications = host.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(
            notifications[0].1,
            Notification::Transfer {
                from: fx.issuer.clone(),
                to,
                quantity: tok(250),
                memo: "welcome".to_string(),
            }
        );
    }

    #[test]
    fn test_issue_to_unknown_account_leaves_state_untouched() {
        let mut fx = fixture(false);
        let host = CallContext::new().with_auth(fx.issuer.clone());
        let ghost = acct("ghost");

        assert_eq!(
            fx.ledger
                .issue(&host, &mut fx.config, &fx.owner, ghost.clone(), tok(250), ""),
            Err(LedgerError::UnknownAccount(ghost))
        );
        // The supply write must not have happened.
        assert_eq!(fx.ledger.supply_of(&sym().code()).unwrap().supply, tok(0));
        assert_eq!(fx.ledger.balance_of(&fx.issuer, &sym().code()), None);
    }

    #[test]
    fn test_transfer_moves_balance_and_notifies() {
        let mut fx = fixture(false);
        let alice = acct("alice");
        let host = CallContext::new()
            .with_auth(fx.issuer.clone())
            .with_account(alice.clone());
        fx.ledger
            .issue(&host, &mut fx.config, &fx.owner, fx.issuer.clone(), tok(400), "")
            .unwrap();

        fx.ledger
            .transfer(&host, &mut fx.config, &fx.owner, &fx.issuer, &alice, tok(100), "rent")
            .unwrap();

        assert_eq!(fx.ledger.balance_of(&fx.issuer, &sym().code()), Some(tok(300)));
        assert_eq!(fx.ledger.balance_of(&alice, &sym().code()), Some(tok(100)));
        // New rows created by a transfer are billed to the sender.
        assert_conservation(&fx.ledger, &sym().code());

        let notifications = host.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].0, vec![fx.issuer.clone(), alice]);
    }

    #[test]
    fn test_transfer_rejects_self_and_unknown_recipient() {
        let mut fx = fixture(false);
        let host = CallContext::new().with_auth(fx.issuer.clone());
        let issuer = fx.issuer.clone();
        assert_eq!(
            fx.ledger
                .transfer(&host, &mut fx.config, &fx.owner, &issuer, &issuer, tok(1), ""),
            Err(LedgerError::SelfTransfer)
        );
        let ghost = acct("ghost");
        assert_eq!(
            fx.ledger
                .transfer(&host, &mut fx.config, &fx.owner, &issuer, &ghost, tok(1), ""),
            Err(LedgerError::UnknownAccount(ghost))
        );
    }

    #[test]
    fn test_transfer_requires_sender_auth() {
        let mut fx = fixture(false);
        let alice = acct("alice");
        let host = CallContext::new()
            .with_auth(alice.clone())
            .with_account(fx.issuer.clone());
        assert_eq!(
            fx.ledger
                .transfer(&host, &mut fx.config, &fx.owner, &fx.issuer, &alice, tok(1), ""),
            Err(LedgerError::MissingAuthority(fx.issuer.clone()))
        );
    }

    #[test]
    fn test_overdrawn_transfer_fails_without_effect() {
        let mut fx = fixture(false);
        let alice = acct("alice");
        let bob = acct("bob");
        let host = CallContext::new()
            .with_auth(fx.issuer.clone())
            .with_auth(alice.clone())
            .with_account(bob.clone());
        fx.ledger
            .issue(&host, &mut fx.config, &fx.owner, alice.clone(), tok(50), "")
            .unwrap();

        assert_eq!(
            fx.ledger
                .transfer(&host, &mut fx.config, &fx.owner, &alice, &bob, tok(60), ""),
            Err(LedgerError::OverdrawnBalance {
                account: alice.clone(),
                have: tok(50),
                need: tok(60),
            })
        );
        assert_eq!(fx.ledger.balance_of(&alice, &sym().code()), Some(tok(50)));
        assert_eq!(fx.ledger.balance_of(&bob, &sym().code()), None);
        assert_conservation(&fx.ledger, &sym().code());
    }

    #[test]
    fn test_debit_to_zero_erases_row_and_credit_recreates() {
        let mut fx = fixture(false);
        let alice = acct("alice");
        let host = CallContext::new()
            .with_auth(fx.issuer.clone())
            .with_auth(alice.clone())
            .with_account(alice.clone());
        fx.ledger
            .issue(&host, &mut fx.config, &fx.owner, alice.clone(), tok(70), "")
            .unwrap();

        fx.ledger
            .transfer(&host, &mut fx.config, &fx.owner, &alice, &fx.issuer, tok(70), "")
            .unwrap();
        assert_eq!(fx.ledger.balance_of(&alice, &sym().code()), None);

        fx.ledger
            .transfer(&host, &mut fx.config, &fx.owner, &fx.issuer, &alice, tok(10), "")
            .unwrap();
        assert_eq!(fx.ledger.balance_of(&alice, &sym().code()), Some(tok(10)));
        assert_conservation(&fx.ledger, &sym().code());
    }

    #[test]
    fn test_locked_transfer_needs_issuer_sanction() {
        let mut fx = fixture(true);
        let alice = acct("alice");
        let bob = acct("bob");

        // Seed alice via an issuer-sanctioned issue+forward.
        let issuer_host = CallContext::new()
            .with_auth(fx.issuer.clone())
            .with_account(alice.clone())
            .with_account(bob.clone());
        fx.ledger
            .issue(&issuer_host, &mut fx.config, &fx.owner, alice.clone(), tok(100), "")
            .unwrap();

        // A holder alone cannot move locked tokens.
        let holder_host = CallContext::new()
            .with_auth(alice.clone())
            .with_account(bob.clone());
        assert_eq!(
            fx.ledger
                .transfer(&holder_host, &mut fx.config, &fx.owner, &alice, &bob, tok(10), ""),
            Err(LedgerError::MissingAuthority(fx.issuer.clone()))
        );

        // With issuer authority alongside, the same transfer goes through.
        let sanctioned = CallContext::new()
            .with_auth(alice.clone())
            .with_auth(fx.issuer.clone())
            .with_account(bob.clone());
        fx.ledger
            .transfer(&sanctioned, &mut fx.config, &fx.owner, &alice, &bob, tok(10), "")
            .unwrap();

        // Unlock, then the holder may transfer on their own.
        fx.ledger.unlock(&issuer_host, &sym().code()).unwrap();
        fx.ledger
            .transfer(&holder_host, &mut fx.config, &fx.owner, &alice, &bob, tok(10), "")
            .unwrap();
        assert_eq!(fx.ledger.balance_of(&bob, &sym().code()), Some(tok(20)));
    }

    #[test]
    fn test_burn_blocked_while_locked_even_for_issuer() {
        let mut fx = fixture(true);
        let host = CallContext::new().with_auth(fx.issuer.clone());
        fx.ledger
            .issue(&host, &mut fx.config, &fx.owner, fx.issuer.clone(), tok(100), "")
            .unwrap();

        assert_eq!(
            fx.ledger.burn(&host, &fx.issuer.clone(), tok(10)),
            Err(LedgerError::TransferLocked(sym().code()))
        );

        fx.ledger.unlock(&host, &sym().code()).unwrap();
        fx.ledger.burn(&host, &fx.issuer.clone(), tok(10)).unwrap();
        assert_eq!(
            fx.ledger.supply_of(&sym().code()).unwrap().supply,
            tok(90)
        );
        assert_conservation(&fx.ledger, &sym().code());
    }

    #[test]
    fn test_burn_unknown_symbol_has_distinct_error() {
        let mut ledger = TokenLedger::new();
        let from = acct("alice");
        let host = CallContext::new().with_auth(from.clone());
        assert_eq!(
            ledger.burn(&host, &from, tok(10)),
            Err(LedgerError::UnknownToContract(sym().code()))
        );
    }

    #[test]
    fn test_burn_notifies_holder() {
        let mut fx = fixture(false);
        let host = CallContext::new().with_auth(fx.issuer.clone());
        fx.ledger
            .issue(&host, &mut fx.config, &fx.owner, fx.issuer.clone(), tok(100), "")
            .unwrap();
        fx.ledger.burn(&host, &fx.issuer.clone(), tok(40)).unwrap();

        let notifications = host.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(
            notifications[0].1,
            Notification::Burn {
                from: fx.issuer.clone(),
                quantity: tok(40),
            }
        );
    }

    #[test]
    fn test_unlock_is_idempotent_and_issuer_only() {
        let mut fx = fixture(true);
        let stranger = CallContext::new().with_auth(acct("mallory"));
        assert_eq!(
            fx.ledger.unlock(&stranger, &sym().code()),
            Err(LedgerError::MissingAuthority(fx.issuer.clone()))
        );

        let host = CallContext::new().with_auth(fx.issuer.clone());
        fx.ledger.unlock(&host, &sym().code()).unwrap();
        assert!(!fx.ledger.supply_of(&sym().code()).unwrap().transfer_locked);
        // Second unlock is a no-op, not an error.
        fx.ledger.unlock(&host, &sym().code()).unwrap();
    }

    #[test]
    fn test_transfer_notifies_configured_target() {
        let mut fx = fixture(false);
        let alice = acct("alice");
        let watcher = acct("watcher");
        let host = CallContext::new()
            .with_auth(fx.owner.clone())
            .with_auth(fx.issuer.clone())
            .with_account(alice.clone());
        fx.config
            .update(&host, &fx.owner, Some(watcher.clone()))
            .unwrap();
        fx.ledger
            .issue(&host, &mut fx.config, &fx.owner, fx.issuer.clone(), tok(100), "")
            .unwrap();

        fx.ledger
            .transfer(&host, &mut fx.config, &fx.owner, &fx.issuer, &alice, tok(25), "")
            .unwrap();
        let notifications = host.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(
            notifications[0].0,
            vec![fx.issuer.clone(), alice, watcher]
        );
    }
}

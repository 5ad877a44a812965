//! Domain value types: account names, token symbols, and symbol-tagged amounts.
//!
//! Amounts are signed 64-bit integers scaled by the symbol's decimal
//! precision. Arithmetic across mismatched symbols is an error, never a
//! silent coercion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Maximum length of an account name.
pub const MAX_ACCOUNT_LEN: usize = 12;

/// Maximum length of a symbol code.
pub const MAX_SYMBOL_LEN: usize = 7;

/// Maximum decimal precision of a symbol.
pub const MAX_PRECISION: u8 = 18;

/// A host account identity.
///
/// Names are 1-12 characters from `a-z`, `1-5`, and `.`, matching the host's
/// account namespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Account(String);

impl Account {
    /// Validate and construct an account name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || name.len() > MAX_ACCOUNT_LEN {
            return Err(LedgerError::InvalidAccount(name));
        }
        if !name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || (b'1'..=b'5').contains(&b) || b == b'.')
        {
            return Err(LedgerError::InvalidAccount(name));
        }
        Ok(Self(name))
    }

    /// The account name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Account {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Account {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Account> for String {
    fn from(value: Account) -> Self {
        value.0
    }
}

/// A token type identifier: 1-7 uppercase ASCII letters.
///
/// Stored inline so symbols are `Copy` and cheap to key tables with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymbolCode {
    raw: [u8; MAX_SYMBOL_LEN],
    len: u8,
}

impl SymbolCode {
    /// Validate and construct a symbol code.
    pub fn new(code: &str) -> Result<Self> {
        if code.is_empty()
            || code.len() > MAX_SYMBOL_LEN
            || !code.bytes().all(|b| b.is_ascii_uppercase())
        {
            return Err(LedgerError::InvalidSymbol(code.to_string()));
        }
        let mut raw = [0u8; MAX_SYMBOL_LEN];
        raw[..code.len()].copy_from_slice(code.as_bytes());
        Ok(Self {
            raw,
            len: code.len() as u8,
        })
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase bytes are ever stored.
        std::str::from_utf8(&self.raw[..self.len as usize]).unwrap_or("")
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbolCode {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for SymbolCode {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<SymbolCode> for String {
    fn from(value: SymbolCode) -> Self {
        value.as_str().to_string()
    }
}

/// A symbol code plus its decimal precision.
///
/// Two symbols are equal only when both the code and the precision match;
/// a supply record created at precision 4 never accepts precision-2 amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol {
    code: SymbolCode,
    precision: u8,
}

impl Symbol {
    /// Validate and construct a symbol.
    pub fn new(code: &str, precision: u8) -> Result<Self> {
        let code = SymbolCode::new(code)?;
        if precision > MAX_PRECISION {
            return Err(LedgerError::InvalidSymbol(format!("{precision},{code}")));
        }
        Ok(Self { code, precision })
    }

    /// The symbol code.
    pub fn code(&self) -> SymbolCode {
        self.code
    }

    /// Decimal precision of amounts tagged with this symbol.
    pub fn precision(&self) -> u8 {
        self.precision
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

impl FromStr for Symbol {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let (precision, code) = s
            .split_once(',')
            .ok_or_else(|| LedgerError::InvalidSymbol(s.to_string()))?;
        let precision: u8 = precision
            .parse()
            .map_err(|_| LedgerError::InvalidSymbol(s.to_string()))?;
        Self::new(code, precision)
    }
}

impl TryFrom<String> for Symbol {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.to_string()
    }
}

/// A signed quantity tagged with a symbol.
///
/// The amount is an integer count of the symbol's smallest unit; `1.0000 TOK`
/// at precision 4 is stored as `10_000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    amount: i64,
    symbol: Symbol,
}

impl Asset {
    /// Construct an asset from a raw amount in smallest units.
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    /// A zero amount of the given symbol.
    pub fn zero(symbol: Symbol) -> Self {
        Self { amount: 0, symbol }
    }

    /// Raw amount in smallest units.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// The tagging symbol.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Whether the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Add two amounts of the same symbol, checking symbols and overflow.
    pub fn checked_add(&self, other: &Asset) -> Result<Asset> {
        self.require_same_symbol(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(LedgerError::AmountOverflow)?;
        Ok(Asset::new(amount, self.symbol))
    }

    /// Subtract two amounts of the same symbol, checking symbols and overflow.
    pub fn checked_sub(&self, other: &Asset) -> Result<Asset> {
        self.require_same_symbol(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(LedgerError::AmountOverflow)?;
        Ok(Asset::new(amount, self.symbol))
    }

    fn require_same_symbol(&self, other: &Asset) -> Result<()> {
        if self.symbol != other.symbol {
            return Err(LedgerError::PrecisionMismatch {
                expected: self.symbol,
                got: other.symbol,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.symbol.precision as u32;
        if precision == 0 {
            return write!(f, "{} {}", self.amount, self.symbol.code);
        }
        let scale = 10i64.pow(precision);
        let sign = if self.amount < 0 { "-" } else { "" };
        let magnitude = self.amount.unsigned_abs();
        let scale = scale as u64;
        write!(
            f,
            "{sign}{}.{:0width$} {}",
            magnitude / scale,
            magnitude % scale,
            self.symbol.code,
            width = precision as usize
        )
    }
}

impl FromStr for Asset {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || LedgerError::InvalidQuantity(format!("unparseable asset: {s}"));
        let (number, code) = s.trim().split_once(' ').ok_or_else(invalid)?;
        let negative = number.starts_with('-');
        let digits = number.trim_start_matches('-');
        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let symbol = Symbol::new(code, frac.len() as u8)?;
        let scale = 10i64.pow(symbol.precision as u32);
        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac: i64 = if frac.is_empty() {
            0
        } else {
            frac.parse().map_err(|_| invalid())?
        };
        let amount = whole
            .checked_mul(scale)
            .and_then(|w| w.checked_add(frac))
            .ok_or(LedgerError::AmountOverflow)?;
        Ok(Asset::new(if negative { -amount } else { amount }, symbol))
    }
}

// Money - whole-dollar currency tokens stored as cents

use std::fmt;

/// Monetary value held by policies, liabilities and assets.
///
/// Constructed only through [`Money::parse`], which accepts the
/// `$<non-negative integer>` token format used across all record grammars.
/// The value is kept as a cent count so arithmetic stays integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Money {
    cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyError {
    pub token: String,
}

impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid money token '{}': expected $<non-negative integer>, e.g. $2000",
            self.token
        )
    }
}

impl std::error::Error for MoneyError {}

impl Money {
    /// Create a value from a whole-dollar amount.
    pub fn from_dollars(dollars: i64) -> Self {
        Money {
            cents: dollars * 100,
        }
    }

    /// Parse a `$<non-negative integer>` token.
    ///
    /// Rejects anything else: missing `$`, empty digits, signs, decimals,
    /// separators, surrounding whitespace.
    pub fn parse(token: &str) -> Result<Self, MoneyError> {
        let err = || MoneyError {
            token: token.to_string(),
        };

        let digits = token.strip_prefix('$').ok_or_else(err)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let dollars: i64 = digits.parse().map_err(|_| err())?;
        Ok(Money::from_dollars(dollars))
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn dollars(&self) -> i64 {
        self.cents / 100
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.dollars())
    }
}

//! Scope derivation: every supported token & denomination pair gets its own
//! commitment tree and anchor sets

use std::{
    collections::HashSet,
    fmt::{self, Display, Formatter},
};

use serde::{Deserialize, Serialize};

use crate::errors::PoolError;

/// A token the pool accepts, and the denominations it may be deposited in
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// The token's ticker symbol
    pub symbol: String,
    /// The number of decimal places in the token's amounts
    pub precision: u8,
    /// The smallest denomination, in base units
    pub quantity_min: u64,
    /// The largest denomination, in base units
    pub quantity_max: u64,
    /// The ratio between consecutive denominations
    pub quantity_step: u64,
}

impl TokenInfo {
    /// Checks that the token's denominations are well defined
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.symbol.is_empty() {
            return Err(PoolError::Config("empty token symbol".to_string()));
        }

        if self.quantity_min == 0 || self.quantity_min > self.quantity_max {
            return Err(PoolError::Config(format!("invalid quantity range for {}", self.symbol)));
        }

        if self.quantity_step < 2 {
            return Err(PoolError::Config(format!("invalid quantity step for {}", self.symbol)));
        }

        Ok(())
    }

    /// The `index`-th denomination, `None` past the largest one
    pub fn denomination(&self, index: u8) -> Option<u64> {
        self.quantity_step
            .checked_pow(u32::from(index))
            .and_then(|factor| self.quantity_min.checked_mul(factor))
            .filter(|quantity| *quantity <= self.quantity_max)
    }

    /// The index `k` of the denomination `quantity_min * quantity_step^k`
    /// equal to the quantity.
    ///
    /// Amounts between denominations are rejected rather than rounded down.
    pub fn denomination_index(&self, quantity: u64) -> Result<u8, PoolError> {
        let mut denomination = self.quantity_min;
        let mut index = 0u8;
        while denomination <= self.quantity_max && denomination <= quantity {
            if denomination == quantity {
                return Ok(index);
            }

            denomination = match denomination.checked_mul(self.quantity_step) {
                Some(next) => next,
                None => break,
            };
            index += 1;
        }

        Err(PoolError::InvalidQuantity)
    }
}

/// Checks that every token is well defined and listed once
pub fn validate_tokens(tokens: &[TokenInfo]) -> Result<(), PoolError> {
    let mut symbols = HashSet::new();
    for token in tokens {
        token.validate()?;
        if !symbols.insert(token.symbol.as_str()) {
            return Err(PoolError::Config(format!("duplicate token {}", token.symbol)));
        }
    }

    Ok(())
}

/// The key of a scope's state
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScopeKey {
    /// The token's ticker symbol
    pub symbol: String,
    /// The number of decimal places in the token's amounts
    pub precision: u8,
    /// The index of the deposited denomination
    pub denomination: u8,
}

impl ScopeKey {
    /// Derives the scope holding deposits of `quantity` units of `symbol`
    pub fn derive(tokens: &[TokenInfo], symbol: &str, quantity: u64) -> Result<Self, PoolError> {
        let token = tokens
            .iter()
            .find(|token| token.symbol == symbol)
            .ok_or(PoolError::UnsupportedToken)?;

        Ok(ScopeKey {
            symbol: token.symbol.clone(),
            precision: token.precision,
            denomination: token.denomination_index(quantity)?,
        })
    }
}

impl Display for ScopeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}#{}", self.symbol, self.precision, self.denomination)
    }
}

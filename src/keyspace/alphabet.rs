use std::collections::HashSet;

use tracing::warn;

use crate::error::{CrackError, Result};

/// Ordered set of symbols that brute-force candidates are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<String>,
}

impl Alphabet {
    /// Build an alphabet from explicit symbols, keeping the first occurrence
    /// of any repeated symbol.
    pub fn from_symbols<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        let mut repeated = 0usize;

        for symbol in symbols {
            let symbol = symbol.into();
            if seen.insert(symbol.clone()) {
                unique.push(symbol);
            } else {
                repeated += 1;
            }
        }

        if repeated > 0 {
            warn!(repeated, "dropped repeated alphabet symbols");
        }
        if unique.is_empty() {
            return Err(CrackError::EmptyAlphabet);
        }

        Ok(Self { symbols: unique })
    }

    /// One symbol per character of `letters`.
    pub fn from_chars(letters: &str) -> Result<Self> {
        Self::from_symbols(letters.chars().map(String::from))
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

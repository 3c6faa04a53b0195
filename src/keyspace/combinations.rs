//! Lazy Cartesian-power enumeration
//!
//! [`Combinations`] is an odometer over symbol indices: the right-most
//! position turns fastest, and a carry out of position 0 ends the sequence.
//! Nothing is produced ahead of the consumer, so dropping the iterator early
//! leaves nothing running.

use crate::parallel::CancellationToken;

/// Every ordered tuple of an exact length over a symbol set.
///
/// Position 0 draws from `head`; every later position draws from `tail`.
/// For the plain Cartesian power both are the same slice.
pub struct Combinations<'a, S> {
    head: &'a [S],
    tail: &'a [S],
    indices: Vec<usize>,
    exhausted: bool,
    cancel: Option<&'a CancellationToken>,
}

impl<'a, S: AsRef<str>> Combinations<'a, S> {
    /// All `symbols.len()^length` tuples over `symbols`.
    pub fn new(symbols: &'a [S], length: usize) -> Self {
        Self::anchored(symbols, symbols, length)
    }

    /// Tuples whose first symbol comes from `head` and whose remaining
    /// `length - 1` symbols come from `tail`.
    pub fn anchored(head: &'a [S], tail: &'a [S], length: usize) -> Self {
        let exhausted = length == 0 || head.is_empty() || (length > 1 && tail.is_empty());
        Self {
            head,
            tail,
            indices: vec![0; length],
            exhausted,
            cancel: None,
        }
    }

    /// Stop yielding as soon as `token` is raised.
    pub fn cancel_on(mut self, token: &'a CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn radix(&self, position: usize) -> usize {
        if position == 0 {
            self.head.len()
        } else {
            self.tail.len()
        }
    }

    fn symbol(&self, position: usize, index: usize) -> &'a str {
        let set: &'a [S] = if position == 0 { self.head } else { self.tail };
        set[index].as_ref()
    }

    fn advance(&mut self) {
        for position in (0..self.indices.len()).rev() {
            self.indices[position] += 1;
            if self.indices[position] < self.radix(position) {
                return;
            }
            self.indices[position] = 0;
        }
        self.exhausted = true;
    }
}

impl<'a, S: AsRef<str>> Iterator for Combinations<'a, S> {
    type Item = Vec<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if self.cancel.is_some_and(CancellationToken::is_cancelled) {
            self.exhausted = true;
            return None;
        }

        let tuple = self
            .indices
            .iter()
            .enumerate()
            .map(|(position, &index)| self.symbol(position, index))
            .collect();
        self.advance();
        Some(tuple)
    }
}

/// Number of tuples [`Combinations::anchored`] yields, if it fits in a `u128`.
pub fn combination_count(head: usize, tail: usize, length: usize) -> Option<u128> {
    match length {
        0 => Some(0),
        _ => {
            let rest = u32::try_from(length - 1).ok()?;
            (tail as u128).checked_pow(rest)?.checked_mul(head as u128)
        }
    }
}

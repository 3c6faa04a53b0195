use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Alphabet, Combinations, combination_count, partition};
use crate::error::Result;
use crate::oracle::Oracle;
use crate::parallel::{CancellationToken, WorkerPool};

/// Which candidates a brute-force worker is allowed to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    /// Every position is drawn from the worker's own partition. Candidates
    /// mixing symbols from two partitions are never tried.
    #[default]
    Disjoint,
    /// Only the first position is drawn from the worker's partition; the rest
    /// range over the whole alphabet.
    Full,
}

/// A password found by a brute-force worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BruteForceMatch {
    pub password: String,
    /// Candidates the winning worker tried, the match included.
    pub attempts: u64,
    pub length: usize,
}

/// Long-lived brute-force search over an alphabet.
pub struct BruteForce<'a, O> {
    oracle: &'a O,
    alphabet: &'a Alphabet,
    workers: usize,
    coverage: Coverage,
}

impl<'a, O: Oracle> BruteForce<'a, O> {
    pub fn new(oracle: &'a O, alphabet: &'a Alphabet, workers: usize) -> Self {
        Self {
            oracle,
            alphabet,
            workers: workers.max(1),
            coverage: Coverage::default(),
        }
    }

    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = coverage;
        self
    }

    /// Search until a worker finds the password or `cancel` is raised.
    ///
    /// There is no length limit: without a match and without an outside
    /// cancel this never returns.
    pub fn run(&self, cancel: &CancellationToken) -> Result<Option<BruteForceMatch>> {
        let partitions = partition(self.alphabet.symbols(), self.workers);
        debug!(
            workers = self.workers,
            symbols = self.alphabet.len(),
            coverage = ?self.coverage,
            "partitioned alphabet"
        );

        WorkerPool::new(self.workers, cancel, "brute force").run(
            partitions,
            |worker_id, subset, cancel| self.search_partition(worker_id, subset, cancel),
        )
    }

    fn search_partition(
        &self,
        worker_id: usize,
        subset: &[String],
        cancel: &CancellationToken,
    ) -> Option<BruteForceMatch> {
        if subset.is_empty() {
            debug!(worker_id, "empty partition, worker idle");
            return None;
        }

        let tail = match self.coverage {
            Coverage::Disjoint => subset,
            Coverage::Full => self.alphabet.symbols(),
        };

        let mut attempts = 0u64;
        let mut length = 1usize;
        loop {
            if cancel.is_cancelled() {
                return None;
            }
            debug!(
                worker_id,
                length,
                candidates = ?combination_count(subset.len(), tail.len(), length),
                "enumerating length"
            );

            for tuple in Combinations::anchored(subset, tail, length).cancel_on(cancel) {
                let candidate = tuple.concat();
                attempts += 1;
                if self.oracle.verify(candidate.as_bytes()) {
                    return Some(BruteForceMatch {
                        password: candidate,
                        attempts,
                        length,
                    });
                }
            }

            length += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_finds_password_inside_one_partition() {
        let alphabet = Alphabet::from_chars("abcd").unwrap();
        let oracle = |candidate: &[u8]| candidate == b"dcd";
        let cancel = CancellationToken::new();

        let found = BruteForce::new(&oracle, &alphabet, 2)
            .run(&cancel)
            .unwrap()
            .expect("password should be found");

        assert_eq!(found.password, "dcd");
        assert_eq!(found.length, 3);
        // worker 1 owns [c, d]: all of lengths 1 and 2, then ccc..dcd
        assert_eq!(found.attempts, 2 + 4 + 6);
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_workers_never_mix_partitions() {
        let alphabet = Alphabet::from_chars("abcd").unwrap();
        let seen = Mutex::new(Vec::new());
        let oracle = |candidate: &[u8]| {
            seen.lock().unwrap().push(candidate.to_vec());
            candidate.len() > 4
        };
        let cancel = CancellationToken::new();

        BruteForce::new(&oracle, &alphabet, 2).run(&cancel).unwrap();

        for candidate in seen.lock().unwrap().iter() {
            let left = candidate.iter().all(|c| b"ab".contains(c));
            let right = candidate.iter().all(|c| b"cd".contains(c));
            assert!(left || right, "mixed candidate {:?}", candidate);
        }
    }

    #[test]
    fn test_mixed_password_needs_full_coverage() {
        let alphabet = Alphabet::from_chars("abcd").unwrap();
        let oracle = |candidate: &[u8]| candidate == b"ad";

        let cancel = CancellationToken::new();
        let found = BruteForce::new(&oracle, &alphabet, 2)
            .with_coverage(Coverage::Full)
            .run(&cancel)
            .unwrap()
            .expect("full coverage reaches mixed candidates");
        assert_eq!(found.password, "ad");
        assert_eq!(found.length, 2);
    }

    #[test]
    fn test_full_coverage_tries_each_candidate_once() {
        let alphabet = Alphabet::from_chars("abcde").unwrap();
        let symbols = alphabet.symbols();

        for length in 1..=3 {
            let mut seen = Vec::new();
            for subset in partition(symbols, 2) {
                seen.extend(Combinations::anchored(subset, symbols, length).map(|t| t.concat()));
            }
            let unique: HashSet<_> = seen.iter().collect();
            assert_eq!(seen.len(), 5usize.pow(length as u32));
            assert_eq!(unique.len(), seen.len());
        }
    }

    #[test]
    fn test_more_workers_than_symbols() {
        let alphabet = Alphabet::from_chars("ab").unwrap();
        let oracle = |candidate: &[u8]| candidate == b"ba";
        let cancel = CancellationToken::new();

        let found = BruteForce::new(&oracle, &alphabet, 8).run(&cancel).unwrap();
        assert_eq!(found.unwrap().password, "ba");
    }

    #[test]
    fn test_further_calls_after_match_are_bounded() {
        let alphabet = Alphabet::from_chars("abcdefgh").unwrap();
        let cancel = CancellationToken::new();
        let calls_after_cancel = AtomicUsize::new(0);
        let oracle = |candidate: &[u8]| {
            if cancel.is_cancelled() {
                calls_after_cancel.fetch_add(1, Ordering::SeqCst);
            }
            if candidate == b"a" {
                return true;
            }
            std::thread::sleep(Duration::from_millis(1));
            false
        };

        let found = BruteForce::new(&oracle, &alphabet, 4).run(&cancel).unwrap();

        assert_eq!(found.unwrap().password, "a");
        // at most one call per losing worker slips past its last poll
        assert!(calls_after_cancel.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn test_disjoint_target_is_never_reported() {
        let alphabet = Alphabet::from_chars("ab").unwrap();
        let longest = AtomicUsize::new(0);
        let oracle = |candidate: &[u8]| {
            longest.fetch_max(candidate.len(), Ordering::Relaxed);
            candidate == b"cd"
        };
        let cancel = CancellationToken::new();

        let found = std::thread::scope(|s| {
            let search = s.spawn(|| BruteForce::new(&oracle, &alphabet, 2).run(&cancel));
            while longest.load(Ordering::Relaxed) < 6 {
                std::thread::sleep(Duration::from_millis(5));
            }
            cancel.cancel();
            search.join().unwrap()
        })
        .unwrap();

        assert!(found.is_none());
        assert!(longest.load(Ordering::Relaxed) >= 6);
    }
}

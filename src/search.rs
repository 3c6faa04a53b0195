//! Search orchestration
//!
//! The [`Orchestrator`] picks the attack, wires the partitioner or streamer
//! to the worker pool, and turns the winning worker's report into a
//! [`SearchOutcome`].

use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::CrackConfig;
use crate::dictionary::{DictionaryAttack, DictionaryStreamer};
use crate::error::Result;
use crate::keyspace::{Alphabet, BruteForce};
use crate::oracle::Oracle;
use crate::parallel::{CancellationToken, resolve_workers};
use crate::system::SystemProfile;

/// Which attack to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackMode {
    /// Stream candidates from a word list, one per line
    Dictionary,
    /// Enumerate every length over an alphabet, without end
    BruteForce,
}

impl FromStr for AttackMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dictionary" => Ok(AttackMode::Dictionary),
            "bruteforce" => Ok(AttackMode::BruteForce),
            other => Err(format!("unknown attack mode: {other}")),
        }
    }
}

/// The password that unlocked the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub password: String,
    /// Candidates tried by the winning worker alone, the match included
    /// (brute force only). Other workers' attempts are not counted.
    pub attempts: Option<u64>,
    /// Length of the matching tuple in symbols (brute force only)
    pub length: Option<usize>,
    /// Time since the run was started
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(SearchResult),
    /// Every candidate was tried without a match (dictionary only)
    Exhausted,
    /// The token was raised from outside before anything matched
    Cancelled,
}

/// Runs one search against one oracle.
///
/// The cancellation token is never reset, so an orchestrator is good for a
/// single run; later runs return [`SearchOutcome::Cancelled`] at once.
pub struct Orchestrator<O> {
    oracle: O,
    config: CrackConfig,
    started: Instant,
    cancel: CancellationToken,
    profile: SystemProfile,
}

impl<O: Oracle> Orchestrator<O> {
    /// `started` is the reference point for the reported elapsed time.
    pub fn new(oracle: O, config: CrackConfig, started: Instant) -> Self {
        Self {
            oracle,
            config,
            started,
            cancel: CancellationToken::new(),
            profile: SystemProfile::detect(),
        }
    }

    /// Size workers and blocks from `profile` instead of the detected one.
    pub fn with_profile(mut self, profile: SystemProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Token that stops the run when raised from another thread.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn workers(&self) -> usize {
        resolve_workers(self.config.search.workers, self.profile.cpu_count)
    }

    /// Run `mode` with `source` as the word-list path or the alphabet.
    pub fn run(&self, mode: AttackMode, source: &str) -> Result<SearchOutcome> {
        match mode {
            AttackMode::Dictionary => self.dictionary(Path::new(source)),
            AttackMode::BruteForce => self.brute_force(&Alphabet::from_chars(source)?),
        }
    }

    pub fn brute_force(&self, alphabet: &Alphabet) -> Result<SearchOutcome> {
        let workers = self.workers();
        info!(
            workers,
            symbols = alphabet.len(),
            "starting brute force attack"
        );

        let found = BruteForce::new(&self.oracle, alphabet, workers)
            .with_coverage(self.config.bruteforce.coverage)
            .run(&self.cancel)?;

        Ok(self.finish(found.map(|found| SearchResult {
            password: found.password,
            attempts: Some(found.attempts),
            length: Some(found.length),
            elapsed: self.started.elapsed(),
        })))
    }

    pub fn dictionary(&self, path: &Path) -> Result<SearchOutcome> {
        let block_size = self.profile.dictionary_block_size(&self.config.dictionary);
        let mut streamer =
            DictionaryStreamer::open(path, block_size, self.config.dictionary.line_boundary)?;
        info!(
            path = %path.display(),
            block_size = streamer.block_size(),
            "starting dictionary attack"
        );
        self.dictionary_stream(&mut streamer)
    }

    /// Dictionary attack over an already opened streamer.
    pub fn dictionary_stream<R: Read>(
        &self,
        streamer: &mut DictionaryStreamer<R>,
    ) -> Result<SearchOutcome> {
        let found = DictionaryAttack::new(&self.oracle, self.workers()).run(streamer, &self.cancel)?;

        if found.is_none() && !self.cancel.is_cancelled() {
            info!(blocks = streamer.blocks_read(), "dictionary exhausted");
        }

        Ok(self.finish(found.map(|found| SearchResult {
            password: found.password,
            attempts: None,
            length: None,
            elapsed: self.started.elapsed(),
        })))
    }

    fn finish(&self, found: Option<SearchResult>) -> SearchOutcome {
        match found {
            Some(result) => {
                info!(elapsed = ?result.elapsed, "password matched");
                SearchOutcome::Found(result)
            }
            None if self.cancel.is_cancelled() => {
                warn!("search cancelled before a match");
                SearchOutcome::Cancelled
            }
            None => SearchOutcome::Exhausted,
        }
    }
}

//! # zipcrack - parallel password recovery for encrypted ZIP archives
//!
//! Two attacks share one engine:
//!
//! - **Dictionary**: a word list is streamed from disk in bounded blocks,
//!   each block dealt round-robin to a fresh batch of workers.
//! - **Brute force**: the alphabet is partitioned across long-lived workers,
//!   each enumerating lengths 1, 2, 3, ... over its own partition.
//!
//! Workers share nothing but a one-shot [`parallel::CancellationToken`];
//! the first worker to find the password raises it and everyone else stops
//! at their next poll.
//!
//! ## Quick Start
//!
//! ```bash
//! zipcrack secret.zip passwords.txt dictionary
//! zipcrack secret.zip abcdefghijklmnopqrstuvwxyz bruteforce
//! ```
//!
//! ## Library use
//!
//! ```rust
//! use std::time::Instant;
//! use zipcrack::config::CrackConfig;
//! use zipcrack::search::{AttackMode, Orchestrator, SearchOutcome};
//!
//! // Any `Fn(&[u8]) -> bool + Sync` works as an oracle
//! let oracle = |candidate: &[u8]| candidate == b"cab";
//!
//! // A single worker sees the whole alphabet
//! let mut config = CrackConfig::default();
//! config.search.workers = 1;
//!
//! let orchestrator = Orchestrator::new(oracle, config, Instant::now());
//!
//! match orchestrator.run(AttackMode::BruteForce, "abc").unwrap() {
//!     SearchOutcome::Found(result) => assert_eq!(result.password, "cab"),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

pub mod cli;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod keyspace;
pub mod oracle;
pub mod parallel;
pub mod search;
pub mod system;

pub use cli::{Cli, Output};
pub use config::CrackConfig;
pub use error::{CrackError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

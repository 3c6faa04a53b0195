//! Configuration management for zipcrack
//!
//! Settings are layered with figment: embedded defaults, then user and
//! working-directory files (or one explicit `--config` file), then
//! `ZIPCRACK_` environment variables, then command-line flags.

use serde::{Deserialize, Serialize};

use crate::dictionary::LineBoundary;
use crate::keyspace::Coverage;
use crate::system::FALLBACK_AVAILABLE_MEMORY;

mod core;

pub use self::core::ConfigOverrides;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrackConfig {
    /// Worker pool settings shared by both attacks
    pub search: SearchSettings,

    /// Dictionary attack settings
    pub dictionary: DictionarySettings,

    /// Brute-force attack settings
    pub bruteforce: BruteForceSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Number of workers (0 = one per logical CPU)
    pub workers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionarySettings {
    /// Bytes per block (0 = derive from available memory)
    pub block_size: usize,

    /// Available memory is divided by this to get the block size
    pub memory_divisor: u64,

    /// Memory assumed available when the probe fails
    pub fallback_available_memory: u64,

    /// Handling of lines that straddle two blocks
    pub line_boundary: LineBoundary,
}

impl Default for DictionarySettings {
    fn default() -> Self {
        Self {
            block_size: 0,
            memory_divisor: 48,
            fallback_available_memory: FALLBACK_AVAILABLE_MEMORY,
            line_boundary: LineBoundary::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BruteForceSettings {
    /// Which candidates each worker may build
    pub coverage: Coverage,
}

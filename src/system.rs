//! System resource probe
//!
//! Queried once at startup. The default worker count and the dictionary
//! block size are derived from what it reports then, and never recomputed.

use tracing::{debug, warn};

use crate::config::DictionarySettings;

/// Assumed available memory when the probe cannot tell (4 GiB).
pub const FALLBACK_AVAILABLE_MEMORY: u64 = 4 << 30;

/// Hardware facts that size the search
#[derive(Debug, Clone)]
pub struct SystemProfile {
    /// Logical CPU cores (including hyperthreading); the default worker count
    pub cpu_count: usize,

    /// Available system memory in bytes at startup, if the OS reported it
    pub available_memory: Option<u64>,
}

impl SystemProfile {
    pub fn detect() -> Self {
        use sysinfo::{MemoryRefreshKind, RefreshKind, System};

        let mut sys = System::new_with_specifics(
            RefreshKind::new().with_memory(MemoryRefreshKind::everything()),
        );
        sys.refresh_memory();

        let available = sys.available_memory();
        let profile = Self {
            cpu_count: num_cpus::get().max(1),
            available_memory: (available > 0).then_some(available),
        };
        debug!(?profile, "detected system profile");
        profile
    }

    /// Bytes per dictionary block.
    ///
    /// An explicit `block_size` wins. Otherwise available memory (or the
    /// configured fallback) is divided by `memory_divisor`.
    pub fn dictionary_block_size(&self, settings: &DictionarySettings) -> usize {
        if settings.block_size > 0 {
            return settings.block_size;
        }

        let available = self.available_memory.unwrap_or_else(|| {
            warn!(
                fallback = settings.fallback_available_memory,
                "failed to query available memory, using fallback block size"
            );
            settings.fallback_available_memory
        });

        let size = available / settings.memory_divisor.max(1);
        usize::try_from(size).unwrap_or(usize::MAX).max(1)
    }
}

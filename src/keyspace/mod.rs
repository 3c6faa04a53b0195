//! Brute-force keyspace: alphabet, partitioning and enumeration
//!
//! The alphabet is cut into one contiguous partition per worker. Each worker
//! walks lengths 1, 2, 3, ... forever, enumerating every tuple of the current
//! length over its partition before moving on to the next length.

pub mod alphabet;
pub mod bruteforce;
pub mod combinations;
pub mod partition;

pub use alphabet::Alphabet;
pub use bruteforce::{BruteForce, BruteForceMatch, Coverage};
pub use combinations::{Combinations, combination_count};
pub use partition::{partition, partition_ranges};

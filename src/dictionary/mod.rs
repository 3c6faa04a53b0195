//! Dictionary attack: bounded-memory streaming of a candidate list
//!
//! The list is read in fixed-size blocks. Each block is split into lines,
//! dealt round-robin to the workers, and handed to a fresh worker batch.
//! The next block is only read once the current batch has finished.

pub mod attack;
pub mod distribute;
pub mod streamer;

pub use attack::{DictionaryAttack, DictionaryMatch};
pub use distribute::round_robin;
pub use streamer::{DictionaryStreamer, LineBoundary, PasswordList, split_lines};

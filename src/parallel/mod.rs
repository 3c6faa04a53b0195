//! Worker pool and cancellation primitives
//!
//! This module owns **how** work runs in parallel, never **what** the work is.
//!
//! ## What This Module Does:
//! - **Worker Count**: Falls back to the detected logical CPU count when none is configured
//! - **Worker Management**: Runs one scoped thread per assignment with `crossbeam::thread::scope`
//! - **First-Match Reporting**: Returns the single winning result through a one-slot channel
//! - **Cancellation**: Shares a one-shot [`CancellationToken`] by reference across workers
//!
//! ## What This Module Does NOT Do:
//! - **Work Splitting**: Partitions and round-robin lists are built by the callers
//! - **Polling Policy**: Each attack decides where its workers check the token
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Attack        │    │   WorkerPool     │    │   Oracle        │
//! │                 │───▶│                  │───▶│                 │
//! │ • assignments   │    │ • scoped threads │    │ • verify(pw)    │
//! │ • poll points   │    │ • result slot    │    │                 │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//!                                 │
//!                        CancellationToken (raised once)
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use zipcrack::parallel::{CancellationToken, WorkerPool};
//!
//! let cancel = CancellationToken::new();
//! let pool = WorkerPool::new(2, &cancel, "example");
//! let found = pool
//!     .run(vec![vec![1, 2], vec![3, 4]], |_, items, token| {
//!         items
//!             .into_iter()
//!             .take_while(|_| !token.is_cancelled())
//!             .find(|&n| n == 3)
//!     })
//!     .unwrap();
//! assert_eq!(found, Some(3));
//! ```

pub mod cancel;
pub mod pool;

pub use cancel::CancellationToken;
pub use pool::{WorkerPool, resolve_workers};

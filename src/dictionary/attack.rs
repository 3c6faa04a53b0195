use std::io::Read;

use tracing::debug;

use super::{DictionaryStreamer, PasswordList, round_robin};
use crate::error::Result;
use crate::oracle::Oracle;
use crate::parallel::{CancellationToken, WorkerPool};

/// A password found in the candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryMatch {
    /// The matching line, decoded lossily for display.
    pub password: String,
    /// 1-based index of the block the match came from.
    pub block: usize,
}

/// Dictionary search: one short-lived worker batch per block.
pub struct DictionaryAttack<'a, O> {
    oracle: &'a O,
    workers: usize,
}

impl<'a, O: Oracle> DictionaryAttack<'a, O> {
    pub fn new(oracle: &'a O, workers: usize) -> Self {
        Self {
            oracle,
            workers: workers.max(1),
        }
    }

    /// Consume `streamer` block by block until a match, the end of the list,
    /// or an outside cancel. A block is only left once its whole batch is done.
    pub fn run<R: Read>(
        &self,
        streamer: &mut DictionaryStreamer<R>,
        cancel: &CancellationToken,
    ) -> Result<Option<DictionaryMatch>> {
        while let Some(entries) = streamer.next_block()? {
            if cancel.is_cancelled() {
                return Ok(None);
            }

            let block = streamer.blocks_read();
            debug!(block, entries = entries.len(), "dispatching block");

            let assignments = round_robin(entries, self.workers);
            let found = WorkerPool::new(self.workers, cancel, "dictionary block").run(
                assignments,
                |worker_id, list, cancel| self.try_list(worker_id, list, cancel),
            )?;

            if let Some(password) = found {
                return Ok(Some(DictionaryMatch { password, block }));
            }
        }

        Ok(None)
    }

    fn try_list(
        &self,
        worker_id: usize,
        list: PasswordList,
        cancel: &CancellationToken,
    ) -> Option<String> {
        let total = list.len();
        for (tried, candidate) in list.into_iter().enumerate() {
            if cancel.is_cancelled() {
                debug!(worker_id, tried, total, "stopping early");
                return None;
            }
            if self.oracle.verify(&candidate) {
                return Some(String::from_utf8_lossy(&candidate).into_owned());
            }
        }
        None
    }
}

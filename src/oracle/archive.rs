use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::trace;
use zip::ZipArchive;
use zip::result::ZipResult;

use super::Oracle;

/// Oracle backed by an encrypted ZIP archive on disk.
///
/// Every call opens its own handle, decrypts the first entry and reads it to
/// the end, so integrity checks (CRC for ZipCrypto, HMAC for AES) run too.
#[derive(Debug, Clone)]
pub struct ZipOracle {
    path: PathBuf,
}

impl ZipOracle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the archive opens and its first entry is encrypted.
    ///
    /// Searching never depends on this; it only lets the caller warn before
    /// a run that could not possibly succeed.
    pub fn inspect(&self) -> ZipResult<bool> {
        let mut archive = ZipArchive::new(BufReader::new(File::open(&self.path)?))?;
        let entry = archive.by_index_raw(0)?;
        Ok(entry.encrypted())
    }

    fn try_verify(&self, candidate: &[u8]) -> ZipResult<u64> {
        let mut archive = ZipArchive::new(BufReader::new(File::open(&self.path)?))?;
        let mut entry = archive.by_index_decrypt(0, candidate)?;
        Ok(io::copy(&mut entry, &mut io::sink())?)
    }
}

impl Oracle for ZipOracle {
    fn verify(&self, candidate: &[u8]) -> bool {
        match self.try_verify(candidate) {
            Ok(read) => read > 0,
            Err(err) => {
                trace!(error = %err, "candidate rejected");
                false
            }
        }
    }
}

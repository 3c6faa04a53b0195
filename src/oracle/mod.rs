//! Password verification
//!
//! An [`Oracle`] answers one question: does this candidate unlock the
//! target? It never fails loudly. Wrong passwords, corrupt entries and I/O
//! errors all come back as `false`, and the search moves on.

mod archive;

pub use archive::ZipOracle;

/// Verifies a single candidate against a fixed target.
///
/// Implementations are called concurrently from every worker and must not
/// rely on shared mutable state.
pub trait Oracle: Sync {
    fn verify(&self, candidate: &[u8]) -> bool;
}

impl<F> Oracle for F
where
    F: Fn(&[u8]) -> bool + Sync,
{
    fn verify(&self, candidate: &[u8]) -> bool {
        self(candidate)
    }
}

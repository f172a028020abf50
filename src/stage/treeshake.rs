//! Finalize-then-freeze flag for the script stage.

use std::sync::OnceLock;

/// Single-assignment boolean sealed at a well-defined lifecycle point.
///
/// Seeded `true`; reads before sealing observe the seed. The host
/// guarantees the seal (configuration finalization) happens before any
/// per-module read, so the write-then-many-reads ordering is structural and
/// no lock is needed.
#[derive(Debug, Default)]
pub struct SealedFlag {
    cell: OnceLock<bool>,
}

impl SealedFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the final value. The first seal wins; later seals are ignored.
    pub fn seal(&self, value: bool) {
        if self.cell.set(value).is_err() {
            tracing::warn!(value, "flag already sealed, ignoring repeated seal");
        }
    }

    pub fn get(&self) -> bool {
        *self.cell.get().unwrap_or(&true)
    }

    pub fn is_sealed(&self) -> bool {
        self.cell.get().is_some()
    }
}

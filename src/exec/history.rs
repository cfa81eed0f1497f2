// src/exec/history.rs

//! Append-only record of every command started during this gale invocation.

use std::sync::{Arc, Mutex, PoisonError};

use super::handle::CmdHandle;

/// Process-wide command history.
///
/// Entries are only ever appended. The interrupt handler may scan the list
/// while a worker is still appending, so all access goes through a lock and
/// scans work on a snapshot.
#[derive(Debug, Default)]
pub struct CmdHistory {
    entries: Mutex<Vec<Arc<CmdHandle>>>,
}

impl CmdHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, handle: Arc<CmdHandle>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot in launch order.
    pub fn snapshot(&self) -> Vec<Arc<CmdHandle>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot with the most recently launched command first.
    pub fn newest_first(&self) -> Vec<Arc<CmdHandle>> {
        let mut entries = self.snapshot();
        entries.reverse();
        entries
    }
}

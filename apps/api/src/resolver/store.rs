//! Storage slots for the accepted analysis record.
//!
//! Two independent slots back the fallback chain: a session-scoped in-memory
//! slot (process lifetime) and a durable on-disk slot (survives restarts).
//! Each holds the full serialized record as JSON text, no versioning.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use anyhow::{Context, Result};
use tracing::warn;

/// A single slot holding one serialized analysis.
///
/// The resolver depends only on this interface, never on the backing
/// technology, so tests can substitute an in-memory slot for the disk one.
pub trait AnalysisStore: Send + Sync {
    /// Current contents, if any. Unreadable backing state reads as empty.
    fn read(&self) -> Option<String>;

    /// Replaces the slot contents wholesale.
    fn write(&self, raw: &str) -> Result<()>;

    /// Empties the slot. Clearing an already-empty slot is a no-op.
    fn clear(&self);
}

/// Process-lifetime slot. Backs the session-scoped source.
#[derive(Default)]
pub struct MemoryStore {
    slot: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnalysisStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.slot.read().expect("analysis slot lock poisoned").clone()
    }

    fn write(&self, raw: &str) -> Result<()> {
        *self.slot.write().expect("analysis slot lock poisoned") = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.slot.write().expect("analysis slot lock poisoned") = None;
    }
}

/// On-disk slot at `<data_dir>/last_analysis.json`. Backs the durable source.
///
/// Reads are plain synchronous filesystem calls: the slot is one small local
/// file consulted at most once per resolution pass.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Slot file name inside the data directory.
    pub const FILE_NAME: &'static str = "last_analysis.json";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: data_dir.into().join(Self::FILE_NAME),
        }
    }
}

impl AnalysisStore for FileStore {
    fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Durable slot unreadable at {}: {e}", self.path.display());
                None
            }
        }
    }

    fn write(&self, raw: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
        }
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write durable slot {}", self.path.display()))
    }

    fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != ErrorKind::NotFound {
                warn!("Failed to clear durable slot {}: {e}", self.path.display());
            }
        }
    }
}

//! Draft snapshot persistence.
//!
//! The work-plan draft is the only state in the authoring subsystem that
//! survives across sessions: read once when authoring starts, overwritten
//! wholesale after every mutation, removed on submit or explicit reset.
//! The store sits behind a trait so tests and embedders can swap the file
//! backend out.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{Result, StorageError};
use crate::plan::WorkPlanFormData;

use super::data_dir;

const DRAFT_FILE: &str = "draft.json";

/// Durable store for the single work-plan draft snapshot.
pub trait DraftStore {
    /// Read the snapshot. A missing snapshot is `Ok(None)`; a snapshot that
    /// exists but cannot be parsed is an error, never silently discarded.
    fn load(&self) -> Result<Option<WorkPlanFormData>>;

    /// Overwrite the snapshot with the whole form. No partial writes.
    fn save(&self, form: &WorkPlanFormData) -> Result<()>;

    /// Remove the snapshot. Removing an absent snapshot succeeds.
    fn clear(&self) -> Result<()>;
}

/// JSON file-backed draft store. The deadline round-trips through ISO-8601.
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The default location, `data_dir()/draft.json`.
    pub fn in_data_dir() -> Result<Self> {
        Ok(Self::new(data_dir()?.join(DRAFT_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> Result<Option<WorkPlanFormData>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::ReadFailed {
                    path: self.path.clone(),
                    source,
                }
                .into())
            }
        };
        let form = serde_json::from_str(&content).map_err(|source| StorageError::CorruptDraft {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(form))
    }

    fn save(&self, form: &WorkPlanFormData) -> Result<()> {
        let content = serde_json::to_string_pretty(form)?;
        std::fs::write(&self.path, content).map_err(|source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "draft snapshot written");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "draft snapshot removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::WriteFailed {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }
}

/// In-memory draft store.
#[derive(Default)]
pub struct MemoryDraftStore {
    slot: Mutex<Option<WorkPlanFormData>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<WorkPlanFormData>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Result<Option<WorkPlanFormData>> {
        Ok(self.slot().clone())
    }

    fn save(&self, form: &WorkPlanFormData) -> Result<()> {
        *self.slot() = Some(form.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Store, UserRef};
    use chrono::{Duration, Utc};

    fn sample_form() -> WorkPlanFormData {
        WorkPlanFormData::new()
            .with_name("Spring campaign")
            .with_deadline(Utc::now() + Duration::days(30))
            .with_stores(vec![Store::new("s1", "Via Roma")])
            .with_users(vec![UserRef::new("u1", "Ada")])
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryDraftStore::new();
        assert!(store.load().unwrap().is_none());

        let form = sample_form();
        store.save(&form).unwrap();
        assert_eq!(store.load().unwrap(), Some(form));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn memory_store_overwrites_wholesale() {
        let store = MemoryDraftStore::new();
        store.save(&sample_form()).unwrap();
        let renamed = sample_form().with_name("Renamed");
        store.save(&renamed).unwrap();
        assert_eq!(store.load().unwrap().unwrap().name, "Renamed");
    }

    #[test]
    fn clearing_an_empty_memory_store_succeeds() {
        let store = MemoryDraftStore::new();
        store.clear().unwrap();
    }
}

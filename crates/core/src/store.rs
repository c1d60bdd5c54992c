//! Persistence port for document snapshots.
//!
//! The document is stored as one complete JSON snapshot under a single
//! key, and the transient slide cursor as a decimal string under a
//! second key. The backing store is a trait so shells can plug in a
//! filesystem, browser storage, or an in-memory fake for tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;
use crate::types::Presentation;

/// Storage key for the serialized document snapshot.
pub const DOCUMENT_KEY: &str = "deck.document";

/// Storage key for the current-slide cursor.
pub const CURSOR_KEY: &str = "deck.cursor";

/// A string key-value store holding the persisted editor state.
pub trait KeyValueStore {
    /// Read the value under `key`, if present.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store, used by tests and ephemeral sessions.
///
/// Clones share the underlying map, so a clone kept by a test observes
/// everything a session writes through the original.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Snapshot (de)serialization over a [`KeyValueStore`].
#[derive(Debug)]
pub struct DocumentStore<S> {
    store: S,
}

impl<S: KeyValueStore> DocumentStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a complete snapshot. Each write replaces the whole stored
    /// document, so overlapping writes resolve to last-write-wins.
    pub fn save(&mut self, presentation: &Presentation) -> Result<()> {
        let json = serde_json::to_string(presentation)?;
        self.store.set(DOCUMENT_KEY, &json)
    }

    /// Load the stored snapshot, if any. Date fields are reconstructed
    /// from their stored timestamp strings.
    pub fn load(&self) -> Result<Option<Presentation>> {
        match self.store.get(DOCUMENT_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Persist the current-slide cursor as a decimal string.
    pub fn save_cursor(&mut self, cursor: usize) -> Result<()> {
        self.store.set(CURSOR_KEY, &cursor.to_string())
    }

    /// Load the stored cursor. Values that do not parse or that fall
    /// outside `[0, slide_count - 1]` are ignored.
    pub fn load_cursor(&self, slide_count: usize) -> Result<Option<usize>> {
        let Some(raw) = self.store.get(CURSOR_KEY)? else {
            return Ok(None);
        };
        match raw.trim().parse::<usize>() {
            Ok(cursor) if cursor < slide_count => Ok(Some(cursor)),
            Ok(cursor) => {
                log::debug!("ignoring out-of-range stored cursor {cursor}");
                Ok(None)
            }
            Err(_) => {
                log::debug!("ignoring malformed stored cursor {raw:?}");
                Ok(None)
            }
        }
    }

    /// Remove both stored keys.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(DOCUMENT_KEY)?;
        self.store.remove(CURSOR_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutate::{add_slide, update_meta, MetaUpdate};
    use crate::types::SlideKind;

    fn store() -> DocumentStore<MemoryStore> {
        DocumentStore::new(MemoryStore::new())
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut docs = store();
        let p = add_slide(&Presentation::new(), SlideKind::TwoColumn);
        let p = update_meta(
            &p,
            MetaUpdate {
                title: Some("Launch Plan".to_string()),
                description: Some("H2 rollout".to_string()),
            },
        );

        docs.save(&p).unwrap();
        let loaded = docs.load().unwrap().unwrap();

        assert_eq!(loaded, p);
        // Timestamps survive the trip to at least second precision.
        assert_eq!(
            loaded.updated_at.timestamp(),
            p.updated_at.timestamp()
        );
    }

    #[test]
    fn test_load_empty_store_is_none() {
        let docs = store();
        assert!(docs.load().unwrap().is_none());
        assert!(docs.load_cursor(3).unwrap().is_none());
    }

    #[test]
    fn test_cursor_round_trip_and_bounds() {
        let mut docs = store();
        docs.save_cursor(2).unwrap();

        assert_eq!(docs.load_cursor(3).unwrap(), Some(2));
        // Out of range for a shorter deck: ignored.
        assert_eq!(docs.load_cursor(2).unwrap(), None);
        assert_eq!(docs.load_cursor(0).unwrap(), None);
    }

    #[test]
    fn test_malformed_cursor_is_ignored() {
        let mut inner = MemoryStore::new();
        inner.set(CURSOR_KEY, "not-a-number").unwrap();
        let docs = DocumentStore::new(inner);
        assert_eq!(docs.load_cursor(5).unwrap(), None);
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let mut docs = store();
        docs.save(&Presentation::new()).unwrap();
        docs.save_cursor(0).unwrap();

        docs.clear().unwrap();

        assert!(docs.load().unwrap().is_none());
        assert!(docs.load_cursor(1).unwrap().is_none());
    }
}

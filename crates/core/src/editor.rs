//! Editor session: the current snapshot plus the transient slide cursor.
//!
//! The editor routes every change through the mutation layer, keeps the
//! cursor valid across slide-count changes, and persists after each
//! mutation. Persistence failures are logged and never abort the
//! session; the in-memory snapshot stays the source of truth.

use crate::mutate::{self, BrandUpdate, MetaUpdate, SlideUpdate};
use crate::store::{DocumentStore, KeyValueStore};
use crate::types::{Presentation, Slide, SlideKind};

/// A live editing session over a persisted presentation.
pub struct Editor<S: KeyValueStore> {
    store: DocumentStore<S>,
    presentation: Presentation,
    cursor: usize,
}

impl<S: KeyValueStore> Editor<S> {
    /// Open a session from the given store, falling back to a fresh
    /// default presentation when nothing (or nothing readable) is stored.
    pub fn open(store: S) -> Self {
        let store = DocumentStore::new(store);
        let presentation = match store.load() {
            Ok(Some(presentation)) => presentation,
            Ok(None) => Presentation::new(),
            Err(err) => {
                log::warn!("failed to load stored presentation, starting fresh: {err}");
                Presentation::new()
            }
        };
        let cursor = match store.load_cursor(presentation.slide_count()) {
            Ok(Some(cursor)) => cursor,
            Ok(None) => 0,
            Err(err) => {
                log::warn!("failed to load stored cursor: {err}");
                0
            }
        };
        Self {
            store,
            presentation,
            cursor,
        }
    }

    /// The current snapshot.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// The current-slide index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The slide under the cursor, if the deck is non-empty.
    pub fn current_slide(&self) -> Option<&Slide> {
        self.presentation.slides.get(self.cursor)
    }

    /// Move the cursor, clamped to the deck.
    pub fn select(&mut self, index: usize) {
        self.cursor = mutate::clamp_cursor(index, self.presentation.slide_count());
        self.persist();
    }

    /// Append a new slide of the given kind.
    pub fn add_slide(&mut self, kind: SlideKind) {
        self.apply(|p| mutate::add_slide(p, kind));
    }

    /// Shallow-merge an update into a slide by id.
    pub fn update_slide(&mut self, id: &str, update: SlideUpdate) {
        self.apply(|p| mutate::update_slide(p, id, update));
    }

    /// Delete a slide by id, adjusting the cursor per the deletion policy.
    pub fn delete_slide(&mut self, id: &str) {
        let deleted_index = self.presentation.slide_index(id);
        let next = mutate::delete_slide(&self.presentation, id);
        if let Some(index) = deleted_index {
            self.cursor = mutate::cursor_after_delete(self.cursor, index, next.slide_count());
        }
        self.presentation = next;
        self.persist();
    }

    /// Duplicate a slide by id.
    pub fn duplicate_slide(&mut self, id: &str) {
        self.apply(|p| mutate::duplicate_slide(p, id));
    }

    /// Move a slide between positions.
    pub fn reorder_slides(&mut self, from: usize, to: usize) {
        self.apply(|p| mutate::reorder_slides(p, from, to));
    }

    /// Shallow-merge an update into the brand settings.
    pub fn update_brand_settings(&mut self, update: BrandUpdate) {
        self.apply(|p| mutate::update_brand_settings(p, update));
    }

    /// Shallow-merge an update into the presentation metadata.
    pub fn update_meta(&mut self, update: MetaUpdate) {
        self.apply(|p| mutate::update_meta(p, update));
    }

    /// Start fresh: replace the document with a new default presentation
    /// and clear the persisted state.
    pub fn reset(&mut self) {
        if let Err(err) = self.store.clear() {
            log::warn!("failed to clear stored presentation: {err}");
        }
        self.presentation = Presentation::new();
        self.cursor = 0;
        self.persist();
    }

    fn apply(&mut self, op: impl FnOnce(&Presentation) -> Presentation) {
        self.presentation = op(&self.presentation);
        self.cursor = mutate::clamp_cursor(self.cursor, self.presentation.slide_count());
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.presentation) {
            log::warn!("failed to persist presentation snapshot: {err}");
        }
        if let Err(err) = self.store.save_cursor(self.cursor) {
            log::warn!("failed to persist slide cursor: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::SlideContent;

    #[test]
    fn test_open_empty_store_starts_default() {
        let editor = Editor::open(MemoryStore::new());
        assert_eq!(editor.presentation().slide_count(), 1);
        assert_eq!(editor.cursor(), 0);
        assert!(editor.current_slide().is_some());
    }

    #[test]
    fn test_mutations_are_persisted() {
        let store = MemoryStore::new();
        let mut editor = Editor::open(store.clone());
        editor.add_slide(SlideKind::Content);
        editor.select(1);

        // A second session over the same store sees the saved state.
        let reopened = Editor::open(store);
        assert_eq!(reopened.presentation().slide_count(), 2);
        assert_eq!(reopened.cursor(), 1);
        assert_eq!(reopened.presentation(), editor.presentation());
    }

    #[test]
    fn test_delete_at_cursor_steps_left() {
        let mut editor = Editor::open(MemoryStore::new());
        editor.add_slide(SlideKind::Content);
        editor.add_slide(SlideKind::Blank);
        editor.select(2);

        let id = editor.presentation().slides[2].id.clone();
        editor.delete_slide(&id);

        assert_eq!(editor.cursor(), 1);
        assert_eq!(editor.presentation().slide_count(), 2);
    }

    #[test]
    fn test_delete_before_cursor_clamps() {
        let mut editor = Editor::open(MemoryStore::new());
        editor.add_slide(SlideKind::Content);
        editor.add_slide(SlideKind::Blank);
        editor.select(2);

        let id = editor.presentation().slides[1].id.clone();
        editor.delete_slide(&id);

        assert_eq!(editor.cursor(), 1);
    }

    #[test]
    fn test_delete_last_slide_floors_cursor() {
        let mut editor = Editor::open(MemoryStore::new());
        let id = editor.presentation().slides[0].id.clone();
        editor.delete_slide(&id);

        assert_eq!(editor.presentation().slide_count(), 0);
        assert_eq!(editor.cursor(), 0);
        assert!(editor.current_slide().is_none());
    }

    #[test]
    fn test_reset_replaces_document() {
        let mut editor = Editor::open(MemoryStore::new());
        let old_id = editor.presentation().id.clone();
        editor.add_slide(SlideKind::Content);
        editor.update_slide(
            &editor.presentation().slides[0].id.clone(),
            SlideUpdate {
                content: Some(SlideContent::Blank),
                ..Default::default()
            },
        );

        editor.reset();

        assert_ne!(editor.presentation().id, old_id);
        assert_eq!(editor.presentation().slide_count(), 1);
        assert_eq!(editor.cursor(), 0);
    }
}

//! Editing session: the currently open presentation and the cached listing

use chrono::Utc;

use super::presentation::{PresentationRecord, PresentationSummary, DEFAULT_THEME};
use super::store::{PresentationStore, StoreError};

/// Title given to presentations saved without one
pub const PLACEHOLDER_TITLE: &str = "Untitled Presentation";

/// Content of a newly created presentation
pub const STARTER_CONTENT: &str = "# New Presentation\n\n---\n\n## First Slide";

/// Values used when creating and saving presentations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDefaults {
    pub placeholder_title: String,
    pub starter_content: String,
    pub default_theme: String,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            placeholder_title: PLACEHOLDER_TITLE.to_string(),
            starter_content: STARTER_CONTENT.to_string(),
            default_theme: DEFAULT_THEME.to_string(),
        }
    }
}

/// Holds the presentation being edited for the lifetime of a session
#[derive(Debug)]
pub struct SessionManager {
    store: PresentationStore,
    defaults: SessionDefaults,
    current: PresentationRecord,
    presentations: Vec<PresentationSummary>,
    modified: bool,
}

impl SessionManager {
    /// Start a session with a blank, id-less current record
    pub fn new(store: PresentationStore, defaults: SessionDefaults) -> Self {
        let current = PresentationRecord {
            theme: defaults.default_theme.clone(),
            ..PresentationRecord::default()
        };
        Self {
            store,
            defaults,
            current,
            presentations: Vec::new(),
            modified: false,
        }
    }

    /// The presentation being edited
    pub fn current(&self) -> &PresentationRecord {
        &self.current
    }

    /// Listing as of the last refresh
    pub fn presentations(&self) -> &[PresentationSummary] {
        &self.presentations
    }

    /// Whether the current record has edits that were not saved
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn store(&self) -> &PresentationStore {
        &self.store
    }

    /// Replace the current record with a fresh, unsaved presentation
    pub fn create_new(&mut self) {
        self.current = PresentationRecord::new(
            self.defaults.starter_content.clone(),
            self.defaults.default_theme.clone(),
        );
        self.modified = false;
        tracing::debug!("Created new presentation {}", self.current.id);
    }

    /// Start a fresh presentation from existing markdown
    pub fn create_from(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.create_new();
        self.current.title = title.into();
        self.current.content = content.into();
        self.modified = true;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if self.current.title != title {
            self.current.title = title;
            self.modified = true;
        }
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        if self.current.content != content {
            self.current.content = content;
            self.modified = true;
        }
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        let theme = theme.into();
        if self.current.theme != theme {
            self.current.theme = theme;
            self.modified = true;
        }
    }

    /// Persist the current record and refresh the listing
    pub async fn save_current(&mut self) -> Result<(), StoreError> {
        if self.current.title.is_empty() {
            self.current.title = self.defaults.placeholder_title.clone();
        }
        self.current.last_edited = Some(Utc::now());

        let stored = self.store.save(&self.current).await?;
        self.current.last_edited = stored.last_edited;
        self.modified = false;

        self.refresh_listing().await;
        Ok(())
    }

    /// Make the stored presentation `id` current
    ///
    /// Returns `false` and leaves the current record untouched when no such
    /// presentation exists.
    pub async fn load_one(&mut self, id: &str) -> bool {
        match self.store.load(id).await {
            Some(record) => {
                self.current = record;
                self.modified = false;
                true
            }
            None => false,
        }
    }

    /// Reload the listing from the store
    pub async fn refresh_listing(&mut self) {
        self.presentations = self.store.list().await;
    }

    /// Delete a stored presentation and refresh the listing
    ///
    /// Deleting the current presentation starts a new one in its place.
    pub async fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self.store.delete(id).await?;
        if self.current.id == id {
            self.create_new();
        }
        self.refresh_listing().await;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::storage::MemoryStorage;

    fn session() -> SessionManager {
        let store = PresentationStore::new(Arc::new(MemoryStorage::new()));
        SessionManager::new(store, SessionDefaults::default())
    }

    #[test]
    fn test_initial_state_is_blank() {
        let session = session();
        assert_eq!(session.current().id, "");
        assert_eq!(session.current().theme, DEFAULT_THEME);
        assert_eq!(session.current().last_edited, None);
        assert!(session.presentations().is_empty());
    }

    #[tokio::test]
    async fn test_create_new_is_in_memory_only() {
        let mut session = session();
        session.create_new();

        let current = session.current().clone();
        assert!(!current.id.is_empty());
        assert_eq!(current.title, "");
        assert_eq!(current.content, STARTER_CONTENT);
        assert_eq!(current.theme, DEFAULT_THEME);
        assert_eq!(current.last_edited, None);
        assert_eq!(session.store().load(&current.id).await, None);

        session.create_new();
        assert_ne!(session.current().id, current.id);
    }

    #[tokio::test]
    async fn test_save_current_substitutes_placeholder_title() {
        let mut session = session();
        session.create_new();
        session.set_content("");
        let id = session.current().id.clone();

        session.save_current().await.unwrap();

        let stored = session.store().load(&id).await.unwrap();
        assert_eq!(stored.title, PLACEHOLDER_TITLE);
        assert_eq!(session.current().title, PLACEHOLDER_TITLE);
        assert!(stored.last_edited.is_some());
        assert_eq!(session.current().last_edited, stored.last_edited);
    }

    #[tokio::test]
    async fn test_save_current_keeps_whitespace_title() {
        let mut session = session();
        session.create_new();
        session.set_title("  ");

        session.save_current().await.unwrap();

        let id = session.current().id.clone();
        assert_eq!(session.store().load(&id).await.unwrap().title, "  ");
    }

    #[tokio::test]
    async fn test_save_current_refreshes_listing() {
        let mut session = session();
        session.create_new();
        session.set_title("Talk");
        assert!(session.is_modified());

        session.save_current().await.unwrap();

        assert!(!session.is_modified());
        assert_eq!(session.presentations().len(), 1);
        assert_eq!(session.presentations()[0].title, "Talk");
    }

    #[tokio::test]
    async fn test_save_without_create_is_rejected() {
        let mut session = session();
        let result = session.save_current().await;
        assert!(matches!(result, Err(StoreError::MissingId)));
    }

    #[tokio::test]
    async fn test_load_one_unknown_id_keeps_current() {
        let mut session = session();
        session.create_new();
        session.set_title("Draft");
        let before = session.current().clone();

        assert!(!session.load_one("missing").await);
        assert_eq!(session.current(), &before);
        assert!(session.is_modified());
    }

    #[tokio::test]
    async fn test_load_one_replaces_current() {
        let mut session = session();
        session.create_new();
        session.set_title("Saved");
        session.save_current().await.unwrap();
        let saved_id = session.current().id.clone();

        session.create_new();
        assert!(session.load_one(&saved_id).await);
        assert_eq!(session.current().id, saved_id);
        assert_eq!(session.current().title, "Saved");
    }

    #[tokio::test]
    async fn test_refresh_listing_sees_external_writes() {
        let mut session = session();
        let other = PresentationRecord {
            id: "external".to_string(),
            title: "From elsewhere".to_string(),
            ..PresentationRecord::default()
        };
        session.store().save(&other).await.unwrap();
        assert!(session.presentations().is_empty());

        session.refresh_listing().await;
        assert_eq!(session.presentations()[0].id, "external");
    }

    #[tokio::test]
    async fn test_delete_current_starts_new() {
        let mut session = session();
        session.create_new();
        session.save_current().await.unwrap();
        let id = session.current().id.clone();

        assert!(session.delete(&id).await.unwrap());
        assert_ne!(session.current().id, id);
        assert!(session.presentations().is_empty());
        assert!(!session.delete(&id).await.unwrap());
    }
}

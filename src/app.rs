//! Main application state and route coordination

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::core::config::AppConfig;
use crate::core::deck::Deck;
use crate::core::library::{self, SlideModule};
use crate::core::presentation::{PresentationRecord, PresentationSummary};
use crate::core::session::SessionManager;
use crate::core::storage::{FileStorage, StorageBackend};
use crate::core::store::PresentationStore;
use crate::router::Route;

/// What a route resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// All stored presentations
    Dashboard(Vec<PresentationSummary>),
    /// The presentation open in the editor
    Editor(PresentationRecord),
    /// A deck being presented
    Present(Deck),
    /// A deck with speaker notes
    Speaker(Deck),
    /// Slide files available as starting points
    Templates(Vec<SlideModule>),
    /// Current configuration
    Settings(AppConfig),
    /// The route named a presentation that does not exist
    NotFound(String),
}

/// Main application state
pub struct SlideDeckApp {
    /// Application configuration
    pub config: AppConfig,
    /// Where the configuration is written back, if anywhere
    config_path: Option<PathBuf>,
    /// Editing session
    pub session: SessionManager,
    /// Route last navigated to
    pub route: Route,
}

impl SlideDeckApp {
    /// Create the application over file storage in the configured data dir
    pub fn open(config: AppConfig, config_path: Option<PathBuf>) -> Result<Self> {
        let data_dir = config.data_dir();
        let storage = FileStorage::open(&data_dir)
            .with_context(|| format!("Failed to open data directory: {}", data_dir.display()))?;
        tracing::info!("Using data directory: {}", data_dir.display());
        Ok(Self::with_backend(config, config_path, Arc::new(storage)))
    }

    /// Create the application over an arbitrary storage backend
    pub fn with_backend(
        config: AppConfig,
        config_path: Option<PathBuf>,
        backend: Arc<dyn StorageBackend>,
    ) -> Self {
        let store = PresentationStore::with_key(backend, config.storage.storage_key.clone());
        let session = SessionManager::new(store, config.session.defaults());
        Self {
            config,
            config_path,
            session,
            route: Route::Home,
        }
    }

    /// Navigate to a path
    pub async fn navigate(&mut self, path: &str) -> Result<View> {
        let route = Route::parse(path)?;
        self.open_route(route).await
    }

    /// Resolve a route into the view it shows
    pub async fn open_route(&mut self, route: Route) -> Result<View> {
        tracing::debug!("Opening route {}", route);
        self.route = route.clone();

        let view = match route {
            Route::Home => {
                self.session.refresh_listing().await;
                View::Dashboard(self.session.presentations().to_vec())
            }
            Route::Editor { id: None } => {
                self.session.create_new();
                View::Editor(self.session.current().clone())
            }
            Route::Editor { id: Some(id) } => match self.open_presentation(&id).await {
                Some(record) => View::Editor(record),
                None => View::NotFound(id),
            },
            Route::Present { id } => match self.open_presentation(&id).await {
                Some(record) => View::Present(Deck::from_record(&record)),
                None => View::NotFound(id),
            },
            Route::Speaker { id } => match self.open_presentation(&id).await {
                Some(record) => View::Speaker(Deck::from_record(&record)),
                None => View::NotFound(id),
            },
            Route::Templates => View::Templates(library::discover(&self.config.slides_dir())),
            Route::Settings => View::Settings(self.config.clone()),
        };
        Ok(view)
    }

    /// Load a presentation into the session and remember it as recent
    async fn open_presentation(&mut self, id: &str) -> Option<PresentationRecord> {
        if !self.session.load_one(id).await {
            tracing::warn!("Presentation not found: {}", id);
            return None;
        }
        self.config.add_recent_presentation(id);
        self.persist_config();
        Some(self.session.current().clone())
    }

    /// Create and save a new presentation, optionally from a library slide file
    pub async fn create_presentation(
        &mut self,
        title: Option<&str>,
        theme: Option<&str>,
        template: Option<&str>,
    ) -> Result<PresentationRecord> {
        match template {
            Some(slug) => {
                let slides_dir = self.config.slides_dir();
                let module = library::find(&slides_dir, slug).with_context(|| {
                    format!("No slide file named {} in {}", slug, slides_dir.display())
                })?;
                let content = module.read_content()?;
                self.session.create_from(module.title, content);
            }
            None => self.session.create_new(),
        }

        if let Some(title) = title {
            self.session.set_title(title);
        }
        if let Some(theme) = theme {
            self.session.set_theme(theme);
        }

        self.session.save_current().await?;
        let record = self.session.current().clone();
        self.config.add_recent_presentation(&record.id);
        self.persist_config();
        Ok(record)
    }

    /// Apply edits to a stored presentation and save it
    pub async fn edit_presentation(
        &mut self,
        id: &str,
        title: Option<&str>,
        theme: Option<&str>,
        content: Option<String>,
    ) -> Result<PresentationRecord> {
        if self.open_presentation(id).await.is_none() {
            anyhow::bail!("Presentation not found: {}", id);
        }

        if let Some(title) = title {
            self.session.set_title(title);
        }
        if let Some(theme) = theme {
            self.session.set_theme(theme);
        }
        if let Some(content) = content {
            self.session.set_content(content);
        }

        if self.session.is_modified() {
            self.session.save_current().await?;
        }
        Ok(self.session.current().clone())
    }

    /// Delete a stored presentation
    pub async fn delete_presentation(&mut self, id: &str) -> Result<bool> {
        let removed = self.session.delete(id).await?;
        self.config.forget_presentation(id);
        self.persist_config();
        Ok(removed)
    }

    fn persist_config(&self) {
        if let Some(ref path) = self.config_path {
            if let Err(e) = self.config.save_to(path) {
                tracing::error!("Failed to save config: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::PLACEHOLDER_TITLE;
    use crate::core::storage::MemoryStorage;

    fn app() -> SlideDeckApp {
        SlideDeckApp::with_backend(AppConfig::default(), None, Arc::new(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn test_new_presentation_flow() {
        let mut app = app();
        let created = app.create_presentation(None, None, None).await.unwrap();
        assert_eq!(created.title, PLACEHOLDER_TITLE);

        let View::Dashboard(listing) = app.navigate("/").await.unwrap() else {
            panic!("expected dashboard");
        };
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].id, created.id);
        assert_eq!(app.config.recent_presentations[0], created.id);
    }

    #[tokio::test]
    async fn test_present_route_builds_deck() {
        let mut app = app();
        let created = app
            .create_presentation(Some("Talk"), Some("black"), None)
            .await
            .unwrap();

        let view = app.navigate(&format!("/present/{}", created.id)).await.unwrap();
        let View::Present(deck) = view else {
            panic!("expected presentation view");
        };
        assert_eq!(deck.title, "Talk");
        assert_eq!(deck.theme, "black");
        assert_eq!(deck.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_even_with_open_session() {
        let mut app = app();
        app.create_presentation(Some("Open"), None, None).await.unwrap();

        let view = app.navigate("/present/missing/speaker").await.unwrap();
        assert_eq!(view, View::NotFound("missing".to_string()));
        assert_eq!(app.session.current().title, "Open");
    }

    #[tokio::test]
    async fn test_editor_without_id_starts_unsaved_presentation() {
        let mut app = app();
        let View::Editor(record) = app.navigate("/editor").await.unwrap() else {
            panic!("expected editor");
        };
        assert!(!record.id.is_empty());
        assert_eq!(record.last_edited, None);
        assert_eq!(app.session.store().load(&record.id).await, None);
    }

    #[tokio::test]
    async fn test_edit_and_delete() {
        let mut app = app();
        let created = app.create_presentation(Some("Draft"), None, None).await.unwrap();

        let edited = app
            .edit_presentation(&created.id, Some("Final"), None, Some("# Only".to_string()))
            .await
            .unwrap();
        assert_eq!(edited.title, "Final");
        assert!(edited.last_edited >= created.last_edited);

        assert!(app.edit_presentation("missing", None, None, None).await.is_err());

        assert!(app.delete_presentation(&created.id).await.unwrap());
        assert!(app.config.recent_presentations.is_empty());
        assert_eq!(
            app.navigate(&format!("/editor/{}", created.id)).await.unwrap(),
            View::NotFound(created.id.clone())
        );
    }

    #[tokio::test]
    async fn test_create_from_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("team-sync.md"), "# Sync\n\n---\n\n## Updates").unwrap();

        let mut config = AppConfig::default();
        config.library.slides_dir = Some(dir.path().to_path_buf());
        let mut app = SlideDeckApp::with_backend(config, None, Arc::new(MemoryStorage::new()));

        let View::Templates(templates) = app.navigate("/templates").await.unwrap() else {
            panic!("expected templates");
        };
        assert_eq!(templates[0].title, "Team Sync");

        let created = app.create_presentation(None, None, Some("team-sync")).await.unwrap();
        assert_eq!(created.title, "Team Sync");
        assert!(created.content.contains("## Updates"));
        assert!(app.create_presentation(None, None, Some("nope")).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_route_is_error() {
        let mut app = app();
        assert!(app.navigate("/nowhere").await.is_err());
    }
}

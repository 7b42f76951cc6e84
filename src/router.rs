//! Route table for the editor
//!
//! Maps URL-style paths onto [`Route`] values and back. The `id` segment of
//! editor and presenter routes selects which presentation to load.

use std::fmt;
use std::sync::OnceLock;

use regex_lite::Regex;
use thiserror::Error;

/// A resolved route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Dashboard listing all presentations
    Home,
    /// Editor for an existing presentation, or a new one when `id` is absent
    Editor { id: Option<String> },
    /// Full-screen presentation
    Present { id: String },
    /// Speaker view with notes
    Speaker { id: String },
    /// Slide library
    Templates,
    /// Settings page
    Settings,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route matches {0:?}")]
    NotFound(String),
}

#[derive(Debug, Clone, Copy)]
enum RouteKind {
    Home,
    Editor,
    Present,
    Speaker,
    Templates,
    Settings,
}

fn route_table() -> &'static [(Regex, RouteKind)] {
    static TABLE: OnceLock<Vec<(Regex, RouteKind)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        [
            (r"^/$", RouteKind::Home),
            (r"^/editor(?:/(?P<id>[^/]+))?$", RouteKind::Editor),
            (r"^/present/(?P<id>[^/]+)$", RouteKind::Present),
            (r"^/present/(?P<id>[^/]+)/speaker$", RouteKind::Speaker),
            (r"^/templates$", RouteKind::Templates),
            (r"^/settings$", RouteKind::Settings),
        ]
        .into_iter()
        .map(|(pattern, kind)| (Regex::new(pattern).expect("route pattern"), kind))
        .collect()
    })
}

impl Route {
    /// Resolve a path such as `/present/abc/speaker`
    ///
    /// Query strings, fragments and a trailing slash are ignored.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            rest if rest.starts_with('/') => rest,
            _ => return Err(RouteError::NotFound(path.to_string())),
        };

        for (regex, kind) in route_table() {
            let Some(caps) = regex.captures(normalized) else {
                continue;
            };
            let id = caps.name("id").map(|m| m.as_str().to_string());
            let route = match (kind, id) {
                (RouteKind::Home, _) => Route::Home,
                (RouteKind::Editor, id) => Route::Editor { id },
                (RouteKind::Present, Some(id)) => Route::Present { id },
                (RouteKind::Speaker, Some(id)) => Route::Speaker { id },
                (RouteKind::Templates, _) => Route::Templates,
                (RouteKind::Settings, _) => Route::Settings,
                _ => continue,
            };
            tracing::debug!("Resolved {} to {}", path, route.name());
            return Ok(route);
        }

        Err(RouteError::NotFound(path.to_string()))
    }

    /// Route name
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Editor { .. } => "Editor",
            Route::Present { .. } => "Present",
            Route::Speaker { .. } => "SpeakerView",
            Route::Templates => "Templates",
            Route::Settings => "Settings",
        }
    }

    /// Canonical path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Editor { id: None } => "/editor".to_string(),
            Route::Editor { id: Some(id) } => format!("/editor/{id}"),
            Route::Present { id } => format!("/present/{id}"),
            Route::Speaker { id } => format!("/present/{id}/speaker"),
            Route::Templates => "/templates".to_string(),
            Route::Settings => "/settings".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

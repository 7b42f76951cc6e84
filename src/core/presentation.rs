//! Presentation records and the listing projection

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Theme used when nothing else is selected
pub const DEFAULT_THEME: &str = "default";

/// A single stored presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresentationRecord {
    /// Unique id, also the key in the stored map
    pub id: String,
    /// Display title
    pub title: String,
    /// Markdown body, slides separated by `---`
    pub content: String,
    /// Theme identifier
    pub theme: String,
    /// Time of the last save, `None` until the first one
    pub last_edited: Option<DateTime<Utc>>,
}

impl Default for PresentationRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            content: String::new(),
            theme: DEFAULT_THEME.to_string(),
            last_edited: None,
        }
    }
}

impl PresentationRecord {
    /// Create an unsaved record with a freshly generated id
    pub fn new(content: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            title: String::new(),
            content: content.into(),
            theme: theme.into(),
            last_edited: None,
        }
    }

    /// Reduce the record to its listing projection
    pub fn summary(&self) -> PresentationSummary {
        PresentationSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            last_edited: self.last_edited,
        }
    }
}

/// Listing entry: id, title and last edit time only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationSummary {
    pub id: String,
    pub title: String,
    pub last_edited: Option<DateTime<Utc>>,
}

/// Generate a random version 4 UUID string
pub fn generate_id() -> String {
    let mut bytes: [u8; 16] = rand::rng().random();
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex = hex::encode(bytes);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

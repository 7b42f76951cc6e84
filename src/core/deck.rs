//! Splitting presentation content into slides
//!
//! Slides are separated by a line consisting of `---`, as in reveal.js
//! markdown decks. Separators inside fenced code blocks are ignored. A line
//! starting with `Note:` (or `Notes:`) begins the speaker notes of a slide.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use super::presentation::PresentationRecord;

/// A single slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// Zero-based position in the deck
    pub index: usize,
    /// Text of the first heading, if any
    pub title: Option<String>,
    /// Markdown shown on the slide
    pub body: String,
    /// Speaker notes, if any
    pub notes: Option<String>,
}

/// A presentation ready to be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub id: String,
    pub title: String,
    pub theme: String,
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Build a deck from a stored presentation
    pub fn from_record(record: &PresentationRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            theme: record.theme.clone(),
            slides: split_slides(&record.content),
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// Split markdown content into slides
pub fn split_slides(content: &str) -> Vec<Slide> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut fences = FenceTracker::default();

    for line in content.lines() {
        if !fences.in_code(line) && line.trim() == "---" {
            chunks.push(std::mem::take(&mut current));
            continue;
        }

        current.push_str(line);
        current.push('\n');
    }
    chunks.push(current);

    chunks
        .iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .enumerate()
        .map(|(index, chunk)| build_slide(index, chunk))
        .collect()
}

fn build_slide(index: usize, chunk: &str) -> Slide {
    let (body, notes) = match find_notes(chunk) {
        Some(start) => {
            let (body, rest) = chunk.split_at(start);
            let notes = rest
                .split_once(':')
                .map(|(_, text)| text.trim().to_string())
                .filter(|text| !text.is_empty());
            (body, notes)
        }
        None => (chunk, None),
    };

    let body = body.trim().to_string();
    Slide {
        index,
        title: first_heading(&body),
        body,
        notes,
    }
}

/// Tracks whether lines fall inside a fenced code block
#[derive(Debug, Default)]
struct FenceTracker {
    open: Option<&'static str>,
}

impl FenceTracker {
    /// Feed the next line; true when it is fenced code or a fence marker
    fn in_code(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if let Some(marker) = self.open {
            if trimmed.starts_with(marker) {
                self.open = None;
            }
            return true;
        }
        for marker in ["```", "~~~"] {
            if trimmed.starts_with(marker) {
                self.open = Some(marker);
                return true;
            }
        }
        false
    }
}

/// Byte offset of the line that starts the speaker notes
fn find_notes(chunk: &str) -> Option<usize> {
    let mut fences = FenceTracker::default();
    let mut offset = 0;
    for line in chunk.split_inclusive('\n') {
        if !fences.in_code(line) {
            let lower = line.trim_start().to_ascii_lowercase();
            if lower.starts_with("note:") || lower.starts_with("notes:") {
                return Some(offset);
            }
        }
        offset += line.len();
    }
    None
}

fn first_heading(markdown: &str) -> Option<String> {
    let mut in_heading = false;
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                in_heading = true;
                text.clear();
            }
            Event::End(TagEnd::Heading(_)) => {
                let title = text.trim();
                if !title.is_empty() {
                    return Some(title.to_string());
                }
                in_heading = false;
            }
            Event::Text(t) | Event::Code(t) if in_heading => text.push_str(&t),
            _ => {}
        }
    }

    None
}

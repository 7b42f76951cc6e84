//! Slide library: markdown slide files kept in a directory

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// A slide file found in the library directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideModule {
    /// Route path, `/<slug>`
    pub path: String,
    /// File stem
    pub name: String,
    /// Human readable title derived from the slug
    pub title: String,
    /// Location of the markdown file
    pub file: PathBuf,
}

impl SlideModule {
    fn from_file(file: PathBuf) -> Option<Self> {
        let slug = file.file_stem()?.to_string_lossy().to_string();
        Some(Self {
            path: format!("/{slug}"),
            title: title_from_slug(&slug),
            name: slug,
            file,
        })
    }

    /// Read the markdown content of the slide file
    pub fn read_content(&self) -> Result<String> {
        std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read slide file: {}", self.file.display()))
    }
}

/// Turn `intro-to-rust` into `Intro To Rust`
pub fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// List the markdown slide files directly inside `dir`, sorted by name
pub fn discover(dir: &Path) -> Vec<SlideModule> {
    if !dir.is_dir() {
        tracing::debug!("Slide library {} does not exist", dir.display());
        return Vec::new();
    }

    let mut modules: Vec<SlideModule> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map(|ext| ext == "md").unwrap_or(false))
        .filter_map(|e| SlideModule::from_file(e.into_path()))
        .collect();

    modules.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!("Discovered {} slide files in {}", modules.len(), dir.display());
    modules
}

/// Find a slide file by slug
pub fn find(dir: &Path, slug: &str) -> Option<SlideModule> {
    discover(dir).into_iter().find(|module| module.name == slug)
}

//! MHL hash-list manifests: parsing and the path index built from them.

pub mod normalize;
pub mod parser;

pub use normalize::PathStrategy;
pub use parser::parse_manifest;

use crate::logging::{AlertLevel, Logger};
use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mapping of normalised path -> recorded size token. Merging keeps the last
/// write for a duplicated key and counts the overwrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Index {
    entries: HashMap<String, String>,
    overwrites: usize,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: String, size: String) {
        if self.entries.insert(path, size).is_some() {
            self.overwrites += 1;
        }
    }

    pub fn size_of(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn overwrites(&self) -> usize {
        self.overwrites
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn basenames(&self) -> std::collections::HashSet<&str> {
        self.entries
            .keys()
            .map(|k| k.rsplit('/').next().unwrap_or(k.as_str()))
            .collect()
    }
}

/// Fold a list of manifests into one index under a single path strategy.
pub fn load_index(
    manifests: &[PathBuf],
    strategy: &PathStrategy,
    logger: &mut Logger,
) -> Result<Index> {
    let mut index = Index::new();
    for manifest in manifests {
        logger.record(
            format!("Loading {}", display_name(manifest)),
            AlertLevel::Normal,
        );
        parse_manifest(manifest, strategy, &mut index)?;
    }
    if index.overwrites() > 0 {
        logger.record(
            format!(
                "{} duplicate index entries were overwritten while merging manifests",
                index.overwrites()
            ),
            AlertLevel::Normal,
        );
    }
    Ok(index)
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

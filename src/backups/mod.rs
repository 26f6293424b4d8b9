//! Backup manifest discovery and redundancy grouping.

pub mod grouping;

pub use grouping::{group_backups, Classifier, GroupLabel};

use crate::logging::{AlertLevel, Logger};
use crate::manifest::{self, Index, PathStrategy};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One independent physical copy of the day's source, described by one or
/// more backup manifests merged into a single index.
#[derive(Debug, Clone)]
pub struct BackupGroup {
    pub label: GroupLabel,
    /// Space-joined manifest stems, used as the group heading in reports.
    pub name: String,
    pub members: Vec<PathBuf>,
    pub index: Index,
    pub parse_error: Option<String>,
}

impl BackupGroup {
    /// Parse failures are captured on the group, not propagated: one
    /// unreadable backup must not abort verification of the others.
    pub fn load(
        label: GroupLabel,
        members: Vec<PathBuf>,
        strategy: &PathStrategy,
        logger: &mut Logger,
    ) -> Self {
        let name = members
            .iter()
            .map(|m| stem_of(m))
            .collect::<Vec<_>>()
            .join(" ");

        let mut index = Index::new();
        for member in &members {
            logger.record(
                format!("Loading backup {}", manifest::display_name(member)),
                AlertLevel::Normal,
            );
            if let Err(err) = manifest::parse_manifest(member, strategy, &mut index) {
                return Self {
                    label,
                    name,
                    members,
                    index: Index::new(),
                    parse_error: Some(format!("{err:#}")),
                };
            }
        }

        if let Some(example) = index.keys().next() {
            logger.record(
                format!("Normalised backup path example: {example}"),
                AlertLevel::Verbose,
            );
        }
        if index.overwrites() > 0 {
            logger.record(
                format!(
                    "{}: {} duplicate entries overwritten while merging backup manifests",
                    name,
                    index.overwrites()
                ),
                AlertLevel::Normal,
            );
        }

        Self {
            label,
            name,
            members,
            index,
            parse_error: None,
        }
    }
}

/// Find the backup manifests at the top level of the folder.
pub fn discover_backup_manifests(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut mhls = Vec::new();
    let entries = fs::read_dir(folder)
        .with_context(|| format!("failed to list backup folder {}", folder.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && has_extension(&path, "mhl") {
            mhls.push(path);
        }
    }
    if mhls.is_empty() {
        anyhow::bail!("no backup manifests found in {}", folder.display());
    }
    mhls.sort();
    Ok(mhls)
}

/// Backup manifests and the delivery log live in a `Verifier` subfolder when
/// the day has one.
pub fn folder_to_scan(root: &Path) -> PathBuf {
    let verifier = root.join("Verifier");
    if verifier.is_dir() {
        verifier
    } else {
        root.to_path_buf()
    }
}

pub(crate) fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}

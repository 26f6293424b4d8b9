//! Walks the source storage tree to find what is actually on disk.

use crate::logging::{AlertLevel, Logger};
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// OS metadata droppings, never part of the captured media.
pub const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db", "desktop.ini", ".Spotlight-V100"];

/// Everything found under the configured source subtrees. Source manifests
/// are tracked apart from content because the indexes do not list themselves.
#[derive(Debug, Clone, Default)]
pub struct SourceScan {
    pub files: BTreeSet<String>,
    pub manifests: Vec<PathBuf>,
    pub skipped: usize,
    pub missing_folders: Vec<String>,
}

/// Walk each configured source subtree under `root`. A missing subtree is a
/// warning; finding no source manifests anywhere is fatal.
pub fn scan_sources(
    root: &Path,
    source_folders: &[String],
    logger: &mut Logger,
) -> Result<SourceScan> {
    let mut scan = SourceScan::default();

    for folder in source_folders {
        let folder_path = root.join(folder);
        if !folder_path.exists() {
            logger.report(
                format!("[WARNING] {folder} folder not found"),
                AlertLevel::Warning,
            );
            scan.missing_folders.push(folder.clone());
            continue;
        }

        for entry in WalkDir::new(&folder_path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let name = entry.file_name().to_string_lossy();
            if IGNORED_FILES.contains(&name.as_ref()) {
                scan.skipped += 1;
                continue;
            }
            if name.to_lowercase().ends_with(".mhl") {
                logger.record(format!("Source manifest: {name}"), AlertLevel::Verbose);
                scan.manifests.push(entry.path().to_path_buf());
            } else if let Some(key) = relative_key(entry.path(), &folder_path) {
                scan.files.insert(key);
            }
        }
    }

    scan.manifests.sort();

    if scan.manifests.is_empty() {
        anyhow::bail!("no source manifests found in the configured source folders");
    }

    logger.record(
        format!(
            "{} files and {} source manifests found ({} ignored)",
            scan.files.len(),
            scan.manifests.len(),
            scan.skipped
        ),
        AlertLevel::Normal,
    );

    Ok(scan)
}

// Must match the key form produced by manifest normalisation.
fn relative_key(path: &Path, folder_path: &Path) -> Option<String> {
    let rel = path.strip_prefix(folder_path).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(format!("/{}", parts.join("/")))
    }
}

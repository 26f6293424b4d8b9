//! Canonical comparison keys for manifest paths. Each index is built under
//! exactly one strategy mapping its raw paths into the shared key space.

use anyhow::Result;
use regex::Regex;
use std::path::Path;

/// How a raw manifest path becomes a comparison key.
#[derive(Debug, Clone)]
pub enum PathStrategy {
    /// Prepend components from the manifest's own directory when the manifest
    /// is roll-relative; full-path manifests are trimmed at the first
    /// component matching one of `roots` instead.
    ParentFolders { depth: usize, roots: Vec<String> },
    /// Discard everything up to and including the first component matching
    /// the pattern.
    RootPattern(Regex),
    /// Discard a fixed number of leading components.
    TrimLevels(usize),
    /// Separator normalisation only, with a `/Volumes/<name>` mount prefix
    /// stripped when present.
    AsIs,
}

impl PathStrategy {
    pub fn apply(
        &self,
        mut parts: Vec<String>,
        manifest_dir: &Path,
        roll_relative: bool,
    ) -> Result<Vec<String>> {
        match self {
            PathStrategy::ParentFolders { depth, roots } => {
                if roll_relative {
                    let mut injected = parent_components(manifest_dir, *depth);
                    injected.append(&mut parts);
                    Ok(injected)
                } else if let Some(at) = parts.iter().position(|p| roots.contains(p)) {
                    Ok(parts.split_off(at + 1))
                } else {
                    Ok(strip_volume_prefix(parts))
                }
            }
            PathStrategy::RootPattern(pattern) => {
                if let Some(at) = parts.iter().position(|p| pattern.is_match(p)) {
                    Ok(parts.split_off(at + 1))
                } else {
                    Ok(parts)
                }
            }
            PathStrategy::TrimLevels(levels) => {
                if *levels >= parts.len() {
                    anyhow::bail!(
                        "path trim of {} levels leaves nothing of {}; check the preset trim level",
                        levels,
                        parts.join("/")
                    );
                }
                Ok(parts.split_off(*levels))
            }
            PathStrategy::AsIs => Ok(strip_volume_prefix(parts)),
        }
    }
}

/// Both separator conventions appear in the wild, sometimes in the same
/// manifest.
pub fn split_components(raw: &str) -> Vec<String> {
    raw.split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
        .collect()
}

pub fn join_key(parts: &[String]) -> String {
    format!("/{}", parts.join("/"))
}

fn parent_components(manifest_dir: &Path, depth: usize) -> Vec<String> {
    let components: Vec<String> = manifest_dir
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    let start = components.len().saturating_sub(depth);
    components[start..].to_vec()
}

fn strip_volume_prefix(parts: Vec<String>) -> Vec<String> {
    if parts.len() >= 2 && parts[0] == "Volumes" {
        parts[2..].to_vec()
    } else {
        parts
    }
}

//! Verifier settings and the TOML preset store, one `[presets.<name>]`
//! settings table per job or show.

use crate::manifest::PathStrategy;
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Everything the verification run consumes; owned by the caller, not by the
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierSettings {
    #[serde(default = "default_source_folders")]
    pub source_folders: Vec<String>,
    /// Component pattern marking the root of backup-recorded paths.
    #[serde(default)]
    pub backup_pattern: String,
    /// Leading components to drop from backup paths when no pattern is set.
    #[serde(default)]
    pub backup_trim: usize,
    #[serde(default = "default_true")]
    pub dual_backups: bool,
    #[serde(default = "default_roll_depth")]
    pub roll_folder_depth: usize,
    #[serde(default)]
    pub require_editorial_log: bool,
    /// Discrepancies shown per category before the remainder is summarised.
    #[serde(default = "default_display_cutoff")]
    pub display_cutoff: usize,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub skip_report_write: bool,
}

impl Default for VerifierSettings {
    fn default() -> Self {
        Self {
            source_folders: default_source_folders(),
            backup_pattern: String::new(),
            backup_trim: 0,
            dual_backups: default_true(),
            roll_folder_depth: default_roll_depth(),
            require_editorial_log: false,
            display_cutoff: default_display_cutoff(),
            workers: default_workers(),
            skip_report_write: false,
        }
    }
}

impl VerifierSettings {
    pub fn source_strategy(&self) -> PathStrategy {
        PathStrategy::ParentFolders {
            depth: self.roll_folder_depth,
            roots: self.source_folders.clone(),
        }
    }

    /// Pattern and trim are mutually exclusive; the pattern wins when both
    /// are configured.
    pub fn backup_strategy(&self) -> Result<PathStrategy> {
        if !self.backup_pattern.is_empty() {
            let pattern = Regex::new(&self.backup_pattern)
                .with_context(|| format!("invalid backup path pattern {:?}", self.backup_pattern))?;
            Ok(PathStrategy::RootPattern(pattern))
        } else if self.backup_trim > 0 {
            Ok(PathStrategy::TrimLevels(self.backup_trim))
        } else {
            Ok(PathStrategy::AsIs)
        }
    }
}

#[derive(Debug, Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: BTreeMap<String, VerifierSettings>,
}

pub fn load_presets(path: &Path) -> Result<BTreeMap<String, VerifierSettings>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read preset file {}", path.display()))?;
    let parsed: PresetFile = toml::from_str(&raw)
        .with_context(|| format!("invalid preset file {}", path.display()))?;
    if parsed.presets.is_empty() {
        anyhow::bail!("no presets defined in {}", path.display());
    }
    Ok(parsed.presets)
}

fn default_source_folders() -> Vec<String> {
    vec!["Camera_Media".into(), "Sound_Media".into()]
}

const fn default_true() -> bool {
    true
}

const fn default_roll_depth() -> usize {
    1
}

const fn default_display_cutoff() -> usize {
    5
}

const fn default_workers() -> usize {
    2
}

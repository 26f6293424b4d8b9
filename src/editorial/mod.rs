//! Minimal read-only ALE (Avid Log Exchange) access: just enough of the
//! Heading / Column / Data layout to pull one column of clip names.

pub mod clips;

pub use clips::{expected_basenames, rewrite_frame_sequence};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// An editorial log table: column names plus tab-delimited rows.
#[derive(Debug, Clone)]
pub struct AleTable {
    pub name: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl AleTable {
    /// First column whose name exactly matches one of `names`; case-sensitive.
    pub fn column(&self, names: &[&str]) -> Option<Vec<String>> {
        for name in names {
            if let Some(at) = self.columns.iter().position(|c| c == name) {
                return Some(
                    self.rows
                        .iter()
                        .map(|row| row.get(at).cloned().unwrap_or_default())
                        .collect(),
                );
            }
        }
        None
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// The line after `Column` names the columns; everything after `Data` is a
/// row.
pub fn read_ale(path: &Path) -> Result<AleTable> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read editorial log {}", path.display()))?;

    let mut columns: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut in_data = false;
    let mut next_is_columns = false;

    for line in contents.lines() {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if next_is_columns {
            columns = split_row(trimmed);
            next_is_columns = false;
            continue;
        }
        match trimmed.trim() {
            "Column" => next_is_columns = true,
            "Data" => in_data = true,
            "" => {}
            _ if in_data => rows.push(split_row(trimmed)),
            _ => {} // heading key/value lines
        }
    }

    if columns.is_empty() {
        anyhow::bail!("no Column section found in {}", path.display());
    }

    Ok(AleTable {
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        columns,
        rows,
    })
}

/// First editorial log found at the top level of the folder, if any.
pub fn find_day_ale(folder: &Path) -> Result<Option<AleTable>> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(folder)
        .with_context(|| format!("failed to list {}", folder.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.eq_ignore_ascii_case("ale"))
                    .unwrap_or(false)
        })
        .collect();
    candidates.sort();

    match candidates.first() {
        Some(path) => Ok(Some(read_ale(path)?)),
        None => Ok(None),
    }
}

fn split_row(line: &str) -> Vec<String> {
    line.split('\t').map(|s| s.trim().to_string()).collect()
}

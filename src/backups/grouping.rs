//! Classification of backup manifests into redundancy groups: an ordered rule
//! table, tape codes before drive codes.

use super::stem_of;
use crate::logging::{AlertLevel, Logger};
use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Which redundant copy a backup manifest belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GroupLabel {
    Primary,
    Secondary,
    Tertiary,
    /// Could not be classified; still verified, but flagged with a warning.
    Unknown,
}

impl GroupLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupLabel::Primary => "primary",
            GroupLabel::Secondary => "secondary",
            GroupLabel::Tertiary => "tertiary",
            GroupLabel::Unknown => "unknown",
        }
    }
}

struct Rule {
    pattern: Regex,
    assign: fn(&str) -> GroupLabel,
}

/// Ordered rule table mapping manifest stems to group labels.
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    pub fn new() -> Result<Self> {
        let rules = vec![
            // Tape code: four leading characters then two digits, e.g.
            // LTO001. Dual-tape jobs alternate tape numbers, so the parity of
            // the final digit separates the two copies.
            Rule {
                pattern: Regex::new(r"^[0-9A-Za-z]{4}\d{2}$")?,
                assign: assign_tape,
            },
            // Drive code: digits with an optional copy-letter suffix, e.g.
            // REEL_001A. No suffix or A is the primary copy, B the secondary,
            // C the tertiary.
            Rule {
                pattern: Regex::new(r"\d+[A-Ca-c]?$")?,
                assign: assign_drive,
            },
        ];
        Ok(Self { rules })
    }

    /// First matching rule wins; no rule means the manifest is unclassified.
    pub fn classify(&self, stem: &str) -> Option<GroupLabel> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(stem))
            .map(|rule| (rule.assign)(stem))
    }
}

fn assign_tape(stem: &str) -> GroupLabel {
    let last_digit = stem
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .unwrap_or(0);
    if last_digit % 2 != 0 {
        GroupLabel::Primary
    } else {
        GroupLabel::Secondary
    }
}

fn assign_drive(stem: &str) -> GroupLabel {
    match stem.chars().last() {
        Some('B') | Some('b') => GroupLabel::Secondary,
        Some('C') | Some('c') => GroupLabel::Tertiary,
        _ => GroupLabel::Primary,
    }
}

/// Partition the discovered backup manifests into redundancy groups. With
/// dual-backup checking disabled, everything lands in one primary group.
pub fn group_backups(
    mhls: Vec<PathBuf>,
    dual_backups: bool,
    logger: &mut Logger,
) -> Result<Vec<(GroupLabel, Vec<PathBuf>)>> {
    if !dual_backups {
        return Ok(vec![(GroupLabel::Primary, mhls)]);
    }

    let classifier = Classifier::new()?;
    let mut buckets: BTreeMap<GroupLabel, Vec<PathBuf>> = BTreeMap::new();

    for mhl in mhls {
        let stem = stem_of(&mhl);
        match classifier.classify(&stem) {
            Some(label) => buckets.entry(label).or_default().push(mhl),
            None => {
                logger.report(
                    format!("[WARNING] could not classify backup {stem} into a redundancy group"),
                    AlertLevel::Warning,
                );
                buckets.entry(GroupLabel::Unknown).or_default().push(mhl);
            }
        }
    }

    if buckets.len() < 2 {
        logger.report(
            "[WARNING] only one backup group found",
            AlertLevel::Warning,
        );
    }

    Ok(buckets.into_iter().collect())
}

//! Expected backup basenames derived from an editorial log.

use super::AleTable;
use regex::Regex;
use std::sync::OnceLock;

pub const CLIP_COLUMNS: &[&str] = &["Display name", "Display Name"];

/// Per-frame capture formats, referenced in logs by a bracketed frame range.
pub const FRAME_SEQUENCE_EXTENSIONS: &[&str] = &["ari", "arx", "dpx", "dng"];

fn frame_range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[(\d{7,8})-\d{7,8}\]").expect("frame range pattern"))
}

/// Clip references from the log, rewritten so each names one physical file.
/// `None` means the log has no recognised clip column.
pub fn expected_basenames(ale: &AleTable) -> Option<Vec<String>> {
    let values = ale.column(CLIP_COLUMNS)?;
    Some(
        values
            .iter()
            .filter(|v| !v.is_empty())
            .map(|v| rewrite_frame_sequence(v))
            .collect(),
    )
}

/// Collapse a frame-sequence reference to its first frame's filename:
/// `CLIP_A[1001001-1001010].ari` becomes `CLIP_A1001001.ari`.
pub fn rewrite_frame_sequence(clip: &str) -> String {
    let is_sequence = clip
        .rsplit('.')
        .next()
        .map(|ext| FRAME_SEQUENCE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false);
    if !is_sequence {
        return clip.to_string();
    }

    let pattern = frame_range_pattern();
    match pattern.captures(clip) {
        Some(caps) => {
            let first_frame = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            pattern.replace(clip, first_frame).into_owned()
        }
        None => clip.to_string(),
    }
}

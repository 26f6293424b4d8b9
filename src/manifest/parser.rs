//! Line-oriented MHL parsing. The files are XML on paper, but every tool in
//! the chain writes one tag per line, so the parser scans lines.

use super::normalize::{join_key, split_components, PathStrategy};
use super::Index;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub const SUPPORTED_MHL_VERSION: &str = "1.1";

/// Creator whose manifests record full paths, so the enclosing roll folder
/// must not be synthesised onto entries.
const FULL_PATH_CREATOR: &str = "YoYotta";

/// Parse one manifest into `index`, normalising every entry under `strategy`.
/// A `<file>` line not immediately followed by a `<size>` line is malformed.
pub fn parse_manifest(path: &Path, strategy: &PathStrategy, index: &mut Index) -> Result<()> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let manifest_dir = path.parent().unwrap_or_else(|| Path::new(""));

    let lines: Vec<&str> = contents.lines().map(str::trim).collect();
    let mut roll_relative = false;

    for (line_number, line) in lines.iter().enumerate() {
        if line.starts_with("<hashlist") {
            let version = declared_version(line).with_context(|| {
                format!(
                    "malformed hashlist declaration in {}: {line}",
                    path.display()
                )
            })?;
            if version != SUPPORTED_MHL_VERSION {
                anyhow::bail!(
                    "unsupported MHL version {version} in {} (only {SUPPORTED_MHL_VERSION} is accepted)",
                    path.display()
                );
            }
        } else if line.starts_with("<username>") {
            let creator = strip_tag(line, "username");
            roll_relative = !creator.contains(FULL_PATH_CREATOR);
        } else if line.starts_with("<file>") {
            let raw_path = strip_tag(line, "file");
            let size_line = lines.get(line_number + 1).copied().unwrap_or("");
            if !size_line.starts_with("<size>") {
                anyhow::bail!(
                    "malformed manifest {}: <file> entry at line {} has no following <size>",
                    path.display(),
                    line_number + 1
                );
            }
            let size = strip_tag(size_line, "size");

            let parts = split_components(&raw_path);
            let parts = strategy
                .apply(parts, manifest_dir, roll_relative)
                .with_context(|| format!("while normalising {raw_path} from {}", path.display()))?;
            index.insert(join_key(&parts), size);
        }
    }

    Ok(())
}

fn declared_version(line: &str) -> Option<String> {
    let rest = line.split_once("version=\"")?.1;
    let (version, _) = rest.split_once('"')?;
    Some(version.to_string())
}

fn strip_tag(line: &str, tag: &str) -> String {
    line.replace(&format!("<{tag}>"), "")
        .replace(&format!("</{tag}>"), "")
        .trim()
        .to_string()
}

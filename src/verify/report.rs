//! Report rendering and the artifacts written into the day folder.

use super::checks::{GroupReport, QUICK_CHECK};
use super::VerificationRun;
use crate::logging::{AlertLevel, Logger};
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Fold one group's results into the logger.
pub fn render_group(logger: &mut Logger, report: &GroupReport, cutoff: usize) {
    logger.report(
        format!("\n{} ({} backup)", report.name, report.label.as_str()),
        AlertLevel::Normal,
    );

    if let Some(err) = &report.parse_error {
        logger.lock_error();
        logger.report(
            format!("Backup manifest could not be parsed: {err}"),
            AlertLevel::Failed,
        );
        return;
    }

    logger.report(
        format!("{} files checked", report.files_checked),
        AlertLevel::Normal,
    );
    if report.clips_checked > 0 {
        logger.report(
            format!("{} clip references checked", report.clips_checked),
            AlertLevel::Normal,
        );
    }

    for check in &report.checks_run {
        if check.passed {
            logger.record(format!("{}: passed", check.name), AlertLevel::Verbose);
        } else if check.name == QUICK_CHECK && !report.has_discrepancies() {
            // counts disagree but nothing concrete was found; suspicious, not
            // yet proven wrong
            logger.report(
                format!("[WARNING] {} failed", check.name),
                AlertLevel::Warning,
            );
        }
    }

    record_check_list(logger, "Missing from backup", &report.missing_from_backup, cutoff);
    record_check_list(logger, "Wrong size on backup", &report.size_mismatched, cutoff);
    record_check_list(logger, "Files not in source index", &report.not_in_source_index, cutoff);
    record_check_list(
        logger,
        "Source index entries with no file",
        &report.missing_source_files,
        cutoff,
    );
    record_check_list(logger, "Missing delivery clips", &report.missing_delivery, cutoff);
}

/// The first `cutoff` entries verbatim, then one summary line for the
/// remainder. An empty category reports a pass.
pub fn record_check_list(logger: &mut Logger, name: &str, entries: &[String], cutoff: usize) {
    if entries.is_empty() {
        logger.report(format!("{name} - None"), AlertLevel::Passed);
        return;
    }

    logger.lock_error();
    logger.report(name.to_string(), AlertLevel::Failed);
    for entry in entries.iter().take(cutoff) {
        logger.report(format!("\t{entry}"), AlertLevel::Failed);
    }
    if entries.len() > cutoff {
        logger.report(
            format!("\t…and {} more", entries.len() - cutoff),
            AlertLevel::Failed,
        );
    }
}

/// Write the text report and the JSON run summary into the day folder.
pub fn write_report_files(
    root: &Path,
    run: &VerificationRun,
    lines: &[String],
) -> Result<(PathBuf, PathBuf)> {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let verdict = run.result.verdict();

    let report_path = root.join(format!("{} - checks {} - {}.txt", run.day_name, verdict, stamp));
    fs::write(&report_path, lines.join("\n"))
        .with_context(|| format!("failed to write report {}", report_path.display()))?;

    let summary_path = root.join(format!("{} - summary - {}.json", run.day_name, stamp));
    let summary = serde_json::to_string_pretty(run)?;
    fs::write(&summary_path, summary)
        .with_context(|| format!("failed to write summary {}", summary_path.display()))?;

    Ok((report_path, summary_path))
}

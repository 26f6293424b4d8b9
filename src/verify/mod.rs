//! The verification run: immutable inputs, per-group reconciliation, verdict.

pub mod checks;
pub mod report;

pub use checks::{CheckContext, CheckOutcome, GroupReport};

use crate::backups::{self, BackupGroup};
use crate::editorial::{self, expected_basenames};
use crate::logging::{AlertLevel, AlertSink, Logger};
use crate::manifest::load_index;
use crate::presets::VerifierSettings;
use crate::scan::scan_sources;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Everything one verification run produced; serialised as the JSON summary.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationRun {
    pub run_id: Uuid,
    pub day_name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub result: AlertLevel,
    pub duplicate_entries: usize,
    pub groups: Vec<GroupReport>,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub run: VerificationRun,
    pub report_path: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
}

impl RunOutcome {
    pub fn passed(&self) -> bool {
        self.run.result == AlertLevel::Passed
    }
}

/// Verify a day folder against its backup manifests. Fatal errors abort with
/// `Err`; discrepancies and warnings are data and land in the returned run.
pub fn verify_day(
    root: &Path,
    settings: &VerifierSettings,
    sink: &dyn AlertSink,
) -> Result<RunOutcome> {
    let started_at = Utc::now();
    let mut logger = Logger::new(sink);

    let day_name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| root.display().to_string());
    logger.record(format!("Checking day folder {day_name}"), AlertLevel::Normal);

    // source side: what is on disk and what the ingest tools recorded
    let scan = scan_sources(root, &settings.source_folders, &mut logger)?;
    let source_index = load_index(&scan.manifests, &settings.source_strategy(), &mut logger)?;

    // backup side: discover, group, and merge each group's manifests
    let backup_folder = backups::folder_to_scan(root);
    let backup_mhls = backups::discover_backup_manifests(&backup_folder)?;
    let grouped = backups::group_backups(backup_mhls, settings.dual_backups, &mut logger)?;
    let backup_strategy = settings.backup_strategy()?;
    let groups: Vec<BackupGroup> = grouped
        .into_iter()
        .map(|(label, members)| BackupGroup::load(label, members, &backup_strategy, &mut logger))
        .collect();

    // delivery side: optional editorial log
    let clip_refs: Option<Vec<String>> = match editorial::find_day_ale(&backup_folder)? {
        Some(ale) => {
            logger.record(
                format!("Editorial log {} with {} rows", ale.name, ale.row_count()),
                AlertLevel::Normal,
            );
            match expected_basenames(&ale) {
                Some(clips) => Some(clips),
                None => {
                    logger.report(
                        "[WARNING] editorial log has no recognised clip column",
                        AlertLevel::Warning,
                    );
                    Some(Vec::new())
                }
            }
        }
        None => {
            if settings.require_editorial_log {
                logger.report("[WARNING] no editorial log found", AlertLevel::Warning);
            }
            None
        }
    };

    let context = CheckContext {
        source_index: &source_index,
        source_files: &scan.files,
        source_manifest_count: scan.manifests.len(),
        clip_refs: clip_refs.as_deref(),
    };

    // groups only read the shared inputs and write their own report, so they
    // check in parallel
    let pool = ThreadPoolBuilder::new()
        .num_threads(settings.workers.max(1))
        .build()
        .context("failed to build verification thread pool")?;
    let reports: Vec<GroupReport> = pool.install(|| {
        groups
            .par_iter()
            .map(|group| checks::run_group_checks(&context, group))
            .collect()
    });

    logger.report(
        format!("\nBackups checked: {}", reports.len()),
        AlertLevel::Normal,
    );
    for group_report in &reports {
        report::render_group(&mut logger, group_report, settings.display_cutoff);
    }

    let duplicate_entries = source_index.overwrites()
        + groups.iter().map(|g| g.index.overwrites()).sum::<usize>();

    // the error lock and the alert level must agree before either becomes a
    // verdict
    logger.check_consistency()?;

    let run = VerificationRun {
        run_id: Uuid::new_v4(),
        day_name,
        started_at,
        finished_at: Utc::now(),
        result: logger.level(),
        duplicate_entries,
        groups: reports,
    };

    let (report_path, summary_path) = if settings.skip_report_write {
        (None, None)
    } else {
        let (report, summary) = report::write_report_files(root, &run, logger.report_lines())?;
        (Some(report), Some(summary))
    };

    Ok(RunOutcome {
        run,
        report_path,
        summary_path,
    })
}

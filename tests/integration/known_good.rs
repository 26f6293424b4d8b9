use super::{as_entry_refs, full_backup_entries, known_good_day, test_settings};
use anyhow::Result;
use reelcheck::backups::GroupLabel;
use reelcheck::AlertLevel;

#[test]
fn fully_backed_up_day_passes_every_check() -> Result<()> {
    let day = known_good_day();
    day.backup_mhl("LTO001", &as_entry_refs(&full_backup_entries("LTO001")));
    day.backup_mhl("LTO002", &as_entry_refs(&full_backup_entries("LTO002")));

    let outcome = day.verify(&test_settings())?;

    assert_eq!(outcome.run.result, AlertLevel::Passed);
    assert!(outcome.passed());
    assert_eq!(outcome.run.groups.len(), 2);
    assert_eq!(outcome.run.duplicate_entries, 0);

    for group in &outcome.run.groups {
        assert!(group.passed(), "group {} should pass", group.name);
        assert_eq!(group.files_checked, 4);
        assert!(!group.has_discrepancies());
        assert!(group.parse_error.is_none());
    }

    assert_eq!(outcome.run.groups[0].label, GroupLabel::Primary);
    assert_eq!(outcome.run.groups[0].name, "LTO001");
    assert_eq!(outcome.run.groups[1].label, GroupLabel::Secondary);
    assert_eq!(outcome.run.groups[1].name, "LTO002");
    Ok(())
}

#[test]
fn repeated_runs_produce_identical_results() -> Result<()> {
    let day = known_good_day();
    // secondary tape is short one roll so the reports carry discrepancies
    day.backup_mhl("LTO001", &as_entry_refs(&full_backup_entries("LTO001")));
    let mut partial = full_backup_entries("LTO002");
    partial.retain(|(path, _)| !path.contains("A002R1AA"));
    day.backup_mhl("LTO002", &as_entry_refs(&partial));

    let first = day.verify(&test_settings())?;
    let second = day.verify(&test_settings())?;

    assert_eq!(first.run.result, second.run.result);
    assert_eq!(first.run.groups, second.run.groups);
    Ok(())
}

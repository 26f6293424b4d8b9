use super::{as_entry_refs, full_backup_entries, known_good_day, test_settings};
use anyhow::Result;
use reelcheck::backups::GroupLabel;
use reelcheck::AlertLevel;

#[test]
fn drive_suffix_backups_form_three_groups() -> Result<()> {
    let day = known_good_day();
    for name in ["REEL_001A", "REEL_001B", "REEL_001C"] {
        day.backup_mhl(name, &as_entry_refs(&full_backup_entries(name)));
    }

    let outcome = day.verify(&test_settings())?;

    assert_eq!(outcome.run.result, AlertLevel::Passed);
    let labels: Vec<GroupLabel> = outcome.run.groups.iter().map(|g| g.label).collect();
    assert_eq!(
        labels,
        [GroupLabel::Primary, GroupLabel::Secondary, GroupLabel::Tertiary]
    );
    assert!(outcome.run.groups.iter().all(|g| g.passed()));
    Ok(())
}

#[test]
fn unclassifiable_backup_is_verified_in_the_unknown_bucket() -> Result<()> {
    let day = known_good_day();
    day.backup_mhl("LTO001", &as_entry_refs(&full_backup_entries("LTO001")));
    day.backup_mhl(
        "final_checksums",
        &as_entry_refs(&full_backup_entries("final_checksums")),
    );

    let outcome = day.verify(&test_settings())?;

    assert_eq!(outcome.run.result, AlertLevel::Warning);
    let unknown = outcome
        .run
        .groups
        .iter()
        .find(|g| g.label == GroupLabel::Unknown)
        .expect("unknown bucket should still be verified");
    assert!(unknown.passed());
    Ok(())
}

#[test]
fn single_tape_with_dual_backups_expected_is_a_warning() -> Result<()> {
    let day = known_good_day();
    day.backup_mhl("LTO001", &as_entry_refs(&full_backup_entries("LTO001")));

    let outcome = day.verify(&test_settings())?;

    assert_eq!(outcome.run.result, AlertLevel::Warning);
    assert_eq!(outcome.run.groups.len(), 1);
    assert!(outcome.run.groups[0].passed());
    Ok(())
}

#[test]
fn dual_backup_checking_disabled_merges_all_tapes_into_one_group() -> Result<()> {
    let day = known_good_day();
    day.backup_mhl("LTO001", &as_entry_refs(&full_backup_entries("LTO001")));
    day.backup_mhl("LTO002", &as_entry_refs(&full_backup_entries("LTO002")));

    let mut settings = test_settings();
    settings.dual_backups = false;
    let outcome = day.verify(&settings)?;

    assert_eq!(outcome.run.result, AlertLevel::Passed);
    assert_eq!(outcome.run.groups.len(), 1);
    assert_eq!(outcome.run.groups[0].name, "LTO001 LTO002");
    assert!(outcome.run.groups[0].passed());
    Ok(())
}

use super::{as_entry_refs, full_backup_entries, known_good_day, test_settings};
use anyhow::Result;
use reelcheck::backups::GroupLabel;
use reelcheck::AlertLevel;

#[test]
fn roll_absent_from_one_tape_fails_that_group_only() -> Result<()> {
    let day = known_good_day();
    day.backup_mhl("LTO001", &as_entry_refs(&full_backup_entries("LTO001")));
    let mut partial = full_backup_entries("LTO002");
    partial.retain(|(path, _)| !path.contains("A002R1AA"));
    day.backup_mhl("LTO002", &as_entry_refs(&partial));

    let outcome = day.verify(&test_settings())?;

    assert_eq!(outcome.run.result, AlertLevel::Failed);
    assert!(!outcome.passed());

    let primary = outcome
        .run
        .groups
        .iter()
        .find(|g| g.label == GroupLabel::Primary)
        .unwrap();
    assert!(primary.passed());

    let secondary = outcome
        .run
        .groups
        .iter()
        .find(|g| g.label == GroupLabel::Secondary)
        .unwrap();
    assert!(!secondary.passed());
    assert_eq!(
        secondary.missing_from_backup,
        ["/A002R1AA/A002C001.mov"],
        "both backup checks flag the clip once"
    );
    assert!(secondary.size_mismatched.is_empty());
    assert!(secondary.not_in_source_index.is_empty());
    assert!(secondary.missing_source_files.is_empty());
    Ok(())
}

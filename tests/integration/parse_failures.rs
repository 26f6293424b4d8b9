use super::{as_entry_refs, full_backup_entries, known_good_day, test_settings};
use anyhow::Result;
use reelcheck::backups::GroupLabel;
use reelcheck::AlertLevel;

#[test]
fn unparsable_backup_fails_its_group_but_not_the_run() -> Result<()> {
    let day = known_good_day();
    day.backup_mhl("LTO001", &as_entry_refs(&full_backup_entries("LTO001")));
    day.backup_mhl_with_version(
        "1.0",
        "LTO002",
        &as_entry_refs(&full_backup_entries("LTO002")),
    );

    let outcome = day.verify(&test_settings())?;

    assert_eq!(outcome.run.result, AlertLevel::Failed);

    let primary = outcome
        .run
        .groups
        .iter()
        .find(|g| g.label == GroupLabel::Primary)
        .unwrap();
    assert!(primary.passed(), "healthy group must still be verified");

    let secondary = outcome
        .run
        .groups
        .iter()
        .find(|g| g.label == GroupLabel::Secondary)
        .unwrap();
    assert!(!secondary.passed());
    let parse_error = secondary.parse_error.as_ref().unwrap();
    assert!(parse_error.contains("unsupported MHL version"));
    assert!(secondary.checks_run.is_empty(), "no checks ran, so no pass");
    Ok(())
}

#[test]
fn unparsable_source_manifest_aborts_the_run() {
    let day = known_good_day();
    day.backup_mhl("LTO001", &as_entry_refs(&full_backup_entries("LTO001")));

    // corrupt one source manifest: a <file> with no <size> after it
    let broken = "<hashlist version=\"1.1\">\n<hash>\n<file>A001C001.mov</file>\n</hash>\n</hashlist>\n";
    std::fs::write(
        day.root.join("Camera_Media/A001R1AA/A001R1AA.mhl"),
        broken,
    )
    .unwrap();

    let err = day.verify(&test_settings()).unwrap_err();
    assert!(format!("{err:#}").contains("malformed manifest"));
}

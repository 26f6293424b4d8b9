use super::{as_entry_refs, full_backup_entries, known_good_day, test_settings};
use anyhow::Result;
use reelcheck::AlertLevel;

#[test]
fn file_on_disk_missing_from_source_index_fails() -> Result<()> {
    let day = known_good_day();
    // a clip landed on disk after the roll was indexed
    day.media("Camera_Media", "A001R1AA", "A001C003.mov");

    // the backup tool copied everything it saw, so the backups are complete
    let mut entries = full_backup_entries("LTO001");
    entries.push((
        "/Volumes/LTO001/DAY_01/Camera_Media/A001R1AA/A001C003.mov".into(),
        "4096".into(),
    ));
    day.backup_mhl("LTO001", &as_entry_refs(&entries));
    let mut entries = full_backup_entries("LTO002");
    entries.push((
        "/Volumes/LTO002/DAY_01/Camera_Media/A001R1AA/A001C003.mov".into(),
        "4096".into(),
    ));
    day.backup_mhl("LTO002", &as_entry_refs(&entries));

    let outcome = day.verify(&test_settings())?;

    assert_eq!(outcome.run.result, AlertLevel::Failed);
    for group in &outcome.run.groups {
        assert_eq!(group.not_in_source_index, ["/A001R1AA/A001C003.mov"]);
        assert!(group.missing_from_backup.is_empty());
        assert!(group.missing_source_files.is_empty());
        assert!(!group.passed());
    }
    Ok(())
}

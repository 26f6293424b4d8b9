use super::{test_settings, DayFolder};
use anyhow::Result;
use reelcheck::AlertLevel;

#[test]
fn absent_sound_folder_warns_but_checks_still_pass() -> Result<()> {
    // a day with no sound recordist: camera media only
    let day = DayFolder::new("DAY_02");
    day.media("Camera_Media", "A001R1AA", "A001C001.mov");
    day.source_mhl("Camera_Media", "A001R1AA", &[("A001C001.mov", "1024")]);

    let entries = |tape: &str| {
        vec![
            (
                format!("/Volumes/{tape}/DAY_02/Camera_Media/A001R1AA/A001C001.mov"),
                "1024".to_string(),
            ),
            (
                format!("/Volumes/{tape}/DAY_02/Camera_Media/A001R1AA/A001R1AA.mhl"),
                "600".to_string(),
            ),
        ]
    };
    let primary = entries("LTO001");
    let secondary = entries("LTO002");
    day.backup_mhl("LTO001", &super::as_entry_refs(&primary));
    day.backup_mhl("LTO002", &super::as_entry_refs(&secondary));

    let outcome = day.verify(&test_settings())?;

    assert_eq!(outcome.run.result, AlertLevel::Warning);
    assert!(!outcome.passed());
    for group in &outcome.run.groups {
        assert!(group.passed(), "checks themselves should all pass");
        assert!(!group.has_discrepancies());
    }
    Ok(())
}

#[test]
fn missing_source_manifests_entirely_is_fatal() {
    let day = DayFolder::new("DAY_03");
    day.media("Camera_Media", "A001R1AA", "A001C001.mov");
    day.backup_mhl("LTO001", &[("/Volumes/LTO001/x.mov", "1")]);

    let err = day.verify(&test_settings()).unwrap_err();
    assert!(err.to_string().contains("no source manifests"));
}

#[test]
fn missing_backup_manifests_entirely_is_fatal() {
    let day = DayFolder::new("DAY_04");
    day.media("Camera_Media", "A001R1AA", "A001C001.mov");
    day.source_mhl("Camera_Media", "A001R1AA", &[("A001C001.mov", "1024")]);

    let err = day.verify(&test_settings()).unwrap_err();
    assert!(err.to_string().contains("no backup manifests"));
}

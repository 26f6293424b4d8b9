use anyhow::{Context, Result};
use reelcheck::{load_presets, verify_day, AlertLevel, ConsoleSink, VerifierSettings};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let day_folder = args
        .next()
        .context("Usage: verify_day <day-folder> [<presets.toml> <preset-name>]")?;

    let settings = match (args.next(), args.next()) {
        (Some(preset_file), Some(preset_name)) => {
            let presets = load_presets(&PathBuf::from(&preset_file))?;
            presets
                .get(&preset_name)
                .cloned()
                .with_context(|| format!("preset {preset_name:?} not found in {preset_file}"))?
        }
        (Some(_), None) => anyhow::bail!("a preset file must be followed by a preset name"),
        _ => VerifierSettings::default(),
    };

    let sink = ConsoleSink;
    let outcome = verify_day(&PathBuf::from(&day_folder), &settings, &sink)?;

    println!(
        "\n{}: checks {}",
        outcome.run.day_name,
        outcome.run.result.verdict()
    );
    if let Some(report) = &outcome.report_path {
        println!("Report written to {}", report.display());
    }

    if outcome.run.result == AlertLevel::Failed {
        anyhow::bail!("backup checks failed for {day_folder}");
    }
    Ok(())
}

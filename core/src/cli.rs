// core/src/cli.rs
//
// Kalibreringsverktøyets kjørevei. Verten (Python-CLI) sender inn en
// referansefil med landemerker produsert av den eksterne detektoren;
// feil propagerer som anyhow-feil slik at verktøyet kan avslutte med
// exit-kode ulik null.

use anyhow::{Context, Result};

use crate::calibration::{analyze_reference, CalibrationProfile};
use crate::landmark::{LandmarkFrame, RawLandmark};
use crate::storage::{self, ProfileStore};

pub const DEFAULT_REFERENCE_PATH: &str = "reference_pose.json";
pub const DEFAULT_CALIBRATION_PATH: &str = "calibration.json";

/// Les referanselandemerker, utled terskler, installer og persister.
pub fn run_calibration(
    store: &ProfileStore,
    exercise_id: &str,
    reference_path: &str,
    calibration_path: &str,
) -> Result<CalibrationProfile> {
    let contents = std::fs::read_to_string(reference_path)
        .with_context(|| format!("could not read reference landmarks from {}", reference_path))?;
    let raw: Vec<RawLandmark> =
        serde_json::from_str(&contents).context("reference landmark file is not valid JSON")?;
    let records = raw
        .into_iter()
        .map(RawLandmark::into_landmark)
        .collect::<Result<Vec<_>, _>>()?;
    let frame = LandmarkFrame::try_from_records(&records)?;

    let profile = store.profile(exercise_id);
    let calib = analyze_reference(&frame, &profile)
        .with_context(|| format!("calibration from {} failed", reference_path))?;

    store.apply(&calib)?;
    storage::save_calibration(calibration_path, &calib)
        .with_context(|| format!("could not write calibration file {}", calibration_path))?;

    print_calibration_report(&calib);
    Ok(calib)
}

/// Menneskelesbar oppsummering av det utledede terskelsettet.
pub fn print_calibration_report(calib: &CalibrationProfile) {
    println!("--- Calibration Report ---");
    println!("Exercise: {} (v{})", calib.exercise, calib.version);
    for (name, value) in &calib.values {
        println!("  {:<22} {:>10.4}", name, value);
    }
    println!("✅ {} thresholds derived", calib.values.len());
}

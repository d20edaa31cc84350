// core/src/calibration.rs
//
// Utleder et nytt terskelsett for en øvelse fra én referanseframe som
// på forhånd er kjent å vise posituren korrekt. Utledningsformlene er
// konfigurasjonsdata på øvelsesprofilen (DerivationRule), ikke kode i
// analysatoren – å legge til en øvelse krever ingen endring her.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CalibrationError;
use crate::landmark::LandmarkFrame;
use crate::rules::{rule_for, ExerciseKind, ExerciseProfile};
use crate::visibility::check_frame;

/// Hvordan en terskel utledes av et referansemål.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DeriveOp {
    /// Terskel = referanseverdien selv (ideal).
    Copy,
    /// Terskel = referanse · faktor (excellent-marginer).
    Scale { factor: f64 },
    /// Terskel = max(gulv, referanse · faktor) (minimumshøyder).
    ScaleWithFloor { factor: f64, floor: f64 },
    /// Terskel = max(gulv, referanse − fradrag) (minimumsvinkler).
    SubtractWithFloor { amount: f64, floor: f64 },
}

impl DeriveOp {
    pub fn apply(&self, reference: f64) -> f64 {
        match self {
            DeriveOp::Copy => reference,
            DeriveOp::Scale { factor } => reference * factor,
            DeriveOp::ScaleWithFloor { factor, floor } => (reference * factor).max(*floor),
            DeriveOp::SubtractWithFloor { amount, floor } => (reference - amount).max(*floor),
        }
    }
}

/// Én utledningsregel: hvilket referansemål som mates inn i hvilken
/// terskel, og med hvilken formel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivationRule {
    pub threshold: String,
    pub measurement: String,
    pub op: DeriveOp,
}

impl DerivationRule {
    pub fn new(threshold: &str, measurement: &str, op: DeriveOp) -> Self {
        Self {
            threshold: threshold.to_string(),
            measurement: measurement.to_string(),
            op,
        }
    }
}

/// Navngitt, versjonert terskeløyeblikksbilde utledet av én
/// referanseframe. Installeres aldri delvis – `ProfileStore::apply`
/// er alt-eller-ingenting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    pub exercise: String,
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub values: BTreeMap<String, f64>,
}

/// Kjør analysen: gate referanseframen, samle reglenes referansemål,
/// og anvend hver utledningsregel. Feiler med `NoPoseDetected` når
/// referansen selv ikke passerer valideringsgatene – da beholdes
/// gjeldende terskler urørt.
pub fn analyze_reference(
    frame: &LandmarkFrame,
    profile: &ExerciseProfile,
) -> Result<CalibrationProfile, CalibrationError> {
    let kind = ExerciseKind::from_id(&profile.exercise);
    if kind == ExerciseKind::Unknown {
        return Err(CalibrationError::UnknownExercise(profile.exercise.clone()));
    }
    let rule = rule_for(kind);

    if let Err(gate) = check_frame(frame, &profile.gates, rule.needs_lower_body()) {
        return Err(CalibrationError::NoPoseDetected(gate.message().to_string()));
    }

    let measurements = rule.reference_measurements(frame, profile)?;

    let mut values = BTreeMap::new();
    for derivation in &profile.derivations {
        let reference = measurements
            .get(&derivation.measurement)
            .copied()
            .ok_or_else(|| CalibrationError::MissingMeasurement(derivation.measurement.clone()))?;
        let derived = derivation.op.apply(reference);
        if !derived.is_finite() {
            return Err(CalibrationError::NonFiniteThreshold(derivation.threshold.clone()));
        }
        values.insert(derivation.threshold.clone(), derived);
    }

    Ok(CalibrationProfile {
        exercise: profile.exercise.clone(),
        version: profile.version + 1,
        created_at: Utc::now(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_ops() {
        assert_eq!(DeriveOp::Copy.apply(0.30), 0.30);
        assert!((DeriveOp::Scale { factor: 1.1 }.apply(0.30) - 0.33).abs() < 1e-12);
        // Gulvet slår inn ved lav referanse
        assert_eq!(
            DeriveOp::ScaleWithFloor { factor: 0.5, floor: 0.02 }.apply(0.01),
            0.02
        );
        assert_eq!(
            DeriveOp::ScaleWithFloor { factor: 0.5, floor: 0.02 }.apply(0.30),
            0.15
        );
        assert_eq!(
            DeriveOp::SubtractWithFloor { amount: 15.0, floor: 145.0 }.apply(150.0),
            145.0
        );
        assert_eq!(
            DeriveOp::SubtractWithFloor { amount: 15.0, floor: 145.0 }.apply(170.0),
            155.0
        );
    }
}

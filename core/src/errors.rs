// core/src/errors.rs
use thiserror::Error;

/// Feil som kan oppstå under evaluering av én frame.
/// Disse krysser ALDRI sesjonsgrensen – `session::evaluate_frame`
/// konverterer dem til et `ScoreResult` med `success=false`.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("malformed frame: {0}")]
    MalformedFrame(String),
}

/// Feil fra kalibreringsløypa. Kalibrering er en operatørstyrt,
/// frakoblet operasjon og får lov til å avbryte kallet.
#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("no pose detected in reference frame: {0}")]
    NoPoseDetected(String),

    #[error("unknown exercise id: {0}")]
    UnknownExercise(String),

    #[error("derivation references missing measurement: {0}")]
    MissingMeasurement(String),

    #[error("derived threshold {0} is not finite")]
    NonFiniteThreshold(String),

    #[error("calibration value {0} is not finite")]
    NonFiniteValue(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

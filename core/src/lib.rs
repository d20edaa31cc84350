pub mod calibration;
pub mod cli;
pub mod disambig;
pub mod errors;
pub mod geometry;
pub mod landmark;
pub mod metrics;
pub mod plank;
pub mod rules;
pub mod score;
pub mod session;
pub mod storage;
pub mod tree;
pub mod visibility;
pub mod warrior;

mod py;

pub use calibration::{analyze_reference, CalibrationProfile, DerivationRule, DeriveOp};
pub use errors::{CalibrationError, EvalError};
pub use landmark::{Landmark, LandmarkFrame, LandmarkIndex, RawLandmark};
pub use rules::{rule_for, ExerciseKind, ExerciseProfile, ExerciseRule};
pub use score::{ScoreCard, ScoreResult, Tier, TierCutoffs};
pub use session::{evaluate_frame, EvalSession};
pub use storage::{load_calibration_file, save_calibration, save_calibration_file, ProfileStore};
pub use visibility::{check_frame, GateConfig, GateFailure};

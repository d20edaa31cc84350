// core/src/visibility.rs
use serde::{Deserialize, Serialize};

use crate::landmark::LandmarkIndex::*;
use crate::landmark::{LandmarkFrame, LandmarkIndex};

/// Kjernesettet for helkroppssynlighet: skuldre, albuer, håndledd,
/// hofter, knær, ankler.
pub const CORE_POINTS: [LandmarkIndex; 12] = [
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
];

/// Underkroppssettet: hofter, knær, ankler, hæler, fotspisser.
/// En frame kan ha god helkroppssynlighet og likevel ha beina skjult –
/// uten eget underkroppsgate ville det gitt en misvisende lav
/// beinscore i stedet for en tydelig "vis beina"-melding.
pub const LOWER_POINTS: [LandmarkIndex; 10] = [
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
];

/// Terskler for de to uavhengige gatene. Del av øvelsesprofilen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GateConfig {
    /// Synlighetsterskel per punkt i kjernesettet.
    pub visibility: f64,
    /// Minste andel av kjernesettet som må være synlig.
    pub min_fraction: f64,
    /// Synlighetsterskel per punkt i underkroppssettet.
    pub lower_visibility: f64,
    /// Minste andel av underkroppssettet som må være synlig.
    pub lower_min_fraction: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            visibility: 0.4,
            min_fraction: 0.6,
            lower_visibility: 0.35,
            lower_min_fraction: 0.6,
        }
    }
}

/// Hvilket gate som stoppet frammen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateFailure {
    Body,
    LowerBody,
}

impl GateFailure {
    pub fn message(&self) -> &'static str {
        match self {
            GateFailure::Body => "Step back and ensure full body is visible",
            GateFailure::LowerBody => "Make sure your legs are fully visible",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GateFailure::Body => "body",
            GateFailure::LowerBody => "lower_body",
        }
    }
}

fn visible_fraction(frame: &LandmarkFrame, points: &[LandmarkIndex], threshold: f64) -> f64 {
    let visible = points
        .iter()
        .filter(|&&idx| frame.is_visible(idx, threshold))
        .count();
    visible as f64 / points.len() as f64
}

/// Gatekontrollen: kjøres før all geometri. `needs_lower` settes av
/// øvelser der underkroppsgeometri dominerer scoren.
pub fn check_frame(
    frame: &LandmarkFrame,
    gates: &GateConfig,
    needs_lower: bool,
) -> Result<(), GateFailure> {
    if visible_fraction(frame, &CORE_POINTS, gates.visibility) < gates.min_fraction {
        return Err(GateFailure::Body);
    }
    if needs_lower
        && visible_fraction(frame, &LOWER_POINTS, gates.lower_visibility)
            < gates.lower_min_fraction
    {
        return Err(GateFailure::LowerBody);
    }
    Ok(())
}

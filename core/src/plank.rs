// core/src/plank.rs
//
// Planke: skulder/hofte/ankel skal ligge på linje vertikalt, armene
// strake, og kroppen innenfor kameraets rammebånd.

use std::collections::BTreeMap;

use crate::calibration::{DerivationRule, DeriveOp};
use crate::disambig::Side;
use crate::errors::CalibrationError;
use crate::geometry::joint_angle;
use crate::landmark::{LandmarkFrame, LandmarkIndex};
use crate::rules::{ExerciseKind, ExerciseProfile, ExerciseRule};
use crate::score::ScoreCard;

pub struct Plank;

fn elbow_angle(frame: &LandmarkFrame, side: Side) -> f64 {
    joint_angle(
        frame.point(side.shoulder()),
        frame.point(side.elbow()),
        frame.point(side.wrist()),
    )
}

impl Plank {
    /// Kroppslinje, 50 poeng: stramt bånd, så løsere bånd, deretter
    /// retningshint ut fra hvor hoftene ligger relativt skulderlinjen
    /// (y vokser nedover: hofter under linjen henger, over er piket).
    fn score_body_line(card: &mut ScoreCard, frame: &LandmarkFrame, profile: &ExerciseProfile) {
        let shoulder_y = frame.mid_y(LandmarkIndex::LeftShoulder, LandmarkIndex::RightShoulder);
        let hip_y = frame.mid_y(LandmarkIndex::LeftHip, LandmarkIndex::RightHip);
        let ankle_y = frame.mid_y(LandmarkIndex::LeftAnkle, LandmarkIndex::RightAnkle);

        let shoulder_hip = (shoulder_y - hip_y).abs();
        let hip_ankle = (hip_y - ankle_y).abs();

        let tight = profile.threshold("line_tight", 0.05);
        let loose = profile.threshold("line_loose", 0.08);

        if shoulder_hip < tight && hip_ankle < tight {
            card.award(50.0, "✓ Perfect alignment");
        } else if shoulder_hip < loose && hip_ankle < loose {
            card.award(35.0, "Good, keep straighter");
        } else if hip_y > shoulder_y + tight {
            card.note("❌ Lift hips");
        } else if hip_y < shoulder_y - tight {
            card.note("❌ Lower hips");
        } else {
            card.note("❌ Straighten body");
        }
    }

    /// Strake armer, 25 poeng.
    fn score_arms(card: &mut ScoreCard, frame: &LandmarkFrame, profile: &ExerciseProfile) {
        let vis = profile.threshold("elbow_visibility", 0.4);
        if !frame.is_visible(LandmarkIndex::LeftElbow, vis)
            || !frame.is_visible(LandmarkIndex::RightElbow, vis)
        {
            card.note("Keep both arms in view");
            return;
        }

        let left = elbow_angle(frame, Side::Left);
        let right = elbow_angle(frame, Side::Right);

        let straight = profile.threshold("arm_straight_angle", 160.0);
        let min_angle = profile.threshold("arm_min_angle", 150.0);

        if left >= straight && right >= straight {
            card.award(25.0, "✓ Arms straight");
        } else if left >= min_angle && right >= min_angle {
            card.award(18.0, "Straighten arms");
        } else {
            card.note("❌ Extend arms");
        }
    }

    /// Rammebånd, 25 poeng: skulderhøyden i bildet skal ligge i
    /// midtbåndet – verken for høyt eller for lavt i utsnittet.
    fn score_framing(card: &mut ScoreCard, frame: &LandmarkFrame, profile: &ExerciseProfile) {
        let shoulder_y = frame.mid_y(LandmarkIndex::LeftShoulder, LandmarkIndex::RightShoulder);
        let low = profile.threshold("frame_band_low", 0.3);
        let high = profile.threshold("frame_band_high", 0.7);

        if shoulder_y > low && shoulder_y < high {
            card.award(25.0, "✓ Good height");
        } else {
            card.note("❌ Adjust camera framing");
        }
    }
}

impl ExerciseRule for Plank {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::Plank
    }

    fn evaluate(&self, frame: &LandmarkFrame, profile: &ExerciseProfile) -> ScoreCard {
        let mut card = ScoreCard::new();
        Self::score_body_line(&mut card, frame, profile);
        Self::score_arms(&mut card, frame, profile);
        Self::score_framing(&mut card, frame, profile);
        card
    }

    fn reference_measurements(
        &self,
        frame: &LandmarkFrame,
        _profile: &ExerciseProfile,
    ) -> Result<BTreeMap<String, f64>, CalibrationError> {
        let shoulder_y = frame.mid_y(LandmarkIndex::LeftShoulder, LandmarkIndex::RightShoulder);
        let hip_y = frame.mid_y(LandmarkIndex::LeftHip, LandmarkIndex::RightHip);
        let ankle_y = frame.mid_y(LandmarkIndex::LeftAnkle, LandmarkIndex::RightAnkle);

        let left = elbow_angle(frame, Side::Left);
        let right = elbow_angle(frame, Side::Right);

        let mut m = BTreeMap::new();
        m.insert(
            "body_line_gap".to_string(),
            (shoulder_y - hip_y).abs().max((hip_y - ankle_y).abs()),
        );
        m.insert("elbow_angle".to_string(), left.min(right));
        m.insert("shoulder_height".to_string(), shoulder_y);
        Ok(m)
    }

    fn default_thresholds(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("line_tight", 0.05),
            ("line_loose", 0.08),
            ("arm_straight_angle", 160.0),
            ("arm_min_angle", 150.0),
            ("frame_band_low", 0.3),
            ("frame_band_high", 0.7),
            ("elbow_visibility", 0.4),
        ]
    }

    fn default_derivations(&self) -> Vec<DerivationRule> {
        vec![
            DerivationRule::new(
                "line_tight",
                "body_line_gap",
                DeriveOp::ScaleWithFloor { factor: 1.5, floor: 0.05 },
            ),
            DerivationRule::new(
                "line_loose",
                "body_line_gap",
                DeriveOp::ScaleWithFloor { factor: 2.5, floor: 0.08 },
            ),
            DerivationRule::new(
                "arm_straight_angle",
                "elbow_angle",
                DeriveOp::SubtractWithFloor { amount: 10.0, floor: 150.0 },
            ),
            DerivationRule::new(
                "arm_min_angle",
                "elbow_angle",
                DeriveOp::SubtractWithFloor { amount: 20.0, floor: 140.0 },
            ),
        ]
    }
}

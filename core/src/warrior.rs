// core/src/warrior.rs
//
// Symmetrisk positur med bøyd frontbein (kriger to): hvilket bein som
// er fremst trenger ingen disambiguering – den minste knevinkelen ER
// frontbeinet, den største er bakbeinet.

use std::collections::BTreeMap;

use crate::calibration::{DerivationRule, DeriveOp};
use crate::disambig::Side;
use crate::errors::CalibrationError;
use crate::geometry::joint_angle;
use crate::landmark::{LandmarkFrame, LandmarkIndex};
use crate::rules::{ExerciseKind, ExerciseProfile, ExerciseRule};
use crate::score::ScoreCard;

pub struct WarriorTwo;

fn knee_angle(frame: &LandmarkFrame, side: Side) -> f64 {
    joint_angle(
        frame.point(side.hip()),
        frame.point(side.knee()),
        frame.point(side.ankle()),
    )
}

fn elbow_angle(frame: &LandmarkFrame, side: Side) -> f64 {
    joint_angle(
        frame.point(side.shoulder()),
        frame.point(side.elbow()),
        frame.point(side.wrist()),
    )
}

impl WarriorTwo {
    /// Frontkne, 40 poeng: vindusstige rundt 90°-idealet.
    fn score_front_knee(card: &mut ScoreCard, profile: &ExerciseProfile, front_angle: f64) {
        let ideal = profile.threshold("front_ideal_angle", 90.0);
        let dev = (front_angle - ideal).abs();

        if dev <= profile.threshold("front_perfect_band", 10.0) {
            card.award(40.0, "✓ Perfect knee bend");
        } else if dev <= profile.threshold("front_good_band", 20.0) {
            card.award(30.0, "Good, adjust to 90°");
        } else if dev <= profile.threshold("front_fair_band", 30.0) {
            card.award(20.0, "Bend knee to 90°");
        } else {
            card.note("❌ Bend front knee");
        }
    }

    /// Bakbein, 30 poeng: nær-180° ideal.
    fn score_back_leg(card: &mut ScoreCard, profile: &ExerciseProfile, back_angle: f64) {
        if back_angle >= profile.threshold("back_straight_angle", 160.0) {
            card.award(30.0, "✓ Back leg straight");
        } else if back_angle >= profile.threshold("back_min_angle", 150.0) {
            card.award(20.0, "Straighten back leg");
        } else {
            card.note("❌ Straighten back leg");
        }
    }

    /// Armer strake og i vater, 20 poeng: albuvinkel pluss
    /// skulder/håndledd-høydejustering.
    fn score_arms(card: &mut ScoreCard, frame: &LandmarkFrame, profile: &ExerciseProfile) {
        let vis = profile.threshold("wrist_visibility", 0.4);
        if !frame.is_visible(LandmarkIndex::LeftWrist, vis)
            || !frame.is_visible(LandmarkIndex::RightWrist, vis)
        {
            card.note("Keep both arms in view");
            return;
        }

        let straight = profile.threshold("arm_straight_angle", 160.0);
        let left = elbow_angle(frame, Side::Left);
        let right = elbow_angle(frame, Side::Right);

        if left >= straight && right >= straight {
            let shoulder_y = frame.mid_y(LandmarkIndex::LeftShoulder, LandmarkIndex::RightShoulder);
            let wrist_y = frame.mid_y(LandmarkIndex::LeftWrist, LandmarkIndex::RightWrist);
            if (shoulder_y - wrist_y).abs() < profile.threshold("arm_level_offset", 0.1) {
                card.award(20.0, "✓ Arms perfect");
            } else {
                card.award(12.0, "Level arms");
            }
        } else {
            card.note("Straighten arms");
        }
    }

    /// Oppreist overkropp, 10 poeng: skuldersenteret godt over
    /// hoftesenteret (y vokser nedover).
    fn score_torso(card: &mut ScoreCard, frame: &LandmarkFrame, profile: &ExerciseProfile) {
        let shoulder_y = frame.mid_y(LandmarkIndex::LeftShoulder, LandmarkIndex::RightShoulder);
        let hip_y = frame.mid_y(LandmarkIndex::LeftHip, LandmarkIndex::RightHip);
        let rise = hip_y - shoulder_y;

        if rise > profile.threshold("torso_min_rise", 0.15) {
            card.award(10.0, "✓ Torso upright");
        } else if rise > 0.0 {
            card.award(7.0, "Lift your chest");
        } else {
            card.note("❌ Stay upright");
        }
    }
}

impl ExerciseRule for WarriorTwo {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::WarriorTwo
    }

    fn evaluate(&self, frame: &LandmarkFrame, profile: &ExerciseProfile) -> ScoreCard {
        let mut card = ScoreCard::new();

        let left = knee_angle(frame, Side::Left);
        let right = knee_angle(frame, Side::Right);
        let front_angle = left.min(right);
        let back_angle = left.max(right);

        Self::score_front_knee(&mut card, profile, front_angle);
        Self::score_back_leg(&mut card, profile, back_angle);
        Self::score_arms(&mut card, frame, profile);
        Self::score_torso(&mut card, frame, profile);

        card
    }

    fn reference_measurements(
        &self,
        frame: &LandmarkFrame,
        _profile: &ExerciseProfile,
    ) -> Result<BTreeMap<String, f64>, CalibrationError> {
        let left = knee_angle(frame, Side::Left);
        let right = knee_angle(frame, Side::Right);

        let shoulder_y = frame.mid_y(LandmarkIndex::LeftShoulder, LandmarkIndex::RightShoulder);
        let wrist_y = frame.mid_y(LandmarkIndex::LeftWrist, LandmarkIndex::RightWrist);
        let hip_y = frame.mid_y(LandmarkIndex::LeftHip, LandmarkIndex::RightHip);

        let mut m = BTreeMap::new();
        m.insert("front_angle".to_string(), left.min(right));
        m.insert("back_angle".to_string(), left.max(right));
        m.insert("arm_level".to_string(), (shoulder_y - wrist_y).abs());
        m.insert("torso_rise".to_string(), hip_y - shoulder_y);
        Ok(m)
    }

    fn default_thresholds(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("front_ideal_angle", 90.0),
            ("front_perfect_band", 10.0),
            ("front_good_band", 20.0),
            ("front_fair_band", 30.0),
            ("back_straight_angle", 160.0),
            ("back_min_angle", 150.0),
            ("arm_straight_angle", 160.0),
            ("arm_level_offset", 0.1),
            ("torso_min_rise", 0.15),
            ("wrist_visibility", 0.4),
        ]
    }

    fn default_derivations(&self) -> Vec<DerivationRule> {
        vec![
            DerivationRule::new("front_ideal_angle", "front_angle", DeriveOp::Copy),
            DerivationRule::new(
                "back_straight_angle",
                "back_angle",
                DeriveOp::SubtractWithFloor { amount: 10.0, floor: 150.0 },
            ),
            DerivationRule::new(
                "back_min_angle",
                "back_angle",
                DeriveOp::SubtractWithFloor { amount: 20.0, floor: 140.0 },
            ),
            DerivationRule::new(
                "arm_level_offset",
                "arm_level",
                DeriveOp::ScaleWithFloor { factor: 1.5, floor: 0.05 },
            ),
            DerivationRule::new(
                "torso_min_rise",
                "torso_rise",
                DeriveOp::ScaleWithFloor { factor: 0.6, floor: 0.10 },
            ),
        ]
    }
}

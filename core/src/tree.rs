// core/src/tree.rs
//
// Asymmetrisk beinløft (tre-positur): ett bein løftet og foldet inn
// mot det stående beinet, armene samlet over hodet. Det løftede
// beinet pekes ut av disambigueringen; resten av kriteriene scorer
// mot den vinnende siden.

use std::collections::BTreeMap;

use crate::calibration::{DerivationRule, DeriveOp};
use crate::disambig::{detect_raised_leg, LegThresholds, RaisedLeg, Side};
use crate::errors::CalibrationError;
use crate::geometry::{center_offset, horizontal_alignment, joint_angle, vertical_rise};
use crate::landmark::{LandmarkFrame, LandmarkIndex};
use crate::rules::{ExerciseKind, ExerciseProfile, ExerciseRule};
use crate::score::ScoreCard;

pub struct TreePose;

impl TreePose {
    fn leg_thresholds(profile: &ExerciseProfile) -> LegThresholds {
        LegThresholds {
            min_rise: profile.threshold("min_height", 0.02),
            inward_ratio: profile.threshold("inward_ratio", 0.8),
            foot_near: profile.threshold("foot_near", 0.3),
            attempt: profile.threshold("attempt", 0.01),
            visibility: profile.threshold("leg_visibility", 0.25),
        }
    }

    /// Løftet bein, 40 poeng: stigen premierer økende høyde og gir
    /// aldri færre poeng for et høyere løft.
    fn score_raised_leg(
        card: &mut ScoreCard,
        profile: &ExerciseProfile,
        raised: Side,
        knee_rise: f64,
        ankle_rise: f64,
    ) {
        let max_rise = knee_rise.max(ankle_rise);
        let tag = match raised {
            Side::Left => "🦵⬅️",
            Side::Right => "🦵➡️",
        };

        if max_rise > profile.threshold("excellent_height", 0.15) {
            card.award(40.0, format!("✓ Excellent leg lift! {}", tag));
        } else if max_rise > profile.threshold("ideal_height", 0.10) {
            card.award(38.0, format!("✓ Great leg lift! {}", tag));
        } else if max_rise > profile.threshold("good_height", 0.06) {
            card.award(35.0, format!("✓ Good leg lift, go higher {}", tag));
        } else if max_rise > profile.threshold("fair_height", 0.03) {
            card.award(30.0, format!("Lift leg higher {}", tag));
        } else {
            card.award(25.0, format!("Keep lifting leg {}", tag));
        }
    }

    /// Stående bein, 30 poeng: nær-180° ideal. Delvis kredit når
    /// siden ikke er synlig nok til en pålitelig vinkel.
    fn score_standing_leg(
        card: &mut ScoreCard,
        frame: &LandmarkFrame,
        profile: &ExerciseProfile,
        standing: Side,
    ) {
        let vis = profile.threshold("standing_visibility", 0.3);
        if frame.is_visible(standing.knee(), vis) && frame.is_visible(standing.ankle(), vis) {
            let angle = joint_angle(
                frame.point(standing.hip()),
                frame.point(standing.knee()),
                frame.point(standing.ankle()),
            );
            if angle >= profile.threshold("ideal_angle", 155.0) {
                card.award(30.0, "✓ Standing leg straight");
            } else if angle >= profile.threshold("min_angle", 145.0) {
                card.award(22.0, "Straighten standing leg");
            } else {
                card.award(15.0, "Straighten leg more");
            }
        } else {
            card.award(15.0, "Keep standing leg straight");
        }
    }

    /// Begge armer hevet, 20 poeng, bonusnivå når håndleddene er over
    /// hodet (nesepunktet).
    fn score_arms(card: &mut ScoreCard, frame: &LandmarkFrame, profile: &ExerciseProfile) {
        let vis = profile.threshold("wrist_visibility", 0.4);
        if !frame.is_visible(LandmarkIndex::LeftWrist, vis)
            || !frame.is_visible(LandmarkIndex::RightWrist, vis)
        {
            card.note("Keep both arms in view");
            return;
        }

        let raise = profile.threshold("arm_raise", 0.05);
        let left_up = vertical_rise(
            frame.point(LandmarkIndex::LeftWrist),
            frame.point(LandmarkIndex::LeftShoulder),
        ) > raise;
        let right_up = vertical_rise(
            frame.point(LandmarkIndex::RightWrist),
            frame.point(LandmarkIndex::RightShoulder),
        ) > raise;

        if left_up && right_up {
            let nose_y = frame.get(LandmarkIndex::Nose).y;
            if frame.get(LandmarkIndex::LeftWrist).y < nose_y
                && frame.get(LandmarkIndex::RightWrist).y < nose_y
            {
                card.award(20.0, "✓ Arms perfect");
            } else {
                card.award(12.0, "Raise arms higher");
            }
        } else {
            card.note("❌ Raise both arms");
        }
    }

    /// Skulder-over-hofte-balanse, 10 poeng, nivådelt på offset.
    fn score_balance(card: &mut ScoreCard, frame: &LandmarkFrame, profile: &ExerciseProfile) {
        let offset = horizontal_alignment(
            frame.point(LandmarkIndex::LeftShoulder),
            frame.point(LandmarkIndex::RightShoulder),
            frame.point(LandmarkIndex::LeftHip),
            frame.point(LandmarkIndex::RightHip),
        );
        let max_offset = profile.threshold("balance_max_offset", 0.05);
        if offset < max_offset {
            card.award(10.0, "✓ Good balance");
        } else if offset < max_offset * 2.0 {
            card.award(6.0, "Steady your balance");
        } else {
            card.note("❌ Balance off-center");
        }
    }
}

impl ExerciseRule for TreePose {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::TreePose
    }

    fn evaluate(&self, frame: &LandmarkFrame, profile: &ExerciseProfile) -> ScoreCard {
        let mut card = ScoreCard::new();

        match detect_raised_leg(frame, &Self::leg_thresholds(profile)) {
            RaisedLeg::Detected { raised, knee_rise, ankle_rise } => {
                Self::score_raised_leg(&mut card, profile, raised, knee_rise, ankle_rise);
                Self::score_standing_leg(&mut card, frame, profile, raised.opposite());
            }
            RaisedLeg::Attempting => {
                card.award(15.0, "Lift leg higher - not detected yet");
            }
            RaisedLeg::NoneDetected => {
                card.note("❌ Lift one leg up");
            }
        }

        Self::score_arms(&mut card, frame, profile);
        Self::score_balance(&mut card, frame, profile);

        card
    }

    fn reference_measurements(
        &self,
        frame: &LandmarkFrame,
        _profile: &ExerciseProfile,
    ) -> Result<BTreeMap<String, f64>, CalibrationError> {
        let left_rise = vertical_rise(
            frame.point(LandmarkIndex::LeftKnee),
            frame.point(LandmarkIndex::LeftHip),
        );
        let right_rise = vertical_rise(
            frame.point(LandmarkIndex::RightKnee),
            frame.point(LandmarkIndex::RightHip),
        );
        let (raised, standing) = if left_rise > right_rise {
            (Side::Left, Side::Right)
        } else {
            (Side::Right, Side::Left)
        };

        let standing_angle = joint_angle(
            frame.point(standing.hip()),
            frame.point(standing.knee()),
            frame.point(standing.ankle()),
        );

        let hip_center_x = frame.mid_x(LandmarkIndex::LeftHip, LandmarkIndex::RightHip);
        let knee_dist = center_offset(frame.get(raised.knee()).x, hip_center_x);
        let hip_dist = center_offset(frame.get(raised.hip()).x, hip_center_x);
        let knee_inward_ratio = if hip_dist > 0.0 { knee_dist / hip_dist } else { 0.0 };

        let left_arm = vertical_rise(
            frame.point(LandmarkIndex::LeftWrist),
            frame.point(LandmarkIndex::LeftShoulder),
        );
        let right_arm = vertical_rise(
            frame.point(LandmarkIndex::RightWrist),
            frame.point(LandmarkIndex::RightShoulder),
        );

        let balance_offset = horizontal_alignment(
            frame.point(LandmarkIndex::LeftShoulder),
            frame.point(LandmarkIndex::RightShoulder),
            frame.point(LandmarkIndex::LeftHip),
            frame.point(LandmarkIndex::RightHip),
        );

        let mut m = BTreeMap::new();
        m.insert("raised_height".to_string(), left_rise.max(right_rise));
        m.insert("standing_angle".to_string(), standing_angle);
        m.insert("knee_inward_ratio".to_string(), knee_inward_ratio);
        m.insert("arm_min_raise".to_string(), left_arm.min(right_arm));
        m.insert("arm_max_raise".to_string(), left_arm.max(right_arm));
        m.insert("balance_offset".to_string(), balance_offset);
        Ok(m)
    }

    fn default_thresholds(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("min_height", 0.02),
            ("excellent_height", 0.15),
            ("ideal_height", 0.10),
            ("good_height", 0.06),
            ("fair_height", 0.03),
            ("ideal_angle", 155.0),
            ("min_angle", 145.0),
            ("arm_raise", 0.05),
            ("balance_max_offset", 0.05),
            ("inward_ratio", 0.8),
            ("foot_near", 0.3),
            ("attempt", 0.01),
            ("leg_visibility", 0.25),
            ("standing_visibility", 0.3),
            ("wrist_visibility", 0.4),
        ]
    }

    fn default_derivations(&self) -> Vec<DerivationRule> {
        vec![
            DerivationRule::new(
                "min_height",
                "raised_height",
                DeriveOp::ScaleWithFloor { factor: 0.5, floor: 0.02 },
            ),
            DerivationRule::new("ideal_height", "raised_height", DeriveOp::Copy),
            DerivationRule::new(
                "excellent_height",
                "raised_height",
                DeriveOp::Scale { factor: 1.1 },
            ),
            DerivationRule::new(
                "good_height",
                "raised_height",
                DeriveOp::Scale { factor: 0.6 },
            ),
            DerivationRule::new(
                "fair_height",
                "raised_height",
                DeriveOp::ScaleWithFloor { factor: 0.75, floor: 0.03 },
            ),
            DerivationRule::new("ideal_angle", "standing_angle", DeriveOp::Copy),
            DerivationRule::new(
                "min_angle",
                "standing_angle",
                DeriveOp::SubtractWithFloor { amount: 15.0, floor: 145.0 },
            ),
            DerivationRule::new(
                "arm_raise",
                "arm_min_raise",
                DeriveOp::ScaleWithFloor { factor: 0.8, floor: 0.03 },
            ),
            DerivationRule::new(
                "balance_max_offset",
                "balance_offset",
                DeriveOp::ScaleWithFloor { factor: 1.5, floor: 0.05 },
            ),
        ]
    }
}

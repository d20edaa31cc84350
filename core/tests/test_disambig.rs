// core/tests/test_disambig.rs
mod common;

use common::{tree_pose, FrameBuilder};
use posecoach_core::disambig::{detect_raised_leg, leg_vote, LegThresholds, RaisedLeg, Side};
use posecoach_core::landmark::LandmarkIndex;

fn make_thresholds() -> LegThresholds {
    LegThresholds {
        min_rise: 0.02,
        inward_ratio: 0.8,
        foot_near: 0.3,
        attempt: 0.01,
        visibility: 0.25,
    }
}

#[test]
fn test_single_candidate_wins() {
    let frame = tree_pose().frame();
    let th = make_thresholds();

    let left = leg_vote(&frame, Side::Left, &th);
    let right = leg_vote(&frame, Side::Right, &th);
    assert_eq!(left.criteria_met, 4, "folded left leg should meet all criteria");
    assert!(left.is_candidate());
    assert!(!right.is_candidate());

    match detect_raised_leg(&frame, &th) {
        RaisedLeg::Detected { raised, knee_rise, .. } => {
            assert_eq!(raised, Side::Left);
            assert!((knee_rise - 0.25).abs() < 1e-9);
        }
        other => panic!("expected left leg detected, got {:?}", other),
    }
}

#[test]
fn test_tie_break_prefers_larger_height() {
    // Begge bein foldet og løftet med fulle stemmetall; venstre kne
    // høyere → venstre skal vinne.
    let frame = tree_pose()
        .set(LandmarkIndex::RightKnee, 0.52, 0.35)
        .set(LandmarkIndex::RightAnkle, 0.50, 0.45)
        .frame();
    let th = make_thresholds();

    let left = leg_vote(&frame, Side::Left, &th);
    let right = leg_vote(&frame, Side::Right, &th);
    assert_eq!(left.criteria_met, right.criteria_met, "fixture must tie on votes");
    assert!(left.knee_rise > right.knee_rise);

    match detect_raised_leg(&frame, &th) {
        RaisedLeg::Detected { raised, .. } => assert_eq!(raised, Side::Left),
        other => panic!("expected a detected side, got {:?}", other),
    }
}

#[test]
fn test_higher_vote_count_beats_height() {
    // Høyre har flere oppfylte kriterier enn venstre, selv om venstre
    // kne står høyere: stemmetall går foran høyde.
    let frame = FrameBuilder::standing()
        // Venstre: løftet kne og ankel, men ikke innovertrukket (3 kriterier)
        .set(LandmarkIndex::LeftKnee, 0.40, 0.25)
        .set(LandmarkIndex::LeftAnkle, 0.40, 0.50)
        // Høyre: løftet, innover, foldet (4 kriterier)
        .set(LandmarkIndex::RightKnee, 0.52, 0.35)
        .set(LandmarkIndex::RightAnkle, 0.50, 0.45)
        .frame();
    let th = make_thresholds();

    let left = leg_vote(&frame, Side::Left, &th);
    let right = leg_vote(&frame, Side::Right, &th);
    assert!(left.is_candidate() && right.is_candidate());
    assert!(right.criteria_met > left.criteria_met);
    assert!(left.knee_rise > right.knee_rise);

    match detect_raised_leg(&frame, &th) {
        RaisedLeg::Detected { raised, .. } => assert_eq!(raised, Side::Right),
        other => panic!("expected right side, got {:?}", other),
    }
}

#[test]
fn test_small_signal_reports_attempting() {
    // Kne så vidt i bevegelse: over forsøk-terskelen, under kandidat
    let frame = FrameBuilder::standing()
        .set(LandmarkIndex::LeftKnee, 0.44, 0.535)
        .frame();
    assert_eq!(detect_raised_leg(&frame, &make_thresholds()), RaisedLeg::Attempting);
}

#[test]
fn test_no_signal_reports_none() {
    let frame = FrameBuilder::standing().frame();
    assert_eq!(detect_raised_leg(&frame, &make_thresholds()), RaisedLeg::NoneDetected);
}

#[test]
fn test_invisible_side_cannot_be_candidate() {
    let frame = tree_pose()
        .vis(LandmarkIndex::LeftKnee, 0.1)
        .vis(LandmarkIndex::LeftAnkle, 0.1)
        .frame();
    let th = make_thresholds();
    let left = leg_vote(&frame, Side::Left, &th);
    assert_eq!(left.criteria_met, 4);
    assert!(!left.is_candidate(), "occluded side must not qualify");
}

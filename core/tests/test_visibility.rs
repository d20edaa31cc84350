// core/tests/test_visibility.rs
mod common;

use common::{tree_pose, FrameBuilder};
use posecoach_core::landmark::LandmarkIndex;
use posecoach_core::session::evaluate_frame;
use posecoach_core::storage::ProfileStore;
use posecoach_core::visibility::{check_frame, GateConfig, GateFailure};

#[test]
fn test_zero_visibility_fails_regardless_of_geometry() {
    // Perfekt geometri, men ingen synlige punkter → success=false
    let store = ProfileStore::with_defaults();
    let records = tree_pose().vis_all(0.0).records();
    let result = evaluate_frame(&store, "tree-pose", &records);

    assert!(!result.success);
    assert!(result.accuracy.is_none());
    assert!(
        result.message.as_deref().unwrap_or("").contains("visible"),
        "expected a visibility message, got {:?}",
        result.message
    );
}

#[test]
fn test_low_visibility_scenario() {
    // Alle punkter på 0.1 (under kjernegatets terskel 0.4)
    let store = ProfileStore::with_defaults();
    let records = tree_pose().vis_all(0.1).records();
    let result = evaluate_frame(&store, "tree-pose", &records);

    assert!(!result.success);
    assert_eq!(
        result.message.as_deref(),
        Some("Step back and ensure full body is visible")
    );
}

#[test]
fn test_occluded_legs_trigger_lower_body_gate() {
    // Helkroppsgatet passerer (11/12 kjernepunkter), men underkroppen
    // har bare 5/10 synlige → egen beinmelding, ikke en lav score.
    let records = tree_pose()
        .vis(LandmarkIndex::LeftHeel, 0.1)
        .vis(LandmarkIndex::RightHeel, 0.1)
        .vis(LandmarkIndex::LeftFootIndex, 0.1)
        .vis(LandmarkIndex::RightFootIndex, 0.1)
        .vis(LandmarkIndex::LeftAnkle, 0.1)
        .records();

    let store = ProfileStore::with_defaults();
    let result = evaluate_frame(&store, "tree-pose", &records);
    assert!(!result.success);
    assert_eq!(
        result.message.as_deref(),
        Some("Make sure your legs are fully visible")
    );
}

#[test]
fn test_gates_pass_on_full_visibility() {
    let frame = tree_pose().frame();
    let gates = GateConfig::default();
    assert!(check_frame(&frame, &gates, true).is_ok());
}

#[test]
fn test_lower_gate_only_enforced_when_requested() {
    let frame = FrameBuilder::standing()
        .vis(LandmarkIndex::LeftHip, 0.1)
        .vis(LandmarkIndex::RightHip, 0.1)
        .vis(LandmarkIndex::LeftHeel, 0.1)
        .vis(LandmarkIndex::RightHeel, 0.1)
        .vis(LandmarkIndex::LeftFootIndex, 0.1)
        .frame();
    let gates = GateConfig::default();

    // 10/12 kjernepunkter er nok for helkroppsgatet
    assert!(check_frame(&frame, &gates, false).is_ok());
    // ...men underkroppsgatet feiler når det kreves (5/10)
    assert_eq!(check_frame(&frame, &gates, true), Err(GateFailure::LowerBody));
}

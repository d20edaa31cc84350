// core/src/metrics.rs
use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

/// Evaluerte frames per øvelse og tildelt nivå.
pub static FRAMES_EVALUATED: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "posecoach_frames_evaluated_total",
        "Frames scored, by exercise and tier color",
        &["exercise", "color"]
    )
    .expect("register posecoach_frames_evaluated_total")
});

/// Frames stoppet i synlighetsgatene.
pub static GATE_FAILED: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "posecoach_visibility_gate_failed_total",
        "Frames rejected by a visibility gate, by exercise and gate",
        &["exercise", "gate"]
    )
    .expect("register posecoach_visibility_gate_failed_total")
});

/// Frames avvist som malformede før geometri.
pub static MALFORMED_FRAMES: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "posecoach_malformed_frames_total",
        "Frames rejected as malformed input"
    )
    .expect("register posecoach_malformed_frames_total")
});

/// Vellykkede kalibreringsbytter.
pub static CALIBRATION_APPLIED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "posecoach_calibration_applied_total",
        "Calibration profiles applied to the live store"
    )
    .expect("register posecoach_calibration_applied_total")
});

/// Tekst-eksport av default-registeret (for vertens /metrics).
pub fn gather() -> String {
    let encoder = TextEncoder::new();
    let families = prometheus::gather();
    let mut buf = Vec::new();
    if encoder.encode(&families, &mut buf).is_ok() {
        String::from_utf8(buf).unwrap_or_default()
    } else {
        String::new()
    }
}

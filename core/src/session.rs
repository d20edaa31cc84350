// core/src/session.rs
//
// Sesjonsgrensen: én `EvalSession` per tilkoblet klient, konstruert
// ved oppkobling og revet ned ved frakobling. Ingen delt muterbar
// tilstand mellom sesjoner utover den Arc-delte profiltabellen.

use std::sync::Arc;

use log::debug;

use crate::landmark::{Landmark, LandmarkFrame};
use crate::metrics;
use crate::rules::{rule_for, ExerciseKind};
use crate::score::ScoreResult;
use crate::storage::ProfileStore;
use crate::visibility::check_frame;

pub struct EvalSession {
    exercise: String,
    store: Arc<ProfileStore>,
}

impl EvalSession {
    pub fn new(store: Arc<ProfileStore>, exercise_id: &str) -> Self {
        Self {
            exercise: exercise_id.to_string(),
            store,
        }
    }

    pub fn exercise(&self) -> &str {
        &self.exercise
    }

    pub fn evaluate(&self, records: &[Landmark]) -> ScoreResult {
        evaluate_frame(&self.store, &self.exercise, records)
    }
}

/// Evaluer én frame. Returnerer ALLTID et `ScoreResult` – én dårlig
/// frame skal aldri terminere en live-sesjon. Ren, synkron beregning
/// uten I/O; eneste delte lesning er én Arc-klone av profilen.
pub fn evaluate_frame(
    store: &ProfileStore,
    exercise_id: &str,
    records: &[Landmark],
) -> ScoreResult {
    let frame = match LandmarkFrame::try_from_records(records) {
        Ok(frame) => frame,
        Err(err) => {
            debug!("malformed frame for {}: {}", exercise_id, err);
            metrics::MALFORMED_FRAMES.inc();
            return ScoreResult::failure(format!("Processing error: {}", err));
        }
    };

    let rule = rule_for(ExerciseKind::from_id(exercise_id));
    let profile = store.profile(exercise_id);

    if let Err(gate) = check_frame(&frame, &profile.gates, rule.needs_lower_body()) {
        metrics::GATE_FAILED
            .with_label_values(&[rule.kind().id(), gate.label()])
            .inc();
        return ScoreResult::failure(gate.message());
    }

    let card = rule.evaluate(&frame, &profile);
    let result = card.into_result(&profile.tiers);
    if let Some(color) = result.tier() {
        metrics::FRAMES_EVALUATED
            .with_label_values(&[rule.kind().id(), color])
            .inc();
    }
    result
}

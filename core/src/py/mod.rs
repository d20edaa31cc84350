// core/src/py/mod.rs
//
// PyO3-grensen mot Python-verten. Frame-evaluering hever ALDRI en
// exception for frame-formede problemer – ethvert parse-/evalueringsavvik
// blir et `success=false`-svar, slik at én dårlig frame aldri river ned
// klientens stream. Kalibrering er operatørstyrt og får feile hardt
// (PyValueError → exit-kode ulik null i verktøyet).

use std::sync::Arc;

use once_cell::sync::Lazy;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use serde::Deserialize;
use serde_json as json;
use serde_path_to_error as spte;

use crate::landmark::{Landmark, RawLandmark};
use crate::metrics;
use crate::score::ScoreResult;
use crate::session::{evaluate_frame, EvalSession};
use crate::storage::ProfileStore;
use crate::{cli, storage};

/// Prosessvid profiltabell: den eneste delte muterbare ressursen på
/// tvers av sesjoner, byttet atomisk av kalibreringsveien.
static GLOBAL_STORE: Lazy<Arc<ProfileStore>> = Lazy::new(|| Arc::new(ProfileStore::with_defaults()));

// ──────────────────────────────────────────────────────────────────────────────
// INPUT-REPR: tolerant payload-parsing med JSON-sti i feilmeldinger
// ──────────────────────────────────────────────────────────────────────────────

fn default_exercise() -> String {
    // Originalkontraktens default når klienten ikke oppgir øvelse.
    "tree-pose".to_string()
}

#[derive(Debug, Deserialize)]
struct FrameIn {
    landmarks: Vec<RawLandmark>,
    #[serde(default = "default_exercise", alias = "exercise")]
    exercise_id: String,
}

#[derive(Debug, Deserialize)]
struct LandmarksIn {
    landmarks: Vec<RawLandmark>,
}

#[derive(Debug, Deserialize)]
struct CalibrateIn {
    landmarks: Vec<RawLandmark>,
    #[serde(default = "default_exercise", alias = "exercise")]
    exercise_id: String,
    /// Skrives kalibreringsfilen hit når satt.
    #[serde(default)]
    calibration_path: Option<String>,
}

fn parse_records(raw: Vec<RawLandmark>) -> Result<Vec<Landmark>, String> {
    raw.into_iter()
        .map(|lm| lm.into_landmark().map_err(|e| e.to_string()))
        .collect()
}

fn parse_frame(json_in: &str) -> Result<(Vec<Landmark>, String), String> {
    let mut de = json::Deserializer::from_str(json_in);
    let parsed: FrameIn = spte::deserialize(&mut de)
        .map_err(|e| format!("parse error (FrameIn) at {}: {}", e.path(), e))?;
    Ok((parse_records(parsed.landmarks)?, parsed.exercise_id))
}

/// Tillat både str og dict/objekt som payload (json.dumps på alt
/// som ikke allerede er en streng).
fn payload_to_json(py: Python<'_>, payload: &PyAny) -> PyResult<String> {
    if let Ok(s) = payload.extract::<&str>() {
        return Ok(s.to_owned());
    }
    let json_mod = py
        .import("json")
        .map_err(|e| PyValueError::new_err(format!("failed to import json: {e}")))?;
    json_mod
        .call_method1("dumps", (payload,))
        .and_then(|o| o.extract::<String>())
        .map_err(|e| PyValueError::new_err(format!("failed to serialize payload with json.dumps: {e}")))
}

fn result_to_json(result: &ScoreResult) -> PyResult<String> {
    serde_json::to_string(result).map_err(|e| PyValueError::new_err(e.to_string()))
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-FUNKSJONER
// ──────────────────────────────────────────────────────────────────────────────

/// Engangsevaluering: `{landmarks, exercise_id?}` → ScoreResult-JSON.
#[pyfunction]
fn evaluate_frame_json(py: Python<'_>, payload: &PyAny) -> PyResult<String> {
    let json_in = payload_to_json(py, payload)?;
    let result = match parse_frame(&json_in) {
        Ok((records, exercise_id)) => evaluate_frame(&GLOBAL_STORE, &exercise_id, &records),
        Err(e) => ScoreResult::failure(format!("Processing error: {}", e)),
    };
    result_to_json(&result)
}

/// Kalibrer fra en referanseframe: `{landmarks, exercise_id?,
/// calibration_path?}`. Hever PyValueError ved feil; tidligere
/// terskler står da urørt.
#[pyfunction]
fn calibrate_reference_json(py: Python<'_>, payload: &PyAny) -> PyResult<String> {
    let json_in = payload_to_json(py, payload)?;

    let mut de = json::Deserializer::from_str(&json_in);
    let parsed: CalibrateIn = spte::deserialize(&mut de)
        .map_err(|e| PyValueError::new_err(format!("parse error (CalibrateIn) at {}: {}", e.path(), e)))?;

    let records = parse_records(parsed.landmarks).map_err(PyValueError::new_err)?;
    let frame = crate::landmark::LandmarkFrame::try_from_records(&records)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let profile = GLOBAL_STORE.profile(&parsed.exercise_id);
    let calib = crate::calibration::analyze_reference(&frame, &profile)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    GLOBAL_STORE
        .apply(&calib)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    if let Some(path) = parsed.calibration_path.as_deref() {
        storage::save_calibration(path, &calib).map_err(|e| PyValueError::new_err(e.to_string()))?;
    }

    serde_json::to_string(&calib).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Kjør hele kalibreringsverktøyet (les referansefil, utled,
/// installer, persister, print rapport).
#[pyfunction]
#[pyo3(signature = (exercise_id, reference_path = None, calibration_path = None))]
fn run_calibration_tool(
    exercise_id: &str,
    reference_path: Option<&str>,
    calibration_path: Option<&str>,
) -> PyResult<String> {
    let calib = cli::run_calibration(
        &GLOBAL_STORE,
        exercise_id,
        reference_path.unwrap_or(cli::DEFAULT_REFERENCE_PATH),
        calibration_path.unwrap_or(cli::DEFAULT_CALIBRATION_PATH),
    )
    .map_err(|e| PyValueError::new_err(format!("{:#}", e)))?;
    serde_json::to_string(&calib).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Last persistert kalibrering ved oppstart. Returnerer antall
/// installerte øvelser; korrupt fil hever PyValueError.
#[pyfunction]
fn load_calibration(path: &str) -> PyResult<usize> {
    GLOBAL_STORE
        .load_from(path)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Prometheus-tekst for vertens /metrics-endepunkt.
#[pyfunction]
fn metrics_text() -> PyResult<String> {
    Ok(metrics::gather())
}

// ──────────────────────────────────────────────────────────────────────────────
// Sesjonsobjektet: én per klienttilkobling
// ──────────────────────────────────────────────────────────────────────────────

#[pyclass]
pub struct ScoringSession {
    inner: EvalSession,
}

#[pymethods]
impl ScoringSession {
    #[new]
    #[pyo3(signature = (exercise_id, calibration_path = None))]
    fn new(exercise_id: &str, calibration_path: Option<&str>) -> PyResult<Self> {
        if let Some(path) = calibration_path {
            GLOBAL_STORE
                .load_from(path)
                .map_err(|e| PyValueError::new_err(e.to_string()))?;
        }
        Ok(Self {
            inner: EvalSession::new(GLOBAL_STORE.clone(), exercise_id),
        })
    }

    /// `{landmarks}` → ScoreResult-JSON. Hever aldri for dårlige frames.
    fn evaluate_json(&self, py: Python<'_>, payload: &PyAny) -> PyResult<String> {
        let json_in = payload_to_json(py, payload)?;

        let mut de = json::Deserializer::from_str(&json_in);
        let parsed: Result<LandmarksIn, String> = spte::deserialize(&mut de)
            .map_err(|e| format!("parse error (LandmarksIn) at {}: {}", e.path(), e));

        let result = match parsed.and_then(|p| parse_records(p.landmarks)) {
            Ok(records) => self.inner.evaluate(&records),
            Err(e) => ScoreResult::failure(format!("Processing error: {}", e)),
        };
        result_to_json(&result)
    }

    #[getter]
    fn exercise(&self) -> String {
        self.inner.exercise().to_string()
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn posecoach_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<ScoringSession>()?;
    m.add_function(wrap_pyfunction!(evaluate_frame_json, m)?)?;
    m.add_function(wrap_pyfunction!(calibrate_reference_json, m)?)?;
    m.add_function(wrap_pyfunction!(run_calibration_tool, m)?)?;
    m.add_function(wrap_pyfunction!(load_calibration, m)?)?;
    m.add_function(wrap_pyfunction!(metrics_text, m)?)?;
    Ok(())
}

// core/src/storage.rs
//
// Kalibreringslageret: den ene skriveren av aktive terskler. Mange
// samtidige evalueringer leser; et (sjeldent, operatørutløst)
// kalibreringsbytte skjer som et helt Arc-bytte under skrivelåsen.
// En leser holder sin egen klone per frame og kan aldri se en
// blanding av gamle og nye terskler i samme evaluering.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Arc, RwLock};

use log::{info, warn};
use once_cell::sync::Lazy;

use crate::calibration::CalibrationProfile;
use crate::errors::CalibrationError;
use crate::metrics;
use crate::rules::{ExerciseKind, ExerciseProfile};

/// Persistert kalibreringsfil: øvelses-id → versjonert snapshot.
pub type CalibrationFile = BTreeMap<String, CalibrationProfile>;

static NEUTRAL_PROFILE: Lazy<Arc<ExerciseProfile>> =
    Lazy::new(|| Arc::new(ExerciseProfile::default_for(ExerciseKind::Unknown)));

pub struct ProfileStore {
    profiles: RwLock<HashMap<String, Arc<ExerciseProfile>>>,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ProfileStore {
    /// Seedet med innebygde standardprofiler for de kjente øvelsene.
    pub fn with_defaults() -> Self {
        let mut map = HashMap::new();
        for kind in [ExerciseKind::TreePose, ExerciseKind::WarriorTwo, ExerciseKind::Plank] {
            map.insert(
                kind.id().to_string(),
                Arc::new(ExerciseProfile::default_for(kind)),
            );
        }
        Self {
            profiles: RwLock::new(map),
        }
    }

    /// Gjeldende profil for en øvelse; ukjente identifikatorer får
    /// den nøytrale profilen (aldri en feil).
    pub fn profile(&self, exercise_id: &str) -> Arc<ExerciseProfile> {
        let guard = self.profiles.read().unwrap();
        guard
            .get(exercise_id)
            .cloned()
            .unwrap_or_else(|| NEUTRAL_PROFILE.clone())
    }

    /// Alt-eller-ingenting: valider alle verdier, bygg en ny profil
    /// med tersklene overskrevet, og bytt hele Arc-en. Idempotent –
    /// samme snapshot to ganger gir samme installerte profil.
    pub fn apply(&self, calib: &CalibrationProfile) -> Result<(), CalibrationError> {
        for (name, value) in &calib.values {
            if !value.is_finite() {
                return Err(CalibrationError::NonFiniteValue(name.clone()));
            }
        }

        let mut guard = self.profiles.write().unwrap();
        let current = guard
            .get(&calib.exercise)
            .cloned()
            .ok_or_else(|| CalibrationError::UnknownExercise(calib.exercise.clone()))?;

        let mut next = current.as_ref().clone();
        for (name, value) in &calib.values {
            next.thresholds.insert(name.clone(), *value);
        }
        next.version = calib.version;

        guard.insert(calib.exercise.clone(), Arc::new(next));
        metrics::CALIBRATION_APPLIED.inc();
        info!(
            "calibration v{} applied for {} ({} thresholds)",
            calib.version,
            calib.exercise,
            calib.values.len()
        );
        Ok(())
    }

    /// Last kalibreringsfil ved oppstart og installer hvert snapshot.
    /// Returnerer antall installerte øvelser.
    pub fn load_from(&self, path: &str) -> Result<usize, CalibrationError> {
        let file = load_calibration_file(path)?;
        for calib in file.values() {
            self.apply(calib)?;
        }
        Ok(file.len())
    }
}

/// Leser kalibreringsfil fra disk (JSON). Manglende fil er ikke en
/// feil – standardprofilene blir stående. Korrupt fil ER en feil og
/// skal stoppe oppstarten.
pub fn load_calibration_file(path: &str) -> Result<CalibrationFile, CalibrationError> {
    if !Path::new(path).exists() {
        warn!("no calibration file at {}, keeping built-in defaults", path);
        return Ok(CalibrationFile::new());
    }
    let contents = std::fs::read_to_string(path)?;
    let file: CalibrationFile = serde_json::from_str(&contents)?;
    info!("📂 calibration loaded from {} ({} exercises)", path, file.len());
    Ok(file)
}

/// Lagrer kalibreringsfil til disk som JSON (pretty-print).
pub fn save_calibration_file(path: &str, file: &CalibrationFile) -> Result<(), CalibrationError> {
    let json = serde_json::to_string_pretty(file)?;
    std::fs::write(path, json)?;
    info!("✅ calibration saved to {} ({} exercises)", path, file.len());
    Ok(())
}

/// Slår ett nytt snapshot inn i filen på disk (les, oppdater, skriv).
pub fn save_calibration(path: &str, calib: &CalibrationProfile) -> Result<(), CalibrationError> {
    let mut file = load_calibration_file(path)?;
    file.insert(calib.exercise.clone(), calib.clone());
    save_calibration_file(path, &file)
}

// core/src/rules.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calibration::DerivationRule;
use crate::errors::CalibrationError;
use crate::landmark::LandmarkFrame;
use crate::plank::Plank;
use crate::score::{ScoreCard, TierCutoffs};
use crate::tree::TreePose;
use crate::visibility::GateConfig;
use crate::warrior::WarriorTwo;

/// Lukket variantmengde for øvelser. Ukjente identifikatorer ruter
/// til `Unknown` i stedet for å feile – en ukjent id skal aldri
/// knekke en live-sesjon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseKind {
    TreePose,
    WarriorTwo,
    Plank,
    Unknown,
}

impl ExerciseKind {
    pub fn from_id(id: &str) -> Self {
        match id {
            "tree-pose" => ExerciseKind::TreePose,
            "warrior-two" => ExerciseKind::WarriorTwo,
            "plank" => ExerciseKind::Plank,
            _ => ExerciseKind::Unknown,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ExerciseKind::TreePose => "tree-pose",
            ExerciseKind::WarriorTwo => "warrior-two",
            ExerciseKind::Plank => "plank",
            ExerciseKind::Unknown => "unknown",
        }
    }
}

/// Én øvelsesstrategi: trekk ut features, evaluer vektede kriterier,
/// produser feedback. `reference_measurements` er kalibreringsevnen –
/// målene en referanseframe gir opphav til.
pub trait ExerciseRule: Sync {
    fn kind(&self) -> ExerciseKind;

    /// Om underkroppsgatet i valideringen skal håndheves.
    fn needs_lower_body(&self) -> bool {
        true
    }

    fn evaluate(&self, frame: &LandmarkFrame, profile: &ExerciseProfile) -> ScoreCard;

    fn reference_measurements(
        &self,
        frame: &LandmarkFrame,
        profile: &ExerciseProfile,
    ) -> Result<BTreeMap<String, f64>, CalibrationError>;

    /// Standardterskler for øvelsen (navn → verdi).
    fn default_thresholds(&self) -> Vec<(&'static str, f64)>;

    /// Standard utledningsregler for kalibrering. Data, ikke kode:
    /// nye øvelser legger til konfigurasjon, ikke analysator-logikk.
    fn default_derivations(&self) -> Vec<DerivationRule>;
}

/// Nøytral fallback for ukjente identifikatorer: fast middels score
/// og generisk melding.
pub struct NeutralRule;

impl ExerciseRule for NeutralRule {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::Unknown
    }

    fn needs_lower_body(&self) -> bool {
        false
    }

    fn evaluate(&self, _frame: &LandmarkFrame, _profile: &ExerciseProfile) -> ScoreCard {
        let mut card = ScoreCard::new();
        card.award(50.0, "Hold pose steady");
        card
    }

    fn reference_measurements(
        &self,
        _frame: &LandmarkFrame,
        profile: &ExerciseProfile,
    ) -> Result<BTreeMap<String, f64>, CalibrationError> {
        Err(CalibrationError::UnknownExercise(profile.exercise.clone()))
    }

    fn default_thresholds(&self) -> Vec<(&'static str, f64)> {
        Vec::new()
    }

    fn default_derivations(&self) -> Vec<DerivationRule> {
        Vec::new()
    }
}

static TREE: TreePose = TreePose;
static WARRIOR: WarriorTwo = WarriorTwo;
static PLANK: Plank = Plank;
static NEUTRAL: NeutralRule = NeutralRule;

pub fn rule_for(kind: ExerciseKind) -> &'static dyn ExerciseRule {
    match kind {
        ExerciseKind::TreePose => &TREE,
        ExerciseKind::WarriorTwo => &WARRIOR,
        ExerciseKind::Plank => &PLANK,
        ExerciseKind::Unknown => &NEUTRAL,
    }
}

/// Konfigurasjonen for én øvelse: gater, nivåkutt og det flate
/// terskelkartet kriteriene leser. Eies av regelsettet; muteres kun
/// gjennom kalibreringslagerets kontrollerte bytte – aldri midt i en
/// evaluering (leserne holder sin egen Arc-klone per frame).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseProfile {
    pub exercise: String,
    pub gates: GateConfig,
    pub tiers: TierCutoffs,
    pub thresholds: BTreeMap<String, f64>,
    pub derivations: Vec<DerivationRule>,
    #[serde(default)]
    pub version: u32,
}

impl ExerciseProfile {
    pub fn default_for(kind: ExerciseKind) -> Self {
        let rule = rule_for(kind);
        let thresholds = rule
            .default_thresholds()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Self {
            exercise: kind.id().to_string(),
            gates: GateConfig::default(),
            tiers: TierCutoffs::default(),
            thresholds,
            derivations: rule.default_derivations(),
            version: 0,
        }
    }

    /// Terskeloppslag med fallback. Kartet seedes med standardverdier
    /// ved konstruksjon; fallbacken dekker profiler lastet fra eldre
    /// kalibreringsfiler uten nøkkelen.
    pub fn threshold(&self, key: &str, default: f64) -> f64 {
        self.thresholds.get(key).copied().unwrap_or(default)
    }
}

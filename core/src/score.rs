// core/src/score.rs
use serde::{Deserialize, Serialize};

/// Diskret kvalitetsnivå utledet av akkumulert poengsum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Red,
    Yellow,
    Green,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Red => "red",
            Tier::Yellow => "yellow",
            Tier::Green => "green",
        }
    }
}

/// Kuttpunkter for nivåklassifisering. Per-øvelse konfigurasjon,
/// kan avvike mellom deployments.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierCutoffs {
    pub green: f64,
    pub yellow: f64,
}

impl Default for TierCutoffs {
    fn default() -> Self {
        Self { green: 70.0, yellow: 50.0 }
    }
}

impl TierCutoffs {
    pub fn classify(&self, accuracy: f64) -> Tier {
        if accuracy >= self.green {
            Tier::Green
        } else if accuracy >= self.yellow {
            Tier::Yellow
        } else {
            Tier::Red
        }
    }
}

/// Akkumulator for vektede kriteriepoeng og tilhørende meldinger.
/// Meldingsrekkefølgen er evalueringsrekkefølgen – den bevares ut i
/// svaret og er en del av den eksterne kontrakten (reproduserbarhet).
#[derive(Debug, Default)]
pub struct ScoreCard {
    points: f64,
    feedback: Vec<String>,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tildel poeng med tilhørende melding.
    pub fn award(&mut self, points: f64, message: impl Into<String>) {
        self.points += points;
        self.feedback.push(message.into());
    }

    /// Melding uten poeng (feilede eller hoppede kriterier).
    pub fn note(&mut self, message: impl Into<String>) {
        self.feedback.push(message.into());
    }

    /// Klem til [0, 100], klassifiser nivå og pakk som svar.
    pub fn into_result(self, tiers: &TierCutoffs) -> ScoreResult {
        let accuracy = self.points.round().clamp(0.0, 100.0) as u8;
        let tier = tiers.classify(accuracy as f64);
        let feedback = if self.feedback.is_empty() {
            "Position yourself".to_string()
        } else {
            self.feedback.join(" | ")
        };
        ScoreResult {
            success: true,
            accuracy: Some(accuracy),
            feedback: Some(feedback),
            color: Some(tier.as_str().to_string()),
            message: None,
        }
    }
}

/// Svarrekorden per frame. `accuracy`/`feedback`/`color` finnes kun
/// når evaluering var mulig; `message` kun når den ikke var det.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ScoreResult {
    /// Evaluering var ikke mulig (gating, malformet frame, intern feil).
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            accuracy: None,
            feedback: None,
            color: None,
            message: Some(message.into()),
        }
    }

    pub fn tier(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_and_tiers() {
        let cutoffs = TierCutoffs::default();

        let mut card = ScoreCard::new();
        card.award(40.0, "a");
        card.award(38.0, "b");
        card.award(30.0, "c");
        let res = card.into_result(&cutoffs);
        assert_eq!(res.accuracy, Some(100)); // 108 klemmes
        assert_eq!(res.tier(), Some("green"));

        let mut card = ScoreCard::new();
        card.award(55.0, "x");
        let res = card.into_result(&cutoffs);
        assert_eq!(res.tier(), Some("yellow"));

        let res = ScoreCard::new().into_result(&cutoffs);
        assert_eq!(res.accuracy, Some(0));
        assert_eq!(res.tier(), Some("red"));
        assert_eq!(res.feedback.as_deref(), Some("Position yourself"));
    }

    #[test]
    fn test_feedback_keeps_insertion_order() {
        let mut card = ScoreCard::new();
        card.award(10.0, "first");
        card.note("second");
        card.award(5.0, "third");
        let res = card.into_result(&TierCutoffs::default());
        assert_eq!(res.feedback.as_deref(), Some("first | second | third"));
    }

    #[test]
    fn test_failure_shape() {
        let res = ScoreResult::failure("no pose");
        assert!(!res.success);
        assert!(res.accuracy.is_none());
        let json = serde_json::to_string(&res).unwrap();
        assert!(!json.contains("accuracy"));
        assert!(json.contains("no pose"));
    }
}

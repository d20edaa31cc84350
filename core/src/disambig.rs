// core/src/disambig.rs
//
// Avgjør hvilket bein som er "det løftede" i asymmetriske posisjoner.
// Naive enkeltterskler kan fyre på begge sider, ingen av dem, eller
// være uenige med høydeheuristikken – derfor stemmer hver side over
// flere uavhengige kriterier, med eksplisitte tie-break-regler.

use log::debug;
use ordered_float::OrderedFloat;

use crate::geometry::{center_offset, manhattan_distance, vertical_rise};
use crate::landmark::{LandmarkFrame, LandmarkIndex};

/// Kroppsside. Hjelpere plukker riktige landemerker per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    pub fn hip(&self) -> LandmarkIndex {
        match self {
            Side::Left => LandmarkIndex::LeftHip,
            Side::Right => LandmarkIndex::RightHip,
        }
    }

    pub fn knee(&self) -> LandmarkIndex {
        match self {
            Side::Left => LandmarkIndex::LeftKnee,
            Side::Right => LandmarkIndex::RightKnee,
        }
    }

    pub fn ankle(&self) -> LandmarkIndex {
        match self {
            Side::Left => LandmarkIndex::LeftAnkle,
            Side::Right => LandmarkIndex::RightAnkle,
        }
    }

    pub fn shoulder(&self) -> LandmarkIndex {
        match self {
            Side::Left => LandmarkIndex::LeftShoulder,
            Side::Right => LandmarkIndex::RightShoulder,
        }
    }

    pub fn elbow(&self) -> LandmarkIndex {
        match self {
            Side::Left => LandmarkIndex::LeftElbow,
            Side::Right => LandmarkIndex::RightElbow,
        }
    }

    pub fn wrist(&self) -> LandmarkIndex {
        match self {
            Side::Left => LandmarkIndex::LeftWrist,
            Side::Right => LandmarkIndex::RightWrist,
        }
    }
}

/// Terskler for beinkandidatur. Leses fra øvelsesprofilen av kalleren.
#[derive(Debug, Clone, Copy)]
pub struct LegThresholds {
    /// Minste stigning (kne/ankel over hofte) som teller som løft.
    pub min_rise: f64,
    /// Kne regnes som innovertrukket når kneavstanden fra senterlinjen
    /// er under hofteavstanden ganger denne faktoren.
    pub inward_ratio: f64,
    /// L1-avstand ankel↔eget kne under denne terskelen betyr foldet
    /// bein (foten hviler mot det andre beinet).
    pub foot_near: f64,
    /// Liten positiv stigning under kandidatterskelen – "forsøk".
    pub attempt: f64,
    /// Synlighetskrav for kne og ankel på en side.
    pub visibility: f64,
}

/// Stemmeseddelen for én side.
#[derive(Debug, Clone, Copy)]
pub struct LegVote {
    pub side: Side,
    pub criteria_met: u8,
    pub knee_rise: f64,
    pub ankle_rise: f64,
    pub visible: bool,
}

impl LegVote {
    pub fn is_candidate(&self) -> bool {
        self.visible && self.criteria_met >= 2
    }

    fn max_rise(&self) -> f64 {
        self.knee_rise.max(self.ankle_rise)
    }
}

/// Utfallet av disambigueringen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RaisedLeg {
    /// Én side vant: her er målene for den.
    Detected {
        raised: Side,
        knee_rise: f64,
        ankle_rise: f64,
    },
    /// Svakt positivt signal under kandidatterskelen – ikke avvist,
    /// men heller ikke påvist. Unngår feedback-flimmer nær grensen.
    Attempting,
    /// Ingen side viser noe signal.
    NoneDetected,
}

/// Beregn stemmeseddelen for én side.
pub fn leg_vote(frame: &LandmarkFrame, side: Side, th: &LegThresholds) -> LegVote {
    let hip = frame.point(side.hip());
    let knee = frame.point(side.knee());
    let ankle = frame.point(side.ankle());

    let knee_rise = vertical_rise(knee, hip);
    let ankle_rise = vertical_rise(ankle, hip);

    let hip_center_x = frame.mid_x(LandmarkIndex::LeftHip, LandmarkIndex::RightHip);
    let knee_dist = center_offset(knee.0, hip_center_x);
    let hip_dist = center_offset(hip.0, hip_center_x);
    let knee_inward = knee_dist < hip_dist * th.inward_ratio;

    let foot_folded = manhattan_distance(ankle, knee) < th.foot_near;

    let criteria_met = [
        knee_rise > th.min_rise,
        ankle_rise > th.min_rise,
        knee_inward,
        foot_folded,
    ]
    .iter()
    .filter(|&&met| met)
    .count() as u8;

    let visible = frame.is_visible(side.knee(), th.visibility)
        && frame.is_visible(side.ankle(), th.visibility);

    LegVote {
        side,
        criteria_met,
        knee_rise,
        ankle_rise,
        visible,
    }
}

/// Velg aktiv side. Tie-break når begge er kandidater:
/// 1) flest oppfylte kriterier, 2) størst knestigning.
pub fn detect_raised_leg(frame: &LandmarkFrame, th: &LegThresholds) -> RaisedLeg {
    let left = leg_vote(frame, Side::Left, th);
    let right = leg_vote(frame, Side::Right, th);

    debug!(
        "raised-leg votes: left {}/4 (rise {:.3}, vis {}) right {}/4 (rise {:.3}, vis {})",
        left.criteria_met,
        left.knee_rise,
        left.visible,
        right.criteria_met,
        right.knee_rise,
        right.visible
    );

    let winner = match (left.is_candidate(), right.is_candidate()) {
        (true, false) => Some(left),
        (false, true) => Some(right),
        (true, true) => {
            if left.criteria_met != right.criteria_met {
                Some(if left.criteria_met > right.criteria_met { left } else { right })
            } else {
                // Like stemmetall: størst knestigning vinner.
                Some(
                    [left, right]
                        .into_iter()
                        .max_by_key(|v| OrderedFloat(v.knee_rise))
                        .unwrap_or(left),
                )
            }
        }
        (false, false) => None,
    };

    match winner {
        Some(vote) => RaisedLeg::Detected {
            raised: vote.side,
            knee_rise: vote.knee_rise,
            ankle_rise: vote.ankle_rise,
        },
        None => {
            let any_signal = left.max_rise() > th.attempt || right.max_rise() > th.attempt;
            if any_signal {
                RaisedLeg::Attempting
            } else {
                RaisedLeg::NoneDetected
            }
        }
    }
}

use crate::catalog::GoalRecord;
use crate::i18n::{I18n, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintKind {
    Nationality,
    DominantFoot,
    Competition,
    Year,
    Team,
    JerseyNumber,
}

/// Order in which attributes are revealed, one per wrong guess.
pub const HINT_SEQUENCE: [HintKind; 6] = [
    HintKind::Nationality,
    HintKind::DominantFoot,
    HintKind::Competition,
    HintKind::Year,
    HintKind::Team,
    HintKind::JerseyNumber,
];

impl HintKind {
    pub fn label_key(self) -> Key {
        match self {
            HintKind::Nationality => Key::Nationality,
            HintKind::DominantFoot => Key::DominantFoot,
            HintKind::Competition => Key::Competition,
            HintKind::Year => Key::Year,
            HintKind::Team => Key::Team,
            HintKind::JerseyNumber => Key::Number,
        }
    }

    pub fn slot(self) -> usize {
        HINT_SEQUENCE
            .iter()
            .position(|k| *k == self)
            .unwrap_or_default()
    }
}

pub fn hint_value(goal: &GoalRecord, kind: HintKind, i18n: &I18n) -> String {
    match kind {
        HintKind::Nationality => goal.nationality.clone(),
        HintKind::DominantFoot => i18n.foot(&goal.dominant_foot),
        HintKind::Competition => goal.competition.clone().unwrap_or_else(|| "-".to_string()),
        HintKind::Year => goal
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string()),
        HintKind::Team => goal.team.clone(),
        HintKind::JerseyNumber => goal.jersey_number.to_string(),
    }
}

use crate::i18n::{I18n, Key};
use crate::quiz::{AttemptMark, MAX_ATTEMPTS, Outcome, Phase, Quiz, QuizView, attempt_marks};
use crate::stats::Statistics;
use crate::store::KeyValueStore;

/// Everything the end-of-round modal shows, already localised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSummary {
    pub won: bool,
    pub title: String,
    pub message: String,
    pub answer: String,
    /// One slot per allowed attempt; `None` for attempts never used.
    pub boxes: Vec<Option<AttemptMark>>,
    /// `(attempts, wins)` for `1..=MAX_ATTEMPTS`.
    pub distribution: Vec<(u32, u32)>,
    /// Row to highlight: the attempt count of the current win.
    pub highlight: Option<u32>,
    pub played: u32,
    pub win_percentage: u32,
}

impl ResultSummary {
    pub fn build<S: KeyValueStore, V: QuizView>(quiz: &Quiz<S, V>) -> Option<Self> {
        let won = match quiz.phase() {
            Phase::Ended(Outcome::Won) => true,
            Phase::Ended(Outcome::Lost) => false,
            Phase::NotStarted | Phase::InProgress => return None,
        };
        let state = quiz.state()?;
        let goal = quiz.goal()?;
        Some(Self::compose(
            quiz.i18n(),
            won,
            state.attempts_used,
            &attempt_marks(state),
            &goal.player,
            &quiz.statistics(),
        ))
    }

    pub fn compose(
        i18n: &I18n,
        won: bool,
        attempts: u32,
        marks: &[AttemptMark],
        answer: &str,
        stats: &Statistics,
    ) -> Self {
        let replacements = [
            ("attempts", attempts.to_string()),
            ("maxAttempts", MAX_ATTEMPTS.to_string()),
        ];
        let (title, message) = if won {
            (
                i18n.text(Key::Congratulations),
                i18n.t(Key::WinMessage, &replacements),
            )
        } else {
            (
                i18n.text(Key::TooBad),
                i18n.t(Key::LoseMessage, &replacements),
            )
        };
        let boxes = (0..MAX_ATTEMPTS as usize)
            .map(|i| marks.get(i).copied())
            .collect();
        Self {
            won,
            title: title.to_string(),
            message,
            answer: answer.to_string(),
            boxes,
            distribution: stats.distribution_rows(MAX_ATTEMPTS),
            highlight: won.then_some(attempts),
            played: stats.total_games,
            win_percentage: stats.win_percentage(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Share,
    NewGame,
    Close,
}

/// Open/closed state of the result modal plus its current summary.
#[derive(Debug, Clone, Default)]
pub struct ResultModal {
    summary: Option<ResultSummary>,
}

impl ResultModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.summary.is_some()
    }

    pub fn summary(&self) -> Option<&ResultSummary> {
        self.summary.as_ref()
    }

    pub fn show(&mut self, summary: ResultSummary) {
        self.summary = Some(summary);
    }

    pub fn close(&mut self) {
        self.summary = None;
    }
}

//! Round state machine: `NotStarted -> InProgress -> Ended(Won | Lost)`.
//!
//! The controller owns the catalog and the store, and reaches presentation only through a
//! [`QuizView`]. Dates are passed in by the caller so daily selection stays deterministic.

use std::time::Duration;

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, GoalRecord};
use crate::hints::{HINT_SEQUENCE, HintKind, hint_value};
use crate::i18n::{I18n, Language};
use crate::normalize::names_match;
use crate::stats::Statistics;
use crate::store::{
    KEY_GAME_STATE, KEY_LANGUAGE, KEY_LAST_PLAYED, KEY_STATISTICS, KeyValueStore, load_string,
};

pub const MAX_ATTEMPTS: u32 = 7;
pub const RESULT_DELAY: Duration = Duration::from_secs(1);
pub const RESUME_RESULT_DELAY: Duration = Duration::from_millis(10);
pub const DEFAULT_SHARE_URL: &str = "https://advinheogol.com/";
pub const SHARE_TITLE: &str = "Advinhe o Gol";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub goal_id: u32,
    pub attempts_used: u32,
    pub hints_revealed: u32,
    #[serde(rename = "gameEnded", alias = "ended")]
    pub ended: bool,
    #[serde(rename = "gameWon", alias = "won")]
    pub won: bool,
}

impl GameState {
    pub fn fresh(goal_id: u32) -> Self {
        Self {
            goal_id,
            attempts_used: 0,
            hints_revealed: 0,
            ended: false,
            won: false,
        }
    }

    fn is_consistent(&self) -> bool {
        self.attempts_used <= MAX_ATTEMPTS
            && self.hints_revealed as usize <= HINT_SEQUENCE.len()
            && self.hints_revealed <= self.attempts_used
            && (!self.won || self.ended)
            && (self.ended || self.attempts_used < MAX_ATTEMPTS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Daily,
    FreePlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Ended(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptMark {
    Used,
    Correct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Empty input, no round, or round already over. Nothing changed.
    Ignored,
    Wrong {
        hint: Option<HintKind>,
        remaining: u32,
    },
    Won {
        attempts: u32,
    },
    Lost,
}

/// Presentation capabilities the controller drives.
pub trait QuizView {
    /// Clears hints, attempt boxes and details, re-enables input, cancels a pending result.
    fn reset_board(&mut self);
    fn show_video(&mut self, url: Option<&str>);
    fn reveal_hint(&mut self, kind: HintKind, value: &str);
    fn mark_attempt(&mut self, index: usize, mark: AttemptMark);
    fn set_input_enabled(&mut self, enabled: bool);
    fn show_goal_details(&mut self, goal: &GoalRecord);
    fn update_counters(&mut self, used: u32, remaining: u32, total_wins: u32);
    fn schedule_result(&mut self, delay: Duration);
}

#[derive(Debug, Clone)]
struct Round {
    mode: GameMode,
    goal: GoalRecord,
    state: GameState,
}

pub struct Quiz<S, V> {
    catalog: Catalog,
    store: S,
    view: V,
    i18n: I18n,
    rng: StdRng,
    share_url: String,
    round: Option<Round>,
}

impl<S: KeyValueStore, V: QuizView> Quiz<S, V> {
    pub fn new(catalog: Catalog, store: S, view: V) -> Self {
        let language = load_language(&store).unwrap_or_default();
        Self {
            catalog,
            store,
            view,
            i18n: I18n::new(language),
            rng: StdRng::from_entropy(),
            share_url: DEFAULT_SHARE_URL.to_string(),
            round: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_share_url(mut self, url: impl Into<String>) -> Self {
        self.share_url = url.into();
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    pub fn language(&self) -> Language {
        self.i18n.language()
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.round.as_ref().map(|r| r.mode)
    }

    pub fn goal(&self) -> Option<&GoalRecord> {
        self.round.as_ref().map(|r| &r.goal)
    }

    pub fn state(&self) -> Option<&GameState> {
        self.round.as_ref().map(|r| &r.state)
    }

    pub fn phase(&self) -> Phase {
        match self.round.as_ref().map(|r| &r.state) {
            None => Phase::NotStarted,
            Some(s) if !s.ended => Phase::InProgress,
            Some(s) if s.won => Phase::Ended(Outcome::Won),
            Some(_) => Phase::Ended(Outcome::Lost),
        }
    }

    pub fn attempts_remaining(&self) -> u32 {
        let used = self.state().map(|s| s.attempts_used).unwrap_or(0);
        MAX_ATTEMPTS.saturating_sub(used)
    }

    /// Resumes today's persisted round when it matches the goal of the day, otherwise starts a
    /// fresh daily round.
    pub fn start_daily(&mut self, today: NaiveDate) {
        let Some(daily) = self.catalog.goal_of_day(today).cloned() else {
            warn!("catalog is empty; no daily goal");
            return;
        };
        match self.load_saved_state(today) {
            Some(saved) if saved.goal_id == daily.id => {
                info!(goal_id = daily.id, attempts = saved.attempts_used, "resuming daily round");
                self.resume(daily, saved);
            }
            Some(saved) => {
                info!(
                    stale_goal = saved.goal_id,
                    goal_id = daily.id,
                    "discarding saved round for a different goal"
                );
                self.begin(GameMode::Daily, daily, today);
            }
            None => self.begin(GameMode::Daily, daily, today),
        }
    }

    pub fn start_new_round(&mut self, mode: GameMode, today: NaiveDate) {
        let goal = match mode {
            GameMode::Daily => self.catalog.goal_of_day(today),
            GameMode::FreePlay => self.catalog.random_goal(&mut self.rng),
        };
        let Some(goal) = goal.cloned() else {
            warn!("catalog is empty; cannot start a round");
            return;
        };
        self.begin(mode, goal, today);
    }

    pub fn guess(&mut self, input: &str, today: NaiveDate) -> GuessOutcome {
        let guess = input.trim();
        if guess.is_empty() {
            return GuessOutcome::Ignored;
        }
        let Some(round) = self.round.as_mut() else {
            return GuessOutcome::Ignored;
        };
        if round.state.ended {
            return GuessOutcome::Ignored;
        }

        round.state.attempts_used += 1;
        let attempts = round.state.attempts_used;
        let correct = names_match(guess, &round.goal.player);
        let mark = if correct {
            AttemptMark::Correct
        } else {
            AttemptMark::Used
        };
        self.view.mark_attempt(attempts as usize - 1, mark);

        let outcome = if correct {
            round.state.ended = true;
            round.state.won = true;
            reveal_all(&mut self.view, &round.goal, &self.i18n);
            self.view.show_goal_details(&round.goal);
            self.view.set_input_enabled(false);
            self.view.schedule_result(RESULT_DELAY);
            GuessOutcome::Won { attempts }
        } else {
            let mut hint = None;
            if let Some(kind) = HINT_SEQUENCE.get(round.state.hints_revealed as usize).copied() {
                let value = hint_value(&round.goal, kind, &self.i18n);
                self.view.reveal_hint(kind, &value);
                round.state.hints_revealed += 1;
                hint = Some(kind);
            }
            if attempts >= MAX_ATTEMPTS {
                round.state.ended = true;
                round.state.won = false;
                self.view.set_input_enabled(false);
                self.view.show_goal_details(&round.goal);
                self.view.schedule_result(RESULT_DELAY);
                GuessOutcome::Lost
            } else {
                GuessOutcome::Wrong {
                    hint,
                    remaining: MAX_ATTEMPTS - attempts,
                }
            }
        };
        debug!(attempts, ?outcome, "guess evaluated");

        match outcome {
            GuessOutcome::Won { attempts } => self.record_result(Some(attempts)),
            GuessOutcome::Lost => self.record_result(None),
            _ => {}
        }
        self.refresh_counters();
        self.persist(today);
        outcome
    }

    /// Switches language, persists it and re-renders the revealed hint values.
    pub fn set_language(&mut self, language: Language) {
        self.i18n.set_language(language);
        match serde_json::to_string(&language) {
            Ok(json) => {
                if let Err(err) = self.store.save(KEY_LANGUAGE, &json) {
                    warn!(error = %err, "failed to persist language");
                }
            }
            Err(err) => warn!(error = %err, "failed to encode language"),
        }
        if let Some(round) = self.round.as_ref() {
            if round.state.ended {
                reveal_all(&mut self.view, &round.goal, &self.i18n);
            } else {
                reveal_first(&mut self.view, &round.goal, &self.i18n, round.state.hints_revealed);
            }
        }
    }

    /// Persisted statistics; missing or malformed data reads as empty.
    pub fn statistics(&self) -> Statistics {
        load_statistics(&self.store)
    }

    /// Plain-text summary with one square per attempt, `None` before the first round.
    pub fn share_text(&self) -> Option<String> {
        let round = self.round.as_ref()?;
        let title = match round.mode {
            GameMode::Daily => format!("{SHARE_TITLE} #{}", round.goal.id),
            GameMode::FreePlay => SHARE_TITLE.to_string(),
        };
        let result = if round.state.won {
            format!("{}/{MAX_ATTEMPTS}", round.state.attempts_used)
        } else {
            format!("X/{MAX_ATTEMPTS}")
        };
        let squares = attempt_marks(&round.state)
            .into_iter()
            .map(|mark| match mark {
                AttemptMark::Correct => '🟩',
                AttemptMark::Used => '🟥',
            })
            .collect::<String>();
        Some(format!(
            "{title} {result}\n\n{squares}\n\nJogue também! {}",
            self.share_url
        ))
    }

    fn begin(&mut self, mode: GameMode, goal: GoalRecord, today: NaiveDate) {
        info!(goal_id = goal.id, ?mode, "starting round");
        self.view.reset_board();
        self.view.show_video(goal.video_url.as_deref());
        self.round = Some(Round {
            mode,
            state: GameState::fresh(goal.id),
            goal,
        });
        self.refresh_counters();
        self.persist(today);
    }

    fn resume(&mut self, goal: GoalRecord, state: GameState) {
        self.view.reset_board();
        self.view.show_video(goal.video_url.as_deref());
        for (idx, mark) in attempt_marks(&state).into_iter().enumerate() {
            self.view.mark_attempt(idx, mark);
        }
        reveal_first(&mut self.view, &goal, &self.i18n, state.hints_revealed);
        if state.ended {
            self.view.set_input_enabled(false);
            reveal_all(&mut self.view, &goal, &self.i18n);
            self.view.show_goal_details(&goal);
            self.view.schedule_result(RESUME_RESULT_DELAY);
        }
        self.round = Some(Round {
            mode: GameMode::Daily,
            goal,
            state,
        });
        self.refresh_counters();
    }

    fn load_saved_state(&self, today: NaiveDate) -> Option<GameState> {
        let raw_state = self.store.load(KEY_GAME_STATE)?;
        let last_played = load_string(&self.store, KEY_LAST_PLAYED);
        let today_str = today.format(DATE_FORMAT).to_string();
        if last_played.as_deref() != Some(today_str.as_str()) {
            debug!(?last_played, "saved round is not from today");
            return None;
        }
        match serde_json::from_str::<GameState>(&raw_state) {
            Ok(state) if state.is_consistent() => Some(state),
            Ok(state) => {
                warn!(?state, "saved round violates bounds; ignoring");
                None
            }
            Err(err) => {
                warn!(error = %err, "saved round is malformed; ignoring");
                None
            }
        }
    }

    fn persist(&mut self, today: NaiveDate) {
        let Some(round) = self.round.as_ref() else {
            return;
        };
        if round.mode != GameMode::Daily {
            return;
        }
        let result = serde_json::to_string(&round.state)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.store.save(KEY_GAME_STATE, &json))
            .and_then(|_| {
                let date = serde_json::to_string(&today.format(DATE_FORMAT).to_string())?;
                self.store.save(KEY_LAST_PLAYED, &date)
            });
        if let Err(err) = result {
            warn!(error = %err, "failed to persist round");
        }
    }

    fn record_result(&mut self, win_attempts: Option<u32>) {
        let mut stats = load_statistics(&self.store);
        match win_attempts {
            Some(attempts) => stats.record_win(attempts),
            None => stats.record_loss(),
        }
        let result = serde_json::to_string(&stats)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.store.save(KEY_STATISTICS, &json));
        if let Err(err) = result {
            warn!(error = %err, "failed to persist statistics");
        }
    }

    fn refresh_counters(&mut self) {
        let used = self.state().map(|s| s.attempts_used).unwrap_or(0);
        let remaining = self.attempts_remaining();
        let wins = self.statistics().total_wins;
        self.view.update_counters(used, remaining, wins);
    }
}

/// Attempt boxes for a state: every attempt used, the last one correct on a win.
pub fn attempt_marks(state: &GameState) -> Vec<AttemptMark> {
    (0..state.attempts_used)
        .map(|i| {
            if state.won && i + 1 == state.attempts_used {
                AttemptMark::Correct
            } else {
                AttemptMark::Used
            }
        })
        .collect()
}

pub fn load_statistics<S: KeyValueStore + ?Sized>(store: &S) -> Statistics {
    let Some(raw) = store.load(KEY_STATISTICS) else {
        return Statistics::default();
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!(error = %err, "statistics are malformed; starting over");
        Statistics::default()
    })
}

fn load_language<S: KeyValueStore>(store: &S) -> Option<Language> {
    let raw = load_string(store, KEY_LANGUAGE)?;
    let lang = Language::from_code(&raw);
    if lang.is_none() {
        warn!(%raw, "unknown stored language; using default");
    }
    lang
}

fn reveal_first<V: QuizView>(view: &mut V, goal: &GoalRecord, i18n: &I18n, count: u32) {
    for kind in HINT_SEQUENCE.iter().take(count as usize) {
        view.reveal_hint(*kind, &hint_value(goal, *kind, i18n));
    }
}

fn reveal_all<V: QuizView>(view: &mut V, goal: &GoalRecord, i18n: &I18n) {
    reveal_first(view, goal, i18n, HINT_SEQUENCE.len() as u32);
}

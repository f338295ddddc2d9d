use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::autocomplete::Autocomplete;
use crate::catalog::GoalRecord;
use crate::countdown::Countdown;
use crate::hints::{HINT_SEQUENCE, HintKind};
use crate::modal::ResultModal;
use crate::quiz::{AttemptMark, MAX_ATTEMPTS, QuizView};

pub const TOAST_DURATION: Duration = Duration::from_secs(2);

/// Terminal-side rendering of the round, driven by the quiz through [`QuizView`].
#[derive(Debug, Clone)]
pub struct Board {
    pub hints: [Option<String>; HINT_SEQUENCE.len()],
    pub attempts: [Option<AttemptMark>; MAX_ATTEMPTS as usize],
    pub video_url: Option<String>,
    pub input_enabled: bool,
    pub details: Option<GoalRecord>,
    pub used: u32,
    pub remaining: u32,
    pub hits: u32,
    pub result_due: Option<Instant>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            hints: Default::default(),
            attempts: [None; MAX_ATTEMPTS as usize],
            video_url: None,
            input_enabled: true,
            details: None,
            used: 0,
            remaining: MAX_ATTEMPTS,
            hits: 0,
            result_due: None,
        }
    }

    pub fn hint(&self, kind: HintKind) -> Option<&str> {
        self.hints.get(kind.slot()).and_then(|v| v.as_deref())
    }

    /// True once the scheduled result is due; clears the schedule.
    pub fn take_due_result(&mut self, now: Instant) -> bool {
        match self.result_due {
            Some(at) if now >= at => {
                self.result_due = None;
                true
            }
            _ => false,
        }
    }
}

impl QuizView for Board {
    fn reset_board(&mut self) {
        let hits = self.hits;
        *self = Board::new();
        self.hits = hits;
    }

    fn show_video(&mut self, url: Option<&str>) {
        self.video_url = url.map(str::to_string);
    }

    fn reveal_hint(&mut self, kind: HintKind, value: &str) {
        if let Some(slot) = self.hints.get_mut(kind.slot()) {
            *slot = Some(value.to_string());
        }
    }

    fn mark_attempt(&mut self, index: usize, mark: AttemptMark) {
        if let Some(slot) = self.attempts.get_mut(index) {
            *slot = Some(mark);
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn show_goal_details(&mut self, goal: &GoalRecord) {
        self.details = Some(goal.clone());
    }

    fn update_counters(&mut self, used: u32, remaining: u32, total_wins: u32) {
        self.used = used;
        self.remaining = remaining;
        self.hits = total_wins;
    }

    fn schedule_result(&mut self, delay: Duration) {
        self.result_due = Some(Instant::now() + delay);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    pub until: Instant,
}

/// UI state owned by the front-end, outside the quiz itself.
#[derive(Debug, Clone)]
pub struct AppState {
    pub input: String,
    pub autocomplete: Autocomplete,
    pub modal: ResultModal,
    pub countdown: Countdown,
    pub countdown_text: String,
    pub toast: Option<Toast>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(player_names: Vec<String>) -> Self {
        Self {
            input: String::new(),
            autocomplete: Autocomplete::new(player_names),
            modal: ResultModal::new(),
            countdown: Countdown::new(),
            countdown_text: "--:--:--".to_string(),
            toast: None,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn show_toast(&mut self, text: impl Into<String>, kind: ToastKind, now: Instant) {
        self.toast = Some(Toast {
            text: text.into(),
            kind,
            until: now + TOAST_DURATION,
        });
    }

    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| now >= t.until) {
            self.toast = None;
        }
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.autocomplete.clear();
    }
}

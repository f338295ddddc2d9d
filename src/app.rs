use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::countdown::{Countdown, CountdownTick};
use crate::hints::HintKind;
use crate::i18n::{Key, Language};
use crate::modal::{ModalAction, ResultSummary};
use crate::quiz::{GameMode, GuessOutcome, Quiz};
use crate::share::{ShareReceipt, ShareSink, share_with_fallback};
use crate::state::{AppState, Board, ToastKind};
use crate::store::KeyValueStore;
use crate::video;

pub type Clock = Box<dyn Fn() -> NaiveDateTime>;

pub struct App {
    pub quiz: Quiz<Box<dyn KeyValueStore>, Board>,
    pub state: AppState,
    pub should_quit: bool,
    sinks: Vec<Box<dyn ShareSink>>,
    clock: Clock,
}

impl App {
    pub fn new(
        catalog: Catalog,
        store: Box<dyn KeyValueStore>,
        sinks: Vec<Box<dyn ShareSink>>,
    ) -> Self {
        let state = AppState::new(catalog.player_names());
        let quiz = Quiz::new(catalog, store, Board::new());
        Self {
            quiz,
            state,
            should_quit: false,
            sinks,
            clock: Box::new(|| Local::now().naive_local()),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.quiz = self.quiz.with_seed(seed);
        self
    }

    pub fn with_share_url(mut self, url: impl Into<String>) -> Self {
        self.quiz = self.quiz.with_share_url(url);
        self
    }

    pub fn now_local(&self) -> NaiveDateTime {
        (self.clock)()
    }

    pub fn start(&mut self, mode: GameMode) {
        let today = self.now_local().date();
        self.state.modal.close();
        self.state.clear_input();
        match mode {
            GameMode::Daily => self.quiz.start_daily(today),
            GameMode::FreePlay => self.quiz.start_new_round(GameMode::FreePlay, today),
        }
        if let Some(goal) = self.quiz.goal() {
            let label = match mode {
                GameMode::Daily => format!("daily #{}", goal.id),
                GameMode::FreePlay => "free play".to_string(),
            };
            self.state.push_log(format!("[INFO] Round started ({label})"));
        } else {
            self.state.push_log("[WARN] No goals available");
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::F(1) => {
                self.state.help_overlay = !self.state.help_overlay;
                return;
            }
            _ => {}
        }

        if self.state.help_overlay {
            if key.code == KeyCode::Esc {
                self.state.help_overlay = false;
            }
            return;
        }

        if self.state.modal.is_open() {
            let action = match key.code {
                KeyCode::Char('s') | KeyCode::Char('S') => Some(ModalAction::Share),
                KeyCode::Char('n') | KeyCode::Char('N') => Some(ModalAction::NewGame),
                KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('q') => Some(ModalAction::Close),
                _ => None,
            };
            if let Some(action) = action {
                self.on_modal_action(action);
            } else if ctrl && key.code == KeyCode::Char('l') {
                self.cycle_language();
            }
            return;
        }

        if ctrl {
            match key.code {
                KeyCode::Char('d') => self.start(GameMode::Daily),
                KeyCode::Char('f') => self.start(GameMode::FreePlay),
                KeyCode::Char('l') => self.cycle_language(),
                KeyCode::Char('o') => self.open_clip(),
                KeyCode::Char('r') => self.show_result(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Down => self.state.autocomplete.move_down(),
            KeyCode::Up => self.state.autocomplete.move_up(),
            KeyCode::Esc => self.state.autocomplete.escape(),
            KeyCode::Enter => {
                if self.state.autocomplete.is_visible()
                    && self.state.autocomplete.selected().is_some()
                {
                    if let Some(name) = self.state.autocomplete.confirm() {
                        self.select_suggestion(name);
                    }
                } else {
                    self.submit_guess();
                }
            }
            KeyCode::Backspace => {
                if self.quiz.view().input_enabled {
                    self.state.input.pop();
                    self.on_input_changed();
                }
            }
            KeyCode::Char(c) => {
                if self.quiz.view().input_enabled {
                    self.state.input.push(c);
                    self.on_input_changed();
                }
            }
            _ => {}
        }
    }

    pub fn click_suggestion(&mut self, index: usize) {
        if let Some(name) = self.state.autocomplete.click(index) {
            self.select_suggestion(name);
        }
    }

    pub fn click_outside(&mut self) {
        self.state.autocomplete.click_outside();
    }

    pub fn on_modal_action(&mut self, action: ModalAction) {
        match action {
            ModalAction::Share => self.share(),
            ModalAction::NewGame => {
                self.state.modal.close();
                self.start(GameMode::FreePlay);
            }
            ModalAction::Close => self.state.modal.close(),
        }
    }

    /// Applies every deadline: result display, suggestion blur, toast expiry, midnight rollover.
    pub fn on_tick(&mut self, now: Instant) {
        self.state.autocomplete.tick(now);
        self.state.expire_toast(now);

        if self.quiz.view_mut().take_due_result(now) {
            self.state.autocomplete.blur(now);
            self.show_result();
        }

        let local = self.now_local();
        let tick = self.state.countdown.tick(local, now);
        self.state.countdown_text = Countdown::display(&tick).to_string();
        if tick == CountdownTick::Reload {
            info!(date = %local.date(), "new day; reloading daily round");
            self.state.push_log("[INFO] New daily challenge available");
            self.start(GameMode::Daily);
        }
    }

    fn on_input_changed(&mut self) {
        let value = self.state.input.clone();
        self.state.autocomplete.on_input(&value);
    }

    fn select_suggestion(&mut self, name: String) {
        self.state.input = name;
        self.on_input_changed();
    }

    fn submit_guess(&mut self) {
        let today = self.now_local().date();
        let guess = self.state.input.clone();
        let outcome = self.quiz.guess(&guess, today);
        match outcome {
            GuessOutcome::Ignored => {}
            GuessOutcome::Wrong { hint, remaining } => {
                self.state.clear_input();
                let hint = hint.map(hint_name).unwrap_or("none");
                self.state.push_log(format!(
                    "[INFO] Wrong guess \"{}\" | hint: {hint} | {remaining} left",
                    guess.trim()
                ));
            }
            GuessOutcome::Won { attempts } => {
                self.state.autocomplete.clear();
                self.state
                    .push_log(format!("[INFO] Correct in {attempts} attempt(s)"));
            }
            GuessOutcome::Lost => {
                self.state.clear_input();
                self.state.push_log("[INFO] Out of attempts");
            }
        }
    }

    fn show_result(&mut self) {
        if let Some(summary) = ResultSummary::build(&self.quiz) {
            self.state.modal.show(summary);
        }
    }

    fn cycle_language(&mut self) {
        let next = self.quiz.language().next();
        self.set_language(next);
    }

    pub fn set_language(&mut self, language: Language) {
        self.quiz.set_language(language);
        if self.state.modal.is_open() {
            self.show_result();
        }
        self.state
            .push_log(format!("[INFO] Language: {}", language.code()));
    }

    fn open_clip(&mut self) {
        let url = self.quiz.view().video_url.clone();
        if let Err(err) = video::open_video(url.as_deref()) {
            warn!(error = %err, "clip could not be opened");
            self.state.push_log(format!("[WARN] {err}"));
            let text = self.quiz.i18n().text(Key::NoClip);
            self.state.show_toast(text, ToastKind::Error, Instant::now());
        }
    }

    fn share(&mut self) {
        let Some(text) = self.quiz.share_text() else {
            return;
        };
        let now = Instant::now();
        let i18n = *self.quiz.i18n();
        match share_with_fallback(&mut self.sinks, &text) {
            Ok(ShareReceipt::Clipboard) => {
                self.state
                    .show_toast(i18n.text(Key::Copied), ToastKind::Success, now);
            }
            Ok(ShareReceipt::SavedTo(path)) => {
                let msg = i18n.t(Key::SavedForCopy, &[("path", path.display().to_string())]);
                self.state.show_toast(msg, ToastKind::Success, now);
            }
            Err(err) => {
                self.state.push_log(format!("[WARN] Share failed: {err}"));
                self.state
                    .show_toast(i18n.text(Key::ShareFailed), ToastKind::Error, now);
            }
        }
    }
}

fn hint_name(kind: HintKind) -> &'static str {
    match kind {
        HintKind::Nationality => "nationality",
        HintKind::DominantFoot => "dominant foot",
        HintKind::Competition => "competition",
        HintKind::Year => "year",
        HintKind::Team => "team",
        HintKind::JerseyNumber => "jersey number",
    }
}

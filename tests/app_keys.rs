use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use goal_quiz::app::App;
use goal_quiz::catalog::{Catalog, GoalRecord};
use goal_quiz::i18n::Language;
use goal_quiz::quiz::{GameMode, MAX_ATTEMPTS, Outcome, Phase};
use goal_quiz::share::{ShareReceipt, ShareSink};
use goal_quiz::state::ToastKind;
use goal_quiz::store::{KEY_LAST_PLAYED, KeyValueStore, MemoryStore};

#[derive(Clone, Default)]
struct Recorder {
    shared: Rc<RefCell<Vec<String>>>,
    fail: bool,
}

impl ShareSink for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    fn share(&mut self, text: &str) -> Result<ShareReceipt> {
        if self.fail {
            return Err(anyhow!("recorder offline"));
        }
        self.shared.borrow_mut().push(text.to_string());
        Ok(ShareReceipt::Clipboard)
    }
}

fn goal(id: u32, player: &str) -> GoalRecord {
    GoalRecord {
        id,
        player: player.to_string(),
        team: "Flamengo".to_string(),
        year: Some(1981),
        competition: Some("Libertadores".to_string()),
        jersey_number: 10,
        dominant_foot: "Direito".to_string(),
        nationality: "Brasil".to_string(),
        description: Some("Falta no ângulo".to_string()),
        video_url: None,
    }
}

fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn app_with(sink: Recorder) -> App {
    let catalog = Catalog::new(vec![goal(1, "Zico"), goal(2, "Zinho"), goal(3, "Adílio")]);
    let mut app = App::new(
        catalog,
        Box::new(MemoryStore::new()),
        vec![Box::new(sink) as Box<dyn ShareSink>],
    )
    .with_clock(Box::new(|| noon(2026, 10, 18)))
    .with_seed(3);
    app.start(GameMode::Daily);
    app
}

fn press(app: &mut App, code: KeyCode) {
    app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn ctrl(app: &mut App, c: char) {
    app.on_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn answer(app: &App) -> String {
    app.quiz.goal().unwrap().player.clone()
}

fn win(app: &mut App) {
    let target = answer(app);
    type_text(app, &target);
    press(app, KeyCode::Esc);
    press(app, KeyCode::Enter);
}

#[test]
fn typing_opens_suggestions_and_enter_picks_highlight() {
    let mut app = app_with(Recorder::default());
    type_text(&mut app, "zi");
    assert!(app.state.autocomplete.is_visible());
    assert_eq!(app.state.autocomplete.suggestions(), vec!["Zico", "Zinho"]);

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state.input, "Zinho");
    assert_eq!(app.quiz.state().unwrap().attempts_used, 0);
}

#[test]
fn enter_without_highlight_submits_guess() {
    let mut app = app_with(Recorder::default());
    let wrong = ["Zico", "Zinho", "Adílio"]
        .into_iter()
        .find(|name| *name != answer(&app))
        .unwrap();
    type_text(&mut app, wrong);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.quiz.state().unwrap().attempts_used, 1);
    assert!(app.state.input.is_empty());
    assert!(!app.state.autocomplete.is_visible());
    assert!(app.state.logs.iter().any(|l| l.contains("Wrong guess")));
}

#[test]
fn clicking_a_suggestion_fills_input() {
    let mut app = app_with(Recorder::default());
    type_text(&mut app, "a");
    let first = app.state.autocomplete.suggestions()[0].to_string();
    app.click_suggestion(0);
    assert_eq!(app.state.input, first);

    type_text(&mut app, "x");
    app.click_outside();
    assert!(!app.state.autocomplete.is_visible());
}

#[test]
fn result_modal_opens_after_delay_and_locks_input() {
    let mut app = app_with(Recorder::default());
    win(&mut app);
    assert_eq!(app.quiz.phase(), Phase::Ended(Outcome::Won));
    assert!(!app.state.modal.is_open());

    app.on_tick(Instant::now() + Duration::from_secs(2));
    let summary = app.state.modal.summary().unwrap();
    assert!(summary.won);
    assert_eq!(summary.highlight, Some(1));

    press(&mut app, KeyCode::Esc);
    assert!(!app.state.modal.is_open());
    type_text(&mut app, "abc");
    assert!(app.state.input.is_empty());

    ctrl(&mut app, 'r');
    assert!(app.state.modal.is_open());
}

#[test]
fn modal_new_game_starts_free_play() {
    let mut app = app_with(Recorder::default());
    win(&mut app);
    app.on_tick(Instant::now() + Duration::from_secs(2));

    press(&mut app, KeyCode::Char('n'));
    assert!(!app.state.modal.is_open());
    assert_eq!(app.quiz.mode(), Some(GameMode::FreePlay));
    assert_eq!(app.quiz.phase(), Phase::InProgress);
    assert!(app.quiz.view().input_enabled);
}

#[test]
fn share_copies_text_and_shows_toast() {
    let sink = Recorder::default();
    let shared = sink.shared.clone();
    let mut app = app_with(sink);
    win(&mut app);
    app.on_tick(Instant::now() + Duration::from_secs(2));

    press(&mut app, KeyCode::Char('s'));
    let texts = shared.borrow();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("1/7"));
    let toast = app.state.toast.as_ref().unwrap();
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.text, "Copiado para a área de transferência!");
}

#[test]
fn failed_share_shows_error_toast() {
    let mut app = app_with(Recorder {
        fail: true,
        ..Recorder::default()
    });
    for _ in 0..MAX_ATTEMPTS {
        type_text(&mut app, "Ninguém");
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Enter);
    }
    assert_eq!(app.quiz.phase(), Phase::Ended(Outcome::Lost));
    app.on_tick(Instant::now() + Duration::from_secs(2));
    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.state.toast.as_ref().unwrap().kind, ToastKind::Error);

    app.on_tick(Instant::now() + Duration::from_secs(10));
    assert!(app.state.toast.is_none());
}

#[test]
fn ctrl_l_cycles_language() {
    let mut app = app_with(Recorder::default());
    assert_eq!(app.quiz.language(), Language::Br);
    ctrl(&mut app, 'l');
    assert_eq!(app.quiz.language(), Language::En);
    ctrl(&mut app, 'l');
    ctrl(&mut app, 'l');
    assert_eq!(app.quiz.language(), Language::Br);
}

#[test]
fn midnight_reloads_the_daily_round() {
    let clock = Rc::new(Cell::new(noon(2026, 10, 18)));
    let reader = clock.clone();
    let catalog = Catalog::new(vec![goal(1, "Zico"), goal(2, "Zinho")]);
    let mut app = App::new(catalog, Box::new(MemoryStore::new()), Vec::new())
        .with_clock(Box::new(move || reader.get()));
    app.start(GameMode::Daily);

    let t0 = Instant::now();
    app.on_tick(t0);
    assert_eq!(app.state.countdown_text, "12:00:00");

    clock.set(noon(2026, 10, 19));
    app.on_tick(t0 + Duration::from_millis(250));
    assert_eq!(app.state.countdown_text, "00:00:00");
    app.on_tick(t0 + Duration::from_secs(2));

    assert_eq!(
        app.quiz.store().load(KEY_LAST_PLAYED).as_deref(),
        Some("\"2026-10-19\"")
    );
    assert_eq!(app.quiz.state().unwrap().attempts_used, 0);
    assert!(app.state.logs.iter().any(|l| l.contains("New daily challenge")));
}

#[test]
fn ctrl_c_quits() {
    let mut app = app_with(Recorder::default());
    ctrl(&mut app, 'c');
    assert!(app.should_quit);
}

#[test]
fn missing_clip_shows_error_toast() {
    let mut app = app_with(Recorder::default());
    ctrl(&mut app, 'o');
    assert_eq!(app.state.toast.as_ref().unwrap().kind, ToastKind::Error);
    assert!(app.state.logs.iter().any(|l| l.starts_with("[WARN]")));
}

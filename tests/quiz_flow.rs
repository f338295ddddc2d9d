use chrono::NaiveDate;

use goal_quiz::catalog::{Catalog, GoalRecord};
use goal_quiz::hints::HintKind;
use goal_quiz::i18n::Language;
use goal_quiz::quiz::{
    AttemptMark, GameMode, GameState, GuessOutcome, MAX_ATTEMPTS, Outcome, Phase, Quiz,
    RESUME_RESULT_DELAY,
};
use goal_quiz::state::Board;
use goal_quiz::store::{
    KEY_GAME_STATE, KEY_LANGUAGE, KEY_LAST_PLAYED, KEY_STATISTICS, KeyValueStore, MemoryStore,
};

fn goal(id: u32, player: &str) -> GoalRecord {
    GoalRecord {
        id,
        player: player.to_string(),
        team: format!("Team {id}"),
        year: Some(2000 + id as u16),
        competition: Some("Copa".to_string()),
        jersey_number: 10,
        dominant_foot: "Esquerdo".to_string(),
        nationality: "Brasil".to_string(),
        description: None,
        video_url: Some(format!("https://clips.test/{id}.mp4")),
    }
}

fn catalog(size: u32) -> Catalog {
    Catalog::new((0..size).map(|i| goal(i + 1, &format!("Player {}", i + 1))).collect())
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn quiz_with(store: MemoryStore) -> Quiz<MemoryStore, Board> {
    Quiz::new(catalog(5), store, Board::new()).with_seed(7)
}

fn answer(quiz: &Quiz<MemoryStore, Board>) -> String {
    quiz.goal().unwrap().player.clone()
}

fn saved_state(quiz: &Quiz<MemoryStore, Board>) -> GameState {
    serde_json::from_str(&quiz.store().load(KEY_GAME_STATE).unwrap()).unwrap()
}

#[test]
fn goal_of_day_uses_day_of_year() {
    let catalog = catalog(10);
    // 2026-04-13 is day 103
    let date = NaiveDate::from_ymd_opt(2026, 4, 13).unwrap();
    assert_eq!(catalog.goal_of_day(date).unwrap().id, 4);
    let new_year = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    assert_eq!(catalog.goal_of_day(new_year).unwrap().id, 2);
    assert!(Catalog::new(Vec::new()).goal_of_day(date).is_none());
}

#[test]
fn builtin_catalog_covers_every_day() {
    let catalog = Catalog::builtin();
    assert!(!catalog.is_empty());
    let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    while date.format("%Y").to_string() == "2024" {
        assert!(catalog.goal_of_day(date).is_some());
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn wrong_guesses_reveal_hints_in_order_then_lose() {
    let mut quiz = quiz_with(MemoryStore::new());
    quiz.start_daily(day());
    assert_eq!(quiz.phase(), Phase::InProgress);

    let order = [
        HintKind::Nationality,
        HintKind::DominantFoot,
        HintKind::Competition,
        HintKind::Year,
        HintKind::Team,
        HintKind::JerseyNumber,
    ];
    for (i, kind) in order.iter().enumerate() {
        let outcome = quiz.guess("Nobody", day());
        assert_eq!(
            outcome,
            GuessOutcome::Wrong {
                hint: Some(*kind),
                remaining: MAX_ATTEMPTS - i as u32 - 1,
            }
        );
        assert!(quiz.view().hint(*kind).is_some());
    }
    assert_eq!(quiz.phase(), Phase::InProgress);
    assert_eq!(quiz.state().unwrap().hints_revealed, 6);

    assert_eq!(quiz.guess("Nobody", day()), GuessOutcome::Lost);
    assert_eq!(quiz.phase(), Phase::Ended(Outcome::Lost));
    assert!(!quiz.view().input_enabled);
    assert!(quiz.view().result_due.is_some());
    assert!(quiz.view().details.is_some());

    let stats = quiz.statistics();
    assert_eq!(stats.total_games, 1);
    assert_eq!(stats.total_wins, 0);
    assert!(stats.distribution.is_empty());
}

#[test]
fn win_on_third_attempt_records_distribution() {
    let mut quiz = quiz_with(MemoryStore::new());
    quiz.start_daily(day());
    let target = answer(&quiz);

    quiz.guess("wrong one", day());
    quiz.guess("wrong two", day());
    let outcome = quiz.guess(&target.to_uppercase(), day());
    assert_eq!(outcome, GuessOutcome::Won { attempts: 3 });
    assert_eq!(quiz.phase(), Phase::Ended(Outcome::Won));

    let stats = quiz.statistics();
    assert_eq!(stats.total_games, 1);
    assert_eq!(stats.total_wins, 1);
    assert_eq!(stats.wins_in(3), 1);

    let board = quiz.view();
    assert_eq!(board.attempts[2], Some(AttemptMark::Correct));
    assert_eq!(board.attempts[1], Some(AttemptMark::Used));
    assert_eq!(board.attempts[3], None);
    assert!(board.hints.iter().all(Option::is_some));
    assert_eq!(board.hits, 1);

    let saved = saved_state(&quiz);
    assert!(saved.ended && saved.won);
    assert_eq!(saved.attempts_used, 3);
    assert_eq!(saved.hints_revealed, 2);
}

#[test]
fn accents_and_case_do_not_matter() {
    let catalog = Catalog::new(vec![goal(1, "João Pinto")]);
    let mut quiz = Quiz::new(catalog, MemoryStore::new(), Board::new());
    quiz.start_new_round(GameMode::FreePlay, day());
    assert_eq!(
        quiz.guess("  joao pinto ", day()),
        GuessOutcome::Won { attempts: 1 }
    );
}

#[test]
fn empty_and_post_game_guesses_are_ignored() {
    let mut quiz = quiz_with(MemoryStore::new());
    assert_eq!(quiz.guess("anything", day()), GuessOutcome::Ignored);

    quiz.start_daily(day());
    assert_eq!(quiz.guess("   ", day()), GuessOutcome::Ignored);
    assert_eq!(quiz.state().unwrap().attempts_used, 0);

    let target = answer(&quiz);
    quiz.guess(&target, day());
    assert_eq!(quiz.guess("again", day()), GuessOutcome::Ignored);
    assert_eq!(quiz.state().unwrap().attempts_used, 1);
    assert_eq!(quiz.statistics().total_games, 1);
}

#[test]
fn attempts_never_exceed_the_limit() {
    let mut quiz = quiz_with(MemoryStore::new());
    quiz.start_daily(day());
    for _ in 0..(MAX_ATTEMPTS + 5) {
        quiz.guess("Nobody", day());
    }
    assert_eq!(quiz.state().unwrap().attempts_used, MAX_ATTEMPTS);
    assert_eq!(quiz.attempts_remaining(), 0);
    assert_eq!(quiz.statistics().total_games, 1);
}

#[test]
fn daily_round_resumes_the_same_day() {
    let mut first = quiz_with(MemoryStore::new());
    first.start_daily(day());
    first.guess("Nobody", day());
    first.guess("Nobody", day());
    let store = first.store().clone();

    let mut resumed = quiz_with(store);
    resumed.start_daily(day());
    let state = resumed.state().unwrap();
    assert_eq!(state.attempts_used, 2);
    assert_eq!(state.hints_revealed, 2);
    assert_eq!(resumed.phase(), Phase::InProgress);
    let board = resumed.view();
    assert!(board.hint(HintKind::Nationality).is_some());
    assert!(board.hint(HintKind::DominantFoot).is_some());
    assert!(board.hint(HintKind::Competition).is_none());
    assert_eq!(board.used, 2);
    assert_eq!(board.remaining, MAX_ATTEMPTS - 2);
}

#[test]
fn finished_daily_round_reopens_the_result() {
    let mut first = quiz_with(MemoryStore::new());
    first.start_daily(day());
    let target = answer(&first);
    first.guess(&target, day());
    let store = first.store().clone();

    let before = std::time::Instant::now();
    let mut resumed = quiz_with(store);
    resumed.start_daily(day());
    assert_eq!(resumed.phase(), Phase::Ended(Outcome::Won));
    assert!(!resumed.view().input_enabled);
    let due = resumed.view().result_due.unwrap();
    assert!(due <= std::time::Instant::now() + RESUME_RESULT_DELAY);
    assert!(due >= before);
    assert_eq!(resumed.statistics().total_games, 1);
}

#[test]
fn stale_goal_id_is_discarded() {
    let mut store = MemoryStore::new();
    let daily_id = catalog(5).goal_of_day(day()).unwrap().id;
    let stale = GameState {
        goal_id: daily_id % 5 + 1,
        attempts_used: 4,
        hints_revealed: 4,
        ended: false,
        won: false,
    };
    store
        .save(KEY_GAME_STATE, &serde_json::to_string(&stale).unwrap())
        .unwrap();
    store.save(KEY_LAST_PLAYED, "\"2026-10-18\"").unwrap();

    let mut quiz = quiz_with(store);
    quiz.start_daily(day());
    let state = quiz.state().unwrap();
    assert_eq!(state.goal_id, daily_id);
    assert_eq!(state.attempts_used, 0);
    assert_eq!(saved_state(&quiz).goal_id, daily_id);
}

#[test]
fn yesterdays_round_is_not_resumed() {
    let mut first = quiz_with(MemoryStore::new());
    first.start_daily(day());
    first.guess("Nobody", day());
    let store = first.store().clone();

    let next = day().succ_opt().unwrap();
    let mut quiz = quiz_with(store);
    quiz.start_daily(next);
    assert_eq!(quiz.state().unwrap().attempts_used, 0);
    assert_eq!(
        quiz.store().load(KEY_LAST_PLAYED).as_deref(),
        Some("\"2026-10-19\"")
    );
}

#[test]
fn malformed_saved_data_starts_fresh() {
    let mut store = MemoryStore::new();
    store.save(KEY_GAME_STATE, "{broken").unwrap();
    store.save(KEY_LAST_PLAYED, "2026-10-18").unwrap();
    store.save(KEY_STATISTICS, "not json").unwrap();
    store.save(KEY_LANGUAGE, "\"klingon\"").unwrap();

    let mut quiz = quiz_with(store);
    assert_eq!(quiz.language(), Language::Br);
    quiz.start_daily(day());
    assert_eq!(quiz.phase(), Phase::InProgress);
    assert_eq!(quiz.state().unwrap().attempts_used, 0);
    assert_eq!(quiz.statistics().total_games, 0);
}

#[test]
fn free_play_does_not_touch_the_daily_save() {
    let mut quiz = quiz_with(MemoryStore::new());
    quiz.start_new_round(GameMode::FreePlay, day());
    assert_eq!(quiz.mode(), Some(GameMode::FreePlay));
    quiz.guess("Nobody", day());
    assert!(quiz.store().load(KEY_GAME_STATE).is_none());

    let target = answer(&quiz);
    quiz.guess(&target, day());
    assert_eq!(quiz.statistics().wins_in(2), 1);
}

#[test]
fn new_round_resets_board_but_keeps_hits() {
    let mut quiz = quiz_with(MemoryStore::new());
    quiz.start_daily(day());
    let target = answer(&quiz);
    quiz.guess(&target, day());

    quiz.start_new_round(GameMode::FreePlay, day());
    let board = quiz.view();
    assert!(board.hints.iter().all(Option::is_none));
    assert!(board.attempts.iter().all(Option::is_none));
    assert!(board.input_enabled);
    assert!(board.details.is_none());
    assert!(board.result_due.is_none());
    assert_eq!(board.hits, 1);
    assert_eq!(board.remaining, MAX_ATTEMPTS);
}

#[test]
fn language_switch_persists_and_retranslates_hints() {
    let mut quiz = quiz_with(MemoryStore::new());
    quiz.start_daily(day());
    quiz.guess("Nobody", day());
    quiz.guess("Nobody", day());
    assert_eq!(quiz.view().hint(HintKind::DominantFoot), Some("Esquerdo"));

    quiz.set_language(Language::En);
    assert_eq!(quiz.view().hint(HintKind::DominantFoot), Some("Left"));
    assert_eq!(
        quiz.store().load(KEY_LANGUAGE).as_deref(),
        Some("\"en\"")
    );

    let reopened = quiz_with(quiz.store().clone());
    assert_eq!(reopened.language(), Language::En);
}

#[test]
fn share_text_lists_one_square_per_attempt() {
    let mut quiz = quiz_with(MemoryStore::new()).with_share_url("https://quiz.test/");
    assert!(quiz.share_text().is_none());
    quiz.start_daily(day());
    let id = quiz.goal().unwrap().id;
    let target = answer(&quiz);
    quiz.guess("Nobody", day());
    quiz.guess(&target, day());

    assert_eq!(
        quiz.share_text().unwrap(),
        format!("Advinhe o Gol #{id} 2/7\n\n🟥🟩\n\nJogue também! https://quiz.test/")
    );
}

#[test]
fn lost_share_text_uses_x() {
    let mut quiz = quiz_with(MemoryStore::new());
    quiz.start_new_round(GameMode::FreePlay, day());
    for _ in 0..MAX_ATTEMPTS {
        quiz.guess("Nobody", day());
    }
    let text = quiz.share_text().unwrap();
    assert!(text.starts_with("Advinhe o Gol X/7\n\n"));
    assert_eq!(text.matches('🟥').count(), MAX_ATTEMPTS as usize);
}

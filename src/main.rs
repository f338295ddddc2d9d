use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Wrap};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use goal_quiz::app::App;
use goal_quiz::catalog::Catalog;
use goal_quiz::config::Config;
use goal_quiz::hints::HINT_SEQUENCE;
use goal_quiz::i18n::{I18n, Key};
use goal_quiz::modal::ResultSummary;
use goal_quiz::quiz::{AttemptMark, GameMode, MAX_ATTEMPTS, Phase};
use goal_quiz::share::{ShareFile, ShareSink, SystemClipboard, TerminalClipboard};
use goal_quiz::state::{AppState, Board, ToastKind};
use goal_quiz::store::{JsonFileStore, KeyValueStore, MemoryStore};

const MAX_SUGGESTION_ROWS: u16 = 6;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = Config::from_env().apply_args(std::env::args().skip(1));
    init_tracing(&config);

    let store: Box<dyn KeyValueStore> = match config.store_path() {
        Some(path) => Box::new(JsonFileStore::open(path)),
        None => {
            warn!("no data directory; progress will not survive a restart");
            Box::new(MemoryStore::new())
        }
    };

    let mut sinks: Vec<Box<dyn ShareSink>> = vec![Box::new(SystemClipboard)];
    if config.osc52 {
        sinks.push(Box::new(TerminalClipboard::new(io::stdout())));
    }
    sinks.push(Box::new(ShareFile::new(config.share_file_path())));

    let mut app = App::new(Catalog::builtin(), store, sinks).with_share_url(&config.share_url);
    if let Some(lang) = config.language {
        app.set_language(lang);
    }
    app.start(config.start_mode);
    info!(mode = ?config.start_mode, "goal quiz started");

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend).context("create terminal")?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn init_tracing(config: &Config) {
    let Some(path) = config.log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        app.on_tick(Instant::now());
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    on_mouse(app, mouse, size);
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn on_mouse(app: &mut App, mouse: MouseEvent, size: Rect) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if !app.state.autocomplete.is_visible() {
        return;
    }
    let areas = Areas::compute(size);
    let total = app.state.autocomplete.suggestions().len();
    let list = suggestion_rect(areas.input, size, total);
    let inner = Block::default().borders(Borders::ALL).inner(list);
    let inside = mouse.column >= inner.x
        && mouse.column < inner.x + inner.width
        && mouse.row >= inner.y
        && mouse.row < inner.y + inner.height;
    if !inside {
        app.click_outside();
        return;
    }
    let (start, _) = visible_range(
        app.state.autocomplete.selected().unwrap_or(0),
        total,
        inner.height as usize,
    );
    let idx = start + (mouse.row - inner.y) as usize;
    app.click_suggestion(idx);
}

struct Areas {
    header: Rect,
    clip: Rect,
    hints: Rect,
    attempts: Rect,
    input: Rect,
    counters: Rect,
    details: Rect,
    console: Rect,
    footer: Rect,
}

impl Areas {
    fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(5),
                Constraint::Length(1),
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(34)])
            .split(rows[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(HINT_SEQUENCE.len() as u16 + 2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(1)])
            .split(columns[1]);

        Self {
            header: rows[0],
            clip: left[0],
            hints: left[1],
            attempts: left[2],
            input: left[3],
            counters: right[0],
            details: right[1],
            console: rows[2],
            footer: rows[3],
        }
    }
}

fn suggestion_rect(input: Rect, area: Rect, total: usize) -> Rect {
    let wanted = (total as u16).min(MAX_SUGGESTION_ROWS) + 2;
    let y = input.y + input.height;
    let available = area.height.saturating_sub(y);
    Rect {
        x: input.x,
        y,
        width: input.width,
        height: wanted.min(available),
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let area = frame.size();
    let areas = Areas::compute(area);
    let board = app.quiz.view();
    let i18n = app.quiz.i18n();

    let header = Paragraph::new(header_text(app)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, areas.header);

    render_clip(frame, areas.clip, board, i18n);
    render_hints(frame, areas.hints, board, i18n);
    render_attempts(frame, areas.attempts, board);
    render_input(frame, areas.input, &app.state, board, i18n);
    render_counters(frame, areas.counters, board, i18n);
    render_details(frame, areas.details, board);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, areas.console);

    let footer = Paragraph::new(footer_text(app)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, areas.footer);

    if app.state.autocomplete.is_visible() {
        render_suggestions(frame, areas.input, area, &app.state);
    }

    if let Some(summary) = app.state.modal.summary() {
        render_result_modal(frame, area, summary, &app.state.countdown_text, i18n);
    }

    if let Some(toast) = &app.state.toast {
        render_toast(frame, area, &toast.text, toast.kind);
    }

    if app.state.help_overlay {
        render_help_overlay(frame, area);
    }
}

fn header_text(app: &App) -> String {
    let i18n = app.quiz.i18n();
    let mode = match (app.quiz.mode(), app.quiz.goal()) {
        (Some(GameMode::Daily), Some(goal)) => format!("{} #{}", i18n.text(Key::DailyChallenge), goal.id),
        (Some(GameMode::FreePlay), _) => i18n.text(Key::FreePlay).to_string(),
        _ => "-".to_string(),
    };
    let line1 = format!(
        "  .-.  ADIVINHE O GOL | {mode} | {}",
        app.quiz.language().code().to_uppercase()
    );
    let line2 = format!(
        " /___\\ {} {}",
        i18n.text(Key::NextChallenge),
        app.state.countdown_text
    );
    let line3 = format!("  |_|  {}", i18n.text(Key::Welcome));
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(app: &App) -> String {
    if app.state.modal.is_open() {
        return "s Share | n New game | Esc Close | ^L Language | F1 Help | ^C Quit".to_string();
    }
    match app.quiz.phase() {
        Phase::Ended(_) => {
            "^R Result | ^D Daily | ^F Free play | ^O Clip | ^L Language | F1 Help | ^C Quit"
                .to_string()
        }
        _ => "Enter Guess | ↑/↓ Suggestions | ^D Daily | ^F Free play | ^O Clip | ^L Language | F1 Help | ^C Quit"
            .to_string(),
    }
}

fn render_clip(frame: &mut Frame, area: Rect, board: &Board, i18n: &I18n) {
    let text = match &board.video_url {
        Some(url) => format!("{} (^O): {url}", i18n.text(Key::OpenClip)),
        None => i18n.text(Key::NoClip).to_string(),
    };
    let clip = Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().title("Clip").borders(Borders::ALL));
    frame.render_widget(clip, area);
}

fn render_hints(frame: &mut Frame, area: Rect, board: &Board, i18n: &I18n) {
    let lines = HINT_SEQUENCE
        .iter()
        .map(|kind| {
            let label = format!("{:<16}", i18n.text(kind.label_key()));
            match board.hint(*kind) {
                Some(value) => Line::from(vec![
                    Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(value.to_string(), Style::default().fg(Color::Yellow)),
                ]),
                None => Line::from(vec![
                    Span::raw(label),
                    Span::styled("????", Style::default().fg(Color::DarkGray)),
                ]),
            }
        })
        .collect::<Vec<_>>();
    let hints = Paragraph::new(lines).block(Block::default().title("Hints").borders(Borders::ALL));
    frame.render_widget(hints, area);
}

fn render_attempts(frame: &mut Frame, area: Rect, board: &Board) {
    let spans = board
        .attempts
        .iter()
        .map(|slot| match slot {
            Some(AttemptMark::Correct) => Span::styled("[■] ", Style::default().fg(Color::Green)),
            Some(AttemptMark::Used) => Span::styled("[■] ", Style::default().fg(Color::Red)),
            None => Span::styled("[ ] ", Style::default().fg(Color::DarkGray)),
        })
        .collect::<Vec<_>>();
    let attempts = Paragraph::new(Line::from(spans))
        .block(Block::default().title("Attempts").borders(Borders::ALL));
    frame.render_widget(attempts, area);
}

fn render_input(frame: &mut Frame, area: Rect, state: &AppState, board: &Board, i18n: &I18n) {
    let (text, style) = if !board.input_enabled {
        (state.input.clone(), Style::default().fg(Color::DarkGray))
    } else if state.input.is_empty() {
        (
            i18n.text(Key::PlayerPlaceholder).to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (format!("{}_", state.input), Style::default())
    };
    let title = format!("{} (Enter)", i18n.text(Key::Guess));
    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(input, area);
}

fn render_suggestions(frame: &mut Frame, input: Rect, area: Rect, state: &AppState) {
    let names = state.autocomplete.suggestions();
    let rect = suggestion_rect(input, area, names.len());
    if rect.height < 3 {
        return;
    }
    frame.render_widget(Clear, rect);
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let selected = state.autocomplete.selected();
    let (start, end) = visible_range(selected.unwrap_or(0), names.len(), inner.height as usize);
    let lines = (start..end)
        .map(|idx| {
            let style = if selected == Some(idx) {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::from(Span::styled(names[idx].to_string(), style))
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_counters(frame: &mut Frame, area: Rect, board: &Board, i18n: &I18n) {
    let text = format!(
        "{}: {}\n{}: {}\n{}: {}",
        i18n.text(Key::AttemptsUsed),
        board.used,
        i18n.text(Key::AttemptsRemaining),
        board.remaining,
        i18n.text(Key::Hits),
        board.hits
    );
    let counters =
        Paragraph::new(text).block(Block::default().title("Stats").borders(Borders::ALL));
    frame.render_widget(counters, area);
}

fn render_details(frame: &mut Frame, area: Rect, board: &Board) {
    let block = Block::default().title("Goal").borders(Borders::ALL);
    let Some(goal) = &board.details else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };
    let mut lines = vec![
        Line::from(Span::styled(
            goal.player.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(goal.team.clone()),
    ];
    let when = match (&goal.competition, goal.year) {
        (Some(comp), Some(year)) => format!("{comp} {year}"),
        (Some(comp), None) => comp.clone(),
        (None, Some(year)) => year.to_string(),
        (None, None) => String::new(),
    };
    if !when.is_empty() {
        lines.push(Line::from(when));
    }
    if let Some(desc) = &goal.description {
        lines.push(Line::from(""));
        lines.push(Line::from(desc.clone()));
    }
    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(details, area);
}

fn render_result_modal(
    frame: &mut Frame,
    area: Rect,
    summary: &ResultSummary,
    countdown: &str,
    i18n: &I18n,
) {
    let popup = centered_rect(70, 80, area);
    frame.render_widget(Clear, popup);
    let title_style = if summary.won {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    };
    let block = Block::default()
        .title(Span::styled(summary.title.clone(), title_style))
        .borders(Borders::ALL);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(MAX_ATTEMPTS as u16 + 2),
            Constraint::Length(3),
        ])
        .split(inner);

    let top = vec![
        Line::from(summary.message.clone()),
        Line::from(Span::styled(
            summary.answer.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{}: {}   {}: {}",
            i18n.text(Key::Played),
            summary.played,
            i18n.text(Key::WinRate),
            summary.win_percentage
        )),
    ];
    frame.render_widget(Paragraph::new(top), chunks[0]);

    let boxes = summary
        .boxes
        .iter()
        .map(|slot| match slot {
            Some(AttemptMark::Correct) => Span::styled("■ ", Style::default().fg(Color::Green)),
            Some(AttemptMark::Used) => Span::styled("■ ", Style::default().fg(Color::Red)),
            None => Span::styled("□ ", Style::default().fg(Color::DarkGray)),
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(Line::from(boxes)), chunks[1]);

    let chart = distribution_chart(summary, i18n);
    frame.render_widget(chart, chunks[2]);

    let bottom = format!(
        "{} {countdown}\n{} (s)   {} (n)",
        i18n.text(Key::NextChallenge),
        i18n.text(Key::Share),
        i18n.text(Key::NewGame)
    );
    frame.render_widget(Paragraph::new(bottom), chunks[3]);
}

fn distribution_chart<'a>(summary: &ResultSummary, i18n: &I18n) -> BarChart<'a> {
    let max = summary
        .distribution
        .iter()
        .map(|(_, wins)| *wins as u64)
        .max()
        .unwrap_or(0)
        .max(1);
    let bars = summary
        .distribution
        .iter()
        .map(|(attempts, wins)| {
            let color = if summary.highlight == Some(*attempts) {
                Color::Green
            } else {
                Color::Gray
            };
            Bar::default()
                .value(*wins as u64)
                .label(Line::from(attempts.to_string()))
                .text_value(wins.to_string())
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect::<Vec<_>>();

    BarChart::default()
        .block(
            Block::default()
                .title(i18n.text(Key::VictoryDistribution))
                .borders(Borders::TOP),
        )
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(max)
}

fn render_toast(frame: &mut Frame, area: Rect, text: &str, kind: ToastKind) {
    let width = (text.chars().count() as u16 + 4).min(area.width);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + 1,
        width,
        height: 3.min(area.height),
    };
    let color = match kind {
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    };
    frame.render_widget(Clear, rect);
    let toast = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::White).bg(color))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(toast, rect);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No events yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Adivinhe o Gol - Help",
        "",
        "Playing:",
        "  type         Player name (suggestions appear)",
        "  ↑/↓          Move through suggestions",
        "  Enter        Pick suggestion / submit guess",
        "  Esc          Dismiss suggestions",
        "",
        "Global:",
        "  Ctrl+D       Daily challenge",
        "  Ctrl+F       Free play",
        "  Ctrl+O       Open goal clip",
        "  Ctrl+L       Cycle language",
        "  Ctrl+R       Show result again",
        "  F1           Toggle help",
        "  Ctrl+C       Quit",
        "",
        "Result:",
        "  s / n / Esc  Share / New game / Close",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

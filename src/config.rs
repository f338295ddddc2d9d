use std::env;
use std::path::PathBuf;

use crate::i18n::Language;
use crate::quiz::{DEFAULT_SHARE_URL, GameMode};
use crate::store;

/// Runtime settings from the environment (after `.env` loading) and command-line flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub language: Option<Language>,
    pub log_filter: String,
    pub share_url: String,
    pub osc52: bool,
    pub start_mode: GameMode,
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = env::var("GOAL_QUIZ_DATA_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(store::default_data_dir);
        let language = env::var("GOAL_QUIZ_LANG")
            .ok()
            .and_then(|v| Language::from_code(&v));
        let log_filter = env::var("GOAL_QUIZ_LOG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());
        let share_url = env::var("GOAL_QUIZ_SHARE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SHARE_URL.to_string());
        let osc52 = env::var("GOAL_QUIZ_OSC52")
            .map(|v| !matches!(v.trim(), "0" | "false" | "off" | "no"))
            .unwrap_or(true);
        Self {
            data_dir,
            language,
            log_filter,
            share_url,
            osc52,
            start_mode: GameMode::Daily,
        }
    }

    /// Applies `--free-play`, `--daily`, `--lang=<code>` / `--lang <code>` and
    /// `--data-dir=<path>` / `--data-dir <path>`.
    pub fn apply_args<I: IntoIterator<Item = String>>(mut self, args: I) -> Self {
        let args = args.into_iter().collect::<Vec<_>>();
        for (idx, arg) in args.iter().enumerate() {
            match arg.as_str() {
                "--free-play" => self.start_mode = GameMode::FreePlay,
                "--daily" => self.start_mode = GameMode::Daily,
                "--lang" => {
                    if let Some(lang) = args.get(idx + 1).and_then(|v| Language::from_code(v)) {
                        self.language = Some(lang);
                    }
                }
                "--data-dir" => {
                    if let Some(next) = args.get(idx + 1)
                        && !next.trim().is_empty()
                    {
                        self.data_dir = Some(PathBuf::from(next));
                    }
                }
                _ => {
                    if let Some(code) = arg.strip_prefix("--lang=")
                        && let Some(lang) = Language::from_code(code)
                    {
                        self.language = Some(lang);
                    }
                    if let Some(path) = arg.strip_prefix("--data-dir=")
                        && !path.trim().is_empty()
                    {
                        self.data_dir = Some(PathBuf::from(path.trim()));
                    }
                }
            }
        }
        self
    }

    pub fn store_path(&self) -> Option<PathBuf> {
        self.data_dir.as_deref().map(store::store_path)
    }

    pub fn share_file_path(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(env::temp_dir)
            .join("share.txt")
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join("goal_quiz.log"))
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use goal_quiz::quiz::{MAX_ATTEMPTS, load_statistics};
use goal_quiz::store::{self, JsonFileStore, KEY_LANGUAGE, KEY_LAST_PLAYED, load_string};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let data_dir = parse_data_dir_arg()
        .or_else(|| {
            std::env::var("GOAL_QUIZ_DATA_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        })
        .or_else(store::default_data_dir)
        .context("unable to resolve data dir")?;
    let path = store::store_path(&data_dir);
    if !path.exists() {
        return Err(anyhow!("no saved progress at {}", path.display()));
    }

    let store = JsonFileStore::open(&path);
    let stats = load_statistics(&store);

    println!("Store: {}", path.display());
    println!(
        "Last played: {}",
        load_string(&store, KEY_LAST_PLAYED).as_deref().unwrap_or("n/a")
    );
    println!(
        "Language: {}",
        load_string(&store, KEY_LANGUAGE).as_deref().unwrap_or("br")
    );
    println!("Played: {}", stats.total_games);
    println!("Wins: {}", stats.total_wins);
    println!("Win rate: {}%", stats.win_percentage());
    println!("Distribution:");
    let peak = stats
        .distribution_rows(MAX_ATTEMPTS)
        .iter()
        .map(|(_, wins)| *wins)
        .max()
        .unwrap_or(0)
        .max(1);
    for (attempts, wins) in stats.distribution_rows(MAX_ATTEMPTS) {
        let bar = "#".repeat((wins * 30 / peak) as usize);
        println!("  {attempts}: {bar} {wins}");
    }
    Ok(())
}

fn parse_data_dir_arg() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if let Some(path) = arg.strip_prefix("--data-dir=") {
            return Some(PathBuf::from(path.trim()));
        }
        if arg == "--data-dir" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

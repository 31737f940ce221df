use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use fcs_pbp::csv_out;
use fcs_pbp::ncaa_fetch::{self, GameRef};
use fcs_pbp::normalize::normalize;

const DEFAULT_SEASON: i32 = 2024;
const DEFAULT_WEEK: u32 = 1;

fn main() -> Result<()> {
    let season = int_arg::<i32>("--season")
        .or_else(|| int_env("FCS_SEASON"))
        .unwrap_or(DEFAULT_SEASON);
    let week = int_arg::<u32>("--week")
        .or_else(|| int_env("FCS_WEEK"))
        .unwrap_or(DEFAULT_WEEK);
    let out_dir = arg_value("--out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("out"));
    let limit = int_arg::<usize>("--limit");

    let games = ncaa_fetch::fetch_contests(season, week)
        .with_context(|| format!("failed listing games for season {season} week {week}"))?;
    println!("Season {season} week {week}: {} games", games.len());
    if games.is_empty() {
        return Ok(());
    }

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let take = limit.unwrap_or(games.len());
    let mut games_written = 0usize;
    let mut rows_written = 0usize;
    let mut errors: Vec<String> = Vec::new();

    for game in games.iter().take(take) {
        match process_game(game, &out_dir) {
            Ok(rows) => {
                games_written += 1;
                rows_written += rows;
                println!("game {}: {rows} rows ({})", game.game_id, game.url);
            }
            Err(err) => errors.push(format!("game {}: {err:#}", game.game_id)),
        }
    }

    println!(
        "Done: {games_written}/{take} games, {rows_written} rows, {} errors",
        errors.len()
    );
    for err in &errors {
        println!(" - {err}");
    }
    Ok(())
}

fn process_game(game: &GameRef, out_dir: &Path) -> Result<usize> {
    let document = ncaa_fetch::fetch_play_by_play(&game.game_id)?;
    let rows = normalize(&document)?;
    let path = out_dir.join(format!("pbp_{}.csv", game.game_id));
    csv_out::write_csv(&path, &rows)?;
    Ok(rows.len())
}

fn arg_value(name: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&format!("{name}=")) {
            return Some(value.to_string());
        }
        if arg == name {
            return args.get(idx + 1).cloned();
        }
    }
    None
}

fn int_arg<T: std::str::FromStr>(name: &str) -> Option<T> {
    arg_value(name).and_then(|val| val.trim().parse::<T>().ok())
}

fn int_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name)
        .ok()
        .and_then(|val| val.trim().parse::<T>().ok())
}

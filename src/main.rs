//! Headless arcade runner.
//!
//! Plays seeded autoplay sessions against the engines and prints a summary.
//! Set `RUST_LOG=debug` to follow line clears and merges as they happen.

use std::collections::VecDeque;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use arcade::autoplay::{pick_direction, plan_placement};
use arcade::core::stats::{format_clock, group_thousands};
use arcade::core::{GridEngine, TickOutcome};
use arcade::merge::MergeEngine;
use arcade::store::{
    keys, load_best, record_best, FileStore, MemoryStore, ScoreStore, StoreError,
};
use arcade::TickDriver;

#[derive(Debug, Parser)]
#[command(name = "arcade")]
#[command(about = "Headless autoplay runner for the arcade grid engines")]
struct Cli {
    /// Print the final summary as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Play Tetris until the tick budget runs out or the stack tops out
    Tetris {
        #[arg(long, default_value_t = 12345)]
        seed: u32,

        /// Gravity ticks to run
        #[arg(long, default_value_t = 2000)]
        ticks: u32,

        /// Simulated milliseconds per frame
        #[arg(long, default_value_t = 16)]
        frame_ms: u32,
    },
    /// Play 2048 until the move budget runs out or the board locks up
    Merge {
        #[arg(long, default_value_t = 12345)]
        seed: u32,

        /// Effective moves to make
        #[arg(long, default_value_t = 500)]
        moves: u32,

        /// JSON file holding best scores; omitted means nothing is persisted
        #[arg(long)]
        scores: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct TetrisSummary {
    seed: u32,
    score: u32,
    lines: u32,
    level: u32,
    pieces: u32,
    tetrises: u32,
    max_combo: u32,
    ticks: u32,
    play_time: String,
    game_over: bool,
}

#[derive(Debug, Serialize)]
struct MergeSummary {
    seed: u32,
    score: u32,
    best_score: u32,
    max_tile: u32,
    moves: u32,
    won: bool,
    game_over: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Tetris {
            seed,
            ticks,
            frame_ms,
        } => {
            let summary = run_tetris(seed, ticks, frame_ms.max(1));
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "tetris seed {}: score {} | lines {} | level {} | pieces {} | tetrises {} | time {}{}",
                    summary.seed,
                    group_thousands(u64::from(summary.score)),
                    summary.lines,
                    summary.level,
                    summary.pieces,
                    summary.tetrises,
                    summary.play_time,
                    if summary.game_over { " | game over" } else { "" },
                );
            }
        }
        Commands::Merge {
            seed,
            moves,
            scores,
        } => {
            let summary = match scores {
                Some(path) => {
                    let mut store = FileStore::open(&path);
                    run_merge(seed, moves, &mut store).with_context(|| {
                        format!("Failed to save best score to {}", path.display())
                    })?
                }
                None => run_merge(seed, moves, &mut MemoryStore::new())?,
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "2048 seed {}: score {} | best {} | max tile {} | moves {}{}{}",
                    summary.seed,
                    group_thousands(u64::from(summary.score)),
                    group_thousands(u64::from(summary.best_score)),
                    summary.max_tile,
                    summary.moves,
                    if summary.won { " | won" } else { "" },
                    if summary.game_over { " | game over" } else { "" },
                );
            }
        }
    }

    Ok(())
}

fn run_tetris(seed: u32, tick_budget: u32, frame_ms: u32) -> TetrisSummary {
    let mut game = GridEngine::new(seed);
    let mut driver = TickDriver::new();
    let mut plan: VecDeque<_> = plan_placement(&game).into();
    let mut ticks = 0;

    while ticks < tick_budget && !game.game_over() {
        // one input per frame, like a player tapping keys
        if let Some(action) = plan.pop_front() {
            driver.apply(&mut game, action);
        }

        let Some(outcome) = driver.advance(&mut game, frame_ms) else {
            continue;
        };
        ticks += 1;

        if let TickOutcome::Locked(event) = outcome {
            if event.lines_cleared > 0 {
                log::debug!(
                    "cleared {} line(s) for {} (combo {})",
                    event.lines_cleared,
                    event.score_delta,
                    event.combo
                );
            }
            plan = plan_placement(&game).into();
        }
    }

    let stats = game.stats();
    TetrisSummary {
        seed,
        score: game.score(),
        lines: game.lines(),
        level: game.level(),
        pieces: stats.total_pieces,
        tetrises: stats.tetris_count,
        max_combo: stats.max_combo,
        ticks,
        play_time: format_clock(driver.play_time_secs()),
        game_over: game.game_over(),
    }
}

fn run_merge<S: ScoreStore>(
    seed: u32,
    move_budget: u32,
    store: &mut S,
) -> Result<MergeSummary, StoreError> {
    let stored = load_best(store, keys::BEST_SCORE_2048);
    let mut game =
        MergeEngine::new(seed).with_best_score(u32::try_from(stored).unwrap_or(u32::MAX));
    let mut moves = 0;

    while moves < move_budget {
        if game.won() && !game.accepts_moves() {
            game.keep_going();
        }
        let Some(direction) = pick_direction(&game) else {
            break;
        };
        let outcome = game.shift(direction);
        moves += 1;
        for merge in &outcome.merges {
            log::debug!("merged {} at ({}, {})", merge.value, merge.row, merge.col);
        }
        if outcome.game_over {
            break;
        }
    }

    record_best(store, keys::BEST_SCORE_2048, u64::from(game.best_score()))?;

    Ok(MergeSummary {
        seed,
        score: game.score(),
        best_score: game.best_score(),
        max_tile: game.grid().max_tile(),
        moves,
        won: game.won(),
        game_over: game.game_over(),
    })
}

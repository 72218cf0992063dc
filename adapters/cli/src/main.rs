#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that feeds scripted meals to a single blob.

mod meal;
mod session;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use blob_arena_core::Tuning;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    meal::{Displacement, Meal},
    session::{FeedOptions, MealOutcome, Session},
};

/// Feeds a blob a sequence of meals and reports how it grows.
#[derive(Debug, Parser)]
#[command(name = "blob-arena", version, about)]
struct Cli {
    /// TOML file overriding the default tuning.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Meal to feed, written as `<kind>:<value>`. May be repeated.
    #[arg(long = "meal", default_value = "food:30")]
    meals: Vec<Meal>,
    /// Releases contact after this many ticks of each meal.
    #[arg(long)]
    release_after: Option<u32>,
    /// Largest number of ticks spent on one meal.
    #[arg(long, default_value_t = 600)]
    max_ticks: u32,
    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
    /// Pushes the player by `<x>,<y>` before the first meal.
    #[arg(long, allow_hyphen_values = true)]
    displace: Option<Displacement>,
}

/// Entry point for the blob arena command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let tuning = match &cli.config {
        Some(path) => load_tuning(path)?,
        None => Tuning::default(),
    };
    let mut session = Session::new(tuning, Duration::from_millis(cli.tick_ms))?;

    if let Some(Displacement(offset)) = cli.displace {
        session.displace(offset)?;
    }

    let options = FeedOptions {
        release_after: cli.release_after,
        max_ticks: cli.max_ticks,
    };

    for meal in cli.meals {
        println!("feeding {:?} worth {}", meal.kind, meal.food_value);
        let outcome = session.feed(meal, options, |tick, player| {
            println!(
                "  tick {tick:>4}: food value {:>5}, size {:.4}, position ({:.4}, {:.4})",
                player.food_value, player.size.x, player.position.x, player.position.y
            );
        })?;

        let player = session.player()?;
        match outcome {
            MealOutcome::Completed { ticks } => println!("  eaten after {ticks} ticks"),
            MealOutcome::Cancelled { ticks, remaining } => {
                println!("  released after {ticks} ticks with {remaining} left uneaten")
            }
            MealOutcome::Refused { prospective } => {
                println!("  refused: food value would drop to {prospective}")
            }
            MealOutcome::Rejected => println!("  rejected: not a consumable kind"),
            MealOutcome::Unfinished { ticks } => {
                println!("  still eating after {ticks} ticks, abandoned")
            }
        }
        println!(
            "  player food value {}, size {:.4}",
            player.food_value, player.size.x
        );
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_tuning(path: &Path) -> Result<Tuning> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file at {}", path.display()))?;
    let tuning: Tuning = toml::from_str(&contents)
        .with_context(|| format!("failed to parse tuning file at {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded tuning overrides");
    Ok(tuning)
}

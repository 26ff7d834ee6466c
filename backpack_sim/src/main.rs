//! backpack_sim - Headless seeded encounter runner for backpack_core

mod display;
mod simulation;

use anyhow::{Context, Result};
use backpack_core::config::load_item_catalog;
use backpack_core::{default_items, GameConstants};
use clap::Parser;
use simulation::Simulation;
use std::path::PathBuf;
use tracing::info;

/// Run a hero through a chain of seeded encounters
#[derive(Parser, Debug)]
#[command(name = "backpack_sim", version, about)]
struct Cli {
    /// Seed for enemy composition, intents and curse shapes
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Number of encounters to play
    #[arg(short = 'n', long, default_value_t = 5)]
    encounters: u32,

    /// Game constants TOML (defaults to the bundled constants)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Item catalog TOML (defaults to the bundled catalog)
    #[arg(short, long, value_name = "FILE")]
    items: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum OutputFormat {
    /// Per-encounter lines, the final hero and the backpack map
    Summary,
    /// The whole run as JSON
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let constants = match &cli.config {
        Some(path) => GameConstants::load(path)
            .with_context(|| format!("Failed to load constants from {}", path.display()))?,
        None => GameConstants::bundled(),
    };
    let catalog = match &cli.items {
        Some(path) => load_item_catalog(path)
            .with_context(|| format!("Failed to load items from {}", path.display()))?,
        None => default_items(),
    };

    info!(seed = cli.seed, encounters = cli.encounters, "starting run");
    let mut sim = Simulation::new(constants, &catalog, cli.seed).context("Failed to equip hero")?;
    sim.run(cli.encounters).context("Encounter aborted")?;

    match cli.format {
        OutputFormat::Summary => print_summary(&sim),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&sim).context("Failed to serialize run")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn print_summary(sim: &Simulation) {
    println!("=== Encounters ===");
    for encounter in &sim.encounters {
        println!("{}", encounter.summary());
    }

    println!();
    println!("=== Hero ===");
    println!("{}", display::render_hero(&sim.hero));
    if !sim.is_hero_alive() {
        println!("The hero has fallen.");
    }
    println!(
        "Unlock credits: {}  Frontier: {} cell(s)",
        sim.expansion.pending_unlocks(),
        sim.expansion.frontier().len()
    );

    println!();
    println!("=== Backpack ===");
    print!("{}", display::render_backpack(sim.hero.inventory()));
    println!("{}", display::render_items(sim.hero.inventory()));
}

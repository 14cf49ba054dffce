//! Headless batch skirmish runner
//!
//! Runs a seeded arena for a fixed number of ticks and prints a summary,
//! optionally as JSON. Same seed, same outcome - useful for tuning
//! config values and for catching behavioral regressions.

use clap::Parser;
use glam::Vec2;
use grimwatch::core::config::AiConfig;
use grimwatch::core::error::Result;
use grimwatch::core::types::Faction;
use grimwatch::sim::{Skirmish, SkirmishStats};
use serde::Serialize;
use std::path::PathBuf;

const TICK_DT: f32 = 0.1;

#[derive(Parser, Debug)]
#[command(about = "Run a headless guard-vs-raider skirmish")]
struct Args {
    /// RNG seed (same seed, same outcome)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3000)]
    ticks: u32,

    /// Guards to spawn
    #[arg(long, default_value_t = 3)]
    guards: usize,

    /// Raiders to spawn
    #[arg(long, default_value_t = 3)]
    raiders: usize,

    /// Optional TOML config overriding the default tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct NpcReport {
    faction: Faction,
    state: Option<String>,
    health: f32,
}

#[derive(Debug, Serialize)]
struct Report {
    seed: u64,
    ticks: u32,
    stats: SkirmishStats,
    npcs: Vec<NpcReport>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("grimwatch=warn")
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => AiConfig::load(path)?,
        None => AiConfig::default(),
    };
    config.validate()?;

    let mut skirmish = Skirmish::new(args.seed, config);

    // Cover scattered along the diagonal between the camps
    skirmish.world.add_obstacle(Vec2::new(30.0, 20.0), 3.0);
    skirmish.world.add_obstacle(Vec2::new(50.0, 35.0), 4.0);
    skirmish.world.add_obstacle(Vec2::new(70.0, 25.0), 3.0);

    for i in 0..args.guards {
        let post = Vec2::new(10.0 + 8.0 * i as f32, 10.0);
        skirmish.spawn_guard(
            post,
            vec![post, post + Vec2::new(15.0, 0.0), post + Vec2::new(15.0, 15.0)],
        )?;
    }
    for i in 0..args.raiders {
        skirmish.spawn_raider(Vec2::new(90.0, 15.0 + 12.0 * i as f32))?;
    }

    for _ in 0..args.ticks {
        skirmish.tick(TICK_DT);
    }

    let report = Report {
        seed: args.seed,
        ticks: args.ticks,
        stats: skirmish.stats().clone(),
        npcs: skirmish
            .npcs()
            .iter()
            .map(|npc| NpcReport {
                faction: npc.body.faction,
                state: npc
                    .brain
                    .as_ref()
                    .map(|b| b.current_state_name().to_string()),
                health: npc.body.health,
            })
            .collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "seed {} | {} ticks | shots {} hits {} downs {} respawns {}",
            report.seed,
            report.ticks,
            report.stats.shots_fired,
            report.stats.hits,
            report.stats.downs,
            report.stats.respawns,
        );
        for npc in &report.npcs {
            println!(
                "  {:?} hp {:>5.1} state {}",
                npc.faction,
                npc.health,
                npc.state.as_deref().unwrap_or("-"),
            );
        }
    }
    Ok(())
}

//! Grimwatch - Entry Point
//!
//! Interactive sandbox for the brain engine: spawns a small arena of
//! guards and raiders, then drops into a command loop for stepping the
//! simulation, inspecting brain state, and possessing NPCs.

use glam::Vec2;
use grimwatch::core::config::AiConfig;
use grimwatch::core::error::Result;
use grimwatch::sim::Skirmish;
use std::io::{self, Write};

/// Fixed frame duration for the interactive loop
const TICK_DT: f32 = 0.1;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("grimwatch=info")
        .init();

    tracing::info!("Grimwatch starting...");

    let config = AiConfig::default();
    config.validate()?;
    let mut skirmish = build_arena(config)?;

    println!("\n=== GRIMWATCH ===");
    println!("FSM AI brains in a sandbox arena");
    println!();
    println!("Commands:");
    println!("  tick / t           - Advance simulation by one tick");
    println!("  run <n>            - Run n simulation ticks");
    println!("  status / s         - Show NPC status");
    println!("  possess <idx>      - Take manual control of an NPC");
    println!("  release <idx>      - Hand an NPC back to its brain");
    println!("  raider <x> <y>     - Spawn a raider at a position");
    println!("  quit / q           - Exit");
    println!();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            ["tick"] | ["t"] => {
                skirmish.tick(TICK_DT);
                println!("tick {}", skirmish.tick_count());
            }
            ["run", n] => match n.parse::<u32>() {
                Ok(n) => {
                    for _ in 0..n {
                        skirmish.tick(TICK_DT);
                    }
                    println!("advanced to tick {}", skirmish.tick_count());
                    print_status(&skirmish);
                }
                Err(_) => println!("usage: run <n>"),
            },
            ["status"] | ["s"] => print_status(&skirmish),
            ["possess", idx] => set_possession(&mut skirmish, idx, true),
            ["release", idx] => set_possession(&mut skirmish, idx, false),
            ["raider", x, y] => match (x.parse::<f32>(), y.parse::<f32>()) {
                (Ok(x), Ok(y)) => {
                    let id = skirmish.spawn_raider(Vec2::new(x, y))?;
                    println!("spawned raider {}", id);
                }
                _ => println!("usage: raider <x> <y>"),
            },
            ["quit"] | ["q"] => break,
            [] => {}
            _ => println!("unknown command"),
        }
    }

    println!("\nFinal stats: {:?}", skirmish.stats());
    Ok(())
}

/// Two guard posts with patrol rounds, a couple of raiders, some cover
fn build_arena(config: AiConfig) -> Result<Skirmish> {
    let mut skirmish = Skirmish::new(42, config);

    skirmish.world.add_obstacle(Vec2::new(25.0, 10.0), 3.0);
    skirmish.world.add_obstacle(Vec2::new(40.0, 30.0), 4.0);

    skirmish.spawn_guard(
        Vec2::new(10.0, 10.0),
        vec![
            Vec2::new(10.0, 10.0),
            Vec2::new(30.0, 10.0),
            Vec2::new(30.0, 25.0),
            Vec2::new(10.0, 25.0),
        ],
    )?;
    skirmish.spawn_guard(
        Vec2::new(50.0, 40.0),
        vec![Vec2::new(50.0, 40.0), Vec2::new(50.0, 15.0)],
    )?;

    skirmish.spawn_raider(Vec2::new(80.0, 20.0))?;
    skirmish.spawn_raider(Vec2::new(75.0, 50.0))?;

    Ok(skirmish)
}

fn print_status(skirmish: &Skirmish) {
    println!(
        "tick {} | shots {} hits {} downs {} respawns {}",
        skirmish.tick_count(),
        skirmish.stats().shots_fired,
        skirmish.stats().hits,
        skirmish.stats().downs,
        skirmish.stats().respawns,
    );
    for (i, npc) in skirmish.npcs().iter().enumerate() {
        let state = match npc.brain.as_ref() {
            Some(brain) if npc.possessed => format!("{} (possessed)", brain.current_state_name()),
            Some(brain) if !brain.is_active() => format!("{} (inactive)", brain.current_state_name()),
            Some(brain) => brain.current_state_name().to_string(),
            None => "no brain".to_string(),
        };
        let target = npc
            .brain
            .as_ref()
            .and_then(|b| b.blackboard().target)
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "  [{}] {} {:?} hp {:>5.1} pos ({:>6.1},{:>6.1}) state {} target {}",
            i,
            npc.body.id,
            npc.body.faction,
            npc.body.health,
            npc.body.position.x,
            npc.body.position.y,
            state,
            target,
        );
    }
}

fn set_possession(skirmish: &mut Skirmish, idx: &str, possessed: bool) {
    let Ok(idx) = idx.parse::<usize>() else {
        println!("usage: possess|release <idx>");
        return;
    };
    match skirmish.npcs().get(idx) {
        Some(npc) => {
            let id = npc.body.id;
            skirmish.possess(id, possessed);
            println!(
                "{} {}",
                if possessed { "possessed" } else { "released" },
                id
            );
        }
        None => println!("no NPC at index {}", idx),
    }
}

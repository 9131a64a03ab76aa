use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use pounce_core::PlayerInput;
use pounce_physics::World;
use pounce_physics::config::SimConfig;
use pounce_physics::level::Level;

/// Fixed clock step, roughly 60 ticks per second.
const TICK_MS: f32 = 1000.0 / 60.0;

struct Args {
    level: String,
    ticks: u64,
    hold_right: bool,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let value = |prefix: &str| {
            args.iter()
                .find_map(|a| a.strip_prefix(prefix).map(String::from))
        };

        Self {
            level: value("--level=").unwrap_or_else(|| "levels/demo.lvl".to_string()),
            ticks: value("--ticks=")
                .and_then(|t| t.parse::<u64>().ok())
                .unwrap_or(600),
            hold_right: args.iter().any(|a| a == "--hold-right"),
        }
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = SimConfig::load();

    let level = match Level::load(&args.level) {
        Ok(level) => level,
        Err(e) => {
            tracing::error!("Failed to load {}: {e}", args.level);
            return ExitCode::FAILURE;
        },
    };
    let mut world = match World::from_level(&level, config) {
        Ok(world) => world,
        Err(e) => {
            tracing::error!("Failed to build {}: {e}", args.level);
            return ExitCode::FAILURE;
        },
    };

    let input = PlayerInput {
        right: args.hold_right,
        ..Default::default()
    };
    tracing::info!(ticks = args.ticks, hold_right = args.hold_right, "simulation starting");

    for _ in 0..args.ticks {
        for event in world.tick(&input, TICK_MS) {
            tracing::info!(tick = world.tick_count(), ?event, "event");
        }
        if world.is_over() {
            break;
        }
    }

    match serde_json::to_string_pretty(&world.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("Failed to encode snapshot: {e}");
            return ExitCode::FAILURE;
        },
    }
    ExitCode::SUCCESS
}

mod config;
mod error;
mod scenario;

use config::SimConfig;
use error::SimError;
use tracing::{info, warn};

fn print_summary(reports: &[scenario::ScenarioReport]) -> Result<(), SimError> {
    let json = serde_json::to_string_pretty(reports)?;
    println!("{json}");
    Ok(())
}

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "sim.toml".to_string());
    let config = match SimConfig::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("mc-blocks-sim v{} (seed: {})", env!("CARGO_PKG_VERSION"), config.world.seed);
    info!(
        "Difficulty: {:?}, ticks per scenario: {}, random ticks: {}",
        config.world.difficulty, config.world.ticks, config.world.random_tick_speed
    );

    let reports = scenario::run_all(&config);
    for report in &reports {
        info!(
            "{}: {} blocks, {} events, {} drops after {} ticks",
            report.name,
            report.blocks.values().sum::<usize>(),
            report.events.values().sum::<usize>(),
            report.drops,
            report.ticks
        );
    }

    if let Err(e) = print_summary(&reports) {
        warn!("{e}");
        std::process::exit(1);
    }
}

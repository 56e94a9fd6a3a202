use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use log::info;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a small wrap-around grid")]
struct Cli {
    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Width and height of the grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Don't ring the bell when food is eaten
    #[arg(long)]
    mute: bool,

    /// Go straight to the game
    #[arg(long)]
    skip_landing: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Settings from the config file (or defaults) with flags applied on top
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.mute {
            config.sound = false;
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        // stderr is the drawing surface, so stay quiet unless asked
        None => env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = cli.game_config()?;
    info!(
        "Starting {}x{} game, tick every {} ms",
        config.grid_size, config.grid_size, config.tick_interval_ms
    );

    let mut human_mode = HumanMode::new(config, cli.seed, cli.skip_landing)?;
    human_mode.run().await?;

    Ok(())
}

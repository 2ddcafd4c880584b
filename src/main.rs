use anyhow::Result;
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::logging::{self, LogLevel};
use grid_snake::modes::PlayMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid-based snake game for the terminal")]
struct Cli {
    /// Width and height of the board, in cells
    #[arg(long, default_value = "20")]
    board_size: usize,

    /// Milliseconds between simulation ticks
    #[arg(long, default_value = "120")]
    tick_ms: u64,

    /// Write a log to this file (logging is off otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        logging::init(path, cli.log_level)?;
    }

    let config = GameConfig::new(cli.board_size).with_tick_ms(cli.tick_ms);
    config.validate()?;

    let mut play_mode = PlayMode::new(config);
    play_mode.run().await?;

    Ok(())
}

mod game;
mod term;

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use snake_board::{GameConfig, Leaderboard, Result};

/// Snake on a fixed grid, with the five best scores kept between runs.
#[derive(Parser)]
#[command(name = "snake-board", version)]
struct Cli {
    /// JSON game config; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Leaderboard file, overrides the one in the config
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Player name to pre-fill on the home screen
    #[arg(long)]
    name: Option<String>,

    /// Where to write the log; the terminal is busy with the game
    #[arg(long, default_value = "snake-board.log")]
    log_file: PathBuf,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_file, cli.log_level);

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(scores) = cli.scores {
        config.leaderboard_path = scores;
    }
    info!("starting with leaderboard {:?}", config.leaderboard_path);

    let leaderboard = Leaderboard::load(
        Box::new(snake_board::JsonFileStore::new(config.leaderboard_path.clone())),
        config.leaderboard_capacity,
    );

    let mut game = game::SnakeGame::new(config, leaderboard, cli.name)?;

    let result = with_teardown(
        &mut game,
        |game| game.initialize(),
        |game| game.run(),
        |game| game.restore(),
    );

    if let Err(e) = &result {
        error!("{}", e);
    }
    info!("bye");
    result
}

/// Logs to `path`. The game still runs without a log when the file or the
/// logger cannot be set up.
fn init_logging(path: &Path, level: LevelFilter) -> bool {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("logging disabled, cannot create {:?}: {}", path, e);
            return false;
        }
    };

    match WriteLogger::init(level, Config::default(), file) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("logging disabled: {}", e);
            false
        }
    }
}

/// Runs `setup` then `body`, and `teardown` whatever happened, even when
/// `setup` stopped halfway. The first error wins.
fn with_teardown<T>(
    target: &mut T,
    setup: impl FnOnce(&mut T) -> Result<()>,
    body: impl FnOnce(&mut T) -> Result<()>,
    teardown: impl FnOnce(&mut T) -> Result<()>,
) -> Result<()> {
    let result = setup(target).and_then(|()| body(target));
    let restored = teardown(target);
    result.and(restored)
}

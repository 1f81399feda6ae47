mod board;
mod config;
mod error;
mod food;
mod game;
mod input;
mod logger;
mod snake;
mod state;
mod term;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc;

use board::Board;
use config::{GameConfig, Validate};
use error::{SnakeError, SnakeResult};
use food::FoodRng;
use game::SnakeGame;
use state::GameState;
use term::Renderer;

pub type TermInt = u16;
/// `(row, column)`, one-based like the terminal's own addressing.
pub type Coords = (i32, i32);

#[derive(Parser)]
#[command(name = "tsnake", about = "Snake for the terminal")]
struct Args {
    /// YAML file with tick interval, glyphs and seed
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    tick_interval_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Append debug lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,
}

fn load_config(args: &Args) -> SnakeResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(ms) = args.tick_interval_ms {
        config.tick_interval_ms = ms;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.validate().map_err(SnakeError::Config)?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logger::init_logger(args.log_file.as_deref())?;

    let config = load_config(&args)?;
    if args.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let (rows, columns) = term::terminal_size()?;
    let board = Board::new(rows, columns)?;
    let rng = match config.seed {
        Some(seed) => FoodRng::new(seed),
        None => FoodRng::from_random(),
    };
    log!(
        "Starting on {}x{} board, tick {}ms, food seed {}",
        columns,
        rows,
        config.tick_interval_ms,
        rng.seed()
    );

    let state = GameState::new(board, rng);
    let renderer = Renderer::new(io::stdout(), board, config.glyphs.clone());
    let mut game = SnakeGame::new(state, renderer, config.tick_interval());

    let (tx, rx) = mpsc::unbounded_channel();
    term::enter_raw_mode()?;
    let _reader = input::spawn_key_reader(tx);

    let result = match game.setup() {
        Ok(()) => game.run(rx).await,
        Err(err) => Err(err),
    };

    let raw_mode = term::leave_raw_mode();
    game.finish(result, raw_mode).map_err(SnakeError::from)?;
    Ok(())
}

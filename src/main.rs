use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use life_engine::Game;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "life", version, about = "Conway's Game of Life in the terminal")]
struct Cli {
    /// Load the initial state from an .rle file (mutually exclusive with
    /// width and height).
    #[arg(long, conflicts_with_all = ["width", "height"])]
    file: Option<PathBuf>,

    /// Seed for the random initial state. Defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,

    /// Amount of generations to run.
    #[arg(long, default_value_t = 100)]
    ticks: u64,

    /// Don't wrap the board toroidally.
    #[arg(long)]
    nowrap: bool,

    /// Width of the random initial board.
    width: Option<usize>,

    /// Height of the random initial board.
    height: Option<usize>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let wrap = !cli.nowrap;

    let mut game = match &cli.file {
        Some(path) => Game::load(path, wrap)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => {
            let (width, height) = match (cli.width, cli.height) {
                (Some(width), Some(height)) => (width, height),
                _ => bail!("either --file or both width and height are required"),
            };
            if width == 0 || height == 0 {
                bail!("width and height must be nonzero");
            }
            let seed = cli.seed.unwrap_or_else(time_seed);
            info!(seed, "randomizing initial state");
            let mut rng = StdRng::seed_from_u64(seed);
            Game::random(width, height, wrap, &mut rng)
        }
    };

    if !game.comment().is_empty() {
        info!(comment = game.comment(), "loaded pattern");
    }

    let mut stdout = io::stdout();
    for _ in 0..cli.ticks {
        game.tick();
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        write!(stdout, "{game}")?;
        stdout.flush()?;
        thread::sleep(Duration::from_secs(1) / 30);
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_micros() as u64)
        .unwrap_or_default()
}

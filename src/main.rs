use anyhow::{Context, Result};
use bicycle_road::{apply_input, CellGrid, CliRenderer, Game, GameConfig, Renderer};
use clap::Parser;
use crossterm::terminal;
use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

// One simulation step per ~60 Hz frame, like the browser's animation loop
const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Click the targets before they reach the road.
#[derive(Parser, Debug)]
#[command(name = "bicycle-road-cli", version, about)]
struct Args {
    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of targets on the board
    #[arg(long, default_value_t = 10)]
    max_targets: usize,

    /// Lives at the start of each game
    #[arg(long, default_value_t = 10)]
    lives: u32,

    /// Milliseconds between spawns
    #[arg(long, default_value_t = 1000)]
    spawn_interval_ms: u64,

    /// Write logs to this file (stderr is drawn over by the board)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, requires = "log_file")]
    verbose: bool,
}

impl Args {
    fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }

    fn config(&self) -> GameConfig {
        GameConfig {
            max_targets: self.max_targets,
            max_lives: self.lives,
            spawn_interval: Duration::from_millis(self.spawn_interval_ms),
            ..GameConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Without a log file nothing is installed and log calls are no-ops
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        env_logger::Builder::from_default_env()
            .filter_level(args.log_level())
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }

    let config = args.config();

    let (term_width, term_height) = terminal::size().context("failed to read terminal size")?;
    let grid = CellGrid::fit_terminal(term_width, term_height, config.width, config.height);

    let spawn_interval = config.spawn_interval;
    let mut game = match args.seed {
        Some(seed) => Game::with_seed(config, seed),
        None => Game::new(config),
    }
    .context("invalid game configuration")?;
    let mut renderer = CliRenderer::new(grid);

    renderer.init().context("failed to set up the terminal")?;
    log::info!("starting on a {}x{} terminal", term_width, term_height);

    let mut last_tick = Instant::now();
    let mut last_spawn = Instant::now();

    loop {
        if let Some(input) = renderer.poll_input()? {
            if !apply_input(&mut game, input) {
                break;
            }
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            game.tick();
            last_tick = Instant::now();
        }

        if last_spawn.elapsed() >= spawn_interval {
            game.spawn();
            last_spawn = Instant::now();
        }

        // Renderer limits its own frame rate
        renderer.render(&game)?;
    }

    renderer.cleanup()?;
    log::info!("final score {}", game.state.score);
    Ok(())
}

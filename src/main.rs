//! Twisty Cube
//!
//! Simulates a 3x3x3 twisty cube. Face turns are queued and animated one at a
//! time, either in an interactive 3D viewer or headless from the command line.

mod visualization;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cube::moves::parse_sequence;
use cube::registry::format_lattice;
use cube::{Engine, EngineConfig, HeadlessSink, QueueOrder};

/// Upper bound on ticks for a headless run, per queued move.
const TICKS_PER_MOVE_BUDGET: usize = 1_000;

/// Largest accepted `--shuffle` count.
const MAX_SHUFFLE: u64 = 100_000;

/// Simulates a 3x3x3 twisty cube with animated face turns.
#[derive(Parser)]
#[command(name = "cube")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    engine: EngineArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args)]
struct EngineArgs {
    /// Edge length of one cubie.
    #[arg(long, global = true, default_value_t = 3.0)]
    cube_size: f32,
    /// Gap between neighbouring cubies.
    #[arg(long, global = true, default_value_t = 0.5)]
    spacing: f32,
    /// Rotation per frame, in radians.
    #[arg(long, global = true, default_value_t = 0.1)]
    speed: f32,
    /// Order in which queued moves are played.
    #[arg(long, global = true, value_enum, default_value_t = Order::Fifo)]
    order: Order,
}

#[derive(Clone, Copy, ValueEnum)]
enum Order {
    Fifo,
    Lifo,
}

impl From<&EngineArgs> for EngineConfig {
    fn from(args: &EngineArgs) -> Self {
        EngineConfig {
            cube_size: args.cube_size,
            cube_spacing: args.spacing,
            rotation_speed: args.speed,
            queue_order: match args.order {
                Order::Fifo => QueueOrder::Fifo,
                Order::Lifo => QueueOrder::Lifo,
            },
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive 3D viewer.
    Play,
    /// Apply moves without a window and print the resulting lattice.
    Run {
        /// Move tokens, e.g. F U' R.
        moves: Vec<String>,
        /// Submit this many random moves after the given ones.
        #[arg(long, value_parser = clap::value_parser!(u64).range(..=MAX_SHUFFLE))]
        shuffle: Option<u64>,
        /// Seed for --shuffle.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::from(&cli.engine);

    let result = match cli.command {
        Some(Command::Run {
            moves,
            shuffle,
            seed,
        }) => run_headless(config, &moves, shuffle, seed),
        Some(Command::Play) | None => run_viewer(config),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Opens the viewer.
fn run_viewer(config: EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    println!("Controls: F/B/L/R/U/D turn, hold Shift for prime, S shuffle");
    visualization::display(config)?;
    Ok(())
}

/// Plays the moves to completion and prints history and lattice.
fn run_headless(
    config: EngineConfig,
    tokens: &[String],
    shuffle: Option<u64>,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let moves = parse_sequence(&tokens.join(" "))?;
    let mut engine = Engine::new(config, HeadlessSink::default())?;

    for &mv in &moves {
        engine.submit(mv);
    }
    let shuffle = shuffle.map(usize::try_from).transpose()?;
    if let Some(count) = shuffle {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        engine.shuffle(&mut rng, count);
    }

    let queued = moves.len().saturating_add(shuffle.unwrap_or(0));
    let ticks = engine
        .run_until_idle(queued.max(1).saturating_mul(TICKS_PER_MOVE_BUDGET))
        .ok_or("moves did not settle within the tick budget")?;
    info!(ticks, frames = engine.sink().frames, "run complete");

    let history: Vec<String> = engine.history().iter().map(ToString::to_string).collect();
    println!("Moves: {}", history.join(" "));
    print!("{}", format_lattice(engine.registry()));
    println!(
        "{}",
        if engine.registry().is_solved() {
            "solved"
        } else {
            "scrambled"
        }
    );

    Ok(())
}

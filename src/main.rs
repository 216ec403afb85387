//! # Delve Main Entry Point
//!
//! Prompts for maze dimensions, prints the carved maze and optionally runs a
//! short agent simulation on it.

use clap::Parser;
use delve::{
    add_grass_features, check_dimension, factories, read_dimensions, AgentConfig, DelveError,
    DelveResult, DungeonMap, GenerationConfig, Generator, Maze, MazeGenerator, Position, World,
};
use log::{error, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::io::{self, Write};
use std::path::PathBuf;

/// Command line arguments for the maze tool.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "Carves random mazes and lets agents loose in them")]
#[command(version)]
struct Args {
    /// Random seed for maze generation and agent decisions
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of rows; prompts when omitted
    #[arg(long)]
    rows: Option<u32>,

    /// Number of columns; prompts when omitted
    #[arg(long)]
    cols: Option<u32>,

    /// Run an agent simulation for this many ticks after printing the maze
    #[arg(long, value_name = "TICKS")]
    simulate: Option<u32>,

    /// JSON file with agent tuning
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> DelveResult<()> {
    info!("Starting Delve v{}", delve::VERSION);

    let (rows, cols) = dimensions(args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Generating {}x{} maze with seed {}", rows, cols, seed);

    let mut generation = GenerationConfig::new(seed);
    generation.width = cols;
    generation.height = rows;

    let mut rng = StdRng::seed_from_u64(seed);
    let maze = MazeGenerator::new().generate(&generation, &mut rng)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", maze.render())?;

    if let Some(ticks) = args.simulate {
        let agent_config = match &args.config {
            Some(path) => AgentConfig::from_json_file(path)?,
            None => AgentConfig::default(),
        };
        simulate(&maze, agent_config, ticks, &mut rng, &mut out)?;
    }

    Ok(())
}

/// Dimensions from the flags, or from stdin when a flag is missing.
fn dimensions(args: &Args) -> DelveResult<(u32, u32)> {
    match (args.rows, args.cols) {
        (Some(rows), Some(cols)) => Ok((validated(rows)?, validated(cols)?)),
        _ => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            read_dimensions(&mut input, &mut output)
        }
    }
}

fn validated(value: u32) -> DelveResult<u32> {
    check_dimension(value as i64).map_err(|e| DelveError::InvalidGeometry(e.message().to_string()))
}

/// Spawns the stock cast of agents on the maze and runs `ticks` turns.
fn simulate<W: Write>(
    maze: &Maze,
    config: AgentConfig,
    ticks: u32,
    rng: &mut StdRng,
    out: &mut W,
) -> DelveResult<()> {
    let mut map = DungeonMap::from_maze(maze);
    add_grass_features(&mut map, rng);

    let exit = maze.exit();
    let mut open: Vec<Position> = map
        .walkable_positions()
        .into_iter()
        .filter(|&pos| pos != exit && Some(pos) != maze.door())
        .collect();
    open.shuffle(rng);

    let mut world = World::new(map, config, rng.gen());
    world.spawn(factories::player().at(exit))?;

    let cast = [
        factories::orc(),
        factories::troll(),
        factories::caster(),
        factories::goblin(),
        factories::table(),
    ];
    for agent in cast {
        let Some(pos) = open.pop() else { break };
        world.spawn(agent.at(pos))?;
    }
    for _ in 0..2 {
        let Some(pos) = open.pop() else { break };
        world.drop_item(factories::health_potion(pos))?;
    }

    for _ in 0..ticks {
        world.tick()?;
        if !world.target().map_or(false, |player| player.is_alive()) {
            break;
        }
    }

    writeln!(out)?;
    writeln!(out, "After {} turns:", world.turn_number)?;
    for message in world.messages.iter() {
        writeln!(out, "{}", message)?;
    }
    Ok(())
}

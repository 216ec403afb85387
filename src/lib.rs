//! # Delve
//!
//! Procedurally generated mazes and dungeon maps, populated by agents that path
//! and fight their way around them.
//!
//! ## Architecture Overview
//!
//! - **Grid**: bounded 2-D grids, positions, tiles and dungeon maps
//! - **Generation**: recursive-backtracker maze carving and terrain decoration
//! - **AI**: cost fields, behavior state machines and the actions they emit
//! - **Utils**: weighted 8-directional pathfinding and line-of-sight helpers
//! - **Game**: the turn-based world that applies actions and runs ticks
//! - **Input**: the maze tool's dimension prompt
//!
//! Every random choice flows through a single seeded [`rand::rngs::StdRng`] so
//! generation and agent behavior can be replayed exactly.

pub mod ai;
pub mod game;
pub mod generation;
pub mod grid;
pub mod input;
pub mod utils;

pub use ai::*;
pub use game::*;
pub use generation::*;
pub use grid::*;
pub use input::*;
pub use utils::*;

/// Core error type for the Delve engine.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Grid dimensions or coordinates that cannot be generated
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// World state is invalid
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration constants.
pub mod config {
    /// Smallest maze side (after odd normalization) that still has a carvable cell
    pub const MIN_MAZE_SIDE: u32 = 5;

    /// Smallest dimension accepted by the interactive prompt is one above this
    pub const PROMPT_DIMENSION_FLOOR: u32 = 5;

    /// Extra cost for a cell occupied by a movement-blocking agent
    pub const DEFAULT_CROWDING_PENALTY: u32 = 10;

    /// Multiplier for north/south/east/west steps
    pub const DEFAULT_CARDINAL_COST: u32 = 2;

    /// Multiplier for diagonal steps
    pub const DEFAULT_DIAGONAL_COST: u32 = 3;

    /// Casters only cast when strictly closer than this
    pub const DEFAULT_RANGED_LIMIT: u32 = 4;

    /// Damage dealt by a single cast
    pub const DEFAULT_SPELL_DAMAGE: u32 = 1;

    /// Charges a caster spawns with
    pub const DEFAULT_SPELL_USES: u32 = 3;

    /// Loot seekers only path to items strictly closer than this
    pub const DEFAULT_LOOT_REACH: u32 = 10;

    /// Target field of view radius in tiles
    pub const DEFAULT_SIGHT_RADIUS: u32 = 8;

    /// Maximum number of messages kept in the message log
    pub const MAX_LOG_MESSAGES: usize = 100;
}

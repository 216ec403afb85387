//! # Generation Module
//!
//! Procedural generation of mazes and decorated dungeon maps.
//!
//! Every generator draws from the [`StdRng`] it is handed, so a configuration
//! seed fully determines the output.

pub mod decorators;
pub mod maze;

pub use decorators::*;
pub use maze::*;

use crate::{DelveError, DelveResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for procedural generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Requested maze width; even values are bumped to odd
    pub width: u32,
    /// Requested maze height; even values are bumped to odd
    pub height: u32,
    /// Whether to scatter terrain features over the carved floor
    pub decorate: bool,
}

impl GenerationConfig {
    /// Creates a default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.seed, 12345);
    /// assert!(config.width >= 5 && config.height >= 5);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: 41,
            height: 21,
            decorate: true,
        }
    }

    /// Creates a configuration for testing with small, undecorated levels.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 11,
            height: 11,
            decorate: false,
        }
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> DelveResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::{DungeonMap, Maze, MazeCell};

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Checks that a finished maze has floor and exactly one door.
    pub fn validate_maze(maze: &Maze) -> DelveResult<()> {
        if maze.floor_positions().is_empty() {
            return Err(DelveError::GenerationFailed(
                "Maze has no floor cells".to_string(),
            ));
        }

        let doors = maze
            .cells()
            .positions_where(|&cell| cell == MazeCell::Door)
            .len();
        if doors != 1 {
            return Err(DelveError::GenerationFailed(format!(
                "Maze has {} doors, expected exactly one",
                doors
            )));
        }

        Ok(())
    }

    /// Checks that a map has somewhere to stand.
    pub fn validate_map(map: &DungeonMap) -> DelveResult<()> {
        if map.walkable_positions().is_empty() {
            return Err(DelveError::GenerationFailed(
                "Map has no walkable tiles".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DungeonMap, Maze, Position, Tile};
    use rand::Rng;
    use std::io::Write;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert!(config.decorate);

        let testing = GenerationConfig::for_testing(1);
        assert!(!testing.decorate);
        assert_eq!(GenerationConfig::default().seed, 42);
    }

    #[test]
    fn test_config_from_json_file() {
        let config = GenerationConfig {
            seed: 9,
            width: 15,
            height: 9,
            decorate: false,
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&config).unwrap()).unwrap();

        let loaded = GenerationConfig::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_from_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            GenerationConfig::from_json_file(file.path()),
            Err(DelveError::Serde(_))
        ));
        assert!(matches!(
            GenerationConfig::from_json_file("/definitely/not/here.json"),
            Err(DelveError::Io(_))
        ));
    }

    #[test]
    fn test_utils_rng_is_reproducible() {
        let config = GenerationConfig::new(12345);
        let a: u64 = utils::create_rng(&config).gen();
        let b: u64 = utils::create_rng(&config).gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_validation() {
        let uncarved = Maze::new(7, 7).unwrap();
        assert!(utils::validate_maze(&uncarved).is_err());

        let mut map = DungeonMap::new(5, 5);
        assert!(utils::validate_map(&map).is_err());
        map.set_tile(Position::new(2, 2), Tile::floor());
        assert!(utils::validate_map(&map).is_ok());
    }
}

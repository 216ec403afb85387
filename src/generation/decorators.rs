//! # Terrain Decoration
//!
//! Scatters weighted terrain over the walkable tiles of a map. Grass and
//! rubble only change traversal weights; rock formations block movement and
//! sight, so they are kept out of the default cave pipeline.

use crate::generation::{utils, GenerationConfig, Generator, MazeGenerator};
use crate::{DelveResult, DungeonMap, Position, Tile};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Picks one random walkable tile per walkable tile on the map and lets
/// `choose` decide what (if anything) replaces it.
///
/// Candidates are fixed before the first replacement, so a tile turned solid
/// can still be picked again later.
fn scatter<F>(map: &mut DungeonMap, rng: &mut StdRng, mut choose: F) -> usize
where
    F: FnMut(&mut StdRng) -> Option<Tile>,
{
    let candidates: Vec<Position> = map.walkable_positions();
    if candidates.is_empty() {
        return 0;
    }

    let mut placed = 0;
    for _ in 0..candidates.len() {
        let pos = candidates[rng.gen_range(0..candidates.len())];
        if let Some(tile) = choose(rng) {
            map.set_tile(pos, tile);
            placed += 1;
        }
    }
    placed
}

/// Mixed decoration: grass, rubble and rock formations.
pub fn add_features(map: &mut DungeonMap, rng: &mut StdRng) -> usize {
    let placed = scatter(map, rng, |rng| {
        let feature = rng.gen_range(0..4);
        let chance: f64 = rng.gen();
        match feature {
            0 if chance < 0.10 => Some(Tile::loose_grass()),
            0 if chance < 0.20 => Some(Tile::dense_grass()),
            0 if chance < 0.50 => Some(Tile::grass()),
            1 if chance < 0.10 => Some(Tile::loose_rubble()),
            1 if chance < 0.50 => Some(Tile::rubble()),
            2 if chance < 0.50 => Some(Tile::stalactite()),
            2 => Some(Tile::stalagmite()),
            _ => None,
        }
    });
    debug!("Placed {} mixed features", placed);
    placed
}

pub fn add_grass_features(map: &mut DungeonMap, rng: &mut StdRng) -> usize {
    scatter(map, rng, |rng| match rng.gen_range(0..100) {
        0..=10 => Some(Tile::loose_grass()),
        11..=15 => Some(Tile::grass()),
        16..=17 => Some(Tile::dense_grass()),
        _ => None,
    })
}

pub fn add_rubble_features(map: &mut DungeonMap, rng: &mut StdRng) -> usize {
    scatter(map, rng, |rng| match rng.gen_range(0..100) {
        0..=10 => Some(Tile::rubble()),
        11..=15 => Some(Tile::loose_rubble()),
        _ => None,
    })
}

pub fn add_rock_features(map: &mut DungeonMap, rng: &mut StdRng) -> usize {
    scatter(map, rng, |rng| match rng.gen_range(0..100) {
        0..=1 => Some(Tile::stalactite()),
        2..=5 => Some(Tile::stalagmite()),
        _ => None,
    })
}

/// Generator producing a maze-shaped dungeon map, optionally overgrown with
/// grass and rubble.
#[derive(Debug, Clone, Default)]
pub struct CaveGenerator {
    maze: MazeGenerator,
}

impl CaveGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Generator<DungeonMap> for CaveGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<DungeonMap> {
        let maze = self.maze.generate(config, rng)?;
        let mut map = DungeonMap::from_maze(&maze);

        if config.decorate {
            let grass = add_grass_features(&mut map, rng);
            let rubble = add_rubble_features(&mut map, rng);
            debug!("Decorated cave with {} grass and {} rubble", grass, rubble);
        }

        self.validate(&map, config)?;
        Ok(map)
    }

    fn validate(&self, map: &DungeonMap, _config: &GenerationConfig) -> DelveResult<()> {
        utils::validate_map(map)
    }

    fn generator_type(&self) -> &'static str {
        "CaveGenerator"
    }
}

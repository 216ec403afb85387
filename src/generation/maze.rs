//! # Maze Generation
//!
//! Perfect mazes carved with a randomized depth-first backtracker.
//!
//! Carvable cells sit on even coordinates; the odd coordinates between them
//! are walls that get knocked out as the carver moves from one cell to the
//! next. Dimensions are forced odd so the outermost ring is always a border.
//! The carver keeps its own frame stack, so the grid size is not limited by
//! the call stack.

use crate::generation::{utils, GenerationConfig, Generator};
use crate::{config, DelveError, DelveResult, Direction, DungeonMap, Grid, Position, Tile};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// State of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MazeCell {
    /// Boundary sentinel applied to the border after carving
    Empty,
    /// Uncarved cell
    Wall,
    /// Reached by the carver, not yet finalized
    Visited,
    /// Carved passage
    Floor,
    /// Entry on the border
    Door,
}

impl MazeCell {
    /// Character used when printing the maze.
    pub fn glyph(self) -> char {
        match self {
            MazeCell::Empty => ' ',
            MazeCell::Wall => '#',
            MazeCell::Visited => '+',
            MazeCell::Floor => '.',
            MazeCell::Door => '@',
        }
    }
}

/// One pending cell of the backtracker with the directions it has not tried.
#[derive(Debug, Clone)]
struct Frame {
    cell: Position,
    remaining: Vec<Direction>,
}

impl Frame {
    fn new(cell: Position) -> Self {
        Self {
            cell,
            remaining: Direction::cardinal().to_vec(),
        }
    }
}

/// A maze on an odd-sized grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    cells: Grid<MazeCell>,
    door: Option<Position>,
}

impl Maze {
    /// Allocates an uncarved maze.
    ///
    /// Even dimensions are bumped to the next odd number. Anything smaller than
    /// [`config::MIN_MAZE_SIDE`] after that has no carvable interior and is
    /// rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Maze;
    ///
    /// let maze = Maze::new(10, 7).unwrap();
    /// assert_eq!(maze.width(), 11);
    /// assert_eq!(maze.height(), 7);
    /// assert!(Maze::new(3, 9).is_err());
    /// ```
    pub fn new(width: u32, height: u32) -> DelveResult<Self> {
        let width = if width % 2 == 0 { width + 1 } else { width };
        let height = if height % 2 == 0 { height + 1 } else { height };

        if width < config::MIN_MAZE_SIDE || height < config::MIN_MAZE_SIDE {
            return Err(DelveError::InvalidGeometry(format!(
                "maze must be at least {0}x{0}, got {1}x{2}",
                config::MIN_MAZE_SIDE,
                width,
                height
            )));
        }

        Ok(Self {
            cells: Grid::new(width, height, MazeCell::Wall),
            door: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.cells.width()
    }

    pub fn height(&self) -> u32 {
        self.cells.height()
    }

    pub fn cells(&self) -> &Grid<MazeCell> {
        &self.cells
    }

    pub fn cell(&self, pos: Position) -> Option<MazeCell> {
        self.cells.get(pos).copied()
    }

    /// The door placed by [`Maze::place_endpoint`], if any.
    pub fn door(&self) -> Option<Position> {
        self.door
    }

    /// The interior cell next to the bottom border that is always opened.
    pub fn exit(&self) -> Position {
        Position::new(self.width() as i32 - 3, self.height() as i32 - 2)
    }

    pub fn floor_positions(&self) -> Vec<Position> {
        self.cells.positions_where(|&cell| cell == MazeCell::Floor)
    }

    /// Whether `pos` is an even, strictly interior coordinate.
    pub fn is_carvable(&self, pos: Position) -> bool {
        pos.x % 2 == 0
            && pos.y % 2 == 0
            && self.cells.in_bounds(pos)
            && !self.cells.is_border(pos)
    }

    /// Anything outside the carvable interior counts as already visited.
    fn is_visited(&self, pos: Position) -> bool {
        !self.is_carvable(pos) || self.cell(pos) == Some(MazeCell::Visited)
    }

    fn is_dead_end(&self, pos: Position) -> bool {
        Direction::cardinal().iter().all(|direction| {
            let delta = direction.to_delta();
            self.is_visited(pos + delta + delta)
        })
    }

    /// Carves passages outward from `start` until every reachable carvable
    /// cell has been visited.
    ///
    /// Visited cells are left as [`MazeCell::Visited`]; [`Maze::generate`]
    /// turns them into floor.
    pub fn carve(&mut self, start: Position, rng: &mut StdRng) -> DelveResult<()> {
        if !self.is_carvable(start) {
            return Err(DelveError::InvalidGeometry(format!(
                "carve start {} must be an even interior coordinate",
                start
            )));
        }

        self.cells.set(start, MazeCell::Visited);
        let mut stack = Vec::new();
        if !self.is_dead_end(start) {
            stack.push(Frame::new(start));
        }

        while let Some(frame) = stack.last_mut() {
            if frame.remaining.is_empty() {
                stack.pop();
                continue;
            }

            let pick = rng.gen_range(0..frame.remaining.len());
            let delta = frame.remaining.swap_remove(pick).to_delta();
            let wall = frame.cell + delta;
            let next = wall + delta;

            if !self.is_visited(next) {
                self.cells.set(wall, MazeCell::Visited);
                self.cells.set(next, MazeCell::Visited);
                if !self.is_dead_end(next) {
                    stack.push(Frame::new(next));
                }
            }
        }

        Ok(())
    }

    /// Forces every border cell to the boundary sentinel.
    pub fn mark_boundary(&mut self) {
        let border: Vec<Position> = self
            .cells
            .iter()
            .filter(|(pos, _)| self.cells.is_border(*pos))
            .map(|(pos, _)| pos)
            .collect();

        for pos in border {
            self.cells.set(pos, MazeCell::Empty);
        }
        self.door = None;
    }

    /// Turns a random non-corner border cell into the door.
    ///
    /// The edge is chosen uniformly, then the coordinate along it. A previous
    /// door is reverted to the boundary sentinel so there is only ever one.
    pub fn place_endpoint(&mut self, rng: &mut StdRng) -> Position {
        let last_x = self.width() as i32 - 1;
        let last_y = self.height() as i32 - 1;

        let door = match rng.gen_range(0..4) {
            0 => Position::new(rng.gen_range(1..last_x), 0),
            1 => Position::new(rng.gen_range(1..last_x), last_y),
            2 => Position::new(0, rng.gen_range(1..last_y)),
            _ => Position::new(last_x, rng.gen_range(1..last_y)),
        };

        if let Some(old) = self.door.take() {
            self.cells.set(old, MazeCell::Empty);
        }
        self.cells.set(door, MazeCell::Door);
        self.door = Some(door);
        door
    }

    /// Runs the full pipeline: random start, carve, finalize floor, boundary,
    /// door and exit.
    pub fn generate(&mut self, rng: &mut StdRng) -> DelveResult<()> {
        self.cells.fill(MazeCell::Wall);
        self.door = None;

        let start = Position::new(
            rng.gen_range(1..=(self.width() as i32 - 3) / 2) * 2,
            rng.gen_range(1..=(self.height() as i32 - 3) / 2) * 2,
        );
        debug!(
            "Carving {}x{} maze from {}",
            self.width(),
            self.height(),
            start
        );
        self.carve(start, rng)?;

        let visited = self.cells.positions_where(|&cell| cell == MazeCell::Visited);
        for pos in visited {
            self.cells.set(pos, MazeCell::Floor);
        }

        self.mark_boundary();
        let door = self.place_endpoint(rng);
        self.cells.set(self.exit(), MazeCell::Floor);
        debug!("Maze door at {}, exit at {}", door, self.exit());

        Ok(())
    }

    /// One line per row, glyphs separated by single spaces.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Maze;
    ///
    /// let maze = Maze::new(5, 5).unwrap();
    /// assert_eq!(maze.render().lines().next(), Some("# # # # #"));
    /// ```
    pub fn render(&self) -> String {
        self.cells
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.glyph().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Converts the maze into a walkable dungeon map.
    ///
    /// Floor and visited cells become floor tiles, the door becomes a door
    /// tile and everything else is wall.
    pub fn to_dungeon_map(&self) -> DungeonMap {
        let mut tiles = Grid::new(self.width(), self.height(), Tile::wall());
        for (pos, cell) in self.cells.iter() {
            let tile = match cell {
                MazeCell::Floor | MazeCell::Visited => Tile::floor(),
                MazeCell::Door => Tile::door(),
                MazeCell::Wall | MazeCell::Empty => continue,
            };
            tiles.set(pos, tile);
        }
        DungeonMap::from_tiles(tiles)
    }
}

impl std::fmt::Display for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Generator producing finished mazes from a [`GenerationConfig`].
#[derive(Debug, Clone, Default)]
pub struct MazeGenerator;

impl MazeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator<Maze> for MazeGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<Maze> {
        let mut maze = Maze::new(config.width, config.height)?;
        maze.generate(rng)?;
        self.validate(&maze, config)?;
        Ok(maze)
    }

    fn validate(&self, maze: &Maze, _config: &GenerationConfig) -> DelveResult<()> {
        utils::validate_maze(maze)
    }

    fn generator_type(&self) -> &'static str {
        "MazeGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::{HashSet, VecDeque};

    fn generated(width: u32, height: u32, seed: u64) -> Maze {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut maze = Maze::new(width, height).unwrap();
        maze.generate(&mut rng).unwrap();
        maze
    }

    #[test]
    fn test_dimensions_are_forced_odd() {
        let maze = Maze::new(8, 12).unwrap();
        assert_eq!(maze.width(), 9);
        assert_eq!(maze.height(), 13);

        let maze = Maze::new(7, 7).unwrap();
        assert_eq!(maze.width(), 7);
        assert_eq!(maze.height(), 7);
    }

    #[test]
    fn test_too_small_is_rejected() {
        assert!(matches!(Maze::new(3, 3), Err(DelveError::InvalidGeometry(_))));
        assert!(Maze::new(4, 10).is_ok()); // 4 becomes 5
    }

    #[test]
    fn test_new_maze_is_all_wall() {
        let maze = Maze::new(7, 9).unwrap();
        assert!(maze.cells().iter().all(|(_, &cell)| cell == MazeCell::Wall));
        assert!(maze.door().is_none());
    }

    #[test]
    fn test_carve_rejects_bad_start() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut maze = Maze::new(9, 9).unwrap();
        assert!(maze.carve(Position::new(3, 2), &mut rng).is_err());
        assert!(maze.carve(Position::new(0, 2), &mut rng).is_err());
        assert!(maze.carve(Position::new(8, 4), &mut rng).is_err());
        assert!(maze.carve(Position::new(2, 2), &mut rng).is_ok());
    }

    #[test]
    fn test_carve_visits_every_carvable_cell() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut maze = Maze::new(15, 11).unwrap();
        maze.carve(Position::new(4, 6), &mut rng).unwrap();

        for (pos, &cell) in maze.cells().iter() {
            if maze.is_carvable(pos) {
                assert_eq!(cell, MazeCell::Visited, "cell {} never carved", pos);
            }
            if pos.x % 2 == 1 && pos.y % 2 == 1 {
                assert_eq!(cell, MazeCell::Wall, "pillar {} was carved", pos);
            }
        }
    }

    #[test]
    fn test_generate_places_single_non_corner_door() {
        for seed in 0..50 {
            let maze = generated(9, 13, seed);
            let doors = maze.cells().positions_where(|&c| c == MazeCell::Door);
            assert_eq!(doors.len(), 1);
            let door = doors[0];
            assert_eq!(maze.door(), Some(door));
            assert!(maze.cells().is_border(door));

            let corner_x = door.x == 0 || door.x == maze.width() as i32 - 1;
            let corner_y = door.y == 0 || door.y == maze.height() as i32 - 1;
            assert!(!(corner_x && corner_y), "door {} is a corner", door);
        }
    }

    #[test]
    fn test_generate_border_and_exit() {
        let maze = generated(11, 9, 7);
        for (pos, &cell) in maze.cells().iter() {
            if maze.cells().is_border(pos) {
                assert!(matches!(cell, MazeCell::Empty | MazeCell::Door));
            } else {
                assert!(matches!(cell, MazeCell::Floor | MazeCell::Wall));
            }
        }
        assert_eq!(maze.exit(), Position::new(8, 7));
        assert_eq!(maze.cell(maze.exit()), Some(MazeCell::Floor));
    }

    #[test]
    fn test_place_endpoint_replaces_previous_door() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut maze = generated(9, 9, 3);
        let first = maze.door().unwrap();
        let second = maze.place_endpoint(&mut rng);
        let doors = maze.cells().positions_where(|&c| c == MazeCell::Door);
        assert_eq!(doors, vec![second]);
        if first != second {
            assert_eq!(maze.cell(first), Some(MazeCell::Empty));
        }
    }

    #[test]
    fn test_generated_maze_is_a_tree() {
        let maze = generated(21, 15, 2024);
        let floors: HashSet<Position> = maze.floor_positions().into_iter().collect();

        let edges: usize = floors
            .iter()
            .map(|pos| {
                [Position::new(pos.x + 1, pos.y), Position::new(pos.x, pos.y + 1)]
                    .iter()
                    .filter(|n| floors.contains(n))
                    .count()
            })
            .sum();
        assert_eq!(edges, floors.len() - 1);

        let start = *floors.iter().next().unwrap();
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            for next in pos.cardinal_adjacent_positions() {
                if floors.contains(&next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        assert_eq!(seen.len(), floors.len());
    }

    #[test]
    fn test_render_glyphs() {
        let maze = generated(7, 7, 11);
        let rendered = maze.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 7);
        for line in &lines {
            assert_eq!(line.chars().count(), 7 * 2 - 1);
        }
        assert!(rendered.chars().all(|c| " #.@\n".contains(c)));
        assert_eq!(rendered.matches('@').count(), 1);
        assert_eq!(rendered, maze.render());
        assert_eq!(rendered, maze.to_string());
    }

    #[test]
    fn test_large_maze_does_not_overflow() {
        let maze = generated(501, 401, 5);
        let carvable = (249 * 199) as usize;
        assert!(maze.floor_positions().len() >= carvable);
    }

    #[test]
    fn test_same_seed_same_maze() {
        assert_eq!(generated(25, 19, 77), generated(25, 19, 77));
        assert_ne!(generated(25, 19, 77).render(), generated(25, 19, 78).render());
    }

    #[test]
    fn test_to_dungeon_map() {
        let maze = generated(9, 9, 4);
        let map = maze.to_dungeon_map();
        for (pos, &cell) in maze.cells().iter() {
            let walkable = matches!(cell, MazeCell::Floor | MazeCell::Door);
            assert_eq!(map.is_walkable(pos), walkable);
        }
    }

    #[test]
    fn test_maze_generator() {
        let config = GenerationConfig::for_testing(8);
        let mut rng = utils::create_rng(&config);
        let generator = MazeGenerator::new();
        let maze = generator.generate(&config, &mut rng).unwrap();
        assert_eq!(generator.generator_type(), "MazeGenerator");
        assert!(generator.validate(&maze, &config).is_ok());
    }
}

//! Structural properties of generated mazes.

use delve::{Maze, MazeCell, Position};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashSet, VecDeque};

fn generated(width: u32, height: u32, seed: u64) -> Maze {
    let mut maze = Maze::new(width, height).unwrap();
    maze.generate(&mut StdRng::seed_from_u64(seed)).unwrap();
    maze
}

fn is_floor(maze: &Maze, pos: Position) -> bool {
    maze.cell(pos) == Some(MazeCell::Floor)
}

fn reachable_from(maze: &Maze, start: Position) -> HashSet<Position> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        for next in pos.cardinal_adjacent_positions() {
            if is_floor(maze, next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn floor_forms_a_spanning_tree(width in 7u32..45, height in 7u32..45, seed in any::<u64>()) {
        let maze = generated(width, height, seed);
        let floors = maze.floor_positions();
        prop_assert!(!floors.is_empty());

        let reachable = reachable_from(&maze, floors[0]);
        prop_assert_eq!(reachable.len(), floors.len());

        let edges = floors
            .iter()
            .flat_map(|&pos| [pos + Position::new(1, 0), pos + Position::new(0, 1)])
            .filter(|&next| is_floor(&maze, next))
            .count();
        prop_assert_eq!(edges, floors.len() - 1);
    }

    #[test]
    fn exactly_one_door_off_the_corners(width in 5u32..45, height in 5u32..45, seed in any::<u64>()) {
        let maze = generated(width, height, seed);
        let doors = maze.cells().positions_where(|&cell| cell == MazeCell::Door);
        prop_assert_eq!(doors.len(), 1);

        let door = doors[0];
        prop_assert_eq!(maze.door(), Some(door));
        prop_assert!(maze.cells().is_border(door));

        let (right, bottom) = (maze.width() as i32 - 1, maze.height() as i32 - 1);
        let corner = (door.x == 0 || door.x == right) && (door.y == 0 || door.y == bottom);
        prop_assert!(!corner);
    }

    #[test]
    fn border_is_sentinel_except_door(width in 5u32..30, height in 5u32..30, seed in any::<u64>()) {
        let maze = generated(width, height, seed);
        for (pos, cell) in maze.cells().iter() {
            if maze.cells().is_border(pos) && Some(pos) != maze.door() {
                prop_assert_eq!(*cell, MazeCell::Empty);
            }
        }
        prop_assert!(is_floor(&maze, maze.exit()));
    }

    #[test]
    fn rendering_is_pure(width in 5u32..30, height in 5u32..30, seed in any::<u64>()) {
        let maze = generated(width, height, seed);
        let before = maze.clone();
        let first = maze.render();
        prop_assert_eq!(&first, &maze.render());
        prop_assert_eq!(&before, &maze);
        prop_assert_eq!(first.lines().count(), maze.height() as usize);
    }
}

#[test]
fn render_uses_fixed_glyphs() {
    let maze = generated(9, 7, 3);
    let allowed: HashSet<char> = [' ', '#', '+', '.', '@'].into_iter().collect();
    for line in maze.render().lines() {
        assert_eq!(line.chars().count(), maze.width() as usize * 2 - 1);
        for (i, c) in line.chars().enumerate() {
            if i % 2 == 1 {
                assert_eq!(c, ' ');
            } else {
                assert!(allowed.contains(&c));
            }
        }
    }
    assert!(maze.render().contains('@'));
}

#[test]
fn even_dimensions_round_up() {
    let maze = generated(10, 8, 99);
    assert_eq!((maze.width(), maze.height()), (11, 9));
}

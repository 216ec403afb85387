//! # Pathfinding
//!
//! Weighted shortest paths over a [`CostField`] with 8-directional movement.
//!
//! Entering a cell costs the step weight (cardinal or diagonal) times the
//! cell's cost. The search is A* with an octile heuristic scaled by the
//! cheapest cell in the field, which never overestimates, so results are
//! the same as a plain Dijkstra search.

use crate::{config, CostField, Direction, Position};
use log::trace;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// Multipliers for cardinal and diagonal steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepWeights {
    pub cardinal: u32,
    pub diagonal: u32,
}

impl StepWeights {
    pub fn new(cardinal: u32, diagonal: u32) -> Self {
        Self { cardinal, diagonal }
    }

    /// Weight for stepping in `direction`.
    pub fn for_direction(&self, direction: Direction) -> u32 {
        if direction.is_diagonal() {
            self.diagonal
        } else {
            self.cardinal
        }
    }

    /// Cheapest possible cost between two cells if every cell cost `unit`.
    fn lower_bound(&self, from: Position, to: Position, unit: u64) -> u64 {
        let dx = (from.x - to.x).unsigned_abs() as u64;
        let dy = (from.y - to.y).unsigned_abs() as u64;
        let (short, long) = (dx.min(dy), dx.max(dy));

        let straight = self.cardinal.min(self.diagonal) as u64;
        let slanted = (self.diagonal as u64).min(2 * self.cardinal as u64);
        unit * (slanted * short + straight * (long - short))
    }
}

impl Default for StepWeights {
    fn default() -> Self {
        Self::new(config::DEFAULT_CARDINAL_COST, config::DEFAULT_DIAGONAL_COST)
    }
}

/// Ordered steps from just after the origin to the destination.
///
/// An empty path means there is nowhere to go: either the destination is
/// unreachable or the caller is already standing on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    steps: VecDeque<Position>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Removes and returns the next step.
    pub fn next_step(&mut self) -> Option<Position> {
        self.steps.pop_front()
    }

    pub fn peek(&self) -> Option<Position> {
        self.steps.front().copied()
    }

    pub fn destination(&self) -> Option<Position> {
        self.steps.back().copied()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> + '_ {
        self.steps.iter()
    }

    /// Sum of step costs when walking the path from `origin`.
    ///
    /// Returns `None` if a step is not adjacent to the previous cell or
    /// enters a forbidden cell.
    pub fn total_cost(&self, field: &CostField, origin: Position, weights: StepWeights) -> Option<u64> {
        let mut previous = origin;
        let mut total = 0u64;
        for &step in &self.steps {
            let direction = Direction::from_delta(step - previous)?;
            let cell = field.cost(step)?;
            total += weights.for_direction(direction) as u64 * cell as u64;
            previous = step;
        }
        Some(total)
    }
}

impl FromIterator<Position> for Path {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// Open-set entry for the A* search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AStarNode {
    index: usize,
    g_score: u64,
    f_score: u64,
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior in BinaryHeap
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| self.g_score.cmp(&other.g_score))
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Finds the cheapest path from `origin` to `destination`.
///
/// The origin is not part of the result and its own cost is irrelevant; the
/// destination is the last step. Unreachable or forbidden destinations give
/// an empty path.
///
/// # Examples
///
/// ```
/// use delve::{find_path, CostField, Grid, Position, StepWeights};
///
/// let field = CostField::from_grid(Grid::new(4, 1, Some(1)));
/// let path = find_path(&field, Position::new(0, 0), Position::new(3, 0), StepWeights::default());
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.destination(), Some(Position::new(3, 0)));
/// ```
pub fn find_path(
    field: &CostField,
    origin: Position,
    destination: Position,
    weights: StepWeights,
) -> Path {
    let grid = field.grid();
    let (Some(start), Some(goal)) = (grid.index(origin), grid.index(destination)) else {
        return Path::new();
    };
    if start == goal || field.cost(destination).is_none() {
        return Path::new();
    }

    let unit = field.min_cost().unwrap_or(1) as u64;
    let mut g_score = vec![u64::MAX; grid.len()];
    let mut came_from: Vec<Option<usize>> = vec![None; grid.len()];
    let mut open_set = BinaryHeap::new();

    g_score[start] = 0;
    open_set.push(AStarNode {
        index: start,
        g_score: 0,
        f_score: weights.lower_bound(origin, destination, unit),
    });

    while let Some(node) = open_set.pop() {
        if node.index == goal {
            let mut steps = VecDeque::new();
            let mut current = goal;
            while current != start {
                steps.push_front(grid.position(current));
                match came_from[current] {
                    Some(previous) => current = previous,
                    None => break,
                }
            }
            return Path { steps };
        }

        // Stale entry superseded by a cheaper route
        if node.g_score > g_score[node.index] {
            continue;
        }

        let current = grid.position(node.index);
        for direction in Direction::all() {
            let neighbor = current + direction.to_delta();
            let Some(cell) = field.cost(neighbor) else {
                continue;
            };
            let Some(index) = grid.index(neighbor) else {
                continue;
            };

            let tentative = node.g_score + weights.for_direction(direction) as u64 * cell as u64;
            if tentative < g_score[index] {
                g_score[index] = tentative;
                came_from[index] = Some(node.index);
                open_set.push(AStarNode {
                    index,
                    g_score: tentative,
                    f_score: tentative + weights.lower_bound(neighbor, destination, unit),
                });
            }
        }
    }

    trace!("No path from {} to {}", origin, destination);
    Path::new()
}

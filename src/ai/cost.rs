//! # Cost Fields
//!
//! Per-query traversal costs combining terrain weight with crowding.
//!
//! A cost field is built fresh for every path query because occupancy
//! changes every tick. Blocking agents make their cell more expensive
//! without forbidding it: a low penalty makes agents queue up behind each
//! other, a high one sends them around to flank.

use crate::{DungeonMap, Grid, Position};

/// Traversal cost for every cell of a map. `None` marks cells that can
/// never be entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostField {
    costs: Grid<Option<u32>>,
}

impl CostField {
    /// Builds the cost field for `map` with a crowding `penalty` added once
    /// per blocking agent standing on a walkable cell.
    ///
    /// Walkable tiles cost their weight, with a floor of 1 so zero-weight
    /// terrain is still traversable.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{CostField, DungeonMap, Position, Tile};
    ///
    /// let mut map = DungeonMap::new(3, 3);
    /// map.set_tile(Position::new(1, 1), Tile::floor());
    ///
    /// let field = CostField::build(&map, [Position::new(1, 1)], 10);
    /// assert_eq!(field.cost(Position::new(1, 1)), Some(11));
    /// assert_eq!(field.cost(Position::new(0, 0)), None);
    /// ```
    pub fn build<I>(map: &DungeonMap, blockers: I, penalty: u32) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut costs = Grid::new(map.width(), map.height(), None);
        for (pos, tile) in map.tiles.iter() {
            if tile.walkable {
                costs.set(pos, Some(tile.weight.max(1)));
            }
        }

        for pos in blockers {
            if let Some(Some(cost)) = costs.get_mut(pos) {
                *cost = cost.saturating_add(penalty);
            }
        }

        Self { costs }
    }

    /// Wraps a hand-built cost grid.
    pub fn from_grid(costs: Grid<Option<u32>>) -> Self {
        Self { costs }
    }

    pub fn width(&self) -> u32 {
        self.costs.width()
    }

    pub fn height(&self) -> u32 {
        self.costs.height()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        self.costs.in_bounds(pos)
    }

    pub fn grid(&self) -> &Grid<Option<u32>> {
        &self.costs
    }

    /// Cost of entering `pos`; `None` when forbidden or out of bounds.
    pub fn cost(&self, pos: Position) -> Option<u32> {
        self.costs.get(pos).copied().flatten()
    }

    /// Cheapest enterable cell, used to scale the search heuristic.
    pub fn min_cost(&self) -> Option<u32> {
        self.costs.iter().filter_map(|(_, cost)| *cost).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tile;

    fn corridor() -> DungeonMap {
        let mut map = DungeonMap::new(5, 3);
        for x in 1..4 {
            map.set_tile(Position::new(x, 1), Tile::floor());
        }
        map
    }

    #[test]
    fn test_base_costs_follow_weights() {
        let mut map = corridor();
        map.set_tile(Position::new(2, 1), Tile::deep_water());
        map.set_tile(Position::new(3, 1), Tile::shallow_water());

        let field = CostField::build(&map, std::iter::empty(), 10);
        assert_eq!(field.cost(Position::new(1, 1)), Some(1));
        assert_eq!(field.cost(Position::new(2, 1)), Some(5));
        assert_eq!(field.cost(Position::new(3, 1)), Some(1));
        assert_eq!(field.cost(Position::new(0, 1)), None);
        assert_eq!(field.cost(Position::new(9, 9)), None);
        assert_eq!(field.min_cost(), Some(1));
    }

    #[test]
    fn test_penalty_stacks_per_blocker() {
        let map = corridor();
        let blockers = [Position::new(2, 1), Position::new(2, 1), Position::new(3, 1)];
        let field = CostField::build(&map, blockers, 10);
        assert_eq!(field.cost(Position::new(2, 1)), Some(21));
        assert_eq!(field.cost(Position::new(3, 1)), Some(11));
        assert_eq!(field.cost(Position::new(1, 1)), Some(1));
    }

    #[test]
    fn test_blockers_on_walls_are_ignored() {
        let map = corridor();
        let field = CostField::build(&map, [Position::new(0, 0), Position::new(-3, 2)], 10);
        assert_eq!(field.cost(Position::new(0, 0)), None);
    }
}

//! # Tiles and Dungeon Maps
//!
//! Static tile records and the dungeon map that agents walk on.

use super::{Grid, Position};
use serde::{Deserialize, Serialize};

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GREY: Rgb = Rgb(128, 128, 128);
    pub const LIGHT_GREY: Rgb = Rgb(192, 192, 192);
    pub const DARK_GREY: Rgb = Rgb(64, 64, 64);
    pub const GREEN: Rgb = Rgb(56, 142, 60);
    pub const LIGHT_GREEN: Rgb = Rgb(139, 195, 74);
    pub const BLUE: Rgb = Rgb(66, 133, 244);
    pub const DEEP_BLUE: Rgb = Rgb(21, 67, 150);
    pub const BROWN: Rgb = Rgb(121, 85, 72);
}

/// Glyph plus foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Graphic {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Graphic {
    pub const fn new(glyph: char, fg: Rgb, bg: Rgb) -> Self {
        Self { glyph, fg, bg }
    }
}

/// Graphic used for cells that have never been seen.
pub const SHROUD: Graphic = Graphic::new(' ', Rgb::WHITE, Rgb::BLACK);

/// Static data for a single map cell.
///
/// `weight` is the terrain's traversal weight; it only matters for walkable
/// tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub walkable: bool,
    pub transparent: bool,
    pub weight: u32,
    /// Graphic for when this tile is outside the field of view
    pub dark: Graphic,
    /// Graphic for when this tile is in the field of view
    pub light: Graphic,
}

impl Tile {
    fn terrain(glyph: char, weight: u32, lit_fg: Rgb) -> Self {
        Self {
            walkable: true,
            transparent: true,
            weight,
            dark: Graphic::new(glyph, Rgb::LIGHT_GREY, Rgb::DARK_GREY),
            light: Graphic::new(glyph, lit_fg, Rgb::GREY),
        }
    }

    fn solid(glyph: char, lit_fg: Rgb) -> Self {
        Self {
            walkable: false,
            transparent: false,
            weight: 0,
            dark: Graphic::new(glyph, Rgb::LIGHT_GREY, Rgb::DARK_GREY),
            light: Graphic::new(glyph, lit_fg, Rgb::GREY),
        }
    }

    pub fn floor() -> Self {
        Self::terrain('.', 1, Rgb::WHITE)
    }

    pub fn wall() -> Self {
        Self::solid('#', Rgb::WHITE)
    }

    pub fn door() -> Self {
        Self::terrain('@', 1, Rgb::BROWN)
    }

    pub fn down_stairs() -> Self {
        Self::terrain('>', 2, Rgb::WHITE)
    }

    pub fn up_stairs() -> Self {
        Self::terrain('<', 2, Rgb::WHITE)
    }

    pub fn loose_grass() -> Self {
        Self::terrain('░', 1, Rgb::LIGHT_GREEN)
    }

    pub fn grass() -> Self {
        Self::terrain('▒', 2, Rgb::GREEN)
    }

    pub fn dense_grass() -> Self {
        Self::terrain('▓', 3, Rgb::GREEN)
    }

    pub fn loose_rubble() -> Self {
        Self::terrain('░', 1, Rgb::LIGHT_GREY)
    }

    pub fn rubble() -> Self {
        Self::terrain('▒', 2, Rgb::GREY)
    }

    pub fn stalagmite() -> Self {
        Self::solid('▼', Rgb::LIGHT_GREY)
    }

    pub fn stalactite() -> Self {
        Self::solid('▲', Rgb::LIGHT_GREY)
    }

    pub fn shallow_water() -> Self {
        Self::terrain('~', 0, Rgb::BLUE)
    }

    pub fn deep_water() -> Self {
        Self::terrain('~', 5, Rgb::DEEP_BLUE)
    }
}

/// A cell handed to the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCell {
    pub position: Position,
    pub graphic: Graphic,
}

/// Tile layer plus the field-of-view layers of a single level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonMap {
    pub tiles: Grid<Tile>,
    /// Cells currently inside the target's field of view
    pub visible: Grid<bool>,
    /// Cells that have been in view at least once
    pub explored: Grid<bool>,
}

impl DungeonMap {
    /// Creates a map filled with walls.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_tiles(Grid::new(width, height, Tile::wall()))
    }

    /// Wraps an existing tile grid; nothing is visible or explored yet.
    pub fn from_tiles(tiles: Grid<Tile>) -> Self {
        let (width, height) = (tiles.width(), tiles.height());
        Self {
            tiles,
            visible: Grid::new(width, height, false),
            explored: Grid::new(width, height, false),
        }
    }

    /// Walkable floor and door tiles for a finished maze.
    pub fn from_maze(maze: &crate::Maze) -> Self {
        maze.to_dungeon_map()
    }

    pub fn width(&self) -> u32 {
        self.tiles.width()
    }

    pub fn height(&self) -> u32 {
        self.tiles.height()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        self.tiles.in_bounds(pos)
    }

    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.tiles.get(pos)
    }

    pub fn set_tile(&mut self, pos: Position, tile: Tile) -> bool {
        self.tiles.set(pos, tile)
    }

    /// Out-of-bounds positions are never walkable.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile(pos).map_or(false, |tile| tile.walkable)
    }

    pub fn is_transparent(&self, pos: Position) -> bool {
        self.tile(pos).map_or(false, |tile| tile.transparent)
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        self.visible.get(pos).copied().unwrap_or(false)
    }

    pub fn is_explored(&self, pos: Position) -> bool {
        self.explored.get(pos).copied().unwrap_or(false)
    }

    /// Marks a cell as in view. Visible cells are also explored.
    pub fn reveal(&mut self, pos: Position) {
        if self.visible.set(pos, true) {
            self.explored.set(pos, true);
        }
    }

    /// Clears the visible layer while preserving exploration state.
    pub fn clear_visibility(&mut self) {
        self.visible.fill(false);
    }

    pub fn walkable_positions(&self) -> Vec<Position> {
        self.tiles.positions_where(|tile| tile.walkable)
    }

    /// Yields every cell with the graphic it should be drawn with.
    ///
    /// Lit graphic inside the field of view, dark graphic for explored cells,
    /// shroud for everything else.
    pub fn render_cells(&self) -> impl Iterator<Item = RenderCell> + '_ {
        self.tiles.iter().map(move |(position, tile)| {
            let graphic = if self.is_visible(position) {
                tile.light
            } else if self.is_explored(position) {
                tile.dark
            } else {
                SHROUD
            };
            RenderCell { position, graphic }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_table() {
        assert!(Tile::floor().walkable);
        assert!(!Tile::wall().walkable);
        assert!(!Tile::wall().transparent);
        assert!(!Tile::stalagmite().walkable);
        assert_eq!(Tile::deep_water().weight, 5);
        assert_eq!(Tile::dense_grass().weight, 3);
        assert_eq!(Tile::shallow_water().weight, 0);
    }

    #[test]
    fn test_new_map_is_solid_and_unexplored() {
        let map = DungeonMap::new(6, 4);
        assert_eq!(map.width(), 6);
        assert_eq!(map.height(), 4);
        assert!(map.walkable_positions().is_empty());
        assert!(!map.is_walkable(Position::new(-1, 0)));
        assert!(map.render_cells().all(|cell| cell.graphic == SHROUD));
    }

    #[test]
    fn test_render_cells_follow_visibility() {
        let mut map = DungeonMap::new(3, 3);
        let center = Position::new(1, 1);
        map.set_tile(center, Tile::floor());
        map.reveal(center);

        let lit: Vec<_> = map.render_cells().filter(|c| c.position == center).collect();
        assert_eq!(lit[0].graphic, Tile::floor().light);

        map.clear_visibility();
        assert!(map.is_explored(center));
        let dark: Vec<_> = map.render_cells().filter(|c| c.position == center).collect();
        assert_eq!(dark[0].graphic, Tile::floor().dark);
    }
}

//! # Grid Mathematics
//!
//! Line rasterization for line-of-sight checks.

use crate::Position;

/// Cells on the Bresenham line from `from` to `to`, both ends included.
///
/// # Examples
///
/// ```
/// use delve::{line, Position};
///
/// let cells = line(Position::new(0, 0), Position::new(3, 1));
/// assert_eq!(cells.first(), Some(&Position::new(0, 0)));
/// assert_eq!(cells.last(), Some(&Position::new(3, 1)));
/// assert_eq!(cells.len(), 4);
/// ```
pub fn line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut cells = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    let mut current = from;
    let mut err = dx + dy;

    loop {
        cells.push(current);
        if current == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            current.x += sx;
        }
        if e2 <= dx {
            err += dx;
            current.y += sy;
        }
    }

    cells
}

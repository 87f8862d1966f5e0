//! # Grid and Chunk Coordinates
//!
//! The world is addressed on two integer lattices layered over continuous
//! XZ world space:
//!
//! * [`GridCell`] - one terrain tile, `tile_size` world units wide. This is the
//!   addressable unit for collision, destruction and placement.
//! * [`ChunkCoord`] - a square of `chunk_size × chunk_size` grid cells that is
//!   generated, streamed and evicted as a unit.
//!
//! World to grid conversion rounds half up (`-1.5 / 1.0` maps to `-1`, `0.5`
//! maps to `1`) so that a world point always resolves to the tile whose centre
//! is nearest, with ties going toward positive infinity. Grid to chunk
//! conversion floors, so negative grid cells land in negative chunks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A discretized world position on the XZ plane.
///
/// `world = grid * tile_size`, `grid = round(world / tile_size)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    /// Grid column along world X.
    pub x: i32,
    /// Grid row along world Z.
    pub z: i32,
}

impl GridCell {
    /// Creates a grid cell from its integer components.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Resolves a continuous world position to the tile containing it.
    ///
    /// # Arguments
    /// * `world_x`, `world_z` - Position in world units
    /// * `tile_size` - Width of a tile in world units
    pub fn from_world(world_x: f32, world_z: f32, tile_size: f32) -> Self {
        Self {
            x: to_grid(world_x, tile_size),
            z: to_grid(world_z, tile_size),
        }
    }

    /// Returns the world position of the centre of this tile.
    pub fn to_world(self, tile_size: f32) -> (f32, f32) {
        (self.x as f32 * tile_size, self.z as f32 * tile_size)
    }

    /// Returns the chunk that owns this cell.
    pub fn chunk(self, chunk_size: u32) -> ChunkCoord {
        let size = chunk_size as i32;
        ChunkCoord {
            x: self.x.div_euclid(size),
            z: self.z.div_euclid(size),
        }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Identifies a square region of `chunk_size × chunk_size` grid cells.
///
/// `chunk = floor(grid / chunk_size)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// Chunk column along world X.
    pub x: i32,
    /// Chunk row along world Z.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a chunk coordinate from its integer components.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Returns the chunk under a continuous world position.
    ///
    /// This floors the world position directly against the chunk's world
    /// extent (`chunk_size * tile_size`), which is how the streaming window is
    /// centred on the focus position.
    pub fn from_world(world_x: f32, world_z: f32, chunk_size: u32, tile_size: f32) -> Self {
        let extent = chunk_size as f32 * tile_size;
        Self {
            x: (world_x / extent).floor() as i32,
            z: (world_z / extent).floor() as i32,
        }
    }

    /// The grid cell at the chunk's minimum corner.
    pub fn origin(self, chunk_size: u32) -> GridCell {
        let size = chunk_size as i32;
        GridCell::new(self.x * size, self.z * size)
    }

    /// Chebyshev (chessboard) distance between two chunks.
    pub fn chebyshev_distance(self, other: ChunkCoord) -> u32 {
        (self.x - other.x)
            .unsigned_abs()
            .max((self.z - other.z).unsigned_abs())
    }

    /// Iterates every grid cell in this chunk, row by row along X.
    pub fn cells(self, chunk_size: u32) -> impl Iterator<Item = GridCell> {
        let origin = self.origin(chunk_size);
        let size = chunk_size as i32;
        (0..size).flat_map(move |local_z| {
            (0..size).map(move |local_x| GridCell::new(origin.x + local_x, origin.z + local_z))
        })
    }

    /// Returns every chunk within `radius` (inclusive, Chebyshev) of `self`.
    ///
    /// The window is a `(2·radius + 1)²` square.
    pub fn window(self, radius: u32) -> impl Iterator<Item = ChunkCoord> {
        let r = radius as i32;
        (-r..=r).flat_map(move |dx| (-r..=r).map(move |dz| ChunkCoord::new(self.x + dx, self.z + dz)))
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

/// Rounds half up, matching the tile-centre convention above.
fn to_grid(value: f32, tile_size: f32) -> i32 {
    (value / tile_size + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, 0 ; "origin")]
    #[test_case(2.0, 1 ; "exact centre")]
    #[test_case(2.9, 1 ; "inside tile")]
    #[test_case(3.0, 2 ; "half rounds up")]
    #[test_case(-3.0, -1 ; "negative half rounds up")]
    #[test_case(-3.1, -2 ; "negative past half")]
    fn world_to_grid(world: f32, expected: i32) {
        assert_eq!(GridCell::from_world(world, 0.0, 2.0).x, expected);
    }

    #[test]
    fn negative_cells_floor_into_negative_chunks() {
        assert_eq!(GridCell::new(-1, 0).chunk(16), ChunkCoord::new(-1, 0));
        assert_eq!(GridCell::new(-16, 15).chunk(16), ChunkCoord::new(-1, 0));
        assert_eq!(GridCell::new(-17, 16).chunk(16), ChunkCoord::new(-2, 1));
    }

    #[test]
    fn cells_cover_the_chunk_once() {
        let coord = ChunkCoord::new(-2, 3);
        let cells: Vec<GridCell> = coord.cells(4).collect();
        assert_eq!(cells.len(), 16);
        assert!(cells.iter().all(|cell| cell.chunk(4) == coord));
        assert_eq!(cells[0], GridCell::new(-8, 12));
    }

    #[test]
    fn window_is_inclusive_square() {
        let centre = ChunkCoord::new(5, -5);
        let window: Vec<ChunkCoord> = centre.window(2).collect();
        assert_eq!(window.len(), 25);
        assert!(window.iter().all(|coord| coord.chebyshev_distance(centre) <= 2));
    }

    #[test]
    fn focus_chunk_from_world() {
        assert_eq!(ChunkCoord::from_world(31.9, 0.0, 16, 2.0), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_world(32.0, -0.1, 16, 2.0), ChunkCoord::new(1, -1));
    }
}

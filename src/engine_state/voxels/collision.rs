//! # Collision Index
//!
//! A sparse set of blocked grid cells. A cell is present exactly while some
//! resident chunk owns a solid terrain record or a placed block at that cell;
//! the chunk store and the terrain mutator are the only writers.

use std::collections::HashSet;

use super::coords::GridCell;

/// Sparse set of currently blocked grid cells.
#[derive(Debug, Clone)]
pub struct CollisionIndex {
    cells: HashSet<GridCell>,
    tile_size: f32,
}

impl CollisionIndex {
    /// Creates an empty index for a world with the given tile size.
    pub fn new(tile_size: f32) -> Self {
        Self {
            cells: HashSet::new(),
            tile_size,
        }
    }

    /// Whether the tile under a world position is blocked. O(1) expected.
    pub fn is_blocked(&self, world_x: f32, world_z: f32) -> bool {
        self.contains(GridCell::from_world(world_x, world_z, self.tile_size))
    }

    /// Whether a grid cell is blocked.
    pub fn contains(&self, cell: GridCell) -> bool {
        self.cells.contains(&cell)
    }

    /// Marks a cell blocked. Returns `true` if it was not already blocked.
    pub fn insert(&mut self, cell: GridCell) -> bool {
        self.cells.insert(cell)
    }

    /// Clears a cell. Returns `true` if it was blocked.
    pub fn remove(&mut self, cell: GridCell) -> bool {
        self.cells.remove(&cell)
    }

    /// Number of blocked cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is blocked.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates the blocked cells in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.cells.iter().copied()
    }

    /// Tile size used to resolve world positions.
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }
}

//! # Terrain Mutation
//!
//! Destroy and place operations on world coordinates. Each operation updates
//! the collision index and the owning chunk together: either both change or
//! neither does.

use log::{error, trace};
use web_time::Duration;

use super::{
    block::block_type::Material,
    chunk::{Blocker, BlockerOrigin, FadingVisual},
    chunk_store::ChunkStore,
    collision::CollisionIndex,
    coords::GridCell,
};
use crate::engine_state::rendering::{Renderer, VisualInstance};

/// Scale a destroyed visual shrinks to while it waits to be released.
pub const FADE_SCALE: f32 = 0.1;

/// Borrowed view of the world that can destroy and place blocks.
///
/// Obtained from [`World::mutator`](super::world::World::mutator).
pub struct TerrainMutator<'w> {
    pub(crate) store: &'w mut ChunkStore,
    pub(crate) collision: &'w mut CollisionIndex,
    pub(crate) renderer: &'w mut dyn Renderer,
    /// Clock time of the current tick
    pub(crate) now: Duration,
    /// How long a destroyed visual lingers before release
    pub(crate) removal_delay: Duration,
}

impl TerrainMutator<'_> {
    /// Destroys the obstacle under a world position.
    ///
    /// The cell leaves the collision index immediately. Its visual shrinks and
    /// is released once the removal delay has passed (immediately when the
    /// delay is zero).
    ///
    /// # Returns
    /// `false` if the cell was not blocked.
    pub fn destroy_at(&mut self, world_x: f32, world_z: f32) -> bool {
        let cell = GridCell::from_world(world_x, world_z, self.store.tile_size());
        self.destroy_cell(cell)
    }

    /// Destroys the obstacle at a grid cell. See [`Self::destroy_at`].
    pub fn destroy_cell(&mut self, cell: GridCell) -> bool {
        if !self.collision.contains(cell) {
            return false;
        }

        let coord = cell.chunk(self.store.chunk_size());
        let Some(chunk) = self.store.get_mut(coord) else {
            error!("blocked cell {} has no resident chunk {}", cell, coord);
            debug_assert!(false, "blocked cell {cell} has no resident chunk");
            return false;
        };
        let Some(blocker) = chunk.take_blocker(cell) else {
            error!("blocked cell {} is not owned by chunk {}", cell, coord);
            debug_assert!(false, "blocked cell {cell} is not owned by its chunk");
            return false;
        };
        self.collision.remove(cell);

        if self.removal_delay.is_zero() {
            self.renderer.detach_visual(chunk.group(), blocker.visual);
            self.renderer.release_visual(blocker.visual);
        } else {
            self.renderer.set_visual_scale(blocker.visual, FADE_SCALE);
            chunk.push_fading(FadingVisual {
                visual: blocker.visual,
                release_at: self.now + self.removal_delay,
            });
        }

        trace!("destroyed {:?} at {}", blocker.material, cell);
        true
    }

    /// Places a built block at a world position.
    ///
    /// # Returns
    /// `false` if the cell is already blocked or its chunk is not resident.
    pub fn place_at(&mut self, world_x: f32, world_z: f32) -> bool {
        let cell = GridCell::from_world(world_x, world_z, self.store.tile_size());
        self.place_cell(cell)
    }

    /// Places a built block at a grid cell. See [`Self::place_at`].
    pub fn place_cell(&mut self, cell: GridCell) -> bool {
        if self.collision.contains(cell) {
            return false;
        }

        let tile_size = self.store.tile_size();
        let coord = cell.chunk(self.store.chunk_size());
        let Some(chunk) = self.store.get_mut(coord) else {
            trace!("refused to build at {}: chunk {} is not loaded", cell, coord);
            return false;
        };

        let (world_x, world_z) = cell.to_world(tile_size);
        let visual = self
            .renderer
            .create_visual(&VisualInstance::built_block(world_x, world_z, tile_size));
        self.renderer.attach_visual(chunk.group(), visual);
        chunk.insert_blocker(
            cell,
            Blocker {
                material: Material::Build,
                visual,
                origin: BlockerOrigin::Placed,
            },
        );
        self.collision.insert(cell);

        trace!("placed block at {}", cell);
        true
    }

    /// Whether a world position is blocked.
    pub fn is_blocked(&self, world_x: f32, world_z: f32) -> bool {
        self.collision.is_blocked(world_x, world_z)
    }
}

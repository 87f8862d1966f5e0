//! # World Module
//!
//! The `World` ties the voxel pieces together for one arena: the chunk store,
//! the collision index and the streamer. All of it is plain owned state, so
//! several worlds can live side by side (tests do this) and dropping a world
//! after [`World::teardown`] leaves nothing behind in the renderer.
//!
//! ## Invariant
//!
//! A grid cell is in the collision index if and only if a resident chunk owns
//! a blocker at that cell. Generation, eviction, destroy and place each keep
//! this true on their own; [`World::check_consistency`] verifies it.

use log::info;
use web_time::Duration;

use super::{
    chunk::generation::TerrainGenerator,
    chunk_store::ChunkStore,
    collision::CollisionIndex,
    coords::GridCell,
    mutation::TerrainMutator,
    noise_field::NoiseField,
    streamer::{StreamReport, WorldStreamer},
};
use crate::{config::WorldConfig, engine_state::rendering::Renderer, error::ConsistencyFault};

/// A streamed, destructible voxel world.
pub struct World {
    store: ChunkStore,
    collision: CollisionIndex,
    streamer: WorldStreamer,
    removal_delay: Duration,
}

impl World {
    /// Creates an empty world. No chunk is resident until the first
    /// [`World::update`].
    pub fn new(config: &WorldConfig) -> Self {
        let prop_seed = config.prop_seed.unwrap_or_else(|| fastrand::u64(..));
        info!(
            "creating world: seed {}, prop seed {}, chunk size {}, tile size {}, render distance {}",
            config.seed, prop_seed, config.chunk_size, config.tile_size, config.render_distance
        );

        let noise = NoiseField::new(config.seed, config.noise_scale);
        let generator = TerrainGenerator::new(noise, config.chunk_size, prop_seed, config.prop_chance);

        World {
            store: ChunkStore::new(generator, config.tile_size),
            collision: CollisionIndex::new(config.tile_size),
            streamer: WorldStreamer::new(config.render_distance),
            removal_delay: config.removal_delay(),
        }
    }

    /// Streams chunks around a focus position.
    pub fn update(&mut self, focus_x: f32, focus_z: f32, renderer: &mut dyn Renderer) -> StreamReport {
        let report = self
            .streamer
            .update(focus_x, focus_z, &mut self.store, &mut self.collision, renderer);

        #[cfg(debug_assertions)]
        if report.changed() {
            if let Err(fault) = self.check_consistency() {
                log::error!("world invariant broken after streaming: {}", fault);
                debug_assert!(false, "{fault}");
            }
        }

        report
    }

    /// Borrows the world for destroy and place operations during the tick at
    /// clock time `now`.
    pub fn mutator<'w>(&'w mut self, renderer: &'w mut dyn Renderer, now: Duration) -> TerrainMutator<'w> {
        TerrainMutator {
            store: &mut self.store,
            collision: &mut self.collision,
            renderer,
            now,
            removal_delay: self.removal_delay,
        }
    }

    /// Releases destroyed visuals whose shrink transition has ended.
    ///
    /// # Returns
    /// The number of visuals released.
    pub fn flush_removals(&mut self, now: Duration, renderer: &mut dyn Renderer) -> usize {
        self.store
            .chunks_mut()
            .map(|chunk| chunk.release_expired(now, renderer))
            .sum()
    }

    /// Whether the tile under a world position is blocked.
    pub fn is_blocked(&self, world_x: f32, world_z: f32) -> bool {
        self.collision.is_blocked(world_x, world_z)
    }

    /// Whether a grid cell is blocked.
    pub fn is_cell_blocked(&self, cell: GridCell) -> bool {
        self.collision.contains(cell)
    }

    /// Resident chunks.
    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    /// The collision index.
    pub fn collision(&self) -> &CollisionIndex {
        &self.collision
    }

    /// The streamer.
    pub fn streamer(&self) -> &WorldStreamer {
        &self.streamer
    }

    /// World units per grid cell.
    pub fn tile_size(&self) -> f32 {
        self.store.tile_size()
    }

    /// Verifies that the collision index holds exactly the cells owned by
    /// resident chunks.
    pub fn check_consistency(&self) -> Result<(), ConsistencyFault> {
        let chunk_size = self.store.chunk_size();

        for cell in self.collision.iter() {
            let chunk = cell.chunk(chunk_size);
            match self.store.get(chunk) {
                None => return Err(ConsistencyFault::OrphanCell { cell, chunk }),
                Some(resident) if !resident.owns(cell) => {
                    return Err(ConsistencyFault::UnownedCell { cell, chunk })
                }
                Some(_) => {}
            }
        }

        for resident in self.store.chunks() {
            let chunk = resident.coord();
            for cell in resident.owned_cells() {
                if cell.chunk(chunk_size) != chunk {
                    return Err(ConsistencyFault::MisplacedBlocker { cell, chunk });
                }
                if !self.collision.contains(cell) {
                    return Err(ConsistencyFault::MissingFromIndex { cell, chunk });
                }
            }
        }

        Ok(())
    }

    /// Evicts every resident chunk, releasing all visuals.
    pub fn teardown(&mut self, renderer: &mut dyn Renderer) {
        let resident: Vec<_> = self.store.resident().collect();
        for coord in resident {
            self.store.evict(coord, &mut self.collision, renderer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{rendering::HeadlessRenderer, voxels::coords::ChunkCoord};

    fn config() -> WorldConfig {
        WorldConfig {
            chunk_size: 8,
            render_distance: 1,
            seed: 21,
            prop_seed: Some(21),
            ..WorldConfig::default()
        }
    }

    #[test]
    fn streaming_keeps_the_invariant() {
        let mut world = World::new(&config());
        let mut renderer = HeadlessRenderer::new();
        for step in 0..20 {
            world.update(step as f32 * 5.0, step as f32 * -3.0, &mut renderer);
            assert_eq!(world.check_consistency(), Ok(()));
        }
    }

    #[test]
    fn delayed_removal_releases_once() {
        let mut world = World::new(&config());
        let mut renderer = HeadlessRenderer::new();
        world.update(0.0, 0.0, &mut renderer);

        let cell = GridCell::new(2, 2);
        {
            let mut mutator = world.mutator(&mut renderer, Duration::ZERO);
            mutator.destroy_cell(cell);
            assert!(mutator.place_cell(cell));
            assert!(mutator.destroy_cell(cell));
        }
        assert!(!world.is_cell_blocked(cell));
        let coord = cell.chunk(8);
        let fading = world.store().get(coord).map(|chunk| chunk.fading().len()).unwrap_or(0);
        assert!(fading >= 1);

        assert_eq!(world.flush_removals(Duration::from_millis(10), &mut renderer), 0);
        assert_eq!(world.flush_removals(Duration::from_millis(50), &mut renderer), fading);
        assert_eq!(world.flush_removals(Duration::from_millis(100), &mut renderer), 0);
        assert_eq!(renderer.invalid_releases(), 0);
    }

    #[test]
    fn eviction_releases_fading_visuals() {
        let mut world = World::new(&config());
        let mut renderer = HeadlessRenderer::new();
        world.update(0.0, 0.0, &mut renderer);
        let cell = GridCell::new(1, 1);
        {
            let mut mutator = world.mutator(&mut renderer, Duration::ZERO);
            mutator.destroy_cell(cell);
            assert!(mutator.place_cell(cell));
            assert!(mutator.destroy_cell(cell));
        }

        world.teardown(&mut renderer);
        assert_eq!(world.store().len(), 0);
        assert!(world.collision().is_empty());
        assert_eq!(renderer.live_visuals(), 0);
        assert_eq!(renderer.live_groups(), 0);
        assert_eq!(renderer.invalid_releases(), 0);

        // flushing after eviction must not touch the released visuals again
        world.flush_removals(Duration::from_secs(1), &mut renderer);
        assert_eq!(renderer.invalid_releases(), 0);
    }

    #[test]
    fn detects_a_leaked_cell() {
        let mut world = World::new(&config());
        let mut renderer = HeadlessRenderer::new();
        world.update(0.0, 0.0, &mut renderer);
        world.collision.insert(GridCell::new(1000, 1000));
        assert_eq!(
            world.check_consistency(),
            Err(ConsistencyFault::OrphanCell {
                cell: GridCell::new(1000, 1000),
                chunk: ChunkCoord::new(125, 125),
            })
        );
    }
}

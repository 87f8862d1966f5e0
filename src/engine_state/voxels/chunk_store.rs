//! # Chunk Store
//!
//! Owns every resident chunk, keyed by chunk coordinate. Generating a chunk
//! registers its solid cells in the collision index; evicting it removes
//! them again along with the chunk's visuals, so a chunk that unloads and
//! later reloads differently never leaves phantom blocked cells behind.

use std::collections::HashMap;

use log::{debug, error};

use super::{
    chunk::{chunk_creation::ChunkBuilder, generation::TerrainGenerator, Chunk},
    collision::CollisionIndex,
    coords::ChunkCoord,
};
use crate::engine_state::rendering::Renderer;

/// Resident chunks and the generator that produces them.
pub struct ChunkStore {
    chunks: HashMap<ChunkCoord, Chunk>,
    generator: TerrainGenerator,
    tile_size: f32,
}

impl ChunkStore {
    /// Creates an empty store.
    pub fn new(generator: TerrainGenerator, tile_size: f32) -> Self {
        ChunkStore {
            chunks: HashMap::new(),
            generator,
            tile_size,
        }
    }

    /// Cells per chunk edge.
    pub fn chunk_size(&self) -> u32 {
        self.generator.chunk_size()
    }

    /// World units per tile.
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// The terrain generator.
    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Generates and stores the chunk at `coord`.
    ///
    /// Every solid cell is registered in `collision`. If the chunk is already
    /// resident nothing is regenerated.
    pub fn generate(
        &mut self,
        coord: ChunkCoord,
        collision: &mut CollisionIndex,
        renderer: &mut dyn Renderer,
    ) -> &Chunk {
        let generator = &self.generator;
        let tile_size = self.tile_size;
        self.chunks.entry(coord).or_insert_with(|| {
            let mut builder = ChunkBuilder::new(coord, generator.chunk_size(), tile_size, renderer);
            for record in generator.generate_records(coord) {
                if !builder.push_record(record, renderer) {
                    error!("record for {} rejected while building chunk {}", record.cell, coord);
                }
            }
            let chunk = builder.return_chunk();
            for cell in chunk.owned_cells() {
                collision.insert(cell);
            }
            debug!(
                "generated chunk {} with {} blocked cells",
                coord,
                chunk.owned_count()
            );
            chunk
        })
    }

    /// Evicts the chunk at `coord`, releasing its visuals and clearing every
    /// cell it owned from `collision`.
    ///
    /// # Returns
    /// `false` if no chunk was resident at `coord`.
    pub fn evict(
        &mut self,
        coord: ChunkCoord,
        collision: &mut CollisionIndex,
        renderer: &mut dyn Renderer,
    ) -> bool {
        let Some(chunk) = self.chunks.remove(&coord) else {
            return false;
        };
        let owned = chunk.release(renderer);
        for cell in &owned {
            collision.remove(*cell);
        }
        debug!("evicted chunk {} and cleared {} blocked cells", coord, owned.len());
        true
    }

    /// Whether a chunk is resident at `coord`.
    pub fn is_resident(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// The resident chunk at `coord`.
    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub(crate) fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    /// Coordinates of every resident chunk.
    pub fn resident(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Every resident chunk.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks.values()
    }

    pub(crate) fn chunks_mut(&mut self) -> impl Iterator<Item = &mut Chunk> + '_ {
        self.chunks.values_mut()
    }

    /// Number of resident chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether no chunk is resident.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

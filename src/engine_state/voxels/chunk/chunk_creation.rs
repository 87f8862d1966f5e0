//! # Chunk Creation Module
//!
//! Builds a [`Chunk`] from its terrain records, materializing one visual per
//! ground tile and prop as it goes. The builder keeps the records, the
//! visuals and the chunk's blocker map in step: every solid record pushed
//! produces exactly one blocker entry tagged with its cell.

use std::collections::HashMap;

use crate::engine_state::{
    rendering::{GroupHandle, Renderer, VisualHandle, VisualInstance},
    voxels::{
        block::{block_type::Material, TerrainCellRecord},
        coords::{ChunkCoord, GridCell},
    },
};

use super::{Blocker, BlockerOrigin, Chunk};

/// Incrementally assembles a chunk.
///
/// Records must be pushed in the order [`ChunkCoord::cells`] yields them;
/// the builder tracks its local position the same way and rejects a record
/// for the wrong cell.
pub struct ChunkBuilder {
    /// Chunk being assembled
    coord: ChunkCoord,
    /// Cells per chunk edge
    chunk_size: u32,
    /// World units per tile
    tile_size: f32,
    /// Scene group all of this chunk's visuals attach to
    group: GroupHandle,
    records: Vec<TerrainCellRecord>,
    /// Visuals that never block (floors under grass, dirt and trees)
    ground: Vec<VisualHandle>,
    blockers: HashMap<GridCell, Blocker>,
    /// Current X position within the chunk
    local_x: u32,
    /// Current Z position within the chunk
    local_z: u32,
}

impl ChunkBuilder {
    /// Starts a chunk, creating its scene group.
    pub fn new(coord: ChunkCoord, chunk_size: u32, tile_size: f32, renderer: &mut dyn Renderer) -> Self {
        let cells = (chunk_size as usize).saturating_mul(chunk_size as usize);
        ChunkBuilder {
            coord,
            chunk_size,
            tile_size,
            group: renderer.create_group(),
            records: Vec::with_capacity(cells),
            ground: Vec::with_capacity(cells),
            blockers: HashMap::new(),
            local_x: 0,
            local_z: 0,
        }
    }

    /// The cell the next pushed record must describe.
    pub fn expected_cell(&self) -> GridCell {
        let origin = self.coord.origin(self.chunk_size);
        GridCell::new(origin.x + self.local_x as i32, origin.z + self.local_z as i32)
    }

    /// Adds one record and its visuals, then advances to the next cell.
    ///
    /// Returns `false` (and adds nothing) if the record is out of order or
    /// the chunk is already full.
    pub fn push_record(&mut self, record: TerrainCellRecord, renderer: &mut dyn Renderer) -> bool {
        if self.local_z >= self.chunk_size || record.cell != self.expected_cell() {
            return false;
        }

        let (world_x, world_z) = record.cell.to_world(self.tile_size);
        let ground_material = match record.material {
            Material::Tree => Material::Grass,
            other => other,
        };
        let tile = self.materialize(&VisualInstance::ground_tile(world_x, world_z, self.tile_size, ground_material), renderer);

        match record.material {
            // The raised tile is the obstacle itself.
            Material::Rock => {
                self.blockers.insert(record.cell, Blocker::terrain(Material::Rock, tile));
            }
            Material::Tree => {
                self.ground.push(tile);
                let tree = self.materialize(&VisualInstance::tree(world_x, world_z), renderer);
                self.blockers.insert(record.cell, Blocker::terrain(Material::Tree, tree));
            }
            _ => self.ground.push(tile),
        }

        self.records.push(record);

        self.local_x += 1;
        if self.local_x == self.chunk_size {
            self.local_x = 0;
            self.local_z += 1;
        }
        true
    }

    /// Finalizes the chunk.
    pub fn return_chunk(self) -> Chunk {
        Chunk {
            coord: self.coord,
            chunk_size: self.chunk_size,
            group: self.group,
            records: self.records,
            ground: self.ground,
            blockers: self.blockers,
            fading: Vec::new(),
        }
    }

    fn materialize(&self, instance: &VisualInstance, renderer: &mut dyn Renderer) -> VisualHandle {
        let visual = renderer.create_visual(instance);
        renderer.attach_visual(self.group, visual);
        visual
    }
}

impl Blocker {
    fn terrain(material: Material, visual: VisualHandle) -> Self {
        Blocker {
            material,
            visual,
            origin: BlockerOrigin::Terrain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::HeadlessRenderer;

    fn record(cell: GridCell, material: Material) -> TerrainCellRecord {
        TerrainCellRecord {
            cell,
            noise: 0.0,
            material,
            solid: material.is_solid(),
        }
    }

    #[test]
    fn builds_visuals_and_blockers() {
        let mut renderer = HeadlessRenderer::new();
        let coord = ChunkCoord::new(0, 0);
        let mut builder = ChunkBuilder::new(coord, 2, 2.0, &mut renderer);
        let materials = [Material::Grass, Material::Rock, Material::Tree, Material::Dirt];
        for (cell, material) in coord.cells(2).zip(materials) {
            assert!(builder.push_record(record(cell, material), &mut renderer));
        }
        let chunk = builder.return_chunk();

        // four ground tiles plus one tree cone
        assert_eq!(renderer.live_visuals(), 5);
        assert_eq!(renderer.visuals_in_group(chunk.group()), 5);
        let mut owned: Vec<GridCell> = chunk.owned_cells().collect();
        owned.sort();
        assert_eq!(owned, vec![GridCell::new(0, 1), GridCell::new(1, 0)]);
    }

    #[test]
    fn rejects_out_of_order_records() {
        let mut renderer = HeadlessRenderer::new();
        let mut builder = ChunkBuilder::new(ChunkCoord::new(1, 0), 2, 2.0, &mut renderer);
        assert!(!builder.push_record(record(GridCell::new(0, 0), Material::Grass), &mut renderer));
        assert!(builder.push_record(record(GridCell::new(2, 0), Material::Grass), &mut renderer));
        assert_eq!(builder.expected_cell(), GridCell::new(3, 0));
    }
}

//! # Terrain Generation
//!
//! Turns a chunk coordinate into the terrain records for every cell in it.
//! Generation reads nothing but the coordinate, the noise field and the prop
//! seed, so a chunk comes out the same no matter which neighbours were
//! generated before it or how many times it has been evicted and reloaded.

use crate::engine_state::voxels::{
    block::TerrainCellRecord,
    coords::{ChunkCoord, GridCell},
    noise_field::NoiseField,
};

/// Pure terrain generator for one world.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    noise: NoiseField,
    chunk_size: u32,
    prop_seed: u64,
    prop_chance: f64,
}

impl TerrainGenerator {
    /// Creates a generator.
    ///
    /// # Arguments
    /// * `noise` - Field sampled per cell in global grid coordinates
    /// * `chunk_size` - Cells per chunk edge
    /// * `prop_seed` - Seed for tree placement
    /// * `prop_chance` - Probability that a cell in the prop band grows a tree
    pub fn new(noise: NoiseField, chunk_size: u32, prop_seed: u64, prop_chance: f64) -> Self {
        Self {
            noise,
            chunk_size,
            prop_seed,
            prop_chance,
        }
    }

    /// Cells per chunk edge.
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// The underlying noise field.
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Generates the records for every cell of `coord`, row by row along X.
    pub fn generate_records(&self, coord: ChunkCoord) -> Vec<TerrainCellRecord> {
        coord
            .cells(self.chunk_size)
            .map(|cell| self.generate_cell(cell))
            .collect()
    }

    /// Generates the record for a single cell.
    pub fn generate_cell(&self, cell: GridCell) -> TerrainCellRecord {
        let noise = self.noise.sample_cell(cell);
        TerrainCellRecord::classify(cell, noise, || self.roll_prop(cell))
    }

    /// One draw from an RNG keyed by the cell, so the roll for a cell never
    /// depends on how many other cells were rolled before it.
    fn roll_prop(&self, cell: GridCell) -> bool {
        let mut rng = fastrand::Rng::with_seed(cell_seed(self.prop_seed, cell));
        rng.f64() < self.prop_chance
    }
}

/// Mixes a world seed with a cell position (splitmix64 finalizer).
fn cell_seed(seed: u64, cell: GridCell) -> u64 {
    let packed = ((cell.x as u32 as u64) << 32) | cell.z as u32 as u64;
    let mut h = seed ^ packed ^ 0x9E37_79B9_7F4A_7C15;
    h = (h ^ (h >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h = (h ^ (h >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^ (h >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::Material;

    fn generator(prop_seed: u64) -> TerrainGenerator {
        TerrainGenerator::new(NoiseField::new(42, 0.1), 16, prop_seed, 0.1)
    }

    #[test]
    fn generation_is_repeatable() {
        let a = generator(5);
        let b = generator(5);
        let coord = ChunkCoord::new(-3, 2);
        assert_eq!(a.generate_records(coord), b.generate_records(coord));
    }

    #[test]
    fn generation_ignores_neighbour_order() {
        let gen = generator(5);
        let target = ChunkCoord::new(1, 1);
        let first = gen.generate_records(target);
        for neighbour in target.window(1) {
            gen.generate_records(neighbour);
        }
        assert_eq!(gen.generate_records(target), first);
    }

    #[test]
    fn terrain_classes_do_not_depend_on_prop_seed() {
        let a = generator(1);
        let b = generator(2);
        let coord = ChunkCoord::new(0, 0);
        for (ra, rb) in a.generate_records(coord).iter().zip(b.generate_records(coord).iter()) {
            assert_eq!(ra.noise, rb.noise);
            let terrain = |m: Material| if m == Material::Tree { Material::Grass } else { m };
            assert_eq!(terrain(ra.material), terrain(rb.material));
        }
    }

    #[test]
    fn records_cover_the_chunk_in_order() {
        let gen = generator(0);
        let coord = ChunkCoord::new(2, -1);
        let records = gen.generate_records(coord);
        assert_eq!(records.len(), 256);
        assert_eq!(records[0].cell, GridCell::new(32, -16));
        assert_eq!(records[1].cell, GridCell::new(33, -16));
        assert_eq!(records[16].cell, GridCell::new(32, -15));
    }

    #[test]
    fn prop_chance_bounds() {
        let never = TerrainGenerator::new(NoiseField::new(42, 0.1), 16, 3, 0.0);
        let always = TerrainGenerator::new(NoiseField::new(42, 0.1), 16, 3, 1.0);
        for coord in ChunkCoord::new(0, 0).window(2) {
            assert!(never.generate_records(coord).iter().all(|r| r.material != Material::Tree));
            for record in always.generate_records(coord) {
                if record.noise > 0.3 && record.noise <= 0.6 {
                    assert_eq!(record.material, Material::Tree);
                }
            }
        }
    }
}

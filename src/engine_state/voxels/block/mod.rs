//! # Block Module
//!
//! Terrain cell records and the rules that classify a noise sample into a
//! material.

use serde::{Deserialize, Serialize};

use block_type::Material;

use super::coords::GridCell;

pub mod block_type;

/// The underlying integer type used to store a material compactly.
pub type MaterialSize = u8;

/// Below this noise value a cell is dirt.
pub const DIRT_THRESHOLD: f64 = -0.3;
/// Above this noise value a cell is solid rock.
pub const ROCK_THRESHOLD: f64 = 0.6;
/// Above this noise value (and up to the rock threshold) a cell may grow a tree.
pub const PROP_THRESHOLD: f64 = 0.3;

/// Packed `0xRRGGBB` colour per material, indexed by `Material as usize`.
pub static MATERIAL_COLORS: [u32; 5] = [
    0x5da65d, // GRASS
    0x8b5a2b, // DIRT
    0x808080, // ROCK
    0x228b22, // TREE
    0xffaa00, // BUILD
];

/// Returns the packed colour for a material.
pub fn material_color(material: Material) -> u32 {
    MATERIAL_COLORS[material as usize]
}

/// One generated terrain cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainCellRecord {
    /// Global grid position of the cell.
    pub cell: GridCell,
    /// Noise sample the classification was derived from.
    pub noise: f64,
    /// Material class.
    pub material: Material,
    /// Whether the cell blocks movement.
    pub solid: bool,
}

impl TerrainCellRecord {
    /// Classifies a noise sample.
    ///
    /// `prop_roll` is consulted only when the sample falls in the prop band
    /// `(PROP_THRESHOLD, ROCK_THRESHOLD]`; it is the only input that is not a
    /// pure function of the noise. A tree grows when `prop_roll` returns true.
    pub fn classify(cell: GridCell, noise: f64, prop_roll: impl FnOnce() -> bool) -> Self {
        let material = if noise < DIRT_THRESHOLD {
            Material::Dirt
        } else if noise > ROCK_THRESHOLD {
            Material::Rock
        } else if noise > PROP_THRESHOLD && prop_roll() {
            Material::Tree
        } else {
            Material::Grass
        };

        TerrainCellRecord {
            cell,
            noise,
            material,
            solid: material.is_solid(),
        }
    }
}

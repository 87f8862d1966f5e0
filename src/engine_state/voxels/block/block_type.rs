//! # Material Module
//!
//! Defines the material classes a terrain cell or placed block can have.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::MaterialSize;

/// Enumerates every material class in the arena.
///
/// The discriminants are stable and double as indices into
/// [`MATERIAL_COLORS`](super::MATERIAL_COLORS).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    /// Open ground. Walkable.
    Grass,

    /// Low-lying ground where the noise dips. Walkable.
    Dirt,

    /// Raised outcrop. Blocks movement and can be destroyed.
    Rock,

    /// A tree prop standing on grass. Blocks movement and can be destroyed.
    Tree,

    /// A block placed by a builder. Blocks movement and can be destroyed.
    Build,
}

impl Material {
    /// Converts a compact `MaterialSize` back to a `Material`.
    ///
    /// # Returns
    /// `None` if the value does not name a material.
    pub fn from_int(material: MaterialSize) -> Option<Self> {
        num::FromPrimitive::from_u8(material)
    }

    /// Whether cells of this material are entered into the collision index.
    pub fn is_solid(self) -> bool {
        matches!(self, Material::Rock | Material::Tree | Material::Build)
    }

    /// Height of the ground tile under this material, in tiles.
    pub fn ground_height(self) -> f32 {
        match self {
            Material::Rock => 2.5,
            _ => 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_compact_form() {
        for material in [Material::Grass, Material::Dirt, Material::Rock, Material::Tree, Material::Build] {
            assert_eq!(Material::from_int(material as MaterialSize), Some(material));
        }
        assert_eq!(Material::from_int(200), None);
    }

    #[test]
    fn only_obstacles_are_solid() {
        assert!(!Material::Grass.is_solid());
        assert!(!Material::Dirt.is_solid());
        assert!(Material::Rock.is_solid());
        assert!(Material::Tree.is_solid());
        assert!(Material::Build.is_solid());
    }
}

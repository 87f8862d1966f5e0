//! Instance data handed to the renderer for every terrain tile, prop and
//! placed block.

use cgmath::Point3;

use crate::engine_state::voxels::block::{block_type::Material, material_color};

/// The primitive a visual is drawn with.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VisualShape {
    /// An axis-aligned box.
    Box = 0,
    /// An upright cone, used for trees.
    Cone = 1,
}

/// A single drawable instance.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Extent: [f32; 3] (12 bytes)
/// - Color: u32 packed `0xRRGGBB` (4 bytes)
/// - Shape: u32 (4 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VisualInstance {
    /// Centre of the instance in world space
    pub position: [f32; 3],
    /// Full size along X, Y and Z. For cones X is the diameter and Y the height.
    pub extent: [f32; 3],
    /// Packed RGB colour
    pub color: u32,
    /// A `VisualShape` discriminant
    pub shape: u32,
}

impl VisualInstance {
    /// Creates an instance.
    pub fn new(position: Point3<f32>, extent: [f32; 3], material: Material, shape: VisualShape) -> Self {
        VisualInstance {
            position: [position.x, position.y, position.z],
            extent,
            color: material_color(material),
            shape: shape as u32,
        }
    }

    /// The ground tile for a terrain cell centred on `(world_x, world_z)`.
    ///
    /// Every tile's base sits at `y = -2`; rock tiles rise well above the
    /// others.
    pub fn ground_tile(world_x: f32, world_z: f32, tile_size: f32, material: Material) -> Self {
        let height = material.ground_height() * tile_size;
        Self::new(
            Point3::new(world_x, height / 2.0 - 2.0, world_z),
            [tile_size, height, tile_size],
            material,
            VisualShape::Box,
        )
    }

    /// A tree prop standing on the cell centred on `(world_x, world_z)`.
    pub fn tree(world_x: f32, world_z: f32) -> Self {
        Self::new(
            Point3::new(world_x, 2.0, world_z),
            [2.0, 4.0, 2.0],
            Material::Tree,
            VisualShape::Cone,
        )
    }

    /// A block placed by a builder on the cell centred on `(world_x, world_z)`.
    pub fn built_block(world_x: f32, world_z: f32, tile_size: f32) -> Self {
        Self::new(
            Point3::new(world_x, tile_size / 2.0, world_z),
            [tile_size, tile_size, tile_size],
            Material::Build,
            VisualShape::Box,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<VisualInstance>(), 32);
        let instances = [VisualInstance::tree(0.0, 0.0), VisualInstance::built_block(2.0, 4.0, 2.0)];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 64);
    }

    #[test]
    fn rock_tiles_are_tall() {
        let rock = VisualInstance::ground_tile(0.0, 0.0, 2.0, Material::Rock);
        let grass = VisualInstance::ground_tile(0.0, 0.0, 2.0, Material::Grass);
        assert_eq!(rock.extent[1], 5.0);
        assert!(grass.extent[1] < rock.extent[1]);
        assert_eq!(rock.color, 0x808080);
    }
}

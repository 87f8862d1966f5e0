//! Attack resolution.
//!
//! Turns an attack (class, origin, aim) into grid cells and applies them to
//! the world through a [`TerrainMutator`]. Melee and ranged attacks sweep a
//! cone and destroy every blocked cell whose centre falls inside it; builders
//! place one block a fixed distance ahead.

use cgmath::{InnerSpace, Point3, Vector2};
use serde::{Deserialize, Serialize};

use super::voxels::{coords::GridCell, mutation::TerrainMutator};

/// The three player archetypes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackClass {
    /// Short 180° sweep.
    Melee,
    /// Long, narrow 30° cone.
    Ranged,
    /// Places blocks instead of destroying them.
    Builder,
}

/// Shape of a destructive sweep around the attacker.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConeProfile {
    /// Cells must be strictly closer than this
    pub range: f32,
    /// Cells must be strictly farther than this
    pub min_distance: f32,
    /// Cosine of the half-angle; the aim/target dot product must exceed it
    pub min_dot: f32,
}

/// Half-angle 90°, so the whole frontal half-plane.
pub const MELEE_CONE: ConeProfile = ConeProfile {
    range: 3.5,
    min_distance: 0.5,
    min_dot: 0.0,
};

/// Half-angle 15°.
pub const RANGED_CONE: ConeProfile = ConeProfile {
    range: 10.0,
    min_distance: 1.0,
    min_dot: 0.965_925_8, // cos(15°)
};

impl AttackClass {
    /// The sweep for destructive classes, `None` for builders.
    pub fn cone(self) -> Option<ConeProfile> {
        match self {
            AttackClass::Melee => Some(MELEE_CONE),
            AttackClass::Ranged => Some(RANGED_CONE),
            AttackClass::Builder => None,
        }
    }
}

/// What one resolved attack did to the world.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AttackOutcome {
    /// Cells inside the sweep
    pub candidates: usize,
    /// Obstacles destroyed
    pub destroyed: usize,
    /// Whether a builder placed a block
    pub placed: bool,
}

/// Resolves attacks against the grid.
#[derive(Copy, Clone, Debug)]
pub struct CombatResolver {
    tile_size: f32,
    build_distance: f32,
}

impl CombatResolver {
    /// Creates a resolver for a world with the given tile size.
    pub fn new(tile_size: f32, build_distance: f32) -> Self {
        CombatResolver {
            tile_size,
            build_distance,
        }
    }

    /// Enumerates the cells inside a sweep.
    ///
    /// Scans every cell whose centre lies in the `[-range, range]` square
    /// around `origin` (one cell per tile, so the scan lands on cell
    /// centres) and keeps those with
    /// `min_distance < |d| < range` and `dot(aim, d̂) > min_dot`.
    /// Boundaries are exclusive so adjacent cones never share a cell.
    ///
    /// `aim` does not need to be normalized. A zero aim yields nothing.
    pub fn cone_cells(&self, cone: &ConeProfile, origin: Point3<f32>, aim: Vector2<f32>) -> Vec<GridCell> {
        if aim.magnitude2() == 0.0 {
            return Vec::new();
        }
        let aim = aim.normalize();

        let low = GridCell::from_world(origin.x - cone.range, origin.z - cone.range, self.tile_size);
        let high = GridCell::from_world(origin.x + cone.range, origin.z + cone.range, self.tile_size);

        let mut cells = Vec::new();
        for gx in low.x..=high.x {
            for gz in low.z..=high.z {
                let cell = GridCell::new(gx, gz);
                let (cx, cz) = cell.to_world(self.tile_size);
                let offset = Vector2::new(cx - origin.x, cz - origin.z);
                let distance = offset.magnitude();
                if distance <= cone.min_distance || distance >= cone.range {
                    continue;
                }
                if aim.dot(offset / distance) > cone.min_dot {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// The world point a builder targets.
    pub fn build_target(&self, origin: Point3<f32>, aim: Vector2<f32>) -> Option<(f32, f32)> {
        if aim.magnitude2() == 0.0 {
            return None;
        }
        let step = aim.normalize() * self.build_distance;
        Some((origin.x + step.x, origin.z + step.y))
    }

    /// Applies an attack to the world.
    ///
    /// `aim` is a direction on the XZ plane (`aim.x` along world X, `aim.y`
    /// along world Z). Cells that turn out to be empty are skipped silently.
    pub fn resolve(
        &self,
        class: AttackClass,
        origin: Point3<f32>,
        aim: Vector2<f32>,
        mutator: &mut TerrainMutator<'_>,
    ) -> AttackOutcome {
        let mut outcome = AttackOutcome::default();
        match class.cone() {
            Some(cone) => {
                let cells = self.cone_cells(&cone, origin, aim);
                outcome.candidates = cells.len();
                outcome.destroyed = cells
                    .into_iter()
                    .filter(|cell| mutator.destroy_cell(*cell))
                    .count();
            }
            None => {
                if let Some((x, z)) = self.build_target(origin, aim) {
                    outcome.candidates = 1;
                    outcome.placed = mutator.place_at(x, z);
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn resolver() -> CombatResolver {
        CombatResolver::new(2.0, 4.0)
    }

    fn at_angle(degrees: f32, distance: f32) -> (f32, f32) {
        let radians = degrees.to_radians();
        (radians.cos() * distance, radians.sin() * distance)
    }

    #[test]
    fn melee_sweeps_the_front_half() {
        let cells = resolver().cone_cells(&MELEE_CONE, Point3::new(0.0, 0.0, 0.0), Vector2::new(1.0, 0.0));
        assert!(cells.contains(&GridCell::new(1, 0)));
        assert!(cells.contains(&GridCell::new(1, 1)));
        assert!(!cells.contains(&GridCell::new(-1, 0)));
        // directly beside the player is exactly 90° off, which is excluded
        assert!(!cells.contains(&GridCell::new(0, 1)));
        // the player's own cell is inside the dead zone
        assert!(!cells.contains(&GridCell::new(0, 0)));
        // (2, 0) is 4 units away, beyond the 3.5 range
        assert!(!cells.contains(&GridCell::new(2, 0)));
    }

    #[test]
    fn ranged_cone_is_narrow() {
        let resolver = resolver();
        let origin = Point3::new(0.0, 0.0, 0.0);
        let cells = resolver.cone_cells(&RANGED_CONE, origin, Vector2::new(1.0, 0.0));

        let (x, z) = at_angle(5.0, 5.0);
        assert!(cells.contains(&GridCell::from_world(x, z, 2.0)));
        let (x, z) = at_angle(20.0, 5.0);
        assert!(!cells.contains(&GridCell::from_world(x, z, 2.0)));
        assert_eq!(
            cells,
            vec![
                GridCell::new(1, 0),
                GridCell::new(2, 0),
                GridCell::new(3, 0),
                GridCell::new(4, -1),
                GridCell::new(4, 0),
                GridCell::new(4, 1),
            ]
        );
    }

    #[test]
    fn aim_need_not_be_unit_length() {
        let resolver = resolver();
        let origin = Point3::new(3.0, 0.0, -1.0);
        let unit = resolver.cone_cells(&MELEE_CONE, origin, Vector2::new(0.0, 1.0));
        let long = resolver.cone_cells(&MELEE_CONE, origin, Vector2::new(0.0, 7.5));
        assert_eq!(unit, long);
    }

    #[test]
    fn zero_aim_does_nothing() {
        let resolver = resolver();
        let origin = Point3::new(0.0, 0.0, 0.0);
        assert!(resolver.cone_cells(&MELEE_CONE, origin, Vector2::new(0.0, 0.0)).is_empty());
        assert_eq!(resolver.build_target(origin, Vector2::new(0.0, 0.0)), None);
    }

    #[test]
    fn build_target_is_ahead() {
        let (x, z) = resolver()
            .build_target(Point3::new(1.0, 0.0, 1.0), Vector2::new(0.0, -2.0))
            .unwrap_or_default();
        assert_relative_eq!(x, 1.0);
        assert_relative_eq!(z, -3.0);
    }

    #[test]
    fn cone_constants() {
        assert_relative_eq!(RANGED_CONE.min_dot, 15f32.to_radians().cos(), epsilon = 1e-6);
        assert_eq!(AttackClass::Builder.cone(), None);
    }
}

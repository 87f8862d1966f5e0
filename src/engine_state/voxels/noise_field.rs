//! # Noise Field
//!
//! A seeded 2D simplex noise function sampled once per grid cell during chunk
//! generation. Sampling always happens in global grid space, so two adjacent
//! chunks read one continuous field and their borders line up.

use noise::{NoiseFn, Simplex};

use super::coords::GridCell;

/// Deterministic, continuous 2D scalar noise in `[-1, 1]`.
///
/// The seed is fixed for the lifetime of the field. Sampling has no side
/// effects, so a field can be shared freely between chunk generations.
#[derive(Clone, Debug)]
pub struct NoiseField {
    simplex: Simplex,
    seed: u32,
    scale: f64,
}

impl NoiseField {
    /// Creates a noise field.
    ///
    /// # Arguments
    /// * `seed` - Noise seed, fixed for the life of the field
    /// * `scale` - Frequency applied to grid coordinates before sampling
    pub fn new(seed: u32, scale: f64) -> Self {
        Self {
            simplex: Simplex::new(seed),
            seed,
            scale,
        }
    }

    /// The seed this field was built with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Samples the raw field at `(x, z)`.
    ///
    /// The result is clamped to `[-1, 1]`; the simplex implementation can
    /// overshoot that range by a hair near lattice points.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        self.simplex.get([x, z]).clamp(-1.0, 1.0)
    }

    /// Samples the field for a grid cell in global coordinates.
    pub fn sample_cell(&self, cell: GridCell) -> f64 {
        self.sample(cell.x as f64 * self.scale, cell.z as f64 * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn same_seed_same_field() {
        let a = NoiseField::new(7, 0.1);
        let b = NoiseField::new(7, 0.1);
        for x in -20..20 {
            for z in -20..20 {
                let cell = GridCell::new(x * 3, z * 5);
                assert_eq!(a.sample_cell(cell), b.sample_cell(cell));
            }
        }
    }

    #[test]
    fn samples_stay_in_range() {
        let field = NoiseField::new(1234, 0.1);
        for x in -64..64 {
            for z in -64..64 {
                let value = field.sample_cell(GridCell::new(x, z));
                assert!((-1.0..=1.0).contains(&value), "{value} out of range");
            }
        }
    }

    #[test]
    fn neighbouring_cells_vary_smoothly() {
        let field = NoiseField::new(99, 0.1);
        for x in -32..32 {
            let here = field.sample_cell(GridCell::new(x, 4));
            let next = field.sample_cell(GridCell::new(x + 1, 4));
            assert_relative_eq!(here, next, epsilon = 0.5);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = NoiseField::new(1, 0.1);
        let b = NoiseField::new(2, 0.1);
        let differs = (0..64).any(|x| a.sample_cell(GridCell::new(x, 3)) != b.sample_cell(GridCell::new(x, 3)));
        assert!(differs);
    }
}

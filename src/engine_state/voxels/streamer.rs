//! # World Streamer
//!
//! Keeps the square window of chunks around a focus position resident.

use std::collections::HashSet;

use super::{chunk_store::ChunkStore, collision::CollisionIndex, coords::ChunkCoord};
use crate::engine_state::rendering::Renderer;

/// What one streaming update did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamReport {
    /// Chunks generated this update
    pub generated: usize,
    /// Chunks evicted this update
    pub evicted: usize,
}

impl StreamReport {
    /// Whether the update changed the resident set.
    pub fn changed(&self) -> bool {
        self.generated > 0 || self.evicted > 0
    }
}

/// Loads and unloads chunks as the focus position moves.
#[derive(Debug)]
pub struct WorldStreamer {
    render_distance: u32,
    focus: Option<ChunkCoord>,
}

impl WorldStreamer {
    /// Creates a streamer that keeps chunks within `render_distance`
    /// (Chebyshev, inclusive) of the focus chunk.
    pub fn new(render_distance: u32) -> Self {
        WorldStreamer {
            render_distance,
            focus: None,
        }
    }

    /// Streaming radius in chunks.
    pub fn render_distance(&self) -> u32 {
        self.render_distance
    }

    /// Focus chunk from the last update.
    pub fn focus(&self) -> Option<ChunkCoord> {
        self.focus
    }

    /// Brings the resident set in line with the window around `(focus_x, focus_z)`.
    ///
    /// Missing chunks in the window are generated; resident chunks outside it
    /// are evicted. Calling again with the same position does nothing.
    pub fn update(
        &mut self,
        focus_x: f32,
        focus_z: f32,
        store: &mut ChunkStore,
        collision: &mut CollisionIndex,
        renderer: &mut dyn Renderer,
    ) -> StreamReport {
        let focus = ChunkCoord::from_world(focus_x, focus_z, store.chunk_size(), store.tile_size());
        self.focus = Some(focus);

        let window: HashSet<ChunkCoord> = focus.window(self.render_distance).collect();
        let mut report = StreamReport::default();

        for coord in &window {
            if !store.is_resident(*coord) {
                store.generate(*coord, collision, renderer);
                report.generated += 1;
            }
        }

        let stale: Vec<ChunkCoord> = store.resident().filter(|coord| !window.contains(coord)).collect();
        for coord in stale {
            if store.evict(coord, collision, renderer) {
                report.evicted += 1;
            }
        }

        report
    }
}

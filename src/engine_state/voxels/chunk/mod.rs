//! # Chunk Module
//!
//! A chunk is the generated content for one [`ChunkCoord`]: the terrain
//! record of every cell, the visuals drawn for them, and the set of cells the
//! chunk contributes to the collision index.
//!
//! ## Ownership
//!
//! The chunk exclusively owns its scene group and every visual in it. Visuals
//! live in one of three places:
//! - `ground`: floor tiles that never block
//! - `blockers`: one visual per blocked cell, keyed by that cell. The keys of
//!   this map are the chunk's ownership list; the collision index holds a cell
//!   exactly while some resident chunk has it here.
//! - `fading`: visuals of destroyed blockers finishing their shrink before
//!   release
//!
//! [`Chunk::release`] frees all three and the group, so a chunk's visuals are
//! released exactly once whether they are destroyed first or evicted first.

use std::collections::HashMap;

use web_time::Duration;

use super::{
    block::{block_type::Material, TerrainCellRecord},
    coords::{ChunkCoord, GridCell},
};
use crate::engine_state::rendering::{GroupHandle, Renderer, VisualHandle};

pub mod chunk_creation;
pub mod generation;

/// Where a blocker came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockerOrigin {
    /// Generated from a solid terrain record.
    Terrain,
    /// Placed by a builder after generation.
    Placed,
}

/// A blocked cell owned by a chunk, with the visual that represents it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Blocker {
    /// Material of the obstacle
    pub material: Material,
    /// Visual to remove when the obstacle is destroyed
    pub visual: VisualHandle,
    /// Whether the obstacle was generated or placed
    pub origin: BlockerOrigin,
}

/// A destroyed blocker's visual, waiting out its shrink transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FadingVisual {
    /// The shrinking visual
    pub visual: VisualHandle,
    /// Clock time after which the visual is released
    pub release_at: Duration,
}

/// Generated content for one chunk coordinate.
pub struct Chunk {
    coord: ChunkCoord,
    chunk_size: u32,
    group: GroupHandle,
    records: Vec<TerrainCellRecord>,
    ground: Vec<VisualHandle>,
    blockers: HashMap<GridCell, Blocker>,
    fading: Vec<FadingVisual>,
}

impl Chunk {
    /// The chunk's coordinate.
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Scene group holding this chunk's visuals.
    pub fn group(&self) -> GroupHandle {
        self.group
    }

    /// Terrain records in generation order.
    pub fn records(&self) -> &[TerrainCellRecord] {
        &self.records
    }

    /// The terrain record for a cell, if the cell is inside this chunk.
    pub fn record_at(&self, cell: GridCell) -> Option<&TerrainCellRecord> {
        if cell.chunk(self.chunk_size) != self.coord {
            return None;
        }
        let origin = self.coord.origin(self.chunk_size);
        let index = (cell.z - origin.z) as usize * self.chunk_size as usize + (cell.x - origin.x) as usize;
        self.records.get(index)
    }

    /// Cells this chunk currently contributes to the collision index.
    pub fn owned_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.blockers.keys().copied()
    }

    /// Number of cells this chunk currently contributes to the collision index.
    pub fn owned_count(&self) -> usize {
        self.blockers.len()
    }

    /// Whether this chunk owns a blocker at `cell`.
    pub fn owns(&self, cell: GridCell) -> bool {
        self.blockers.contains_key(&cell)
    }

    /// The blocker at `cell`, if any.
    pub fn blocker(&self, cell: GridCell) -> Option<&Blocker> {
        self.blockers.get(&cell)
    }

    /// Visuals waiting out their removal transition.
    pub fn fading(&self) -> &[FadingVisual] {
        &self.fading
    }

    /// Total visuals this chunk is responsible for releasing.
    pub fn visual_count(&self) -> usize {
        self.ground.len() + self.blockers.len() + self.fading.len()
    }

    pub(crate) fn insert_blocker(&mut self, cell: GridCell, blocker: Blocker) {
        self.blockers.insert(cell, blocker);
    }

    pub(crate) fn take_blocker(&mut self, cell: GridCell) -> Option<Blocker> {
        self.blockers.remove(&cell)
    }

    pub(crate) fn push_fading(&mut self, fading: FadingVisual) {
        self.fading.push(fading);
    }

    /// Detaches and releases every fading visual whose deadline has passed.
    ///
    /// # Returns
    /// The number of visuals released.
    pub(crate) fn release_expired(&mut self, now: Duration, renderer: &mut dyn Renderer) -> usize {
        let group = self.group;
        let before = self.fading.len();
        self.fading.retain(|fading| {
            if fading.release_at <= now {
                renderer.detach_visual(group, fading.visual);
                renderer.release_visual(fading.visual);
                false
            } else {
                true
            }
        });
        before - self.fading.len()
    }

    /// Releases every visual and the scene group.
    ///
    /// # Returns
    /// The cells this chunk owned, which the caller must clear from the
    /// collision index.
    pub(crate) fn release(self, renderer: &mut dyn Renderer) -> Vec<GridCell> {
        let group = self.group;
        let fading = self.fading.iter().map(|fading| fading.visual);
        let blockers = self.blockers.values().map(|blocker| blocker.visual);
        for visual in self.ground.iter().copied().chain(blockers).chain(fading) {
            renderer.detach_visual(group, visual);
            renderer.release_visual(visual);
        }
        renderer.release_group(group);
        self.blockers.into_keys().collect()
    }
}

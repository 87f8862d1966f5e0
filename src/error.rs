//! Error types.
//!
//! Rejected gameplay operations (destroying an empty cell, building outside
//! the loaded world) are not errors; they report `false` and the caller moves
//! on. The types here cover configuration loading and broken world
//! invariants.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine_state::voxels::coords::{ChunkCoord, GridCell};

/// Failure to load or validate a [`GameConfig`](crate::config::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid JSON for the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the simulation cannot run with.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Offending field, dotted from the root
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// The collision index and the resident chunks disagree.
///
/// This is a programming error, never a runtime condition to recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyFault {
    /// A blocked cell whose chunk is not resident.
    #[error("cell {cell} is blocked but chunk {chunk} is not resident")]
    OrphanCell {
        /// The blocked cell
        cell: GridCell,
        /// Chunk the cell belongs to
        chunk: ChunkCoord,
    },

    /// A blocked cell whose resident chunk does not own it.
    #[error("cell {cell} is blocked but not owned by chunk {chunk}")]
    UnownedCell {
        /// The blocked cell
        cell: GridCell,
        /// Chunk the cell belongs to
        chunk: ChunkCoord,
    },

    /// A chunk owns a cell that is missing from the collision index.
    #[error("chunk {chunk} owns cell {cell} but the cell is not blocked")]
    MissingFromIndex {
        /// The owned cell
        cell: GridCell,
        /// Owning chunk
        chunk: ChunkCoord,
    },

    /// A chunk owns a cell outside its own bounds.
    #[error("chunk {chunk} owns cell {cell} outside its bounds")]
    MisplacedBlocker {
        /// The owned cell
        cell: GridCell,
        /// Owning chunk
        chunk: ChunkCoord,
    },
}

//! # Voxel World
//!
//! Procedural, streamed, destructible terrain.
//!
//! ## Architecture
//!
//! * **Coords**: grid cells and chunk coordinates over continuous world space
//! * **NoiseField**: seeded 2D noise sampled per cell in global coordinates
//! * **Block**: material classes and terrain cell records
//! * **Chunk**: generated records plus the visuals and blocked cells they own
//! * **ChunkStore**: resident chunks; generation registers blocked cells and
//!   eviction clears them
//! * **CollisionIndex**: sparse set of blocked cells
//! * **WorldStreamer**: keeps the chunk window around the focus resident
//! * **TerrainMutator**: destroy and place on world coordinates
//! * **World**: owns all of the above for one arena
//!
//! ## Data Flow
//!
//! 1. The focus position goes to the streamer
//! 2. The streamer asks the store to generate missing chunks and evict stale ones
//! 3. Generation and eviction update the collision index
//! 4. Attacks resolve to cells and go through the mutator, which updates the
//!    collision index and the owning chunk together
//!
//! ## Threading
//!
//! Everything here runs on the simulation thread inside one tick. Each public
//! operation completes before returning, so no other operation ever observes a
//! half-generated chunk or a half-applied mutation.

pub mod block;
pub mod chunk;
pub mod chunk_store;
pub mod collision;
pub mod coords;
pub mod mutation;
pub mod noise_field;
pub mod streamer;
pub mod world;

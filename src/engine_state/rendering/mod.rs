//! Rendering surface for the arena.
//!
//! The simulation never talks to a graphics API directly. Chunks and blocks
//! materialize themselves through the [`Renderer`] trait, which hands out
//! opaque handles for groups (one per chunk) and visuals (one per tile, prop
//! or placed block). Whoever implements the trait owns the GPU side; the
//! simulation owns the handles and guarantees each one is released exactly
//! once.

mod headless;
mod instance;

pub use headless::HeadlessRenderer;
pub use instance::{VisualInstance, VisualShape};

/// Opaque handle to a single drawable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(pub u64);

/// Opaque handle to a group of drawables that is added to and removed from
/// the scene as a unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupHandle(pub u64);

/// The operations the world core needs from a renderer.
///
/// Implementations are driven from the simulation thread only.
pub trait Renderer {
    /// Creates an empty group and adds it to the scene.
    fn create_group(&mut self) -> GroupHandle;

    /// Removes a group from the scene and frees it.
    ///
    /// Visuals still attached to the group are detached but not released;
    /// callers release them explicitly.
    fn release_group(&mut self, group: GroupHandle);

    /// Creates a visual from instance data. The visual is not yet in the scene.
    fn create_visual(&mut self, instance: &VisualInstance) -> VisualHandle;

    /// Adds a visual to a group.
    fn attach_visual(&mut self, group: GroupHandle, visual: VisualHandle);

    /// Removes a visual from a group without freeing it.
    fn detach_visual(&mut self, group: GroupHandle, visual: VisualHandle);

    /// Frees a visual and its GPU resources.
    fn release_visual(&mut self, visual: VisualHandle);

    /// Uniformly scales a visual. Purely cosmetic.
    fn set_visual_scale(&mut self, visual: VisualHandle, scale: f32);
}

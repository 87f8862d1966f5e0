//! # Application State
//!
//! The boundary between the outside world and the simulation. Everything the
//! simulation needs from the player's devices in one tick is captured in an
//! [`InputSnapshot`], read through the [`InputSource`] trait:
//! - [`input_manager::InputManager`] for a winit window
//! - [`ScriptedInput`] for headless sessions and tests

pub mod input_manager;
pub mod input_state;

use std::collections::VecDeque;

use cgmath::Vector2;

/// Player intent for one tick.
///
/// Vectors use screen convention: `x` right, `y` up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InputSnapshot {
    /// Unit length or zero
    pub move_vector: Vector2<f32>,
    /// Unit length or zero. Zero means no aim and nothing fires.
    pub aim_vector: Vector2<f32>,
    /// Whether the attack trigger is held
    pub firing: bool,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        InputSnapshot {
            move_vector: Vector2::new(0.0, 0.0),
            aim_vector: Vector2::new(0.0, 0.0),
            firing: false,
        }
    }
}

impl InputSnapshot {
    /// Walk in a direction without attacking.
    pub fn walking(x: f32, y: f32) -> Self {
        InputSnapshot {
            move_vector: Vector2::new(x, y),
            ..Self::default()
        }
    }

    /// Stand still and fire in a direction.
    pub fn firing_at(x: f32, y: f32) -> Self {
        InputSnapshot {
            aim_vector: Vector2::new(x, y),
            firing: true,
            ..Self::default()
        }
    }
}

/// Anything that can report player intent once per tick.
pub trait InputSource {
    /// Samples the input for the current tick.
    fn snapshot(&mut self) -> InputSnapshot;
}

/// Replays a fixed sequence of snapshots, then idles.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<InputSnapshot>,
}

impl ScriptedInput {
    /// Creates a script that plays `script` one snapshot per tick.
    pub fn new(script: impl IntoIterator<Item = InputSnapshot>) -> Self {
        ScriptedInput {
            queue: script.into_iter().collect(),
        }
    }

    /// Queues `snapshot` for the next `ticks` ticks.
    pub fn repeat(&mut self, snapshot: InputSnapshot, ticks: usize) -> &mut Self {
        self.queue.extend(std::iter::repeat(snapshot).take(ticks));
        self
    }

    /// Ticks left before the script runs dry.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn snapshot(&mut self) -> InputSnapshot {
        self.queue.pop_front().unwrap_or_default()
    }
}

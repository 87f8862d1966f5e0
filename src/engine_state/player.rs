//! # Player
//!
//! The controllable entity: moves across the grid with sliding collision and
//! attacks in the aim direction, gated by a cooldown.
//!
//! Input arrives in screen convention (y up). On the XZ plane that becomes
//! `(x, -y)`: pushing up moves toward negative Z.

use cgmath::{InnerSpace, Point3, Vector2};
use log::debug;
use web_time::Duration;

use super::{
    clock::AttackCooldown,
    combat::{AttackClass, AttackOutcome, CombatResolver},
    rendering::Renderer,
    voxels::world::World,
};
use crate::{application_state::InputSnapshot, config::PlayerConfig};

/// What a player did during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PlayerUpdate {
    /// Whether the position changed
    pub moved: bool,
    /// The attack that fired this tick, if any
    pub attack: Option<AttackOutcome>,
}

/// A player entity.
#[derive(Debug, Clone)]
pub struct Player {
    position: Point3<f32>,
    /// Yaw around +Y in radians, `atan2(dx, dz)` of the last move
    facing: f32,
    class: AttackClass,
    speed: f32,
    cooldown: AttackCooldown,
    resolver: CombatResolver,
}

impl Player {
    /// Creates a player at the world origin.
    ///
    /// # Arguments
    /// * `config` - Movement and attack settings
    /// * `tile_size` - Tile size of the world the player lives in
    pub fn new(config: &PlayerConfig, tile_size: f32) -> Self {
        Player {
            position: Point3::new(0.0, 0.0, 0.0),
            facing: 0.0,
            class: config.attack_class,
            speed: config.speed,
            cooldown: AttackCooldown::new(config.attack_cooldown()),
            resolver: CombatResolver::new(tile_size, config.build_distance),
        }
    }

    /// Moves the player to a position without collision checks.
    pub fn set_position(&mut self, x: f32, z: f32) {
        self.position = Point3::new(x, self.position.y, z);
    }

    /// Current position. `y` stays at the ground plane.
    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    /// Yaw of the last move, in radians.
    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// The attack class chosen at creation.
    pub fn class(&self) -> AttackClass {
        self.class
    }

    /// Converts a screen-space aim into a direction on the XZ plane.
    pub fn aim_direction(screen_aim: Vector2<f32>) -> Vector2<f32> {
        Vector2::new(screen_aim.x, -screen_aim.y)
    }

    /// Applies one tick of movement.
    ///
    /// The full step is taken when its destination tile is free. Otherwise
    /// the player slides along X, or failing that along Z. Only the tile
    /// under the player's centre is checked.
    ///
    /// # Returns
    /// `true` if the position changed.
    pub fn step(&mut self, move_vector: Vector2<f32>, world: &World) -> bool {
        let dx = move_vector.x * self.speed;
        let dz = -move_vector.y * self.speed;
        if dx == 0.0 && dz == 0.0 {
            return false;
        }

        let (x, z) = (self.position.x, self.position.z);
        let (next_x, next_z) = (x + dx, z + dz);
        let moved = if !world.is_blocked(next_x, next_z) {
            self.set_position(next_x, next_z);
            true
        } else if !world.is_blocked(next_x, z) {
            self.set_position(next_x, z);
            true
        } else if !world.is_blocked(x, next_z) {
            self.set_position(x, next_z);
            true
        } else {
            false
        };

        self.facing = dx.atan2(dz);
        moved
    }

    /// Fires an attack at `now` if the cooldown allows it.
    ///
    /// A zero aim never fires and leaves the cooldown untouched.
    ///
    /// # Returns
    /// The outcome, or `None` if nothing fired.
    pub fn attack(
        &mut self,
        screen_aim: Vector2<f32>,
        now: Duration,
        world: &mut World,
        renderer: &mut dyn Renderer,
    ) -> Option<AttackOutcome> {
        if screen_aim.magnitude2() == 0.0 || !self.cooldown.try_trigger(now) {
            return None;
        }

        let aim = Self::aim_direction(screen_aim);
        let mut mutator = world.mutator(renderer, now);
        let outcome = self.resolver.resolve(self.class, self.position, aim, &mut mutator);
        debug!(
            "{:?} attack at ({:.2}, {:.2}): {} candidates, {} destroyed, placed {}",
            self.class, self.position.x, self.position.z, outcome.candidates, outcome.destroyed, outcome.placed
        );
        Some(outcome)
    }

    /// Runs one tick of input: movement first, then the attack.
    pub fn update(
        &mut self,
        input: &InputSnapshot,
        now: Duration,
        world: &mut World,
        renderer: &mut dyn Renderer,
    ) -> PlayerUpdate {
        let moved = self.step(input.move_vector, world);
        let attack = if input.firing {
            self.attack(input.aim_vector, now, world, renderer)
        } else {
            None
        };
        PlayerUpdate { moved, attack }
    }
}

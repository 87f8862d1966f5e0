//! # Engine State Module
//!
//! The simulation side of the arena.
//!
//! ## Key Components
//!
//! * `GameState` - Owns the world and the player and advances them one tick at a time
//! * `clock` - Monotonic time and the attack cooldown
//! * `combat` - Attack classes and cone resolution
//! * `player` - Movement with sliding collision and attack triggering
//! * `rendering` - The renderer interface the world materializes through
//! * `voxels` - Terrain generation, streaming, collision and mutation
//!
//! ## Tick Order
//!
//! 1. The player moves and, if firing, attacks
//! 2. The world streams chunks around the player's new position
//! 3. Destroyed visuals whose shrink transition has ended are released
//!
//! Everything runs on the calling thread and every step completes before the
//! next begins.

use log::info;
use web_time::Duration;

use crate::{application_state::InputSnapshot, config::GameConfig};

pub mod clock;
pub mod combat;
pub mod player;
pub mod rendering;
pub mod voxels;

use player::{Player, PlayerUpdate};
use rendering::Renderer;
use voxels::{streamer::StreamReport, world::World};

/// What one tick did.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Movement and attack results
    pub player: PlayerUpdate,
    /// Chunks generated and evicted
    pub stream: StreamReport,
    /// Destroyed visuals released this tick
    pub released: usize,
}

/// The running arena: one world and the player in it.
pub struct GameState {
    world: World,
    player: Player,
    config: GameConfig,
    ticks: u64,
}

impl GameState {
    /// Creates the arena and streams in the chunks around the spawn point.
    ///
    /// # Arguments
    /// * `config` - A validated configuration
    /// * `renderer` - Where the initial chunks materialize
    pub fn new(config: GameConfig, renderer: &mut dyn Renderer) -> Self {
        let mut world = World::new(&config.world);
        let player = Player::new(&config.player, config.world.tile_size);

        let spawn = player.position();
        let report = world.update(spawn.x, spawn.z, renderer);
        info!(
            "arena ready: {} chunks resident, {} blocked cells, player class {:?}",
            report.generated,
            world.collision().len(),
            player.class()
        );

        GameState {
            world,
            player,
            config,
            ticks: 0,
        }
    }

    /// Advances the simulation by one tick.
    ///
    /// # Arguments
    /// * `input` - Player intent for this tick
    /// * `now` - Clock time of this tick; must not go backwards
    /// * `renderer` - Receives every visual change
    pub fn tick(&mut self, input: &InputSnapshot, now: Duration, renderer: &mut dyn Renderer) -> TickReport {
        let player = self.player.update(input, now, &mut self.world, renderer);

        let position = self.player.position();
        let stream = self.world.update(position.x, position.z, renderer);
        let released = self.world.flush_removals(now, renderer);

        self.ticks += 1;
        TickReport {
            player,
            stream,
            released,
        }
    }

    /// Releases everything the arena put into the renderer.
    pub fn shutdown(&mut self, renderer: &mut dyn Renderer) {
        info!("shutting down after {} ticks", self.ticks);
        self.world.teardown(renderer);
    }

    /// The voxel world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The voxel world, for direct destroy and place calls.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The player, for teleports and scripted setups.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// The configuration the arena was created with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::HeadlessRenderer;

    fn small_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.world.chunk_size = 8;
        config.world.render_distance = 1;
        config.world.seed = 5;
        config.world.prop_seed = Some(5);
        config
    }

    #[test]
    fn spawn_streams_the_window() {
        let mut renderer = HeadlessRenderer::new();
        let state = GameState::new(small_config(), &mut renderer);
        assert_eq!(state.world().store().len(), 9);
        assert_eq!(renderer.live_groups(), 9);
    }

    #[test]
    fn idle_ticks_change_nothing() {
        let mut renderer = HeadlessRenderer::new();
        let mut state = GameState::new(small_config(), &mut renderer);
        let visuals = renderer.live_visuals();
        for ms in 0..5 {
            let report = state.tick(&InputSnapshot::default(), Duration::from_millis(ms * 16), &mut renderer);
            assert_eq!(report, TickReport::default());
        }
        assert_eq!(renderer.live_visuals(), visuals);
        assert_eq!(state.ticks(), 5);
    }

    #[test]
    fn shutdown_empties_the_scene() {
        let mut renderer = HeadlessRenderer::new();
        let mut state = GameState::new(small_config(), &mut renderer);
        state.shutdown(&mut renderer);
        assert_eq!(renderer.live_visuals(), 0);
        assert_eq!(renderer.live_groups(), 0);
    }
}

//! # Voxel Arena Headless Session
//!
//! Runs a short scripted session against the in-memory renderer and logs what
//! happened. Useful for checking a configuration file or a seed without a
//! window.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

use log::{info, warn};
use voxel_arena::{
    application_state::{InputSnapshot, InputSource, ScriptedInput},
    config::GameConfig,
    engine_state::{
        clock::{Clock, ManualClock},
        rendering::HeadlessRenderer,
        GameState,
    },
    init_logger,
};
use web_time::Duration;

/// Simulated frame time.
const TICK: Duration = Duration::from_millis(16);

fn load_config() -> GameConfig {
    let Some(path) = std::env::args().nth(1) else {
        return GameConfig::default();
    };
    match GameConfig::load(&path) {
        Ok(config) => config,
        Err(err) => {
            warn!("ignoring {}: {}; using defaults", path, err);
            GameConfig::default()
        }
    }
}

/// Walk, fight, then cross a few chunk borders.
fn script() -> ScriptedInput {
    let mut input = ScriptedInput::default();
    input
        .repeat(InputSnapshot::firing_at(1.0, 0.0), 60)
        .repeat(InputSnapshot::walking(1.0, 0.0), 120)
        .repeat(InputSnapshot::firing_at(0.0, -1.0), 60)
        .repeat(InputSnapshot::walking(0.0, -1.0), 300)
        .repeat(InputSnapshot::firing_at(-1.0, 0.0), 60);
    input
}

fn main() {
    init_logger();

    let config = load_config();
    let clock = ManualClock::new();
    let mut renderer = HeadlessRenderer::new();
    let mut state = GameState::new(config, &mut renderer);
    let mut input = script();

    let (mut attacks, mut destroyed, mut placed) = (0, 0, 0);
    let (mut generated, mut evicted) = (0, 0);

    while input.remaining() > 0 {
        clock.advance(TICK);
        let snapshot = input.snapshot();
        let report = state.tick(&snapshot, clock.now(), &mut renderer);

        if let Some(outcome) = report.player.attack {
            attacks += 1;
            destroyed += outcome.destroyed;
            placed += usize::from(outcome.placed);
        }
        generated += report.stream.generated;
        evicted += report.stream.evicted;
    }

    let position = state.player().position();
    info!(
        "{} ticks: player at ({:.2}, {:.2}), {} attacks, {} destroyed, {} placed",
        state.ticks(),
        position.x,
        position.z,
        attacks,
        destroyed,
        placed
    );
    info!(
        "streaming: {} generated, {} evicted, {} resident, {} blocked cells, {} live visuals",
        generated,
        evicted,
        state.world().store().len(),
        state.world().collision().len(),
        renderer.live_visuals()
    );
    match state.world().check_consistency() {
        Ok(()) => info!("collision index consistent with resident chunks"),
        Err(fault) => warn!("inconsistent world: {}", fault),
    }

    state.shutdown(&mut renderer);
    info!(
        "shutdown: {} visuals released, {} left, {} invalid releases",
        renderer.released_visuals(),
        renderer.live_visuals(),
        renderer.invalid_releases()
    );
}

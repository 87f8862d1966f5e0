//! Game configuration.
//!
//! Loaded once at startup from JSON. Every field has a default, so `{}` is a
//! complete configuration and a file only needs the values it changes.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::{engine_state::combat::AttackClass, error::ConfigError};

/// Largest accepted chunk edge, in cells.
pub const MAX_CHUNK_SIZE: u32 = 1024;

/// Largest accepted streaming radius, in chunks.
pub const MAX_RENDER_DISTANCE: u32 = 64;

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Terrain and streaming settings
    pub world: WorldConfig,
    /// Player movement and attack settings
    pub player: PlayerConfig,
}

/// Terrain generation and streaming settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Grid cells per chunk edge
    pub chunk_size: u32,
    /// World units per grid cell
    pub tile_size: f32,
    /// Streaming radius in chunks (Chebyshev, inclusive)
    pub render_distance: u32,
    /// Frequency applied to grid coordinates before sampling noise
    pub noise_scale: f64,
    /// Noise seed
    pub seed: u32,
    /// Seed for tree placement. `None` draws one at random per world.
    pub prop_seed: Option<u64>,
    /// Chance that a cell in the prop band grows a tree
    pub prop_chance: f64,
    /// How long a destroyed obstacle shrinks before its visual is released
    pub removal_delay_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            chunk_size: 16,
            tile_size: 2.0,
            render_distance: 2,
            noise_scale: 0.1,
            seed: 0,
            prop_seed: None,
            prop_chance: 0.1,
            removal_delay_ms: 50,
        }
    }
}

impl WorldConfig {
    /// Removal delay as a duration.
    pub fn removal_delay(&self) -> Duration {
        Duration::from_millis(self.removal_delay_ms)
    }
}

/// Player movement and attack settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// World units moved per tick at full stick deflection
    pub speed: f32,
    /// Minimum time between two attacks
    pub attack_cooldown_ms: u64,
    /// The player's attack class
    pub attack_class: AttackClass,
    /// Distance in front of the player a builder places blocks
    pub build_distance: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            speed: 0.25,
            attack_cooldown_ms: 500,
            attack_class: AttackClass::Melee,
            build_distance: 4.0,
        }
    }
}

impl PlayerConfig {
    /// Attack cooldown as a duration.
    pub fn attack_cooldown(&self) -> Duration {
        Duration::from_millis(self.attack_cooldown_ms)
    }
}

impl GameConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Checks every value the simulation depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        if !(1..=MAX_CHUNK_SIZE).contains(&world.chunk_size) {
            return Err(invalid(
                "world.chunk_size",
                &format!("must be between 1 and {MAX_CHUNK_SIZE}"),
            ));
        }
        if world.render_distance > MAX_RENDER_DISTANCE {
            return Err(invalid(
                "world.render_distance",
                &format!("must be at most {MAX_RENDER_DISTANCE}"),
            ));
        }
        if !(world.tile_size.is_finite() && world.tile_size > 0.0) {
            return Err(invalid("world.tile_size", "must be a positive number"));
        }
        if !(world.noise_scale.is_finite() && world.noise_scale > 0.0) {
            return Err(invalid("world.noise_scale", "must be a positive number"));
        }
        if !(0.0..=1.0).contains(&world.prop_chance) {
            return Err(invalid("world.prop_chance", "must be between 0 and 1"));
        }

        let player = &self.player;
        if !(player.speed.is_finite() && player.speed > 0.0) {
            return Err(invalid("player.speed", "must be a positive number"));
        }
        if !(player.build_distance.is_finite() && player.build_distance >= 0.0) {
            return Err(invalid("player.build_distance", "must be zero or more"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_default() {
        let config = GameConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.world.chunk_size, 16);
        assert_eq!(config.world.tile_size, 2.0);
        assert_eq!(config.player.attack_cooldown(), Duration::from_millis(500));
    }

    #[test]
    fn partial_overrides() {
        let config = GameConfig::from_json_str(
            r#"{ "world": { "seed": 9, "prop_seed": 4 }, "player": { "attack_class": "builder" } }"#,
        )
        .unwrap();
        assert_eq!(config.world.seed, 9);
        assert_eq!(config.world.prop_seed, Some(4));
        assert_eq!(config.world.render_distance, 2);
        assert_eq!(config.player.attack_class, AttackClass::Builder);
    }

    #[test]
    fn rejects_bad_values() {
        let err = GameConfig::from_json_str(r#"{ "world": { "chunk_size": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "world.chunk_size", .. }));

        let err = GameConfig::from_json_str(r#"{ "world": { "chunk_size": 70000 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "world.chunk_size", .. }));

        let err = GameConfig::from_json_str(r#"{ "world": { "render_distance": 4294967295 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "world.render_distance", .. }));

        let err = GameConfig::from_json_str(r#"{ "world": { "prop_chance": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "world.prop_chance", .. }));

        let err = GameConfig::from_json_str(r#"{ "player": { "speed": -1 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "player.speed", .. }));
    }

    #[test]
    fn accepts_the_largest_world() {
        let text = format!(
            r#"{{ "world": {{ "chunk_size": {MAX_CHUNK_SIZE}, "render_distance": {MAX_RENDER_DISTANCE} }} }}"#
        );
        let config = GameConfig::from_json_str(&text).unwrap();
        assert_eq!(config.world.chunk_size, MAX_CHUNK_SIZE);
        assert_eq!(config.world.render_distance, MAX_RENDER_DISTANCE);
    }

    #[test]
    fn rejects_unknown_fields_and_bad_json() {
        assert!(matches!(
            GameConfig::from_json_str(r#"{ "wrold": {} }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(GameConfig::from_json_str("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

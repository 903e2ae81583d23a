//! Game configuration
//!
//! Loaded from TOML or RON through the engine's [`Config`] trait. Every
//! section falls back to its defaults, so a config file only needs the
//! values it changes.

use crate::collision::CategoryPair;
use gridfire_engine::config::{Config, ConfigError, EngineConfig};
use serde::{Deserialize, Serialize};

/// Largest value a damage or heal roll may produce
pub const MAX_ROLL: u32 = 10_000;

/// Inclusive integer range for damage and heal rolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRange {
    /// Smallest possible roll
    pub min: u32,
    /// Largest possible roll
    pub max: u32,
}

impl RollRange {
    /// Create a range from `min` to `max` inclusive
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// A range that always rolls `value`
    pub const fn fixed(value: u32) -> Self {
        Self { min: value, max: value }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::Invalid(format!(
                "{name}: min {} is greater than max {}",
                self.min, self.max
            )));
        }
        if self.max > MAX_ROLL {
            return Err(ConfigError::Invalid(format!(
                "{name}: max {} is above the {MAX_ROLL} roll limit",
                self.max
            )));
        }
        Ok(())
    }
}

/// Damage, healing and respawn tuning applied by reaction hooks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Avatar health cap and starting health
    pub avatar_max_health: f32,
    /// Damage the avatar takes from a projectile
    pub projectile_damage_to_avatar: RollRange,
    /// Damage an adversary takes from a projectile
    pub projectile_damage_to_adversary: RollRange,
    /// Health restored by a pickup
    pub pickup_heal: RollRange,
    /// Seconds before a consumed pickup comes back
    pub pickup_respawn_secs: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            avatar_max_health: 100.0,
            projectile_damage_to_avatar: RollRange::new(5, 15),
            projectile_damage_to_adversary: RollRange::new(3, 8),
            pickup_heal: RollRange::new(10, 25),
            pickup_respawn_secs: 10.0,
        }
    }
}

/// Which category pairs the collision manager tests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Enabled category pairs
    pub enabled_pairs: Vec<CategoryPair>,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            enabled_pairs: CategoryPair::ALL.to_vec(),
        }
    }
}

/// Board dimensions and the starting population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Board size along X
    pub width: f32,
    /// Board size along Z
    pub depth: f32,
    /// Adversaries spawned at session start
    pub adversary_count: usize,
    /// Pickups spawned at session start
    pub pickup_count: usize,
    /// Projectiles in the shared pool
    pub projectile_pool: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 30.0,
            depth: 30.0,
            adversary_count: 5,
            pickup_count: 4,
            projectile_pool: 32,
        }
    }
}

/// Movement and weapon tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Avatar speed in units per second
    pub avatar_speed: f32,
    /// Projectile speed in units per second
    pub projectile_speed: f32,
    /// Seconds a projectile flies before it is recycled
    pub projectile_lifetime_secs: f32,
    /// Seconds between adversary shots
    pub adversary_fire_interval_secs: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            avatar_speed: 5.0,
            projectile_speed: 10.0,
            projectile_lifetime_secs: 5.0,
            adversary_fire_interval_secs: 5.0,
        }
    }
}

/// Headless simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for every random roll in the session
    pub seed: u64,
    /// Ticks to run before giving up on an outcome
    pub max_ticks: u64,
    /// Seconds of play in time-trial mode; `None` plays without a clock
    pub time_trial_secs: Option<f32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 2096,
            max_ticks: 60 * 60 * 5,
            time_trial_secs: None,
        }
    }
}

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Engine core settings
    pub engine: EngineConfig,
    /// Collision pass settings
    pub collision: CollisionConfig,
    /// Reaction tuning
    pub combat: CombatTuning,
    /// Board and population
    pub arena: ArenaConfig,
    /// Movement and weapons
    pub movement: MovementConfig,
    /// Headless run settings
    pub simulation: SimulationConfig,
}

fn require_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
    }
}

impl GameConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;

        self.combat.projectile_damage_to_avatar.validate("projectile_damage_to_avatar")?;
        self.combat.projectile_damage_to_adversary.validate("projectile_damage_to_adversary")?;
        self.combat.pickup_heal.validate("pickup_heal")?;
        require_positive("avatar_max_health", self.combat.avatar_max_health)?;
        require_positive("pickup_respawn_secs", self.combat.pickup_respawn_secs)?;

        // The border row is wall, so the interior needs at least one tile
        if self.arena.width < 3.0 || self.arena.depth < 3.0 {
            return Err(ConfigError::Invalid(format!(
                "arena must be at least 3x3, got {}x{}",
                self.arena.width, self.arena.depth
            )));
        }

        require_positive("avatar_speed", self.movement.avatar_speed)?;
        require_positive("projectile_speed", self.movement.projectile_speed)?;
        require_positive("projectile_lifetime_secs", self.movement.projectile_lifetime_secs)?;
        require_positive(
            "adversary_fire_interval_secs",
            self.movement.adversary_fire_interval_secs,
        )?;
        if let Some(limit) = self.simulation.time_trial_secs {
            require_positive("time_trial_secs", limit)?;
        }

        Ok(())
    }
}

impl Config for GameConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = GameConfig::default();
        config.collision.enabled_pairs = vec![CategoryPair::AvatarPickup];
        config.combat.pickup_heal = RollRange::fixed(20);
        config.engine.max_collision_pairs = Some(64);

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: GameConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let text = r#"
            [combat]
            avatar_max_health = 50.0

            [collision]
            enabled_pairs = ["AvatarAdversary"]
        "#;
        let config: GameConfig = toml::from_str(text).unwrap();
        assert_eq!(config.combat.avatar_max_health, 50.0);
        assert_eq!(config.combat.pickup_heal, CombatTuning::default().pickup_heal);
        assert_eq!(config.collision.enabled_pairs, vec![CategoryPair::AvatarAdversary]);
        assert_eq!(config.arena, ArenaConfig::default());
    }

    #[test]
    fn test_rejects_inverted_roll_range() {
        let mut config = GameConfig::default();
        config.combat.projectile_damage_to_adversary = RollRange::new(9, 3);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_oversized_roll() {
        let mut config = GameConfig::default();
        config.combat.projectile_damage_to_adversary = RollRange::fixed(2_000_000_000);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.combat.projectile_damage_to_adversary = RollRange::fixed(MAX_ROLL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_timer() {
        let mut config = GameConfig::default();
        config.combat.pickup_respawn_secs = 0.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.simulation.time_trial_secs = Some(-1.0);
        assert!(config.validate().is_err());
        config.simulation.time_trial_secs = Some(90.0);
        assert!(config.validate().is_ok());
    }
}

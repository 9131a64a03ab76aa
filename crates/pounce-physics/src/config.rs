use serde::{Deserialize, Serialize};

/// Downward acceleration applied each airborne tick (pixels/tick^2).
pub const GRAVITY: f32 = 0.3;
/// Playfield width in pixels.
pub const SCREEN_WIDTH: f32 = 400.0;
/// Playfield height in pixels.
pub const SCREEN_HEIGHT: f32 = 400.0;
/// Time a moving platform waits at each waypoint.
pub const DWELL_MS: f32 = 3000.0;
/// Width of one spike tooth.
pub const SPIKE_TOOTH_WIDTH: i32 = 20;

/// World-level physics parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Keep the player inside the playfield horizontally and above its floor.
    pub clamp_to_screen: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            clamp_to_screen: true,
        }
    }
}

/// Player tuning. Speeds are pixels/tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: i32,
    pub height: i32,
    pub health: i32,
    pub max_horizontal_speed: f32,
    pub ground_acceleration: f32,
    pub air_acceleration: f32,
    pub ground_deceleration: f32,
    pub air_deceleration: f32,
    /// Normal jump impulse; also the fall-speed cap after a normal jump.
    pub jump_speed: f32,
    /// High jump impulse; also the fall-speed cap after a high jump.
    pub high_jump_speed: f32,
    /// Downward burst when the ground-pound spin completes.
    pub pound_speed: f32,
    pub pound_max_fall_speed: f32,
    pub spin_degrees_per_ms: f32,
    /// Number of blink toggles in one invulnerability window.
    pub invulnerability_blinks: u32,
    pub blink_interval_ms: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            health: 4,
            max_horizontal_speed: 5.0,
            ground_acceleration: 1.0,
            air_acceleration: 0.2,
            ground_deceleration: 0.32,
            air_deceleration: 0.1,
            jump_speed: 7.5,
            high_jump_speed: 10.0,
            pound_speed: 8.0,
            pound_max_fall_speed: 12.0,
            spin_degrees_per_ms: 1.08,
            invulnerability_blinks: 16,
            blink_interval_ms: 125.0,
        }
    }
}

/// Enemy tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub fool_size: i32,
    /// Speed a Fool turns around with after hitting a wall.
    pub fool_patrol_speed: f32,
    pub fool_initial_speed: f32,
    pub fool_max_fall_speed: f32,
    pub jumping_fool_max_fall_speed: f32,
    pub jumping_fool_bounce_speed: f32,
    pub squish_interval_ms: f32,
    pub ghost_size: i32,
    pub ghost_max_speed: f32,
    /// Contact hitbox size relative to the ghost's body.
    pub ghost_hitbox_scale: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            fool_size: 20,
            fool_patrol_speed: 2.0,
            fool_initial_speed: 1.0,
            fool_max_fall_speed: 7.5,
            jumping_fool_max_fall_speed: 10.0,
            jumping_fool_bounce_speed: 8.0,
            squish_interval_ms: 150.0,
            ghost_size: 20,
            ghost_max_speed: 1.0,
            ghost_hitbox_scale: 0.8,
        }
    }
}

/// Platform tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub dwell_ms: f32,
    pub spike_tooth_width: i32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            dwell_ms: DWELL_MS,
            spike_tooth_width: SPIKE_TOOTH_WIDTH,
        }
    }
}

/// Top-level simulation configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub enemies: EnemyConfig,
    pub platforms: PlatformConfig,
}

impl SimConfig {
    /// Load config from the file named by `POUNCE_CONFIG`, else
    /// `config/pounce.toml`. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var("POUNCE_CONFIG").unwrap_or_else(|_| "config/pounce.toml".to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    SimConfig::default()
                },
            },
            Err(_) => SimConfig::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

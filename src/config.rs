//! Tunable game constants.
//!
//! Defaults reproduce the classic browser build: a 50px player moving 10px per
//! frame against a double-size pursuer that starts at 2px per frame and gains
//! 0.005px every tenth second.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_FIELD_WIDTH: f64 = 800.0;
pub const DEFAULT_FIELD_HEIGHT: f64 = 600.0;
pub const DEFAULT_PLAYER_SIZE: f64 = 50.0;
pub const DEFAULT_PLAYER_SPEED: f64 = 10.0;
pub const DEFAULT_PURSUER_BASE_SPEED: f64 = 2.0;
pub const DEFAULT_SPEED_INCREMENT: f64 = 0.005;
pub const DEFAULT_RAMP_INTERVAL_SECS: u32 = 10;

/// How often the pursuer speed ramp fires while `elapsed % interval == 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RampPolicy {
    /// One increment per qualifying second.
    #[default]
    OncePerSecond,
    /// One increment per frame for as long as the qualifying second lasts
    /// (roughly 60 increments at 60 Hz). Matches the classic build.
    EveryTick,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChaseConfig {
    /// Used when no canvas provides real bounds (tests, headless runs).
    pub field_width: f64,
    pub field_height: f64,
    pub player_size: f64,
    pub player_speed: f64,
    pub player_color: String,
    /// Pursuer side length as a multiple of `player_size`.
    pub pursuer_size_factor: f64,
    pub pursuer_base_speed: f64,
    pub pursuer_color: String,
    pub speed_increment: f64,
    pub ramp_interval_secs: u32,
    pub ramp_policy: RampPolicy,
    pub sprite_url: String,
    pub confirm_on_game_over: bool,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            player_size: DEFAULT_PLAYER_SIZE,
            player_speed: DEFAULT_PLAYER_SPEED,
            player_color: "#4caf50".to_string(),
            pursuer_size_factor: 2.0,
            pursuer_base_speed: DEFAULT_PURSUER_BASE_SPEED,
            pursuer_color: "red".to_string(),
            speed_increment: DEFAULT_SPEED_INCREMENT,
            ramp_interval_secs: DEFAULT_RAMP_INTERVAL_SECS,
            ramp_policy: RampPolicy::OncePerSecond,
            sprite_url: "grumble.png".to_string(),
            confirm_on_game_over: true,
        }
    }
}

/// Rejected configuration value.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A dimension or speed that must be a finite number > 0.
    NotPositive { field: &'static str, value: f64 },
    /// Increment must be finite and >= 0 so pursuer speed never decreases.
    NegativeIncrement(f64),
    ZeroRampInterval,
    #[cfg(feature = "serde_json")]
    Json(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPositive { field, value } => {
                write!(f, "{field} must be a positive finite number (got {value})")
            }
            ConfigError::NegativeIncrement(v) => {
                write!(f, "speed_increment must be finite and >= 0 (got {v})")
            }
            ConfigError::ZeroRampInterval => write!(f, "ramp_interval_secs must be > 0"),
            #[cfg(feature = "serde_json")]
            ConfigError::Json(msg) => write!(f, "invalid config json: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ChaseConfig {
    pub fn pursuer_size(&self) -> f64 {
        self.player_size * self.pursuer_size_factor
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_size", self.player_size),
            ("player_speed", self.player_speed),
            ("pursuer_size_factor", self.pursuer_size_factor),
            ("pursuer_base_speed", self.pursuer_base_speed),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(self.speed_increment.is_finite() && self.speed_increment >= 0.0) {
            return Err(ConfigError::NegativeIncrement(self.speed_increment));
        }
        if self.ramp_interval_secs == 0 {
            return Err(ConfigError::ZeroRampInterval);
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON object; missing keys keep defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: ChaseConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn rules(&self) -> Rules {
        Rules {
            speed_increment: self.speed_increment,
            ramp_interval_secs: self.ramp_interval_secs,
            ramp_policy: self.ramp_policy,
        }
    }
}

/// The subset of config the simulation step consults every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rules {
    pub speed_increment: f64,
    pub ramp_interval_secs: u32,
    pub ramp_policy: RampPolicy,
}

impl Default for Rules {
    fn default() -> Self {
        ChaseConfig::default().rules()
    }
}

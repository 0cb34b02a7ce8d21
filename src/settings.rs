//! Game settings
//!
//! Every field has a default, so a settings file only needs the values it
//! overrides. Loaded from JSON by the binary.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// What a sprite is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetRole {
    Background,
    Crosshair,
    City,
    CityDamaged,
    Projectile,
    Explosion,
}

impl AssetRole {
    pub const ALL: [AssetRole; 6] = [
        AssetRole::Background,
        AssetRole::Crosshair,
        AssetRole::City,
        AssetRole::CityDamaged,
        AssetRole::Projectile,
        AssetRole::Explosion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetRole::Background => "background",
            AssetRole::Crosshair => "crosshair",
            AssetRole::City => "city",
            AssetRole::CityDamaged => "city_damaged",
            AssetRole::Projectile => "projectile",
            AssetRole::Explosion => "explosion",
        }
    }

    /// Default image path for this role
    pub fn default_path(&self) -> &'static str {
        match self {
            AssetRole::Background => "img/background.png",
            AssetRole::Crosshair => "img/crosshair.png",
            AssetRole::City => "img/city.png",
            AssetRole::CityDamaged => "img/city_dmg.png",
            AssetRole::Projectile => "img/missile.png",
            AssetRole::Explosion => "img/explosion.png",
        }
    }
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display width in pixels
    pub width: u32,
    /// Display height in pixels
    pub height: u32,
    /// Sprite identifiers keyed by role
    pub sprites: BTreeMap<AssetRole, String>,
    /// Frame governor target
    pub tick_rate_hz: u32,
    /// Game-over screen duration before exit
    pub game_over_hold_ms: f32,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Run without throttling (simulated fixed-length ticks)
    pub headless: bool,
    /// Stop a headless run after this many ticks (0 = no limit)
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            sprites: AssetRole::ALL
                .iter()
                .map(|role| (*role, role.default_path().to_string()))
                .collect(),
            tick_rate_hz: TICK_RATE_HZ,
            game_over_hold_ms: GAME_OVER_HOLD_MS,
            seed: None,
            headless: false,
            max_ticks: 0,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject settings a game cannot be built from
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "display dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.sprites.is_empty() {
            return Err(GameError::InvalidConfiguration(
                "sprite table is empty".to_string(),
            ));
        }
        if self.tick_rate_hz == 0 {
            return Err(GameError::InvalidConfiguration(
                "tick rate must be positive".to_string(),
            ));
        }
        if !self.game_over_hold_ms.is_finite() || self.game_over_hold_ms < 0.0 {
            return Err(GameError::InvalidConfiguration(format!(
                "game-over hold must be a non-negative duration, got {}",
                self.game_over_hold_ms
            )));
        }
        Ok(())
    }
}

/// Tunable game constants, loadable from a TOML file.
///
/// Every field has a default, so a config file only needs to mention the
/// values it changes.  The defaults reproduce the classic feel: a 750×750
/// playfield at 60 FPS, five lives, waves growing by four ships per level.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::entities::Gun;
use crate::error::{GameError, Result};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "space_blaster.toml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding the PNG sprites.
    pub assets_dir: PathBuf,
    pub screen: ScreenConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub laser: LaserConfig,
    pub wave: WaveConfig,
    pub session: SessionConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: i32,
    pub height: i32,
    pub fps: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Pixels moved per frame in each held direction.
    pub velocity: i32,
    pub health: i32,
    pub start_x: i32,
    pub start_y: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Pixels descended per frame.
    pub velocity: i32,
    /// Each enemy fires on average once every this many seconds.
    pub fire_chance_seconds: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserConfig {
    /// Pixels per frame; player lasers travel up, enemy lasers down.
    pub velocity: i32,
    /// Health removed from the player per hit (laser or ramming enemy).
    pub damage: i32,
    /// Frames between two shots of the same ship.
    pub cooldown: u32,
    /// Lasers spawn this many pixels left of the firing ship's x.
    pub offset_x: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Wave length before the first wave; grown once before spawning it.
    pub initial_length: u32,
    pub growth: u32,
    /// Enemies spawn with x in `[margin, width - margin)`.
    pub spawn_margin_x: i32,
    /// Enemies spawn with y in `[spawn_min_y, spawn_max_y)`.
    pub spawn_min_y: i32,
    pub spawn_max_y: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub lives: i32,
    /// How long the "You Lost" overlay stays before the session ends.
    pub linger_seconds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            screen: ScreenConfig::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            laser: LaserConfig::default(),
            wave: WaveConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self { width: 750, height: 750, fps: 60 }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { velocity: 5, health: 100, start_x: 350, start_y: 650 }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self { velocity: 1, fire_chance_seconds: 4 }
    }
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self { velocity: 4, damage: 5, cooldown: 30, offset_x: 17 }
    }
}

impl LaserConfig {
    pub fn gun(&self) -> Gun {
        Gun { cooldown: self.cooldown, offset_x: self.offset_x }
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            initial_length: 5,
            growth: 4,
            spawn_margin_x: 90,
            spawn_min_y: -1500,
            spawn_max_y: -100,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { lives: 5, linger_seconds: 3 }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path`.  A missing file is an error only when `required`.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(source) => {
                let config = Self::from_toml(&source, path)?;
                log::info!("loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
                log::info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(GameError::ConfigRead { path: path.to_path_buf(), source }),
        }
    }

    pub fn to_toml(&self) -> String {
        // Plain structs of numbers and a path cannot fail to serialize.
        toml::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(GameError::InvalidConfig(msg)) };

        if self.screen.width <= 0 || self.screen.height <= 0 {
            return invalid(format!(
                "screen must have positive size, got {}x{}",
                self.screen.width, self.screen.height
            ));
        }
        if self.screen.fps == 0 {
            return invalid("screen.fps must be at least 1".into());
        }
        if self.player.health <= 0 {
            return invalid("player.health must be positive".into());
        }
        if self.player.velocity <= 0 || self.enemy.velocity <= 0 || self.laser.velocity <= 0 {
            return invalid("velocities must be positive".into());
        }
        if self.enemy.fire_chance_seconds == 0 {
            return invalid("enemy.fire_chance_seconds must be at least 1".into());
        }
        if self.wave.initial_length.saturating_add(self.wave.growth) == 0 {
            return invalid("wave.initial_length + wave.growth must be at least 1".into());
        }
        if self.spawn_x_range().is_empty() {
            return invalid(format!(
                "wave.spawn_margin_x {} leaves no room on a {} wide screen",
                self.wave.spawn_margin_x, self.screen.width
            ));
        }
        if self.wave.spawn_min_y >= self.wave.spawn_max_y {
            return invalid("wave.spawn_min_y must be below wave.spawn_max_y".into());
        }
        Ok(())
    }

    // ── Derived values ───────────────────────────────────────────────────────

    pub fn spawn_x_range(&self) -> std::ops::Range<i32> {
        self.wave.spawn_margin_x..self.screen.width - self.wave.spawn_margin_x
    }

    pub fn spawn_y_range(&self) -> std::ops::Range<i32> {
        self.wave.spawn_min_y..self.wave.spawn_max_y
    }

    /// Frames the loss overlay lingers before the loop ends.
    pub fn linger_frames(&self) -> u32 {
        self.screen.fps.saturating_mul(self.session.linger_seconds)
    }

    /// Denominator of the per-enemy, per-frame fire probability.
    pub fn enemy_fire_odds(&self) -> u32 {
        self.enemy.fire_chance_seconds.saturating_mul(self.screen.fps)
    }
}

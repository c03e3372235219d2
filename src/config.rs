//! Game configuration, read once at startup from a TOML file.
//!
//! Every section falls back to its defaults, so an empty file (or no file at
//! all) gives the stock 15x15 game.
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::core::maze::validate_size;
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "maze_runner.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub maze: MazeConfig,
    pub player: PlayerConfig,
    pub render: RenderConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "3D Maze Runner".to_string(),
            target_fps: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Side length of the square grid, odd and >= 5.
    pub size: usize,
    pub coins: usize,
    /// Fixed seed for reproducible mazes; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self { size: 15, coins: 10, seed: None }
    }
}

/// Movement speeds are in grid units per tick.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub base_speed: f32,
    pub sprint_speed: f32,
    pub mouse_sensitivity: f32,
    pub fov_degrees: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.1,
            sprint_speed: 0.2,
            mouse_sensitivity: 0.002,
            fov_degrees: 60.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub strip_width: u32,
    pub smoothing: bool,
    pub textured: bool,
    pub wall_texture: String,
    pub minimap_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            strip_width: 2,
            smoothing: true,
            textured: true,
            wall_texture: "Assets/wall1.png".to_string(),
            minimap_size: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl GameConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`; a missing file means defaults, anything else must parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                log::info!("loading config from {}", path.display());
                Self::from_toml(&text)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_size(self.maze.size)?;

        let p = &self.player;
        if !(p.base_speed > 0.0) || !(p.sprint_speed > 0.0) {
            return Err(ConfigError::Invalid("player speeds must be positive".into()));
        }
        if p.sprint_speed < p.base_speed {
            return Err(ConfigError::Invalid(format!(
                "sprint speed {} is slower than base speed {}",
                p.sprint_speed, p.base_speed
            )));
        }
        if !(p.fov_degrees > 0.0 && p.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "field of view {} must be within (0, 180) degrees",
                p.fov_degrees
            )));
        }
        if self.render.strip_width == 0 {
            return Err(ConfigError::Invalid("strip width must be at least 1 pixel".into()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window dimensions must be non-zero".into()));
        }
        Ok(())
    }
}

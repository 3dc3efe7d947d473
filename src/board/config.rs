use std::path::{Path, PathBuf};
use std::time::Duration;

use egui::{Pos2, Vec2};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::RoundelError;

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_DIR_NAME: &str = "roundel";

pub const DEFAULT_REFRESH_PERIOD_S: u64 = 300;
const DEFAULT_WINDOW_WIDTH: f32 = 420.;
const DEFAULT_WINDOW_HEIGHT: f32 = 560.;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WindowPosition {
    pub x: f32,
    pub y: f32,
}

impl Default for WindowPosition {
    fn default() -> Self {
        Self { x: 80., y: 80. }
    }
}

impl From<WindowPosition> for Pos2 {
    fn from(value: WindowPosition) -> Self {
        Pos2::new(value.x, value.y)
    }
}

impl From<Pos2> for WindowPosition {
    fn from(value: Pos2) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl From<WindowSize> for Vec2 {
    fn from(value: WindowSize) -> Self {
        Vec2::new(value.width, value.height)
    }
}

impl From<Vec2> for WindowSize {
    fn from(value: Vec2) -> Self {
        Self {
            width: value.x,
            height: value.y,
        }
    }
}

/// Persisted board settings: refresh cadence and window geometry.
///
/// Status data itself is never persisted; this file only keeps the board
/// opening where the user left it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub refresh_period_s: u64,
    pub window_position: WindowPosition,
    pub window_size: WindowSize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_period_s: DEFAULT_REFRESH_PERIOD_S,
            window_position: WindowPosition::default(),
            window_size: WindowSize::default(),
        }
    }
}

impl AppConfig {
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_period_s)
    }

    fn local_path() -> Option<PathBuf> {
        Some(
            dirs::config_dir()?
                .join(CONFIG_DIR_NAME)
                .join(CONFIG_FILE_NAME),
        )
    }

    /// Load the config from the platform config directory. Missing or
    /// unreadable files fall back to `None` so the caller starts from
    /// defaults; the board must come up even with a mangled config.
    pub fn from_local_file() -> Option<Self> {
        Self::load_from(&Self::local_path()?)
    }

    pub(crate) fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let file = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(e) => {
                warn!("Could not open config file {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_reader(file) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Could not parse config file {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn save(&self) -> Result<(), RoundelError> {
        let path = Self::local_path().ok_or(RoundelError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub(crate) fn save_to(&self, path: &Path) -> Result<(), RoundelError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| RoundelError::ConfigIOError { source: e })?;
        }
        let file =
            std::fs::File::create(path).map_err(|e| RoundelError::ConfigIOError { source: e })?;
        serde_json::to_writer(file, self)
            .map_err(|e| RoundelError::ConfigSerializeError { source: e })
    }
}

use std::path::PathBuf;

use crate::{DEFAULT_FRAME_RATE, DEFAULT_SPEED, MAX_SPEED};

pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Runtime settings, read from `PACMAN_*` environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub frame_rate: u32,
    pub speed: i32,
    pub assets_dir: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            speed: DEFAULT_SPEED,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unusable values fall back to the
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let frame_rate = lookup("PACMAN_FPS")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(defaults.frame_rate);
        let speed = lookup("PACMAN_SPEED")
            .and_then(|v| v.parse::<i32>().ok())
            .filter(|v| *v > 0)
            .map(|v| v.min(MAX_SPEED))
            .unwrap_or(defaults.speed);
        let assets_dir = lookup("PACMAN_ASSETS")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.assets_dir);
        let log_file = lookup("PACMAN_LOG")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self {
            frame_rate,
            speed,
            assets_dir,
            log_file,
        }
    }
}

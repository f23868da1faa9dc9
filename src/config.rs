use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_FPS: u64 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an unsigned integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("PACMAN_FPS must be greater than zero")]
    ZeroFps,
}

/// Runtime knobs for the terminal frontend, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Target frames per second for the step/render loop.
    pub fps: u64,
    /// Seed for rose placement; fresh entropy when `None`.
    pub seed: Option<u64>,
    /// Log file. The game owns the terminal, so logs never go to stderr.
    pub log_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            seed: None,
            log_path: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let fps = match lookup("PACMAN_FPS") {
            Some(value) => match parse_number("PACMAN_FPS", &value)? {
                0 => return Err(ConfigError::ZeroFps),
                fps => fps,
            },
            None => DEFAULT_FPS,
        };
        let seed = lookup("PACMAN_SEED")
            .map(|value| parse_number("PACMAN_SEED", &value))
            .transpose()?;
        let log_path = lookup("PACMAN_LOG")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        Ok(Self {
            fps,
            seed,
            log_path,
        })
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

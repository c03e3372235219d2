//! Error types for maze construction and configuration loading.
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a maze.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Carving works on a stride of 2, so the side must be odd.
    #[error("maze size {0} must be odd")]
    EvenSize(usize),

    /// Anything below 5 has no interior left once the border is walled.
    #[error("maze size {0} is below the minimum of 5")]
    TooSmall(usize),

    /// A text layout could not be turned into a maze.
    #[error("invalid maze layout: {0}")]
    Layout(String),
}

/// Errors raised while loading or validating a [`crate::config::GameConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Maze(#[from] MazeError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

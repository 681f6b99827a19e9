use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A configuration the engine refuses to start with.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("palette holds at most {max} colors, got {actual}")]
    TooManyColors { max: usize, actual: usize },
    #[error("square size must be non-zero")]
    ZeroSquareSize,
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
    #[error("fade must last at least one tick")]
    ZeroFadeTicks,
    #[error("initial density {0} must be between 0.0 and 1.0")]
    InvalidDensity(f64),
    #[error("display area {width}x{height} is smaller than one {square_size}px square")]
    DisplayTooSmall {
        width: u32,
        height: u32,
        square_size: u32,
    },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write settings to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode settings")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

// optipix/src/core/mod.rs
pub mod output;
pub mod processor;
pub mod report;
pub mod resolver;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Immutable snapshot of everything the user asked for on the command line.
///
/// Numeric directives that were zero or negative on the command line are
/// already `None` here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub max_longest: Option<u32>,
    pub min_shortest: Option<u32>,
    pub percent: Option<f64>,
    pub stretch: bool,
    pub force: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn longest(&self) -> u32 {
        self.width.max(self.height)
    }

    pub fn shortest(&self) -> u32 {
        self.width.min(self.height)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} px", self.width, self.height)
    }
}

/// What the decode probe learned about the input.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub dimensions: Dimensions,
    pub format: String,
    pub duration: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Target equals the intrinsic size; the codec only re-encodes.
    NoResize,
    /// Cover the target box preserving aspect ratio, then crop the excess.
    Fit,
    /// Resample to exactly the target box.
    Stretch,
}

#[derive(Error, Debug)]
pub enum OptiError {
    #[error("failed to read input file {}", .path.display())]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error decoding image: {0}")]
    Decode(String),

    #[error("error reading image header: {0}")]
    Header(String),

    #[error("output filename {} exists. To overwrite, use -f to force.", .0.display())]
    Collision(PathBuf),

    #[error("unable to remove existing file {}; aborting.", .path.display())]
    Removal {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error transforming image: {0}")]
    Transform(String),

    #[error("error writing resized image {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OptiError>;

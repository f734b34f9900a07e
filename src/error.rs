//! Failures which may stop a sinogram run, or a single batch within it.
//!
//! Geometric rejections (parallel lines, points outside the reconstruction
//! disc, indices outside the sinogram) are not errors: they are expressed as
//! `None` by the functions which detect them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("number of scintillators in reconstruction layer must be even, got {0}")]
    OddScintillatorCount(u32),

    #[error("invalid reconstruction geometry: {0}")]
    InvalidGeometry(String),

    #[error("expected a time window, got {found}")]
    MalformedBatch { found: String },

    #[error("sinogram was never initialized: no batch has been processed")]
    NotInitialized,

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("could not read config file `{path}`: {source}")]
    ConfigFile { path: PathBuf, source: std::io::Error },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

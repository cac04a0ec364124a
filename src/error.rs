// Error types shared across the crate.
// Each concern gets its own enum; the binary folds them into anyhow.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TrackListError {
    #[error("track list must contain at least one track")]
    Empty,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("no audio output device available")]
    NoOutputDevice,
    #[error("no source loaded")]
    NotLoaded,
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("playback rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("config lists no {0}")]
    EmptyList(&'static str),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("could not find a cache directory")]
    NoCacheDir,
    #[error("refusing to cache path outside the asset root: {0}")]
    InvalidPath(String),
    #[error("no origin configured to fetch {0}")]
    NoOrigin(String),
    #[error("request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request for {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),
}

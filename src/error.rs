use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while resolving or exporting a ranking.
/// Each failure mode is a distinct variant so that callers can react to
/// (say) a corrupted cache file differently from a dead upstream.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no usable response from {url}")]
    UpstreamUnavailable {
        url: String,
        #[source]
        source: Option<reqwest::Error>,
    },
    #[error("failed to parse ranking data: {0}")]
    ParseFailure(String),
    #[error("cache entry {path:?} could not be loaded")]
    CorruptCache {
        path: PathBuf,
        #[source]
        source: CacheReadError,
    },
    #[error("failed to save cache entry {path:?}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: CacheWriteError,
    },
    #[error("failed to write export file {path:?}")]
    ExportIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CacheReadError {
    #[error("an I/O error occurred when reading the cache entry: {0:?}")]
    Io(#[from] io::Error),
    #[error("the cached json blob is corrupted and could not be loaded: {0:?}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CacheWriteError {
    #[error("an I/O error occurred when writing the cache entry: {0:?}")]
    Io(#[from] io::Error),
    #[error("the value could not be serialized: {0:?}")]
    Json(#[from] serde_json::Error),
}

use std::fmt::Debug;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use url::Url;

/// Where to find the remote API and where to keep the on-disk cache.
/// The remote host and paths are a versioned dependency of the provider,
/// so they are configuration rather than constants.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: Url,
    pub cache_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "https://www.fifa.com/api".parse().unwrap(),
            cache_dir: PathBuf::from("cache"),
        }
    }
}

impl Config {
    pub fn load<P: Into<PathBuf> + Debug>(path: P) -> anyhow::Result<Self> {
        let path = path.into();
        (|| toml::from_str(&fs_err::read_to_string(&path)?).map_err(anyhow::Error::new))()
            .with_context(|| format!("While trying to parse {path:?} as a config file"))
    }
}

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use fs_err::File;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CacheReadError, CacheWriteError, Error, Result};
use crate::schema::Category;

/// Durable key-value store backed by one json file per key.
/// Entries never expire on their own; a key either exists or it does not.
#[derive(Clone, Debug)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Opens the store rooted at `dir`, creating the directory if absent.
    /// Safe to call repeatedly with the same path.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs_err::create_dir_all(&dir).map_err(|e| Error::CacheWrite {
            path: dir.clone(),
            source: CacheWriteError::Io(e),
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.entry_path(key).is_file()
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let path = self.entry_path(key);
        debug!("Loading cache entry {path:?}");
        (|| -> std::result::Result<T, CacheReadError> {
            Ok(serde_json::from_reader(BufReader::new(File::open(&path)?))?)
        })()
        .map_err(|source| Error::CorruptCache {
            path: path.clone(),
            source,
        })
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.entry_path(key);
        debug!("Saving cache entry {path:?}");
        (|| -> std::result::Result<(), CacheWriteError> {
            Ok(serde_json::to_writer(
                BufWriter::new(File::create(&path)?),
                value,
            )?)
        })()
        .map_err(|source| Error::CacheWrite {
            path: path.clone(),
            source,
        })
    }
}

/// Key for the cached snapshot-id listing of a category.
pub fn ranking_ids_key(category: Category) -> String {
    format!("fifa_ranking_{category}_ids.json")
}

/// Key for a cached ranking payload, one per (snapshot id, language) pair.
pub fn ranking_key(id_value: &str, lang: &str) -> String {
    format!("fifa_ranking_{id_value}_{lang}.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn keys_are_deterministic() {
        assert_eq!(ranking_ids_key(Category::Men), "fifa_ranking_men_ids.json");
        assert_eq!(
            ranking_ids_key(Category::Women),
            "fifa_ranking_women_ids.json"
        );
        assert_eq!(ranking_key("id13869", "fr"), "fifa_ranking_id13869_fr.json");
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        assert!(!store.exists("k.json"));
        store.save("k.json", &vec![1, 2, 3]).unwrap();
        assert!(store.exists("k.json"));
        let loaded: Vec<i32> = store.load("k.json").unwrap();
        assert_eq!(loaded, vec![1, 2, 3]);
    }

    #[test]
    fn open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        CacheStore::open(&nested).unwrap();
        CacheStore::open(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn corrupt_blob_is_reported_as_such() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        fs_err::write(dir.path().join("bad.json"), b"{not json").unwrap();
        match store.load::<Vec<i32>>("bad.json") {
            Err(Error::CorruptCache { path, .. }) => {
                assert!(path.ends_with("bad.json"))
            }
            other => panic!("expected CorruptCache, got {other:?}"),
        }
    }
}

//! File loader with a per-instance document cache.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::decode::parse_str;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::value::Value;

/// Loads documents from disk and memoizes them by canonical path.
///
/// Entries live until [`ToonLoader::clear_cache`]; nothing expires on its own.
/// Documents are handed out as `Arc<Value>`, so clearing the cache never
/// invalidates a document a caller already holds.
#[derive(Debug, Default)]
pub struct ToonLoader {
    options: Options,
    cache: HashMap<PathBuf, Arc<Value>>,
}

impl ToonLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            cache: HashMap::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse text with this loader's options, bypassing the cache.
    pub fn parse(&self, input: &str) -> Result<Value> {
        parse_str(input, &self.options)
    }

    /// Load and parse `path`, returning the cached document when present.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Arc<Value>> {
        let key = canonical(path.as_ref())?;
        if self.options.cache {
            if let Some(doc) = self.cache.get(&key) {
                debug!("cache hit: {}", key.display());
                return Ok(Arc::clone(doc));
            }
        }
        let doc = Arc::new(self.read(&key)?);
        if self.options.cache {
            self.cache.insert(key, Arc::clone(&doc));
        }
        Ok(doc)
    }

    /// Re-read `path` even if it is cached, replacing the cached entry.
    pub fn reload(&mut self, path: impl AsRef<Path>) -> Result<Arc<Value>> {
        let key = canonical(path.as_ref())?;
        self.cache.remove(&key);
        self.load(key)
    }

    /// Run `f` over the rows of top-level array `name` without copying them.
    /// The rows are empty when the key is absent or not an array.
    pub fn with_table<R>(
        &mut self,
        path: impl AsRef<Path>,
        name: &str,
        f: impl FnOnce(&[Value]) -> R,
    ) -> Result<R> {
        let doc = self.load(path)?;
        let rows = doc.get(name).and_then(Value::as_array).unwrap_or_default();
        Ok(f(rows))
    }

    /// Owned copy of top-level array `name` of the document at `path`.
    pub fn load_table(&mut self, path: impl AsRef<Path>, name: &str) -> Result<Vec<Value>> {
        self.with_table(path, name, <[Value]>::to_vec)
    }

    /// Typed rows of table `name`, deserialized through `serde_json`.
    #[cfg(feature = "json")]
    pub fn load_table_as<T: serde::de::DeserializeOwned>(
        &mut self,
        path: impl AsRef<Path>,
        name: &str,
    ) -> Result<Vec<T>> {
        self.with_table(path, name, |rows| {
            rows.iter()
                .map(|row| -> Result<T> {
                    Ok(serde_json::from_value(serde_json::Value::from(row.clone()))?)
                })
                .collect()
        })?
    }

    pub fn is_cached(&self, path: impl AsRef<Path>) -> bool {
        match canonical(path.as_ref()) {
            Ok(key) => self.cache.contains_key(&key),
            Err(_) => false,
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        debug!("clearing {} cached document(s)", self.cache.len());
        self.cache.clear();
    }

    fn read(&self, path: &Path) -> Result<Value> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("cache miss: parsing {} ({} bytes)", path.display(), text.len());
        parse_str(&text, &self.options)
    }
}

/// Cache key for `path`: the canonical path when it exists, otherwise the
/// absolute path so that the read reports the missing file.
fn canonical(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })
}

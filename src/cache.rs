// ==========================================
// OFFLINE ASSET CACHE
// ==========================================
// Keeps background video assets on disk so the carousel does not
// download them again on every start.
//
// - One named cache directory is live at a time
// - Only paths under the configured prefix are intercepted
// - Hits are served from disk, misses are downloaded and stored
// - Activating a new cache name deletes every other cache wholesale

use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::config::{CacheConfig, APP_DIR};
use crate::error::CacheError;

/// Where a requested asset ended up coming from.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// Already on disk.
    Cached(PathBuf),
    /// Downloaded just now and stored.
    Network(PathBuf),
    /// Not under the cache prefix; the caller resolves it itself.
    Passthrough,
}

pub struct AssetCache {
    base: PathBuf,
    name: String,
    prefix: String,
    origin: Option<String>,
    client: reqwest::Client,
}

impl AssetCache {
    /// Cache rooted in the platform cache directory.
    pub fn new(config: &CacheConfig) -> Result<Self, CacheError> {
        let base = dirs::cache_dir()
            .ok_or(CacheError::NoCacheDir)?
            .join(APP_DIR)
            .join("assets");
        Ok(Self::with_base(config, base))
    }

    pub fn with_base(config: &CacheConfig, base: PathBuf) -> Self {
        AssetCache {
            base,
            name: config.name.clone(),
            prefix: config.prefix.clone(),
            origin: config.origin.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.base.join(&self.name)
    }

    pub fn intercepts(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// On-disk location for a request path. Anything that could climb out
    /// of the cache directory is refused.
    pub fn entry_path(&self, path: &str) -> Result<PathBuf, CacheError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut entry = self.cache_dir();
        let mut parts = 0;
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    entry.push(part);
                    parts += 1;
                }
                Component::CurDir => {}
                _ => return Err(CacheError::InvalidPath(path.to_string())),
            }
        }
        if parts == 0 {
            return Err(CacheError::InvalidPath(path.to_string()));
        }
        Ok(entry)
    }

    pub async fn lookup(&self, path: &str) -> Result<Option<PathBuf>, CacheError> {
        let entry = self.entry_path(path)?;
        if fs::try_exists(&entry).await? {
            Ok(Some(entry))
        } else {
            Ok(None)
        }
    }

    // ==========================================
    // fetch()
    // ==========================================
    // Cache first, network second. A network hit is written to disk
    // before it is returned.
    pub async fn fetch(&self, path: &str) -> Result<Fetched, CacheError> {
        if !self.intercepts(path) {
            return Ok(Fetched::Passthrough);
        }
        if let Some(entry) = self.lookup(path).await? {
            tracing::debug!(path, "serving from cache");
            return Ok(Fetched::Cached(entry));
        }
        let entry = self.download(path).await?;
        Ok(Fetched::Network(entry))
    }

    async fn download(&self, path: &str) -> Result<PathBuf, CacheError> {
        let origin = self
            .origin
            .as_deref()
            .ok_or_else(|| CacheError::NoOrigin(path.to_string()))?;
        let entry = self.entry_path(path)?;
        let url = format!("{}{}", origin.trim_end_matches('/'), path);

        tracing::info!(%url, "caching asset");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| CacheError::Request {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::Status { url, status });
        }
        let body = response.bytes().await.map_err(|source| CacheError::Request {
            url: url.clone(),
            source,
        })?;

        if let Some(parent) = entry.parent() {
            fs::create_dir_all(parent).await?;
        }
        // Write beside the entry and rename so a half-written file is
        // never served.
        let partial = entry.with_extension("part");
        fs::write(&partial, &body).await?;
        fs::rename(&partial, &entry).await?;
        Ok(entry)
    }

    /// Precache the given paths. Returns how many were downloaded.
    pub async fn install(&self, paths: &[String]) -> Result<usize, CacheError> {
        fs::create_dir_all(self.cache_dir()).await?;
        let mut downloaded = 0;
        for path in paths.iter().filter(|p| self.intercepts(p)) {
            if let Fetched::Network(_) = self.fetch(path).await? {
                downloaded += 1;
            }
        }
        tracing::info!(cache = %self.name, downloaded, "cache installed");
        Ok(downloaded)
    }

    /// Delete every cache except the current one. Returns the removed names.
    pub async fn activate(&self) -> Result<Vec<String>, CacheError> {
        let mut removed = Vec::new();
        if !fs::try_exists(&self.base).await? {
            return Ok(removed);
        }
        let mut entries = fs::read_dir(&self.base).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == self.name || !entry.file_type().await?.is_dir() {
                continue;
            }
            fs::remove_dir_all(entry.path()).await?;
            tracing::info!(cache = %name, "stale cache removed");
            removed.push(name);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_base(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("glass-player-cache-{}-{}", tag, std::process::id()))
    }

    fn cache(base: PathBuf, name: &str) -> AssetCache {
        let config = CacheConfig {
            name: name.to_string(),
            ..CacheConfig::default()
        };
        AssetCache::with_base(&config, base)
    }

    #[test]
    fn only_prefixed_paths_are_intercepted() {
        let cache = cache(temp_base("prefix"), "v1");
        assert!(cache.intercepts("/videos/urban.mp4"));
        assert!(!cache.intercepts("/music/Headlock.flac"));
        assert!(!cache.intercepts("/videosx.mp4"));
    }

    #[test]
    fn entry_paths_stay_inside_the_cache() {
        let base = temp_base("entry");
        let cache = cache(base.clone(), "v1");
        assert_eq!(
            cache.entry_path("/videos/Comp 1_11.mp4").unwrap(),
            base.join("v1").join("videos").join("Comp 1_11.mp4")
        );
        assert!(matches!(
            cache.entry_path("/videos/../../etc/passwd"),
            Err(CacheError::InvalidPath(_))
        ));
        assert!(matches!(cache.entry_path("/"), Err(CacheError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn non_prefixed_fetch_passes_through() {
        let cache = cache(temp_base("pass"), "v1");
        assert_eq!(cache.fetch("/music/a.mp3").await.unwrap(), Fetched::Passthrough);
    }

    #[tokio::test]
    async fn cached_entry_is_served_without_network() {
        let base = temp_base("hit");
        let cache = cache(base.clone(), "v1");
        let entry = cache.entry_path("/videos/urban.mp4").unwrap();
        fs::create_dir_all(entry.parent().unwrap()).await.unwrap();
        fs::write(&entry, b"frames").await.unwrap();

        let fetched = cache.fetch("/videos/urban.mp4").await.unwrap();
        let _ = fs::remove_dir_all(&base).await;
        assert_eq!(fetched, Fetched::Cached(entry));
    }

    #[tokio::test]
    async fn miss_without_origin_is_an_error() {
        let cache = cache(temp_base("miss"), "v1");
        let err = cache.fetch("/videos/nowhere.mp4").await.unwrap_err();
        assert!(matches!(err, CacheError::NoOrigin(_)));
    }

    #[tokio::test]
    async fn activate_drops_every_other_cache() {
        let base = temp_base("activate");
        for name in ["video-cache-v0", "video-cache-v1", "video-cache-v2"] {
            fs::create_dir_all(base.join(name)).await.unwrap();
        }
        let cache = cache(base.clone(), "video-cache-v2");
        let mut removed = cache.activate().await.unwrap();
        removed.sort();
        let current_survives = fs::try_exists(base.join("video-cache-v2")).await.unwrap();
        let _ = fs::remove_dir_all(&base).await;

        assert_eq!(removed, vec!["video-cache-v0", "video-cache-v1"]);
        assert!(current_survives);
    }

    #[tokio::test]
    async fn activate_without_base_is_a_no_op() {
        let cache = cache(temp_base("absent"), "v1");
        assert!(cache.activate().await.unwrap().is_empty());
    }
}

//! URL-keyed image cache
//!
//! Remote plant photos are written once to a per-user cache directory
//! under a filename derived from the SHA-256 of the URL. The guarantee
//! is deliberately weak: the key is URL identity, not content identity.
//! There is no eviction, no expiry, and no integrity check beyond a
//! format sniff on read; a stale file for a changed URL target is
//! served as-is.

use crate::error::{AppError, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Bundled fallback shown when an image can neither be cached nor
/// downloaded.
pub const PLACEHOLDER_PNG: &[u8] = include_bytes!("../../data/placeholder.png");

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Write-once image cache keyed by URL hash
#[derive(Clone)]
pub struct ImageCache {
    root: PathBuf,
    http: reqwest::Client,
}

impl ImageCache {
    pub fn new(root: PathBuf) -> Self {
        let http = reqwest::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self { root, http }
    }

    /// Default per-user cache location (`<cache-dir>/flora/images`)
    pub fn default_dir() -> Result<PathBuf> {
        dirs::cache_dir()
            .map(|d| d.join("flora").join("images"))
            .ok_or_else(|| AppError::ImageCache("No user cache directory available".to_string()))
    }

    /// Initialize the cache (create directory if needed)
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        tracing::info!("Image cache initialized at: {:?}", self.root);
        Ok(())
    }

    /// Fetch image bytes for a URL.
    ///
    /// `file://` URLs are read directly and never cached. For remote
    /// URLs the cached file is served when it sniffs as an image;
    /// otherwise the image is (re)downloaded, persisted, and served.
    /// Any unrecoverable failure yields the bundled placeholder.
    pub async fn fetch(&self, url: &str) -> Vec<u8> {
        if let Some(path) = url.strip_prefix("file://") {
            return match fs::read(path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("Failed to read local image {}: {}", path, e);
                    PLACEHOLDER_PNG.to_vec()
                }
            };
        }

        let path = self.cached_path(url);

        if let Ok(bytes) = fs::read(&path).await {
            if looks_like_image(&bytes) {
                tracing::debug!("Image cache hit: {}", url);
                return bytes;
            }
            // Undecodable cache entry; fall through to re-download
            tracing::debug!("Image cache entry unreadable, re-downloading: {}", url);
        }

        match self.download(url, &path).await {
            Ok(bytes) if looks_like_image(&bytes) => bytes,
            Ok(_) => {
                tracing::warn!("Downloaded bytes are not an image: {}", url);
                PLACEHOLDER_PNG.to_vec()
            }
            Err(e) => {
                tracing::warn!("Image download failed for {}: {}", url, e);
                PLACEHOLDER_PNG.to_vec()
            }
        }
    }

    async fn download(&self, url: &str, path: &Path) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?.to_vec();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write to temp file first (atomic write)
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, path).await?;

        tracing::debug!("Cached image: {} ({} bytes)", url, bytes.len());
        Ok(bytes)
    }

    /// Cache file path for a URL
    pub fn cached_path(&self, url: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        self.root.join(format!("{:x}", hasher.finalize()))
    }
}

/// Magic-number sniff for the formats the providers serve
fn looks_like_image(bytes: &[u8]) -> bool {
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";
    const JPEG: &[u8] = b"\xff\xd8\xff";
    const GIF87: &[u8] = b"GIF87a";
    const GIF89: &[u8] = b"GIF89a";

    bytes.starts_with(PNG)
        || bytes.starts_with(JPEG)
        || bytes.starts_with(GIF87)
        || bytes.starts_with(GIF89)
        || (bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP")
}

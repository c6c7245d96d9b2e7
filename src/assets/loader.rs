use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::Context;

use crate::{
    assets::decode::{DecodedImage, decode_image},
    foundation::error::{CardError, CardResult},
};

/// Capability to turn an image reference into decoded pixels.
///
/// Every failure is reported as [`CardError::AssetLoad`] so callers can substitute a fallback.
pub trait ImageLoader {
    /// Load and decode `reference`.
    fn load(&self, reference: &str) -> CardResult<Arc<DecodedImage>>;
}

/// Normalize and validate a root-relative asset path.
///
/// The result uses `/` separators, drops `.` segments and rejects absolute paths or parent
/// traversals (`..`).
pub fn normalize_rel_path(source: &str) -> CardResult<String> {
    let s = source.trim().replace('\\', "/");
    if s.starts_with('/') {
        return Err(CardError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(CardError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(CardError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(CardError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

fn is_remote(reference: &str) -> bool {
    let lower = reference.trim_start().to_ascii_lowercase();
    ["http://", "https://", "data:", "blob:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

/// Loads images from files below a root directory.
///
/// Remote references (`http(s)://`, `data:`) are rejected; fetching them is the embedder's job.
#[derive(Clone, Debug)]
pub struct FsImageLoader {
    root: PathBuf,
}

impl FsImageLoader {
    /// Loader resolving references against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path a reference resolves to.
    pub fn resolve(&self, reference: &str) -> CardResult<PathBuf> {
        if is_remote(reference) {
            return Err(CardError::asset_load(
                reference,
                "remote references are not fetched by the filesystem loader",
            ));
        }
        let norm = normalize_rel_path(reference)
            .map_err(|e| CardError::asset_load(reference, e))?;
        Ok(self.root.join(norm))
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&self, reference: &str) -> CardResult<Arc<DecodedImage>> {
        let path = self.resolve(reference)?;
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read image bytes from {}", path.display()))
            .map_err(|e| CardError::asset_load(reference, format!("{e:#}")))?;
        let image = decode_image(&bytes).map_err(|e| CardError::asset_load(reference, e))?;
        Ok(Arc::new(image))
    }
}

/// Encoded images held in memory, keyed by reference.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageLoader {
    entries: HashMap<String, Arc<Vec<u8>>>,
}

impl MemoryImageLoader {
    /// Empty loader; every load fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register encoded bytes for `reference`.
    pub fn insert(&mut self, reference: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(reference.into(), Arc::new(bytes));
    }

    /// Builder form of [`MemoryImageLoader::insert`].
    pub fn with(mut self, reference: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(reference, bytes);
        self
    }
}

impl ImageLoader for MemoryImageLoader {
    fn load(&self, reference: &str) -> CardResult<Arc<DecodedImage>> {
        let bytes = self
            .entries
            .get(reference)
            .ok_or_else(|| CardError::asset_load(reference, "no such in-memory image"))?;
        let image = decode_image(bytes).map_err(|e| CardError::asset_load(reference, e))?;
        Ok(Arc::new(image))
    }
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, Arc<DecodedImage>>,
    decodes: HashMap<String, u32>,
}

/// Process-lifetime decode cache in front of another loader.
///
/// Append-only and unbounded: entries are never evicted, and failed loads are not cached so a
/// later call retries.
pub struct CachedImageLoader<L> {
    inner: L,
    state: Mutex<CacheState>,
}

impl<L: ImageLoader> CachedImageLoader<L> {
    /// Wrap `inner`.
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Wrapped loader.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Times `reference` was decoded by the inner loader.
    pub fn decode_count(&self, reference: &str) -> u32 {
        self.lock().decodes.get(reference).copied().unwrap_or(0)
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// True when nothing is cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<L: ImageLoader> ImageLoader for CachedImageLoader<L> {
    fn load(&self, reference: &str) -> CardResult<Arc<DecodedImage>> {
        if let Some(hit) = self.lock().entries.get(reference) {
            return Ok(Arc::clone(hit));
        }

        // The lock is not held across the inner load; two racing misses both decode and the
        // first insert wins.
        let image = self.inner.load(reference)?;

        let mut state = self.lock();
        *state.decodes.entry(reference.to_string()).or_insert(0) += 1;
        let entry = state
            .entries
            .entry(reference.to_string())
            .or_insert_with(|| Arc::clone(&image));
        let out = Arc::clone(entry);
        tracing::debug!(reference, cached = state.entries.len(), "image cached");
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;

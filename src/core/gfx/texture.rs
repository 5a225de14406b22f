//=========================================================================
// Textures
//=========================================================================
//
// Texture handles and a cache memoised by (path, scale quality).
//
// Decoding and upload belong to whatever presents the frame; the cache
// only needs something implementing `TextureLoader`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

//=== TextureHandle =======================================================

/// Opaque identifier the presenter resolves to an uploaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

//=== Texture =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
}

//=== ScaleQuality ========================================================

/// Sampling filter used when a texture is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleQuality {
    Nearest,
    Linear,
    Anisotropic,
}

impl ScaleQuality {
    /// Conventional renderer hint name.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Linear => "linear",
            Self::Anisotropic => "best",
        }
    }
}

impl fmt::Display for ScaleQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hint())
    }
}

//=== GfxError ============================================================

#[derive(Debug, Error)]
pub enum GfxError {
    #[error("failed to load texture {path:?} ({quality}): {reason}")]
    Load {
        path: PathBuf,
        quality: ScaleQuality,
        reason: String,
    },
}

//=== TextureLoader =======================================================

/// Produces textures for the cache.
pub trait TextureLoader {
    fn load(&mut self, path: &Path, quality: ScaleQuality) -> Result<Texture, GfxError>;
}

//--- DeferredLoader ------------------------------------------------------

/// Hands out sequential handles without touching the file system.
///
/// For presenters that resolve paths themselves when they first see a
/// handle. Reports a fixed size for every texture.
#[derive(Debug, Clone)]
pub struct DeferredLoader {
    next: u32,
    width: u32,
    height: u32,
    paths: Vec<(PathBuf, ScaleQuality)>,
}

impl DeferredLoader {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            next: 0,
            width,
            height,
            paths: Vec::new(),
        }
    }

    /// Path and quality behind `handle`, for the presenter.
    pub fn resolve(&self, handle: TextureHandle) -> Option<(&Path, ScaleQuality)> {
        self.paths
            .get(handle.0 as usize)
            .map(|(path, quality)| (path.as_path(), *quality))
    }
}

impl TextureLoader for DeferredLoader {
    fn load(&mut self, path: &Path, quality: ScaleQuality) -> Result<Texture, GfxError> {
        let handle = TextureHandle(self.next);
        self.next += 1;
        self.paths.push((path.to_path_buf(), quality));

        Ok(Texture {
            handle,
            width: self.width,
            height: self.height,
        })
    }
}

//=== TextureCache ========================================================

/// Memoises loads so each (path, quality) pair is loaded once.
pub struct TextureCache<L> {
    loader: L,
    textures: HashMap<(PathBuf, ScaleQuality), Texture>,
}

impl<L: TextureLoader> TextureCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            textures: HashMap::new(),
        }
    }

    /// Returns the cached texture or loads it.
    ///
    /// Failed loads are not cached, so a later call retries.
    pub fn load(&mut self, path: impl AsRef<Path>, quality: ScaleQuality) -> Result<Texture, GfxError> {
        let key = (path.as_ref().to_path_buf(), quality);
        if let Some(texture) = self.textures.get(&key) {
            return Ok(*texture);
        }

        let texture = self.loader.load(&key.0, quality)?;
        debug!(
            "Loaded texture {:?} ({}) as {:?}, {}x{}",
            key.0, quality, texture.handle, texture.width, texture.height
        );
        self.textures.insert(key, texture);
        Ok(texture)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Forgets every cached texture.
    pub fn clear(&mut self) {
        self.textures.clear();
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts loads and fails on paths containing "missing".
    struct CountingLoader {
        loads: u32,
    }

    impl TextureLoader for CountingLoader {
        fn load(&mut self, path: &Path, quality: ScaleQuality) -> Result<Texture, GfxError> {
            self.loads += 1;
            if path.to_string_lossy().contains("missing") {
                return Err(GfxError::Load {
                    path: path.to_path_buf(),
                    quality,
                    reason: "not found".into(),
                });
            }
            Ok(Texture {
                handle: TextureHandle(self.loads),
                width: 16,
                height: 16,
            })
        }
    }

    #[test]
    fn cache_memoises_by_path_and_quality() {
        let mut cache = TextureCache::new(CountingLoader { loads: 0 });

        let first = cache.load("hero.png", ScaleQuality::Nearest).unwrap();
        let again = cache.load("hero.png", ScaleQuality::Nearest).unwrap();
        let linear = cache.load("hero.png", ScaleQuality::Linear).unwrap();

        assert_eq!(first, again);
        assert_ne!(first.handle, linear.handle, "quality is part of the key");
        assert_eq!(cache.loader().loads, 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_load_is_reported_and_not_cached() {
        let mut cache = TextureCache::new(CountingLoader { loads: 0 });

        let err = cache.load("missing.png", ScaleQuality::Nearest).unwrap_err();
        assert!(err.to_string().contains("missing.png"), "{}", err);
        assert!(cache.is_empty());

        let _ = cache.load("missing.png", ScaleQuality::Nearest);
        assert_eq!(cache.loader().loads, 2, "failure should be retried");
    }

    #[test]
    fn clear_forces_reload() {
        let mut cache = TextureCache::new(CountingLoader { loads: 0 });
        cache.load("a.png", ScaleQuality::Nearest).unwrap();
        cache.clear();
        cache.load("a.png", ScaleQuality::Nearest).unwrap();
        assert_eq!(cache.loader().loads, 2);
    }

    #[test]
    fn deferred_loader_resolves_handles() {
        let mut cache = TextureCache::new(DeferredLoader::new(32, 48));
        let texture = cache.load("assets/link.png", ScaleQuality::Nearest).unwrap();

        assert_eq!((texture.width, texture.height), (32, 48));
        let (path, quality) = cache.loader().resolve(texture.handle).unwrap();
        assert_eq!(path, Path::new("assets/link.png"));
        assert_eq!(quality.hint(), "nearest");
    }
}

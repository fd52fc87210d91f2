//! Asset handles and the mesh loading boundary
//!
//! The engine never parses model files itself. A [`MeshLoader`] turns a path
//! into an opaque [`MeshHandle`], and [`MeshRegistry`] makes sure each path
//! is loaded once.

use std::collections::HashMap;

use thiserror::Error;

/// Opaque handle to a loaded mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(u32);

impl MeshHandle {
    /// Wrap a loader-specific id
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Loader-specific id
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Asset loading errors
#[derive(Debug, Error)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Unsupported asset format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Something that can turn a model path into a mesh handle
pub trait MeshLoader {
    /// Load the mesh at `path`
    fn load_mesh(&mut self, path: &str) -> Result<MeshHandle, AssetError>;
}

/// Caches one handle per path in front of a [`MeshLoader`]
#[derive(Debug, Default)]
pub struct MeshRegistry {
    handles: HashMap<String, MeshHandle>,
}

impl MeshRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached handle for `path`, loading it on first use
    pub fn load(&mut self, loader: &mut dyn MeshLoader, path: &str) -> Result<MeshHandle, AssetError> {
        if let Some(&handle) = self.handles.get(path) {
            return Ok(handle);
        }

        let handle = loader.load_mesh(path)?;
        log::debug!("Loaded mesh '{path}' as {handle:?}");
        self.handles.insert(path.to_owned(), handle);
        Ok(handle)
    }

    /// Cached handle for `path`, if it has been loaded
    pub fn get(&self, path: &str) -> Option<MeshHandle> {
        self.handles.get(path).copied()
    }

    /// Number of distinct meshes loaded
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Check if nothing has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Loader that hands out sequential handles without touching the disk
///
/// Used by headless runs and tests.
#[derive(Debug, Default)]
pub struct SequentialMeshLoader {
    next: u32,
}

impl MeshLoader for SequentialMeshLoader {
    fn load_mesh(&mut self, path: &str) -> Result<MeshHandle, AssetError> {
        if path.is_empty() {
            return Err(AssetError::NotFound(String::from("<empty path>")));
        }
        let handle = MeshHandle::from_raw(self.next);
        self.next += 1;
        Ok(handle)
    }
}

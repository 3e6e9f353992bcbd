use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::{AvatarError, AvatarResult};

/// Transport abstraction: resolves a URL to encoded image bytes.
///
/// Actual network transport is a collaborator outside this crate; the loader
/// only needs "given a URL, eventually bytes or an error". Implementations
/// must be usable from fetch worker threads.
pub trait ByteSource: Send + Sync {
    /// Fetch the encoded bytes behind `url`.
    fn get(&self, url: &str) -> AvatarResult<Vec<u8>>;
}

/// Source serving URLs as paths relative to a root directory.
#[derive(Clone, Debug)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Build a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used when resolving relative URLs.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ByteSource for FileSource {
    fn get(&self, url: &str) -> AvatarResult<Vec<u8>> {
        let rel = normalize_rel_path(url)?;
        let path = self.root.join(Path::new(&rel));
        std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))
            .map_err(AvatarError::from)
    }
}

/// In-memory source mapping URLs to byte payloads.
///
/// Primarily a test double, but also useful for hosts that prefetch.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    entries: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Empty source; every fetch fails until entries are inserted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` to be served for `url`.
    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(url.into(), bytes);
    }
}

impl ByteSource for MemorySource {
    fn get(&self, url: &str) -> AvatarResult<Vec<u8>> {
        self.entries
            .get(url)
            .cloned()
            .ok_or_else(|| AvatarError::fetch(format!("no entry for url '{url}'")))
    }
}

/// Normalize and validate source-relative URL paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> AvatarResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(AvatarError::validation("image paths must be relative"));
    }
    if s.is_empty() {
        return Err(AvatarError::validation("image path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(AvatarError::validation("image paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(AvatarError::validation(
            "image path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Document keys, include targets and macro values are all compared as
/// strings, so every path is kept in one spelling: forward slashes, with
/// platform-native conversion only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    /// `.` and `..` segments are kept; see [`NormalizedPath::normalize`].
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path is rooted (`/x` or `C:/x`).
    pub fn is_absolute(&self) -> bool {
        let (root, _) = split_root(&self.inner);
        root == "/" || root.ends_with(":/")
    }

    /// Join this path with a segment.
    ///
    /// An absolute segment replaces the base, like [`Path::join`].
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        if Self::new(&segment_normalized).is_absolute() || self.inner.is_empty() {
            return Self {
                inner: segment_normalized,
            };
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Fold `.` and `..` segments and duplicate slashes lexically.
    ///
    /// No filesystem access is made, so symlinks are not followed. `..`
    /// never climbs above the root of an absolute path; leading `..`
    /// segments of a relative path are kept.
    pub fn normalize(&self) -> Self {
        let (root, rest) = split_root(&self.inner);
        let mut parts: Vec<&str> = Vec::new();
        for segment in rest.split('/') {
            match segment {
                "" | "." => {}
                ".." => match parts.last() {
                    Some(&last) if last != ".." => {
                        parts.pop();
                    }
                    _ if !root.is_empty() => {}
                    _ => parts.push(".."),
                },
                other => parts.push(other),
            }
        }

        let joined = parts.join("/");
        let inner = if root.is_empty() {
            if joined.is_empty() {
                ".".to_string()
            } else {
                joined
            }
        } else {
            format!("{root}{joined}")
        };
        Self { inner }
    }

    /// Express this path relative to `base`.
    ///
    /// Both paths are normalized first. Returns `None` when the path lies
    /// outside `base`, and `.` when they are the same.
    pub fn relative_to(&self, base: &NormalizedPath) -> Option<Self> {
        let path = self.normalize();
        let base = base.normalize();
        if path == base {
            return Some(Self::new("."));
        }

        let prefix = if base.inner.ends_with('/') {
            base.inner.clone()
        } else {
            format!("{}/", base.inner)
        };
        path.inner.strip_prefix(&prefix).map(|rest| Self {
            inner: rest.to_string(),
        })
    }

    /// Get the parent directory.
    ///
    /// A bare file name has no parent and returns `None`.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) if trimmed[..idx].ends_with(':') => Some(Self {
                inner: trimmed[..=idx].to_string(),
            }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

/// Split off the root (`/`, `C:/`, `C:`) of a forward-slash path.
fn split_root(path: &str) -> (&str, &str) {
    if let Some(rest) = path.strip_prefix('/') {
        return ("/", rest);
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        if bytes.get(2) == Some(&b'/') {
            return (&path[..3], &path[3..]);
        }
        return (&path[..2], &path[2..]);
    }
    ("", path)
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

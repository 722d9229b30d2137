//! Dependency records produced by the manifest parser

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory, relative to the project, that resolved dependencies are written into
pub const ROOT_PATH: &str = ".proto_deps";

/// Where a dependency's `.proto` content comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// A file inside a git repository (`- git:`)
    Git,
    /// A file downloaded over HTTP(S) (`- url:`)
    Url,
    /// A file copied from the local filesystem (`- path:`)
    Path,
}

impl DependencyKind {
    /// Manifest keyword for this kind, as written after `- `
    pub fn keyword(self) -> &'static str {
        match self {
            DependencyKind::Git => "git",
            DependencyKind::Url => "url",
            DependencyKind::Path => "path",
        }
    }

    /// Literal prefix that introduces this kind on a manifest line
    pub fn line_prefix(self) -> &'static str {
        match self {
            DependencyKind::Git => "- git: ",
            DependencyKind::Url => "- url: ",
            DependencyKind::Path => "- path: ",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Version pin of a dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Human readable label (e.g. "v1", "v0.0.0-20211005231101-409e134ffaac")
    pub tag: String,
    /// Exact revision, filled in once a fetcher pins a commit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_revision: Option<String>,
}

impl VersionInfo {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            commit_revision: None,
        }
    }
}

/// A single dependency declared in a manifest.
///
/// Build records through [`Dependency::git`], [`Dependency::url`] and
/// [`Dependency::path`]: each constructor leaves the fields that do not
/// belong to its kind unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub kind: DependencyKind,
    /// Repository reference, URL or local path depending on `kind`
    pub source: String,
    /// Target path relative to the dependency root (url and path only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Path of the proto file inside the repository (git only, not yet produced by the grammar)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_path: Option<String>,
    pub version: VersionInfo,
}

impl Dependency {
    /// Git dependency: `- git: <repo> <tag>`
    pub fn git(source: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            kind: DependencyKind::Git,
            source: source.into(),
            destination: None,
            git_path: None,
            version: VersionInfo::new(tag),
        }
    }

    /// URL dependency: `- url: <url> <destination> <tag>`
    pub fn url(
        source: impl Into<String>,
        destination: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            kind: DependencyKind::Url,
            source: source.into(),
            destination: Some(destination.into()),
            git_path: None,
            version: VersionInfo::new(tag),
        }
    }

    /// Local path dependency: `- path: <path> <destination> <tag>`
    pub fn path(
        source: impl Into<String>,
        destination: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            kind: DependencyKind::Path,
            source: source.into(),
            destination: Some(destination.into()),
            git_path: None,
            version: VersionInfo::new(tag),
        }
    }

    /// Where the fetched file should land under `root`.
    ///
    /// Git dependencies carry no destination, so their source reference is
    /// used as the relative location.
    pub fn resolve_destination(&self, root: &Path) -> PathBuf {
        let relative = match self.kind {
            DependencyKind::Git => self.source.as_str(),
            DependencyKind::Url | DependencyKind::Path => {
                self.destination.as_deref().unwrap_or(self.source.as_str())
            }
        };
        root.join(relative.trim_start_matches("./"))
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}@{}", self.kind, self.source, self.version.tag)
    }
}

/// A parsed manifest: its header version and the declared dependencies in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Header version label, e.g. "v1"
    pub version: String,
    pub dependencies: Vec<Dependency>,
}

impl Manifest {
    /// Numeric part of the header version (`v12` -> 12)
    pub fn format_version(&self) -> Option<u64> {
        self.version.strip_prefix('v')?.parse().ok()
    }
}

//! Errors reported while reading and parsing a dependency manifest
//!
//! All variants are permanent validation failures. Line numbers are 1-based
//! so they can be shown to users as-is.

use crate::models::DependencyKind;

/// Pattern a git dependency line has to follow
pub const GIT_LINE_PATTERN: &str =
    "- git: github.com/repo/file.proto v0.0.0-20211005231101-409e134ffaac";

/// Pattern a url dependency line has to follow
pub const URL_LINE_PATTERN: &str =
    "- url: https://github.com/repo/file.proto ./github.com/repo/file.proto v1";

/// Pattern a path dependency line has to follow
pub const PATH_LINE_PATTERN: &str =
    "- path: /var/github.com/repo/file.proto ./github.com/repo/file.proto v1";

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The injected reader failed; its error is passed through unchanged
    #[error(transparent)]
    Read(#[from] std::io::Error),

    #[error("no dependencies found, empty file")]
    EmptyManifest,

    #[error("manifest is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    #[error("invalid dependencies file, expected \"version: v<number>\" on line 1, found {found:?}")]
    InvalidVersionHeader { found: String },

    #[error("invalid dependencies file, rows count {count} is less than 3")]
    TooFewLines { count: usize },

    #[error("invalid dependencies file, \"deps:\" block not found on line 2, found {found:?}")]
    MissingDepsBlock { found: String },

    #[error("line {line}: empty dependency")]
    EmptyDependencyLine { line: usize },

    #[error("line {line}: unrecognized dependency {content:?}, expected \"- git:\", \"- url:\" or \"- path:\"")]
    UnrecognizedDependencyLine { line: usize, content: String },

    #[error("line {line}: invalid dependency {content:?}, has to be of pattern \"- git: github.com/repo/file.proto v0.0.0-20211005231101-409e134ffaac\"")]
    MalformedGitDependency { line: usize, content: String },

    #[error("line {line}: invalid dependency {content:?}, has to be of pattern \"- url: https://github.com/repo/file.proto ./github.com/repo/file.proto v1\"")]
    MalformedUrlDependency { line: usize, content: String },

    #[error("line {line}: invalid dependency {content:?}, has to be of pattern \"- path: /var/github.com/repo/file.proto ./github.com/repo/file.proto v1\"")]
    MalformedPathDependency { line: usize, content: String },

    #[error("line {line}: invalid dependency, expected http(s) URL to a .proto file, found {url:?}")]
    InvalidProtoUrl { line: usize, url: String },
}

impl ManifestError {
    /// Manifest line the error points at, if it is tied to one
    pub fn line(&self) -> Option<usize> {
        match self {
            ManifestError::InvalidVersionHeader { .. } => Some(1),
            ManifestError::MissingDepsBlock { .. } => Some(2),
            ManifestError::EmptyDependencyLine { line }
            | ManifestError::UnrecognizedDependencyLine { line, .. }
            | ManifestError::MalformedGitDependency { line, .. }
            | ManifestError::MalformedUrlDependency { line, .. }
            | ManifestError::MalformedPathDependency { line, .. }
            | ManifestError::InvalidProtoUrl { line, .. } => Some(*line),
            ManifestError::Read(_)
            | ManifestError::EmptyManifest
            | ManifestError::InvalidEncoding(_)
            | ManifestError::TooFewLines { .. } => None,
        }
    }
}

/// Errors raised when a record cannot be written back as a manifest line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("manifest has no dependencies")]
    NoDependencies,

    #[error("invalid manifest version {0:?}, expected \"v<number>\"")]
    InvalidVersion(String),

    #[error("{kind} dependency {source_ref:?} has no destination")]
    MissingDestination {
        kind: DependencyKind,
        source_ref: String,
    },

    #[error("{kind} dependency field {field} is empty or contains whitespace: {value:?}")]
    InvalidField {
        kind: DependencyKind,
        field: &'static str,
        value: String,
    },

    #[error("url dependency source is not an http(s) URL to a .proto file: {0:?}")]
    InvalidProtoUrl(String),
}

/// Result type alias for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

//! Parsers for `.proto` dependency manifests
//!
//! A manifest is line oriented:
//!
//! ```text
//! version: v1
//! deps:
//! - git: github.com/org/repo/file.proto v0.0.0-20211005231101-409e134ffaac
//! - url: https://host/a/b.proto ./github.com/a/b.proto v1
//! - path: /var/repo/file.proto ./repo/file.proto v2
//! ```
//!
//! [`manifest`] validates the header and walks the dependency lines,
//! [`parse_dependency_line`] picks the decoder for each line by prefix, and
//! the [`git`], [`url`] and [`path`] decoders build the records.

use crate::error::{ManifestError, ManifestResult};
use crate::models::{Dependency, DependencyKind};

pub mod git;
pub mod manifest;
pub mod path;
pub mod url;

pub use manifest::{ManifestParser, parse_bytes, parse_str};

/// Order in which line prefixes are tried
const DISPATCH_ORDER: [DependencyKind; 3] = [
    DependencyKind::Git,
    DependencyKind::Url,
    DependencyKind::Path,
];

/// Trait for decoding the fields of one dependency line
pub trait Decoder: Send + Sync {
    /// Kind of dependency this decoder produces
    fn kind(&self) -> DependencyKind;

    /// Decode the part of the line that follows the `- <kind>: ` prefix.
    ///
    /// `line` is the 1-based manifest line, used for error reporting.
    fn decode(&self, fields: &str, line: usize) -> ManifestResult<Dependency>;
}

/// Decoder responsible for `kind`
pub fn decoder_for(kind: DependencyKind) -> &'static dyn Decoder {
    match kind {
        DependencyKind::Git => &git::GitDecoder,
        DependencyKind::Url => &url::UrlDecoder,
        DependencyKind::Path => &path::PathDecoder,
    }
}

/// Split a trimmed line into its kind and the remaining fields.
///
/// Returns `None` when the line starts with none of the known prefixes.
pub fn classify(trimmed: &str) -> Option<(DependencyKind, &str)> {
    DISPATCH_ORDER.into_iter().find_map(|kind| {
        trimmed
            .strip_prefix(kind.line_prefix())
            .map(|fields| (kind, fields))
    })
}

/// Parse a single dependency line.
///
/// Surrounding whitespace is ignored. Blank lines and lines with an unknown
/// prefix are errors rather than being skipped.
pub fn parse_dependency_line(line: &str, line_number: usize) -> ManifestResult<Dependency> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Err(ManifestError::EmptyDependencyLine { line: line_number });
    }

    let Some((kind, fields)) = classify(trimmed) else {
        return Err(ManifestError::UnrecognizedDependencyLine {
            line: line_number,
            content: trimmed.to_string(),
        });
    };

    decoder_for(kind).decode(fields, line_number)
}

/// Split decoder fields on single spaces, keeping empty tokens so that
/// doubled separators are reported instead of collapsed
pub(crate) fn split_fields(fields: &str) -> Vec<&str> {
    fields.split(' ').collect()
}

//! Decoder for local path dependency lines
//!
//! Format: `- path: <local/file.proto> <destination> <version>`

use super::{Decoder, split_fields};
use crate::error::{ManifestError, ManifestResult};
use crate::models::{Dependency, DependencyKind};

/// Decoder for `- path:` lines. The source path is taken as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathDecoder;

impl PathDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for PathDecoder {
    fn kind(&self) -> DependencyKind {
        DependencyKind::Path
    }

    fn decode(&self, fields: &str, line: usize) -> ManifestResult<Dependency> {
        let [source, destination, tag] = split_fields(fields)[..] else {
            return Err(ManifestError::MalformedPathDependency {
                line,
                content: fields.to_string(),
            });
        };

        Ok(Dependency::path(source, destination, tag))
    }
}

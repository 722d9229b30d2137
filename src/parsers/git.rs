//! Decoder for git dependency lines
//!
//! Format: `- git: <repository/file.proto> <version>`

use super::{Decoder, split_fields};
use crate::error::{ManifestError, ManifestResult};
use crate::models::{Dependency, DependencyKind};

/// Decoder for `- git:` lines
#[derive(Debug, Default, Clone, Copy)]
pub struct GitDecoder;

impl GitDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for GitDecoder {
    fn kind(&self) -> DependencyKind {
        DependencyKind::Git
    }

    fn decode(&self, fields: &str, line: usize) -> ManifestResult<Dependency> {
        let [source, tag] = split_fields(fields)[..] else {
            return Err(ManifestError::MalformedGitDependency {
                line,
                content: fields.to_string(),
            });
        };

        Ok(Dependency::git(source, tag))
    }
}

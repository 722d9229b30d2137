//! Decoder for URL dependency lines
//!
//! Format: `- url: <http(s)://.../file.proto> <destination> <version>`

use super::{Decoder, split_fields};
use crate::error::{ManifestError, ManifestResult};
use crate::models::{Dependency, DependencyKind};

/// Decoder for `- url:` lines
#[derive(Debug, Default, Clone, Copy)]
pub struct UrlDecoder;

impl UrlDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for UrlDecoder {
    fn kind(&self) -> DependencyKind {
        DependencyKind::Url
    }

    fn decode(&self, fields: &str, line: usize) -> ManifestResult<Dependency> {
        let [source, destination, tag] = split_fields(fields)[..] else {
            return Err(ManifestError::MalformedUrlDependency {
                line,
                content: fields.to_string(),
            });
        };

        if !is_proto_url(source) {
            return Err(ManifestError::InvalidProtoUrl {
                line,
                url: source.to_string(),
            });
        }

        Ok(Dependency::url(source, destination, tag))
    }
}

/// Check that `url` uses the http or https scheme and points at a `.proto` file
pub fn is_proto_url(url: &str) -> bool {
    let Some(rest) = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
    else {
        return false;
    };

    rest.ends_with(".proto")
}

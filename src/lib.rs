//! protodeps - parser for `.proto` dependency manifests
//!
//! This crate turns a dependency manifest listing `.proto` files from git
//! repositories, URLs and local paths into validated [`models::Dependency`]
//! records for a fetcher to act on.

pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod reader;
pub mod render;

pub use error::{ManifestError, ManifestResult, RenderError};
pub use models::{Dependency, DependencyKind, Manifest, ROOT_PATH, VersionInfo};
pub use parsers::{ManifestParser, parse_bytes, parse_str};
pub use reader::{FileReader, FsReader};

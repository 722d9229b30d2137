//! File reading capability injected into the manifest parser
//!
//! The parser never touches storage directly. Callers hand it a
//! [`FileReader`]; production code uses [`FsReader`], tests use an
//! in-memory implementation.

use std::io;
use std::path::Path;

/// Reads a whole file into memory
pub trait FileReader: Send + Sync {
    /// Return the complete content of the file at `path`
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`FileReader`] backed by the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl FsReader {
    pub fn new() -> Self {
        Self
    }
}

impl FileReader for FsReader {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

impl<R: FileReader + ?Sized> FileReader for &R {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read_file(path)
    }
}

impl<R: FileReader + ?Sized> FileReader for Box<R> {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read_file(path)
    }
}

//! Manifest parser: header validation and dependency line aggregation

use std::path::Path;

use super::parse_dependency_line;
use crate::error::{ManifestError, ManifestResult};
use crate::models::{Dependency, Manifest};
use crate::reader::FileReader;

/// Prefix of the header on line 1
pub(crate) const VERSION_PREFIX: &str = "version: ";

/// Literal marker that opens the dependency block on line 2
pub(crate) const DEPS_MARKER: &str = "deps:";

/// Header, deps marker and at least one dependency
const MIN_LINES: usize = 3;

/// Reads manifests through an injected [`FileReader`] and parses them
#[derive(Debug, Clone, Default)]
pub struct ManifestParser<R> {
    reader: R,
}

impl<R: FileReader> ManifestParser<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read the manifest at `path` and return its dependencies in declaration order
    pub fn get_deps(&self, path: &Path) -> ManifestResult<Vec<Dependency>> {
        Ok(self.parse(path)?.dependencies)
    }

    /// Read the manifest at `path` and parse it, keeping the header version
    pub fn parse(&self, path: &Path) -> ManifestResult<Manifest> {
        let content = self.reader.read_file(path)?;
        tracing::debug!("Read {} bytes from {}", content.len(), path.display());

        let manifest = parse_bytes(content)?;
        tracing::debug!(
            "Parsed {} dependencies from {} (format {})",
            manifest.dependencies.len(),
            path.display(),
            manifest.version
        );

        Ok(manifest)
    }
}

/// Parse raw manifest bytes
pub fn parse_bytes(content: Vec<u8>) -> ManifestResult<Manifest> {
    if content.is_empty() {
        return Err(ManifestError::EmptyManifest);
    }

    let content = String::from_utf8(content)?;
    parse_str(&content)
}

/// Parse manifest text.
///
/// The first error aborts the parse; no partial dependency list is returned.
pub fn parse_str(content: &str) -> ManifestResult<Manifest> {
    if content.is_empty() {
        return Err(ManifestError::EmptyManifest);
    }

    // A final newline terminates the last line instead of opening a new one
    let body = content.strip_suffix('\n').unwrap_or(content);
    let lines: Vec<&str> = body.split('\n').collect();

    let version = parse_version_header(lines[0]).ok_or_else(|| {
        ManifestError::InvalidVersionHeader {
            found: lines[0].to_string(),
        }
    })?;

    if lines.len() < MIN_LINES {
        return Err(ManifestError::TooFewLines { count: lines.len() });
    }

    if lines[1] != DEPS_MARKER {
        return Err(ManifestError::MissingDepsBlock {
            found: lines[1].to_string(),
        });
    }

    let dependencies = lines[2..]
        .iter()
        .enumerate()
        .map(|(idx, line)| parse_dependency_line(line, idx + MIN_LINES))
        .collect::<ManifestResult<Vec<_>>>()?;

    Ok(Manifest {
        version: version.to_string(),
        dependencies,
    })
}

/// Extract `v<digits>` from a `version: v<digits>` header line
fn parse_version_header(line: &str) -> Option<&str> {
    line.strip_prefix(VERSION_PREFIX)
        .filter(|version| is_version_label(version))
}

/// `v` followed by one or more ASCII digits
pub(crate) fn is_version_label(version: &str) -> bool {
    version
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DependencyKind;
    use std::collections::HashMap;
    use std::io;
    use std::path::PathBuf;

    const FULL_MANIFEST: &str = "version: v1
deps:
- git: github.com/org/repo/file.proto v0.0.0-20211005231101-409e134ffaac
- url: https://host/a/b.proto ./dst v1
- path: /var/repo/file.proto ./dst v2
";

    #[derive(Default)]
    struct MemoryReader {
        files: HashMap<PathBuf, Vec<u8>>,
    }

    impl MemoryReader {
        fn with_file(path: &str, content: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(PathBuf::from(path), content.as_bytes().to_vec());
            Self { files }
        }
    }

    impl FileReader for MemoryReader {
        fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such manifest"))
        }
    }

    #[test]
    fn test_full_manifest_order() {
        let manifest = parse_str(FULL_MANIFEST).unwrap();
        assert_eq!(manifest.version, "v1");

        let kinds: Vec<_> = manifest.dependencies.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DependencyKind::Git, DependencyKind::Url, DependencyKind::Path]
        );
    }

    #[test]
    fn test_without_trailing_newline() {
        let manifest = parse_str(FULL_MANIFEST.trim_end()).unwrap();
        assert_eq!(manifest.dependencies.len(), 3);
    }

    #[test]
    fn test_get_deps_through_reader() {
        let parser = ManifestParser::new(MemoryReader::with_file("deps.yaml", FULL_MANIFEST));
        let deps = parser.get_deps(Path::new("deps.yaml")).unwrap();
        assert_eq!(deps.len(), 3);
        assert_eq!(deps[1].source, "https://host/a/b.proto");
    }

    #[test]
    fn test_read_failure_propagates() {
        let parser = ManifestParser::new(MemoryReader::default());
        let err = parser.get_deps(Path::new("missing.yaml")).unwrap_err();
        match err {
            ManifestError::Read(io) => assert_eq!(io.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_manifest() {
        assert!(matches!(parse_str(""), Err(ManifestError::EmptyManifest)));
        assert!(matches!(
            parse_bytes(Vec::new()),
            Err(ManifestError::EmptyManifest)
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = parse_bytes(vec![b'v', 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ManifestError::InvalidEncoding(_)));
    }

    #[test]
    fn test_invalid_version_header() {
        let headers = [
            "versions: v1",
            "version: 1",
            "version:v1",
            "version: v",
            "Version: v1",
            "version: v1a",
        ];
        for header in headers {
            let content = format!("{header}\ndeps:\n- path: a b v1\n");
            let err = parse_str(&content).unwrap_err();
            assert!(
                matches!(err, ManifestError::InvalidVersionHeader { .. }),
                "header {header:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_multi_digit_version() {
        let manifest = parse_str("version: v42\ndeps:\n- path: a b v1").unwrap();
        assert_eq!(manifest.version, "v42");
        assert_eq!(manifest.format_version(), Some(42));
    }

    #[test]
    fn test_header_checked_before_line_count() {
        let err = parse_str("nope").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidVersionHeader { .. }));
    }

    #[test]
    fn test_too_few_lines() {
        for content in ["version: v1", "version: v1\ndeps:", "version: v1\ndeps:\n"] {
            let err = parse_str(content).unwrap_err();
            assert!(
                matches!(err, ManifestError::TooFewLines { .. }),
                "{content:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_missing_deps_block() {
        let err = parse_str("version: v1\ndeps :\n- path: a b v1").unwrap_err();
        match err {
            ManifestError::MissingDepsBlock { found } => assert_eq!(found, "deps :"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_dependency_line_is_error() {
        let err = parse_str("version: v1\ndeps:\n- path: a b v1\n\n- path: c d v1\n").unwrap_err();
        assert!(matches!(
            err,
            ManifestError::EmptyDependencyLine { line: 4 }
        ));
    }

    #[test]
    fn test_extra_trailing_blank_line_is_error() {
        let err = parse_str("version: v1\ndeps:\n- path: a b v1\n\n").unwrap_err();
        assert!(matches!(
            err,
            ManifestError::EmptyDependencyLine { line: 4 }
        ));
    }

    #[test]
    fn test_single_trailing_newline_ends_last_line() {
        let manifest = parse_str("version: v1\ndeps:\n- path: a b v1\n").unwrap();
        assert_eq!(manifest.dependencies.len(), 1);

        // The newline after "deps:" does not open an empty dependency line
        let err = parse_str("version: v1\ndeps:\n").unwrap_err();
        assert!(matches!(err, ManifestError::TooFewLines { count: 2 }));
    }

    #[test]
    fn test_first_error_wins() {
        let content = "version: v1\ndeps:\n- path: a b v1\n- svn: foo\n- url: ftp://x.proto a v1\n";
        let err = parse_str(content).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::UnrecognizedDependencyLine { line: 4, .. }
        ));
    }

    #[test]
    fn test_parse_version_header() {
        assert_eq!(parse_version_header("version: v1"), Some("v1"));
        assert_eq!(parse_version_header("version: v007"), Some("v007"));
        assert_eq!(parse_version_header("version: v1 "), None);
        assert_eq!(parse_version_header("version: v١"), None);
    }
}

//! Rendering dependency records back into manifest text
//!
//! The output of [`render_manifest`] parses back into an equal
//! [`Manifest`] with [`crate::parsers::parse_str`].

use crate::error::RenderError;
use crate::models::{Dependency, DependencyKind, Manifest};
use crate::parsers::manifest::{DEPS_MARKER, VERSION_PREFIX, is_version_label};
use crate::parsers::url::is_proto_url;

/// Render a single dependency as a manifest line (without newline)
pub fn render_dependency(dep: &Dependency) -> Result<String, RenderError> {
    let source = check_field(dep.kind, "source", &dep.source)?;
    let tag = check_field(dep.kind, "version", &dep.version.tag)?;
    let prefix = dep.kind.line_prefix();

    match dep.kind {
        DependencyKind::Git => Ok(format!("{prefix}{source} {tag}")),
        DependencyKind::Url | DependencyKind::Path => {
            if dep.kind == DependencyKind::Url && !is_proto_url(source) {
                return Err(RenderError::InvalidProtoUrl(source.to_string()));
            }

            let destination =
                dep.destination
                    .as_deref()
                    .ok_or_else(|| RenderError::MissingDestination {
                        kind: dep.kind,
                        source_ref: dep.source.clone(),
                    })?;
            let destination = check_field(dep.kind, "destination", destination)?;

            Ok(format!("{prefix}{source} {destination} {tag}"))
        }
    }
}

/// Render a whole manifest, one dependency per line, ending with a newline
pub fn render_manifest(manifest: &Manifest) -> Result<String, RenderError> {
    if !is_version_label(&manifest.version) {
        return Err(RenderError::InvalidVersion(manifest.version.clone()));
    }

    if manifest.dependencies.is_empty() {
        return Err(RenderError::NoDependencies);
    }

    let mut out = format!("{VERSION_PREFIX}{}\n{DEPS_MARKER}\n", manifest.version);
    for dep in &manifest.dependencies {
        out.push_str(&render_dependency(dep)?);
        out.push('\n');
    }

    Ok(out)
}

fn check_field<'a>(
    kind: DependencyKind,
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, RenderError> {
    if value.is_empty() || value.contains(char::is_whitespace) {
        return Err(RenderError::InvalidField {
            kind,
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_str;

    fn sample_manifest() -> Manifest {
        Manifest {
            version: "v1".to_string(),
            dependencies: vec![
                Dependency::git(
                    "github.com/org/repo/file.proto",
                    "v0.0.0-20211005231101-409e134ffaac",
                ),
                Dependency::url("https://host/a/b.proto", "./dst", "v1"),
                Dependency::path("/var/repo/file.proto", "./dst", "v2"),
            ],
        }
    }

    #[test]
    fn test_render_lines() {
        let deps = sample_manifest().dependencies;
        assert_eq!(
            render_dependency(&deps[0]).unwrap(),
            "- git: github.com/org/repo/file.proto v0.0.0-20211005231101-409e134ffaac"
        );
        assert_eq!(
            render_dependency(&deps[1]).unwrap(),
            "- url: https://host/a/b.proto ./dst v1"
        );
        assert_eq!(
            render_dependency(&deps[2]).unwrap(),
            "- path: /var/repo/file.proto ./dst v2"
        );
    }

    #[test]
    fn test_render_manifest_parses_back() {
        let manifest = sample_manifest();
        let text = render_manifest(&manifest).unwrap();
        assert!(text.starts_with("version: v1\ndeps:\n- git: "));
        assert_eq!(parse_str(&text).unwrap(), manifest);
    }

    #[test]
    fn test_missing_destination() {
        let mut dep = Dependency::path("/a.proto", "./a", "v1");
        dep.destination = None;
        assert!(matches!(
            render_dependency(&dep),
            Err(RenderError::MissingDestination { .. })
        ));
    }

    #[test]
    fn test_field_with_space() {
        let dep = Dependency::git("github.com/my repo/a.proto", "v1");
        assert_eq!(
            render_dependency(&dep),
            Err(RenderError::InvalidField {
                kind: DependencyKind::Git,
                field: "source",
                value: "github.com/my repo/a.proto".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_url() {
        let dep = Dependency::url("ftp://host/a.proto", "./a", "v1");
        assert!(matches!(
            render_dependency(&dep),
            Err(RenderError::InvalidProtoUrl(_))
        ));
    }

    #[test]
    fn test_empty_manifest_cannot_render() {
        let manifest = Manifest {
            version: "v1".to_string(),
            dependencies: Vec::new(),
        };
        assert_eq!(render_manifest(&manifest), Err(RenderError::NoDependencies));
    }

    #[test]
    fn test_invalid_version() {
        let mut manifest = sample_manifest();
        manifest.version = "1.0".to_string();
        assert_eq!(
            render_manifest(&manifest),
            Err(RenderError::InvalidVersion("1.0".to_string()))
        );
    }
}

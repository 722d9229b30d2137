#![no_main]

use libfuzzer_sys::fuzz_target;
use protodeps::render::render_manifest;
use protodeps::{DependencyKind, parse_bytes, parse_str};
use std::panic::AssertUnwindSafe;

fuzz_target!(|data: &[u8]| {
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| parse_bytes(data.to_vec())));

    let manifest = match result {
        Ok(Ok(manifest)) => manifest,
        Ok(Err(_)) => return,
        Err(_) => panic!("parser panicked"),
    };

    let text = std::str::from_utf8(data).expect("parsed manifest must be UTF-8");
    let lines: Vec<&str> = text.strip_suffix('\n').unwrap_or(text).split('\n').collect();
    assert_eq!(
        manifest.dependencies.len(),
        lines.len() - 2,
        "one record per dependency line"
    );

    for dep in &manifest.dependencies {
        assert!(dep.git_path.is_none(), "git_path is never produced");
        assert!(dep.version.commit_revision.is_none());
        match dep.kind {
            DependencyKind::Git => assert!(dep.destination.is_none()),
            DependencyKind::Url | DependencyKind::Path => assert!(dep.destination.is_some()),
        }
    }

    // Anything that renders must parse back to the same manifest
    if let Ok(text) = render_manifest(&manifest) {
        assert_eq!(parse_str(&text).expect("rendered manifest must parse"), manifest);
    }
});

//! Property-based tests for launcher-relative path computation
//!
//! Whatever the layout, joining the launcher's directory with the computed
//! relative path must land back on the modules directory.

use inplace_core::paths::{normalize, relative_path};
use proptest::prelude::*;
use std::path::{Path, PathBuf};

fn segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9_-]{0,6}", 0..5)
}

fn build(root: &str, parts: &[String]) -> PathBuf {
    let mut path = PathBuf::from(root);
    for part in parts {
        path.push(part);
    }
    path
}

proptest! {
    #[test]
    fn relative_path_resolves_back(target in segments(), base in segments()) {
        let cwd = Path::new("/work");
        let target = build("tree", &target);
        let base = build("tree", &base);

        let rel = relative_path(&target, &base, cwd);
        prop_assert!(rel.is_relative());
        prop_assert_eq!(normalize(&base.join(&rel), cwd), normalize(&target, cwd));
    }

    #[test]
    fn relative_path_ignores_absolute_spelling(target in segments(), base in segments()) {
        let cwd = Path::new("/work");
        let relative = relative_path(&build("x", &target), &build("x", &base), cwd);
        let absolute = relative_path(&build("/work/x", &target), &build("/work/x", &base), cwd);
        prop_assert_eq!(relative, absolute);
    }

    #[test]
    fn relative_path_has_no_current_dir_components(target in segments(), base in segments()) {
        let rel = relative_path(&build("t", &target), &build("t", &base), Path::new("/w"));
        let text = rel.to_string_lossy().into_owned();
        prop_assert!(text == "." || !text.split('/').any(|part| part == "." || part.is_empty()));
    }
}

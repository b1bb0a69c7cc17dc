//! Lexical path arithmetic for locating the link tree from the launcher

use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `cwd` and collapse `.` and `..` components without
/// touching the filesystem. Symlinks are deliberately not followed: the link
/// tree is usually made of them.
pub fn normalize(path: &Path, cwd: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Path of `target` relative to the directory `base`.
///
/// Relative inputs are resolved against `cwd` first, so the two sides may
/// mix absolute and relative forms. Identical directories yield `.`.
pub fn relative_path(target: &Path, base: &Path, cwd: &Path) -> PathBuf {
    let target = normalize(target, cwd);
    let base = normalize(base, cwd);

    match pathdiff::diff_paths(&target, &base) {
        Some(rel) if rel.as_os_str().is_empty() => PathBuf::from("."),
        Some(rel) => rel,
        // Only reachable across Windows drive prefixes
        None => target,
    }
}

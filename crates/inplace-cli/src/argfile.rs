//! `@file` argument expansion
//!
//! Build systems hit command-line length limits, so any argument of the form
//! `@path` is replaced by the lines of `path`, one argument per line. Files
//! may reference further argument files.

use anyhow::{bail, Context};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Prefix marking an argument file
pub const PREFIX: char = '@';

/// Nesting limit, guarding against files that include themselves
const MAX_DEPTH: usize = 16;

/// Expand every `@path` argument. The first argument is the program name and
/// is passed through untouched.
pub fn expand_args<I>(args: I) -> anyhow::Result<Vec<OsString>>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut expanded = Vec::new();
    if let Some(program) = args.next() {
        expanded.push(program);
    }
    for arg in args {
        expand_one(arg, 0, &mut expanded)?;
    }
    Ok(expanded)
}

fn expand_one(arg: OsString, depth: usize, out: &mut Vec<OsString>) -> anyhow::Result<()> {
    let path = match arg.to_str().and_then(|s| s.strip_prefix(PREFIX)) {
        Some(path) => PathBuf::from(path),
        None => {
            out.push(arg);
            return Ok(());
        }
    };

    if depth >= MAX_DEPTH {
        bail!(
            "Argument files nested more than {} deep at {}",
            MAX_DEPTH,
            path.display()
        );
    }

    for line in read_lines(&path)? {
        expand_one(OsString::from(line), depth + 1, out)?;
    }
    Ok(())
}

fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read argument file {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_plain_args_untouched() {
        let args = os(&["make-py-inplace", "--python", "python3", "bin.pex"]);
        assert_eq!(expand_args(args.clone()).unwrap(), args);
    }

    #[test]
    fn test_program_name_not_expanded() {
        let args = os(&["@not-a-file"]);
        assert_eq!(expand_args(args.clone()).unwrap(), args);
    }

    #[test]
    fn test_expands_one_arg_per_line() {
        let temp_dir = TempDir::new().unwrap();
        let argfile = temp_dir.path().join("args.txt");
        fs::write(&argfile, "--python\n/usr/bin/python3\r\n--use-lite\n").unwrap();

        let expanded = expand_args(os(&[
            "make-py-inplace",
            &format!("@{}", argfile.display()),
            "bin.pex",
        ]))
        .unwrap();
        assert_eq!(
            expanded,
            os(&[
                "make-py-inplace",
                "--python",
                "/usr/bin/python3",
                "--use-lite",
                "bin.pex"
            ])
        );
    }

    #[test]
    fn test_nested_argfiles() {
        let temp_dir = TempDir::new().unwrap();
        let inner = temp_dir.path().join("inner.txt");
        let outer = temp_dir.path().join("outer.txt");
        fs::write(&inner, "--entry-point\nlib.foo").unwrap();
        fs::write(&outer, format!("--use-lite\n@{}\n", inner.display())).unwrap();

        let expanded =
            expand_args(os(&["prog", &format!("@{}", outer.display())])).unwrap();
        assert_eq!(
            expanded,
            os(&["prog", "--use-lite", "--entry-point", "lib.foo"])
        );
    }

    #[test]
    fn test_self_including_argfile_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let argfile = temp_dir.path().join("loop.txt");
        fs::write(&argfile, format!("@{}\n", argfile.display())).unwrap();

        let err = expand_args(os(&["prog", &format!("@{}", argfile.display())])).unwrap_err();
        assert!(err.to_string().contains("nested"));
    }

    #[test]
    fn test_missing_argfile() {
        let err = expand_args(os(&["prog", "@/definitely/not/here.txt"])).unwrap_err();
        assert!(err.to_string().contains("Failed to read argument file"));
    }
}

//! Shell wrapper that lets multiprocessing workers find the link tree

/// Mode of the written helper script
pub const HELPER_MODE: u32 = 0o755;

/// The helper re-exports the launcher's environment and chains to the
/// interpreter. Every search path is spelled relative to the helper's own
/// location at run time, so the helper keeps working wherever it is invoked
/// from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiprocessingHelper<'a> {
    pub python: &'a str,
    pub relative_modules_dir: &'a str,
    pub native_libs_env_var: &'a str,
    pub preload: &'a str,
}

impl MultiprocessingHelper<'_> {
    /// Environment assignments prefixed to the interpreter invocation
    pub fn env_assignments(&self) -> Vec<String> {
        let modules = format!("$(dirname $0)/{}", self.relative_modules_dir);
        vec![
            format!("PYTHONPATH={}", modules),
            format!("LD_PRELOAD={}", self.preload),
            format!("{}={}", self.native_libs_env_var, modules),
        ]
    }

    pub fn render(&self) -> String {
        format!(
            "#!/usr/bin/env bash\n\n{} {} \"$@\"",
            self.env_assignments().join(" "),
            self.python
        )
    }
}

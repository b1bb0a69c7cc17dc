//! The fixed placeholder vocabulary of bootstrapper templates

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Python,
    InterpreterFlags,
    ModulesDir,
    MainModule,
    MainFunction,
    ShouldAddMultiprocessingWrapper,
    MultiprocessingExecutable,
    NativeLibsEnvVar,
    NativeLibsDir,
    NativeLibsPreloadEnvVar,
    NativeLibsPreload,
}

impl Placeholder {
    /// Every recognised placeholder, in substitution order
    pub const ALL: [Placeholder; 11] = [
        Placeholder::Python,
        Placeholder::InterpreterFlags,
        Placeholder::ModulesDir,
        Placeholder::MainModule,
        Placeholder::MainFunction,
        Placeholder::ShouldAddMultiprocessingWrapper,
        Placeholder::MultiprocessingExecutable,
        Placeholder::NativeLibsEnvVar,
        Placeholder::NativeLibsDir,
        Placeholder::NativeLibsPreloadEnvVar,
        Placeholder::NativeLibsPreload,
    ];

    /// The literal token as it appears in template text
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Python => "<PYTHON>",
            Placeholder::InterpreterFlags => "<PYTHON_INTERPRETER_FLAGS>",
            Placeholder::ModulesDir => "<MODULES_DIR>",
            Placeholder::MainModule => "<MAIN_MODULE>",
            Placeholder::MainFunction => "<MAIN_FUNCTION>",
            Placeholder::ShouldAddMultiprocessingWrapper => {
                "<SHOULD_ADD_MULTIPROCESSING_WRAPPER>"
            }
            Placeholder::MultiprocessingExecutable => "<MP_EXECUTABLE>",
            Placeholder::NativeLibsEnvVar => "<NATIVE_LIBS_ENV_VAR>",
            Placeholder::NativeLibsDir => "<NATIVE_LIBS_DIR>",
            Placeholder::NativeLibsPreloadEnvVar => "<NATIVE_LIBS_PRELOAD_ENV_VAR>",
            Placeholder::NativeLibsPreload => "<NATIVE_LIBS_PRELOAD>",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Values to substitute for placeholders, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    values: Vec<(Placeholder, String)>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `placeholder`, replacing any earlier value
    pub fn set(&mut self, placeholder: Placeholder, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.values.iter_mut().find(|(p, _)| *p == placeholder) {
            Some((_, existing)) => *existing = value,
            None => self.values.push((placeholder, value)),
        }
        self
    }

    /// Replace every occurrence of every placeholder that has a value.
    ///
    /// The template is scanned once, so substituted values are never
    /// themselves searched for tokens. Placeholders without a value and any
    /// other bracketed text are copied through unchanged.
    pub fn apply(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(idx) = rest.find('<') {
            out.push_str(&rest[..idx]);
            let candidate = &rest[idx..];
            match self
                .values
                .iter()
                .find(|(p, _)| candidate.starts_with(p.token()))
            {
                Some((placeholder, value)) => {
                    out.push_str(value);
                    rest = &candidate[placeholder.token().len()..];
                }
                None => {
                    out.push('<');
                    rest = &candidate[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_distinct() {
        for (i, a) in Placeholder::ALL.iter().enumerate() {
            for b in &Placeholder::ALL[i + 1..] {
                assert!(!a.token().contains(b.token()), "{a} contains {b}");
                assert!(!b.token().contains(a.token()), "{b} contains {a}");
            }
        }
    }

    #[test]
    fn test_apply_replaces_every_occurrence() {
        let mut subs = Substitutions::new();
        subs.set(Placeholder::ModulesDir, "../link-tree");
        assert_eq!(
            subs.apply("<MODULES_DIR>:<MODULES_DIR>/lib"),
            "../link-tree:../link-tree/lib"
        );
    }

    #[test]
    fn test_apply_leaves_unknown_text() {
        let mut subs = Substitutions::new();
        subs.set(Placeholder::Python, "/usr/bin/env python3");
        assert_eq!(
            subs.apply("#!<PYTHON>\nif a <b and c> d: <UNKNOWN_TOKEN> <"),
            "#!/usr/bin/env python3\nif a <b and c> d: <UNKNOWN_TOKEN> <"
        );
    }

    #[test]
    fn test_apply_leaves_unset_placeholders() {
        let subs = Substitutions::new();
        assert_eq!(subs.apply("x = <MAIN_MODULE>"), "x = <MAIN_MODULE>");
    }

    #[test]
    fn test_apply_does_not_rescan_values() {
        let mut subs = Substitutions::new();
        subs.set(Placeholder::MainModule, "<MODULES_DIR>");
        subs.set(Placeholder::ModulesDir, "link-tree");
        assert_eq!(
            subs.apply("<MAIN_MODULE> <MODULES_DIR>"),
            "<MODULES_DIR> link-tree"
        );
    }

    #[test]
    fn test_similar_prefixes() {
        let mut subs = Substitutions::new();
        subs.set(Placeholder::NativeLibsPreload, "None");
        subs.set(Placeholder::NativeLibsPreloadEnvVar, "LD_PRELOAD");
        assert_eq!(
            subs.apply("<NATIVE_LIBS_PRELOAD_ENV_VAR>=<NATIVE_LIBS_PRELOAD>"),
            "LD_PRELOAD=None"
        );
    }

    #[test]
    fn test_set_overwrites() {
        let mut subs = Substitutions::new();
        subs.set(Placeholder::MainModule, "a").set(Placeholder::MainModule, "b");
        assert_eq!(subs.apply("<MAIN_MODULE>"), "b");
        assert_eq!(subs, {
            let mut expected = Substitutions::new();
            expected.set(Placeholder::MainModule, "b");
            expected
        });
    }
}

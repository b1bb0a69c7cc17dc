use crate::errors::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Interpreter flags accepted when none are given on the command line
pub const DEFAULT_INTERPRETER_FLAGS: &str = "-Es";

/// Dynamic loader variable used to locate native library dependencies
pub fn default_native_libs_env_var() -> &'static str {
    if cfg!(target_os = "macos") {
        "DYLD_LIBRARY_PATH"
    } else {
        "LD_LIBRARY_PATH"
    }
}

/// What the launcher runs on startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "name")]
pub enum EntryPoint {
    /// Importable module executed as `__main__`
    Module(String),
    /// Fully qualified function name, e.g. `pkg.main:run`
    Function(String),
}

impl EntryPoint {
    /// Build an entry point from the two mutually exclusive command-line values
    pub fn from_parts(module: Option<String>, function: Option<String>) -> Result<Self> {
        match (module, function) {
            (Some(module), None) => Ok(EntryPoint::Module(module)),
            (None, Some(function)) => Ok(EntryPoint::Function(function)),
            (Some(_), Some(_)) => Err(GeneratorError::InvalidConfig(
                "entry point and main function are mutually exclusive".to_string(),
            )),
            (None, None) => Err(GeneratorError::InvalidConfig(
                "one of entry point or main function is required".to_string(),
            )),
        }
    }

    /// Module name, or an empty string for the function form
    pub fn module_name(&self) -> &str {
        match self {
            EntryPoint::Module(name) => name.as_str(),
            EntryPoint::Function(_) => "",
        }
    }

    /// Function name, or an empty string for the module form
    pub fn function_name(&self) -> &str {
        match self {
            EntryPoint::Module(_) => "",
            EntryPoint::Function(name) => name.as_str(),
        }
    }
}

/// Resolved inputs for a single generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Full bootstrapper template
    pub template: PathBuf,

    /// Simplified bootstrapper template
    pub template_lite: PathBuf,

    /// Render `template_lite` instead of `template`
    #[serde(default)]
    pub use_lite: bool,

    /// Interpreter placed in the launcher hashbang
    pub python: String,

    /// Interpreter of the build host
    pub host_python: String,

    /// Accepted for compatibility; never rendered into the hashbang
    #[serde(default = "default_interpreter_flags")]
    pub interpreter_flags: String,

    pub entry_point: EntryPoint,

    /// Link tree the launcher puts on the module search path
    pub modules_dir: PathBuf,

    /// Where the launcher is written
    pub output: PathBuf,

    /// Native libraries forced into `LD_PRELOAD`
    #[serde(default)]
    pub preload_libraries: Vec<PathBuf>,

    /// Where to write the multiprocessing helper, if wanted
    #[serde(default)]
    pub multiprocessing_executable: Option<PathBuf>,

    #[serde(default = "default_native_libs_env_var_owned")]
    pub native_libs_env_var: String,

    /// Accepted for compatibility with other packagers; unused
    #[serde(default)]
    pub passthrough: Vec<String>,
}

fn default_interpreter_flags() -> String {
    DEFAULT_INTERPRETER_FLAGS.to_string()
}

fn default_native_libs_env_var_owned() -> String {
    default_native_libs_env_var().to_string()
}

impl GeneratorConfig {
    /// Create a configuration with every optional input at its default
    pub fn new(
        template: impl Into<PathBuf>,
        template_lite: impl Into<PathBuf>,
        python: impl Into<String>,
        entry_point: EntryPoint,
        modules_dir: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        let python = python.into();
        Self {
            template: template.into(),
            template_lite: template_lite.into(),
            use_lite: false,
            host_python: python.clone(),
            python,
            interpreter_flags: default_interpreter_flags(),
            entry_point,
            modules_dir: modules_dir.into(),
            output: output.into(),
            preload_libraries: Vec::new(),
            multiprocessing_executable: None,
            native_libs_env_var: default_native_libs_env_var_owned(),
            passthrough: Vec::new(),
        }
    }

    pub fn with_lite(mut self, use_lite: bool) -> Self {
        self.use_lite = use_lite;
        self
    }

    pub fn with_preload(mut self, libraries: Vec<PathBuf>) -> Self {
        self.preload_libraries = libraries;
        self
    }

    pub fn with_multiprocessing_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.multiprocessing_executable = Some(path.into());
        self
    }

    pub fn with_native_libs_env_var(mut self, name: impl Into<String>) -> Self {
        self.native_libs_env_var = name.into();
        self
    }

    /// The template this run renders
    pub fn selected_template(&self) -> &Path {
        if self.use_lite {
            &self.template_lite
        } else {
            &self.template
        }
    }

    /// Directory the launcher lives in; an output without a parent lives in `.`
    pub fn output_dir(&self) -> &Path {
        match self.output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

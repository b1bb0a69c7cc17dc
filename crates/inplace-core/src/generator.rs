//! Bootstrapper generation: template in, executable launcher out

use crate::config::GeneratorConfig;
use crate::errors::{GeneratorError, Result};
use crate::fs::{FileSystem, RealFileSystem, EXECUTE_BITS};
use crate::helper::{MultiprocessingHelper, HELPER_MODE};
use crate::literal::{python_literal, render_preload};
use crate::paths::relative_path;
use crate::placeholder::{Placeholder, Substitutions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Prepended to the interpreter so a hashbang may point at a script
pub const ENV_INDIRECTION: &str = "/usr/bin/env ";

/// Loader variable that carries the preload list on every platform
pub const PRELOAD_ENV_VAR: &str = "LD_PRELOAD";

/// Files written by one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub output: PathBuf,
    pub multiprocessing_executable: Option<PathBuf>,
    /// Link tree as seen from the launcher's directory
    pub relative_modules_dir: String,
}

pub struct Bootstrapper {
    file_system: Arc<dyn FileSystem>,
}

impl Default for Bootstrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Bootstrapper {
    pub fn new() -> Self {
        Self::with_file_system(Arc::new(RealFileSystem::new()))
    }

    pub fn with_file_system(file_system: Arc<dyn FileSystem>) -> Self {
        Bootstrapper { file_system }
    }

    /// Render the selected template and write the launcher, plus the
    /// multiprocessing helper when one is configured.
    pub fn generate(&self, config: &GeneratorConfig) -> Result<GeneratedFiles> {
        for template in [&config.template, &config.template_lite] {
            if !self.file_system.exists(template) {
                return Err(GeneratorError::TemplateNotFound {
                    path: template.clone(),
                });
            }
        }

        let template_path = config.selected_template();
        debug!("Reading template {}", template_path.display());
        let template = self
            .file_system
            .read_to_string(template_path)
            .map_err(|e| GeneratorError::template(template_path, e))?;

        let cwd = self
            .file_system
            .current_dir()
            .map_err(|e| GeneratorError::io(Path::new("."), e))?;
        let output_dir = config.output_dir();

        let relative_modules_dir = relative_path(&config.modules_dir, output_dir, &cwd)
            .to_string_lossy()
            .into_owned();
        let preload = render_preload(&config.preload_libraries);
        debug!("Relative modules dir: {}", relative_modules_dir);
        debug!("Preload: {}", preload);

        let mut substitutions = Substitutions::new();
        substitutions
            .set(
                Placeholder::Python,
                format!("{}{}", ENV_INDIRECTION, config.python),
            )
            // Linux passes everything after the interpreter as one argument,
            // so flags cannot follow `/usr/bin/env python`
            .set(Placeholder::InterpreterFlags, "")
            .set(Placeholder::ModulesDir, relative_modules_dir.as_str())
            .set(Placeholder::MainModule, config.entry_point.module_name())
            .set(Placeholder::MainFunction, config.entry_point.function_name());

        let multiprocessing_executable = match &config.multiprocessing_executable {
            Some(helper_path) => {
                let helper = MultiprocessingHelper {
                    python: &config.python,
                    relative_modules_dir: &relative_modules_dir,
                    native_libs_env_var: &config.native_libs_env_var,
                    preload: &preload,
                };
                self.write_executable(helper_path, &helper.render(), |_| HELPER_MODE)?;
                info!("Wrote multiprocessing helper {}", helper_path.display());

                let relative_helper = relative_path(helper_path, output_dir, &cwd);
                substitutions
                    .set(Placeholder::ShouldAddMultiprocessingWrapper, "True")
                    .set(
                        Placeholder::MultiprocessingExecutable,
                        relative_helper.to_string_lossy(),
                    );
                Some(helper_path.clone())
            }
            None => {
                substitutions
                    .set(Placeholder::ShouldAddMultiprocessingWrapper, "False")
                    .set(Placeholder::MultiprocessingExecutable, config.python.as_str());
                None
            }
        };

        substitutions
            .set(Placeholder::NativeLibsEnvVar, config.native_libs_env_var.as_str())
            .set(Placeholder::NativeLibsDir, python_literal(&relative_modules_dir))
            .set(Placeholder::NativeLibsPreloadEnvVar, PRELOAD_ENV_VAR)
            .set(Placeholder::NativeLibsPreload, preload);

        let rendered = substitutions.apply(&template);
        self.write_executable(&config.output, &rendered, |mode| mode | EXECUTE_BITS)?;
        info!("Wrote bootstrapper {}", config.output.display());

        Ok(GeneratedFiles {
            output: config.output.clone(),
            multiprocessing_executable,
            relative_modules_dir,
        })
    }

    /// Create parent directories, write `contents`, then derive the new mode
    /// from the file's current one
    fn write_executable(
        &self,
        path: &Path,
        contents: &str,
        mode: impl FnOnce(u32) -> u32,
    ) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.file_system
                .create_dir_all(parent)
                .map_err(|e| GeneratorError::io(parent, e))?;
        }
        self.file_system
            .write(path, contents)
            .map_err(|e| GeneratorError::io(path, e))?;

        let current = self
            .file_system
            .mode(path)
            .map_err(|e| GeneratorError::io(path, e))?;
        self.file_system
            .set_mode(path, mode(current))
            .map_err(|e| GeneratorError::io(path, e))
    }
}

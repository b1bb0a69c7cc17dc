mod argfile;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use inplace_core::config::DEFAULT_INTERPRETER_FLAGS;
use inplace_core::{default_native_libs_env_var, Bootstrapper, EntryPoint, GeneratorConfig};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Create a bootstrapper script for an in-place Python binary.
///
/// The bootstrapper finds the link tree relative to its own location and runs
/// the entry point with it on the module search path. Arguments may be read
/// from a file with `@path`.
#[derive(Parser, Debug, Clone)]
#[command(name = "make-py-inplace")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("entry")
        .required(true)
        .args(["entry_point", "main_function"])
))]
struct Cli {
    /// Template for the bootstrapper script
    #[arg(long, value_name = "FILE")]
    template: PathBuf,

    /// Template for the bootstrapper script when it is simple
    #[arg(long, value_name = "FILE")]
    template_lite: PathBuf,

    /// Native library to add to LD_PRELOAD (repeatable)
    #[arg(long = "preload", value_name = "FILE")]
    preload_libraries: Vec<PathBuf>,

    /// Python binary to put in the bootstrapper hashbang
    #[arg(long, value_name = "PYTHON")]
    python: String,

    /// Python binary of the build host
    #[arg(long, value_name = "PYTHON")]
    host_python: String,

    /// Interpreter flags for the hashbang (accepted but not rendered)
    #[arg(
        long,
        value_name = "FLAGS",
        default_value = DEFAULT_INTERPRETER_FLAGS,
        allow_hyphen_values = true
    )]
    python_interpreter_flags: String,

    /// Main module to execute
    #[arg(long, value_name = "MODULE")]
    entry_point: Option<String>,

    /// Fully qualified name of the function that serves as the entry point
    #[arg(long, value_name = "FUNCTION")]
    main_function: Option<String>,

    /// Link tree directory to use at runtime
    #[arg(long, value_name = "DIR")]
    modules_dir: PathBuf,

    /// Use the lite template
    #[arg(long)]
    use_lite: bool,

    /// Where to write the bootstrapper script
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Where to write the multiprocessing executable
    #[arg(long, value_name = "FILE")]
    add_multiprocessing_executable: Option<PathBuf>,

    /// Dynamic loader variable used to find native library dependencies
    #[arg(long, value_name = "VAR", default_value = default_native_libs_env_var())]
    native_libs_env_var: String,

    /// Accepted for compatibility with other packagers
    #[arg(long, value_name = "ARG", allow_hyphen_values = true)]
    passthrough: Vec<String>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<GeneratorConfig> {
        let entry_point = EntryPoint::from_parts(self.entry_point, self.main_function)?;
        Ok(GeneratorConfig {
            template: self.template,
            template_lite: self.template_lite,
            use_lite: self.use_lite,
            python: self.python,
            host_python: self.host_python,
            interpreter_flags: self.python_interpreter_flags,
            entry_point,
            modules_dir: self.modules_dir,
            output: self.output,
            preload_libraries: self.preload_libraries,
            multiprocessing_executable: self.add_multiprocessing_executable,
            native_libs_env_var: self.native_libs_env_var,
            passthrough: self.passthrough,
        })
    }
}

fn main() -> anyhow::Result<()> {
    // INFO unless RUST_LOG says otherwise; RUST_LOG=debug shows derived values
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = argfile::expand_args(std::env::args_os())?;
    let cli = Cli::parse_from(args);
    let config = cli.into_config()?;

    debug!(
        "Resolved configuration: {}",
        serde_json::to_string(&config).unwrap_or_default()
    );
    if !config.passthrough.is_empty() {
        debug!("Ignoring {} passthrough argument(s)", config.passthrough.len());
    }

    let generated = Bootstrapper::new()
        .generate(&config)
        .with_context(|| format!("Failed to write bootstrapper {}", config.output.display()))?;

    info!(
        "Bootstrapper {} uses link tree {}",
        generated.output.display(),
        generated.relative_modules_dir
    );
    Ok(())
}

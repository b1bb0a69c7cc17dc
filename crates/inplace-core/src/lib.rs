//! Bootstrapper generation for in-place Python binaries.
//!
//! An in-place binary is a launcher script next to a link tree of the
//! program's modules. This crate turns a launcher template into that script:
//! it fills in the interpreter, the entry point and the link tree location
//! relative to the launcher, and optionally writes a shell helper that
//! multiprocessing workers use to inherit the same environment.

pub mod config;
pub mod errors;
pub mod fs;
pub mod generator;
pub mod helper;
pub mod literal;
pub mod paths;
pub mod placeholder;

pub use config::{default_native_libs_env_var, EntryPoint, GeneratorConfig};
pub use errors::{GeneratorError, Result};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use generator::{Bootstrapper, GeneratedFiles};
pub use helper::MultiprocessingHelper;
pub use placeholder::{Placeholder, Substitutions};

//! Test utilities and fixtures for the inplace bootstrapper generator
//!
//! Shared by unit tests (#[cfg(test)]) and integration tests (tests/ directory).

pub mod fixtures;
pub mod workspace;

pub use workspace::TestWorkspace;

pub mod cli;
pub mod error;
pub mod interfaces;
pub mod pkgdb;
pub mod reexport;

pub use error::{LsModulesError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

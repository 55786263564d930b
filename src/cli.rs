//! Command-line surface and pipeline glue.
//!
//! Uses clap v4 with derive macros for argument parsing. The argument order is
//! fixed by the build rules that invoke this tool, so everything is positional.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use tracing::debug;

use crate::error::Result;
use crate::interfaces;
use crate::pkgdb::PkgDb;
use crate::reexport;

/// Compute the exposed module list for a built Haskell library
#[derive(Parser, Debug)]
#[command(name = "ls-modules")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// `True` to look for profiling interface files (*.p_hi instead of *.hi)
    #[arg(value_name = "WITH_PROFILING")]
    pub with_profiling: String,

    /// Root directory containing compiled interface files
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// `ghc-pkg dump` of the global package database
    #[arg(value_name = "GLOBAL_PKG_DB")]
    pub global_pkg_db: PathBuf,

    /// File with a comma-separated list of module names to hide
    #[arg(value_name = "HIDDEN_MODS_FILE")]
    pub hidden_mods_file: PathBuf,

    /// File with a comma-separated list of reexport declarations
    #[arg(value_name = "REEXPORTED_MODS_FILE")]
    pub reexported_mods_file: PathBuf,

    /// Output file for the exposed module list
    #[arg(value_name = "RESULT_FILE")]
    pub result_file: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Whether profiling interface files are requested. The build rules pass
    /// the literal string `True`; anything else means vanilla.
    #[must_use]
    pub fn profiling(&self) -> bool {
        self.with_profiling == "True"
    }
}

/// Run the whole pipeline: parse the package database, resolve reexports,
/// enumerate interface files, filter hidden modules, write the result.
pub fn run(cli: &Cli) -> Result<()> {
    let dump = fs::read_to_string(&cli.global_pkg_db)?;
    let db = PkgDb::parse(&dump)?;

    let hidden: HashSet<String> = fs::read_to_string(&cli.hidden_mods_file)?
        .split(',')
        .map(|module| module.trim().to_string())
        .collect();

    let raw_reexports = fs::read_to_string(&cli.reexported_mods_file)?;
    let reexports = reexport::resolve_reexports(&raw_reexports, &db)?;

    let modules = interfaces::compiled_module_names(&cli.directory, cli.profiling())?;
    let exposed = modules
        .into_iter()
        .filter(|module| !hidden.contains(module));

    // Exposed modules first, reexports after, both in input order.
    let line = exposed.chain(reexports).join(", ");
    debug!(result = %cli.result_file.display(), "writing exposed module list");
    fs::write(&cli.result_file, line)?;
    Ok(())
}

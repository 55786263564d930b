//! Reexport declaration resolution.
//!
//! Reexport declarations name their source package (`... from pkg-name: ...`),
//! but GHC wants the installed package id there. Every `from <name>:` token
//! whose name is known to the package database is rewritten to `from <id>:`;
//! the rest of the declaration is preserved verbatim.

use itertools::Itertools;
use regex::Regex;
use tracing::debug;

use crate::error::{LsModulesError, Result};
use crate::pkgdb::PkgDb;

/// Resolve the raw comma-separated reexport list against the package database.
///
/// Declarations are trimmed and blank entries dropped. Referencing a package
/// name installed under multiple ids is fatal: substituting either id would
/// silently corrupt the library's metadata, so there is no fallback.
pub fn resolve_reexports(raw: &str, db: &PkgDb) -> Result<Vec<String>> {
    let declarations = raw.split(',').map(str::trim).filter(|d| !d.is_empty());

    let mut names: Vec<&str> = db.names().collect();
    if names.is_empty() {
        // Nothing to substitute against an empty database.
        return Ok(declarations.map(str::to_string).collect());
    }

    // Longest name first, so the alternation always prefers the longest
    // literal at any position. Names are escaped; package names are plain in
    // practice, but a metacharacter must never reach the pattern unquoted.
    names.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let pattern = format!(
        "from ({}):",
        names.iter().map(|name| regex::escape(name)).join("|")
    );
    let re = Regex::new(&pattern)?;

    let mut resolved = Vec::new();
    for declaration in declarations {
        for caps in re.captures_iter(declaration) {
            let name = &caps[1];
            if db.is_ambiguous(name) {
                return Err(LsModulesError::AmbiguousReexport {
                    duplicates: db.duplicate_names(),
                    referenced: name.to_string(),
                });
            }
        }

        let rewritten = re.replace_all(declaration, |caps: &regex::Captures<'_>| {
            // The alternation only matches known names, so the lookup holds.
            let name = &caps[1];
            format!("from {}:", db.id_of(name).unwrap_or(name))
        });
        resolved.push(rewritten.into_owned());
    }

    debug!(reexports = resolved.len(), "resolved reexport declarations");
    Ok(resolved)
}

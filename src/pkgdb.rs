//! `ghc-pkg dump` parsing and the package-name to package-id index.
//!
//! The dump is a stream of `key: value` lines where lines indented by four
//! spaces continue the field opened above them. Packages are addressed by name
//! in source text but by id in compiled metadata, so the index built here is
//! what lets reexport declarations be rewritten for the compiler.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{LsModulesError, Result};

/// One parsed field: its name and the ordered values collected for it.
pub type Field = (String, Vec<String>);

/// Lazy iterator over the fields of a package database dump.
///
/// A field is emitted only when the next non-indented line closes it. A field
/// still open at end of input is dropped; downstream tooling depends on
/// trailing open fields being absent, so this is load-bearing behavior.
pub struct Fields<'a> {
    lines: std::str::Lines<'a>,
    open: Option<Field>,
}

impl<'a> Fields<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines(),
            open: None,
        }
    }
}

impl Iterator for Fields<'_> {
    type Item = Field;

    fn next(&mut self) -> Option<Field> {
        for line in self.lines.by_ref() {
            if let Some(rest) = line.strip_prefix("    ") {
                // Continuation of the open field. Blank continuations and
                // continuations with no field open are dropped.
                let value = rest.trim();
                if let Some((_, values)) = self.open.as_mut() {
                    if !value.is_empty() {
                        values.push(value.to_string());
                    }
                }
                continue;
            }

            let closed = self.open.take();
            self.open = open_field(line);
            if closed.is_some() {
                return closed;
            }
        }
        None
    }
}

/// Try to open a new field from a non-indented line.
///
/// Only a line with exactly one colon and a non-empty name opens a field. A
/// second colon in the value leaves no field open at all; real dumps keep
/// colon-bearing values (URLs, Windows paths) on continuation lines.
fn open_field(line: &str) -> Option<Field> {
    let mut parts = line.split(':');
    let name = parts.next()?.trim();
    let value = parts.next()?;
    if parts.next().is_some() || name.is_empty() {
        return None;
    }

    let value = value.trim();
    let values = if value.is_empty() {
        Vec::new()
    } else {
        vec![value.to_string()]
    };
    Some((name.to_string(), values))
}

/// Index over the global package database: name to id, plus the set of names
/// installed under more than one id.
#[derive(Debug, Default)]
pub struct PkgDb {
    ids_by_name: HashMap<String, String>,
    duplicates: HashSet<String>,
}

impl PkgDb {
    /// Build the index from a `ghc-pkg dump`.
    ///
    /// Only single-valued `name` and `id` fields contribute. Both lists are
    /// sorted independently and zipped positionally; this pairs correctly
    /// because the dump emits `name` and `id` in the same relative order for
    /// every package. A length mismatch means the dump is malformed and is
    /// fatal before any output is written.
    pub fn parse(dump: &str) -> Result<Self> {
        let mut names = Vec::new();
        let mut ids = Vec::new();

        for (field, mut values) in Fields::new(dump) {
            if values.len() != 1 {
                continue;
            }
            let value = values.remove(0);
            match field.as_str() {
                "name" => names.push(value),
                "id" => ids.push(value),
                _ => {}
            }
        }

        if names.len() != ids.len() {
            return Err(LsModulesError::RegistryCountMismatch {
                names: names.len(),
                ids: ids.len(),
            });
        }

        let mut duplicates = HashSet::new();
        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.clone()) {
                duplicates.insert(name.clone());
            }
        }

        names.sort();
        ids.sort();

        debug!(
            packages = names.len(),
            duplicates = duplicates.len(),
            "parsed package database dump"
        );

        let ids_by_name = names.into_iter().zip(ids).collect();
        Ok(Self {
            ids_by_name,
            duplicates,
        })
    }

    /// The id a package name resolves to, if the name is known.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<&str> {
        self.ids_by_name.get(name).map(String::as_str)
    }

    /// All known package names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ids_by_name.keys().map(String::as_str)
    }

    /// Whether a name is installed under more than one id.
    #[must_use]
    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.duplicates.contains(name)
    }

    /// Duplicated names, sorted for stable error messages.
    #[must_use]
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.duplicates.iter().cloned().collect();
        names.sort();
        names
    }
}

//! Interface-file enumeration.
//!
//! A built library leaves one interface file per compiled module under the
//! output directory; the module name is the file's root-relative path with
//! separators turned into dots.

use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{LsModulesError, Result};

/// Vanilla-way interface extension.
const VANILLA_EXT: &str = "hi";
/// Profiling-way interface extension.
const PROFILING_EXT: &str = "p_hi";

/// Enumerate compiled modules under `root`, in traversal order.
pub fn compiled_module_names(root: &Path, with_profiling: bool) -> Result<Vec<String>> {
    let wanted = if with_profiling {
        PROFILING_EXT
    } else {
        VANILLA_EXT
    };

    let mut modules = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| LsModulesError::Walk(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(wanted) {
            continue;
        }
        if let Some(module) = module_name(root, path) {
            modules.push(module);
        }
    }

    debug!(modules = modules.len(), "enumerated interface files");
    Ok(modules)
}

/// Derive the dotted module name from an interface file path.
///
/// `Data/Map/Strict.hi` under `root` becomes `Data.Map.Strict`. Paths that are
/// not valid UTF-8 cannot name a module and are skipped.
fn module_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let stem = relative.with_extension("");
    let parts: Option<Vec<&str>> = stem
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect();
    parts.map(|p| p.join("."))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
    }

    fn names(root: &Path, with_profiling: bool) -> HashSet<String> {
        compiled_module_names(root, with_profiling)
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn derives_dotted_names_from_relative_paths() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "Public/Api.hi");
        touch(temp.path(), "Data/Map/Strict.hi");
        touch(temp.path(), "Main.hi");

        let got = names(temp.path(), false);
        let want: HashSet<String> = ["Public.Api", "Data.Map.Strict", "Main"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn vanilla_walk_ignores_profiling_interfaces() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "Foo.hi");
        touch(temp.path(), "Foo.p_hi");
        touch(temp.path(), "Foo.o");

        assert_eq!(
            names(temp.path(), false),
            HashSet::from(["Foo".to_string()])
        );
    }

    #[test]
    fn profiling_walk_matches_only_profiling_interfaces() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "Foo.hi");
        touch(temp.path(), "Bar.p_hi");

        assert_eq!(
            names(temp.path(), true),
            HashSet::from(["Bar".to_string()])
        );
    }

    #[test]
    fn empty_directory_yields_no_modules() {
        let temp = TempDir::new().unwrap();
        assert!(names(temp.path(), false).is_empty());
    }

    #[test]
    fn missing_root_is_a_walk_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");
        let err = compiled_module_names(&missing, false).unwrap_err();
        assert!(matches!(err, LsModulesError::Walk(_)));
    }
}

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LsModulesError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid substitution pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(
        "Package database dump lists {names} package names but {ids} package ids"
    )]
    RegistryCountMismatch { names: usize, ids: usize },

    #[error(
        "Multiple versions of the following packages installed: \n{}\n\nThe following was explicitly used: {referenced}\n\nThis is not currently supported.",
        .duplicates.join(", ")
    )]
    AmbiguousReexport {
        duplicates: Vec<String>,
        referenced: String,
    },

    #[error(
        "Failed to list interface files:\n    {0}\nOn Windows you may need to enable long file path support:\n    Set-ItemProperty -Path 'HKLM:\\SYSTEM\\CurrentControlSet\\Control\\FileSystem' -Name 'LongPathsEnabled' -Value 1"
    )]
    Walk(String),
}

pub type Result<T> = std::result::Result<T, LsModulesError>;

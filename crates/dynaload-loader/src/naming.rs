//! Candidate file names for a library base name.
//!
//! Both schemes are plain functions of the [`Platform`] so they can be
//! exercised on any host.

use std::path::{Path, PathBuf};

use crate::detect::Platform;
use crate::error::{LoaderError, Result};

/// Expands a base name into the file names tried by the OS loader, in order.
///
/// - POSIX: `lib<name>.so`, `lib<name>.dylib`, `<name>.so`
/// - Windows: `<name>.dll`
#[must_use]
pub fn candidates(platform: Platform, name: &str) -> Vec<String> {
    match platform {
        Platform::Posix => vec![
            format!("lib{name}.so"),
            format!("lib{name}.dylib"),
            format!("{name}.so"),
        ],
        Platform::Windows => vec![format!("{name}.dll")],
    }
}

/// Full open order: every search directory joined with every candidate,
/// followed by the bare candidates (resolved through the OS search path).
#[must_use]
pub fn candidate_paths(platform: Platform, name: &str, search_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let names = candidates(platform, name);
    let mut paths = Vec::with_capacity(names.len() * (search_dirs.len() + 1));

    for dir in search_dirs {
        paths.extend(names.iter().map(|n| dir.join(n)));
    }
    paths.extend(names.into_iter().map(PathBuf::from));

    paths
}

/// Rejects base names that cannot be expanded into candidates.
///
/// Paths belong to [`Loader::open_path`](crate::Loader::open_path).
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('\0') || name.contains(['/', '\\']) {
        return Err(LoaderError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Rejects symbol names that the OS lookup cannot represent.
pub fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.is_empty() || symbol.contains('\0') {
        return Err(LoaderError::InvalidSymbol(symbol.to_string()));
    }
    Ok(())
}

/// Lossy display form of a path, used in logs and errors.
pub(crate) fn display(path: &Path) -> String {
    path.display().to_string()
}

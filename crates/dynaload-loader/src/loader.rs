//! Loader trait.
//!
//! Every platform follows the same open / get_symbol / close contract.

use std::path::{Path, PathBuf};

use crate::config::LoadOptions;
use crate::detect::Platform;
use crate::error::{LoaderError, Result};
use crate::naming::{self, candidate_paths};
use crate::symbol::Symbol;

/// Platform-specific dynamic library loader.
///
/// A loader owns at most one open library. Opening again replaces it: the new
/// library is installed before the old one is unloaded, so it stays open even
/// when that unload fails. Dropping the loader closes it.
pub trait Loader: Send {
    /// Returns the platform this loader targets.
    fn platform(&self) -> Platform;

    /// Opens a library by base name, trying each platform candidate in order.
    ///
    /// Returns the candidate that was opened.
    ///
    /// # Errors
    /// Returns [`LoaderError::InvalidName`] for unusable names and
    /// [`LoaderError::Open`] if no candidate could be opened.
    fn open(&mut self, name: &str) -> Result<PathBuf>;

    /// Opens exactly `path`, with no candidate expansion.
    ///
    /// # Errors
    /// Returns [`LoaderError::Open`] if the OS loader rejects the file.
    fn open_path(&mut self, path: &Path) -> Result<()>;

    /// Resolves an exported symbol in the open library.
    ///
    /// # Errors
    /// Returns [`LoaderError::NotOpen`] when nothing is open, and
    /// [`LoaderError::SymbolNotFound`] when the library does not export it.
    fn get_symbol(&self, symbol: &str) -> Result<Symbol>;

    /// Unloads the open library. A no-op when nothing is open.
    ///
    /// # Errors
    /// Returns [`LoaderError::Close`] if the OS refuses to unload.
    fn close(&mut self) -> Result<()>;

    /// Returns `true` while a library is open.
    fn is_open(&self) -> bool;

    /// Path or candidate name of the open library.
    fn opened(&self) -> Option<&Path>;
}

/// Installs `new` as the open library, then closes the one it replaced.
///
/// `new` stays installed even when closing the replaced library fails.
pub(crate) fn replace_open<T, F>(slot: &mut Option<T>, new: T, close: F) -> Result<()>
where
    F: FnOnce(T) -> Result<()>,
{
    match slot.replace(new) {
        Some(old) => close(old),
        None => Ok(()),
    }
}

/// Tries each candidate for `name` in order and keeps the first that opens.
///
/// `try_open` performs the OS call; its last error becomes the failure reason.
pub(crate) fn open_first<L, E, F>(
    platform: Platform,
    name: &str,
    options: &LoadOptions,
    mut try_open: F,
) -> Result<(L, PathBuf)>
where
    E: std::fmt::Display,
    F: FnMut(&Path) -> std::result::Result<L, E>,
{
    naming::validate_name(name)?;

    let mut attempts = Vec::new();
    let mut reason = String::from("no candidates");

    for path in candidate_paths(platform, name, options.search_dirs()) {
        match try_open(&path) {
            Ok(lib) => {
                tracing::info!(
                    name = name,
                    path = %path.display(),
                    platform = %platform,
                    "opened library"
                );
                return Ok((lib, path));
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "candidate failed");
                attempts.push(naming::display(&path));
                reason = e.to_string();
            }
        }
    }

    tracing::warn!(name = name, attempts = attempts.len(), reason = %reason, "failed to open library");
    Err(LoaderError::open(name, attempts, reason))
}

/// Opens a single explicit path.
pub(crate) fn open_exact<L, E, F>(platform: Platform, path: &Path, try_open: F) -> Result<L>
where
    E: std::fmt::Display,
    F: FnOnce(&Path) -> std::result::Result<L, E>,
{
    let shown = naming::display(path);
    if shown.is_empty() || shown.contains('\0') {
        return Err(LoaderError::InvalidName(shown));
    }

    match try_open(path) {
        Ok(lib) => {
            tracing::info!(path = %shown, platform = %platform, "opened library");
            Ok(lib)
        }
        Err(e) => {
            tracing::warn!(path = %shown, error = %e, "failed to open library");
            Err(LoaderError::open(shown.clone(), vec![shown], e.to_string()))
        }
    }
}

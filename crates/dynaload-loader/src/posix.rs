//! POSIX loader.
//!
//! Linux, macOS and the BSDs via `dlopen(3)`, `dlsym(3)` and `dlclose(3)`.

use std::ffi::c_void;
use std::path::{Path, PathBuf};

use libloading::os::unix::Library;

use crate::config::LoadOptions;
use crate::detect::Platform;
use crate::error::{LoaderError, Result};
use crate::factory::PlatformFactory;
use crate::loader::{Loader, open_exact, open_first, replace_open};
use crate::naming::validate_symbol;
use crate::symbol::Symbol;

struct OpenLibrary {
    library: Library,
    path: PathBuf,
}

impl OpenLibrary {
    fn close(self) -> Result<()> {
        self.library
            .close()
            .map_err(|e| LoaderError::close(format!("{}: {e}", self.path.display())))?;
        tracing::info!(path = %self.path.display(), "closed library");
        Ok(())
    }
}

/// `dlopen`-backed loader.
pub struct PosixLoader {
    options: LoadOptions,
    current: Option<OpenLibrary>,
}

impl PosixLoader {
    /// Creates a loader with default options (`RTLD_NOW | RTLD_LOCAL`).
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(LoadOptions::default())
    }

    /// Creates a loader with the given options.
    #[must_use]
    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            options,
            current: None,
        }
    }

    /// Options this loader opens with.
    #[must_use]
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    fn dlopen(path: &Path, flags: libc::c_int) -> std::result::Result<Library, libloading::Error> {
        // SAFETY: running a library's initializers is inherent to loading it;
        // the caller chose the library.
        unsafe { Library::open(Some(path.as_os_str()), flags) }
    }
}

impl Default for PosixLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader for PosixLoader {
    fn platform(&self) -> Platform {
        Platform::Posix
    }

    fn open(&mut self, name: &str) -> Result<PathBuf> {
        let flags = self.options.as_flags();
        let (library, path) =
            open_first(Platform::Posix, name, &self.options, |p| Self::dlopen(p, flags))?;

        let new = OpenLibrary {
            library,
            path: path.clone(),
        };
        replace_open(&mut self.current, new, OpenLibrary::close)?;
        Ok(path)
    }

    fn open_path(&mut self, path: &Path) -> Result<()> {
        let flags = self.options.as_flags();
        let library = open_exact(Platform::Posix, path, |p| Self::dlopen(p, flags))?;

        let new = OpenLibrary {
            library,
            path: path.to_path_buf(),
        };
        replace_open(&mut self.current, new, OpenLibrary::close)
    }

    fn get_symbol(&self, symbol: &str) -> Result<Symbol> {
        validate_symbol(symbol)?;
        let open = self.current.as_ref().ok_or(LoaderError::NotOpen)?;

        // SAFETY: the address is read as an opaque pointer, never called here.
        let raw = unsafe { open.library.get::<*mut c_void>(symbol.as_bytes()) }
            .map_err(|e| LoaderError::symbol(symbol, e.to_string()))?;

        tracing::debug!(symbol = symbol, path = %open.path.display(), "resolved symbol");
        Symbol::from_raw(symbol, *raw)
    }

    fn close(&mut self) -> Result<()> {
        match self.current.take() {
            Some(open) => open.close(),
            None => Ok(()),
        }
    }

    fn is_open(&self) -> bool {
        self.current.is_some()
    }

    fn opened(&self) -> Option<&Path> {
        self.current.as_ref().map(|o| o.path.as_path())
    }
}

impl Drop for PosixLoader {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "failed to close library on drop");
        }
    }
}

/// Factory producing [`PosixLoader`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct PosixFactory;

impl PosixFactory {
    /// Creates a new POSIX factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PlatformFactory for PosixFactory {
    fn platform(&self) -> Platform {
        Platform::Posix
    }

    fn create_loader_with(&self, options: LoadOptions) -> Box<dyn Loader> {
        Box::new(PosixLoader::with_options(options))
    }
}

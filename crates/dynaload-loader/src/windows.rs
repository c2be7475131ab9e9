//! Windows loader.
//!
//! `LoadLibrary`, `GetProcAddress` and `FreeLibrary` through libloading.

use std::ffi::c_void;
use std::path::{Path, PathBuf};

use libloading::os::windows::Library;

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

/// `LoadLibrary`-backed loader.
///
/// Binding options are ignored; Windows resolves imports at load time.
pub struct WindowsLoader {
    options: LoadOptions,
    current: Option<OpenLibrary>,
}

impl WindowsLoader {
    /// Creates a loader with default options.
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

    fn load_library(path: &Path) -> std::result::Result<Library, libloading::Error> {
        // SAFETY: running DllMain is inherent to loading the library.
        unsafe { Library::new(path.as_os_str()) }
    }
}

impl Default for WindowsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader for WindowsLoader {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn open(&mut self, name: &str) -> Result<PathBuf> {
        let (library, path) =
            open_first(Platform::Windows, name, &self.options, Self::load_library)?;

        let new = OpenLibrary {
            library,
            path: path.clone(),
        };
        replace_open(&mut self.current, new, OpenLibrary::close)?;
        Ok(path)
    }

    fn open_path(&mut self, path: &Path) -> Result<()> {
        let library = open_exact(Platform::Windows, path, Self::load_library)?;

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

impl Drop for WindowsLoader {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "failed to close library on drop");
        }
    }
}

/// Factory producing [`WindowsLoader`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsFactory;

impl WindowsFactory {
    /// Creates a new Windows factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PlatformFactory for WindowsFactory {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn create_loader_with(&self, options: LoadOptions) -> Box<dyn Loader> {
        Box::new(WindowsLoader::with_options(options))
    }
}

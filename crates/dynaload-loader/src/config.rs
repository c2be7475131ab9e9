//! Loader configuration.
//!
//! [`LoadOptions`] shapes how a single loader opens libraries.
//! [`LoaderConfig`] is the application-level file: which library to open,
//! which entry point to call, and the options to use. It is validated at load
//! time so a bad file fails before any `dlopen`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LoaderError, Result};
use crate::naming::{validate_name, validate_symbol};

/// Default library base name.
pub const DEFAULT_LIBRARY: &str = "platformlib";

/// Default entry point symbol.
pub const DEFAULT_SYMBOL: &str = "platform_lib_run";

/// When the POSIX loader resolves undefined symbols of the opened library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Binding {
    /// Resolve everything at open time (`RTLD_NOW`).
    #[default]
    Now,
    /// Resolve on first use (`RTLD_LAZY`).
    Lazy,
}

/// Options applied by a loader when opening libraries.
///
/// ```rust
/// use dynaload_loader::{Binding, LoadOptions};
///
/// let options = LoadOptions::builder()
///     .search_dir("target/debug")
///     .binding(Binding::Lazy)
///     .build();
/// assert_eq!(options.search_dirs().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Directories tried before the OS search path.
    #[serde(default)]
    search_dirs: Vec<PathBuf>,
    /// Symbol binding mode (ignored on Windows).
    #[serde(default)]
    binding: Binding,
    /// Make the library's symbols available to later loads (`RTLD_GLOBAL`).
    ///
    /// Ignored on Windows.
    #[serde(default)]
    global: bool,
}

impl LoadOptions {
    /// Create a new options builder.
    #[must_use]
    pub fn builder() -> LoadOptionsBuilder {
        LoadOptionsBuilder::new()
    }

    /// Directories tried before the OS search path.
    #[must_use]
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Symbol binding mode.
    #[must_use]
    pub const fn binding(&self) -> Binding {
        self.binding
    }

    /// Whether symbols are exported to later loads.
    #[must_use]
    pub const fn global(&self) -> bool {
        self.global
    }

    /// Convert to `dlopen` mode flags.
    #[cfg(unix)]
    pub(crate) const fn as_flags(&self) -> libc::c_int {
        let mut flags = match self.binding {
            Binding::Now => libc::RTLD_NOW,
            Binding::Lazy => libc::RTLD_LAZY,
        };

        if self.global {
            flags |= libc::RTLD_GLOBAL;
        } else {
            flags |= libc::RTLD_LOCAL;
        }

        flags
    }
}

/// Builder for [`LoadOptions`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptionsBuilder {
    options: LoadOptions,
}

impl LoadOptionsBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a search directory.
    #[must_use]
    pub fn search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.search_dirs.push(dir.into());
        self
    }

    /// Replace all search directories.
    #[must_use]
    pub fn search_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.options.search_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Symbol binding mode.
    ///
    /// Default: [`Binding::Now`]
    #[must_use]
    pub const fn binding(mut self, binding: Binding) -> Self {
        self.options.binding = binding;
        self
    }

    /// Export symbols to later loads.
    ///
    /// Default: `false`
    #[must_use]
    pub const fn global(mut self, value: bool) -> Self {
        self.options.global = value;
        self
    }

    /// Build the options.
    #[must_use]
    pub fn build(self) -> LoadOptions {
        self.options
    }
}

/// Application configuration for a load-and-call run.
///
/// ```toml
/// library = "platformlib"
/// symbol = "platform_lib_run"
/// search_dirs = ["target/debug"]
/// binding = "now"
/// global = false
/// ```
///
/// Unknown keys are rejected, so a misspelled `search_dir` fails the load
/// instead of being ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LoaderConfigFile")]
pub struct LoaderConfig {
    /// Library base name (platform prefixes/suffixes are added).
    pub library: String,

    /// Entry point to resolve and call.
    pub symbol: String,

    /// Options handed to the loader.
    #[serde(flatten)]
    pub options: LoadOptions,
}

/// On-disk shape of [`LoaderConfig`].
///
/// Flattened fields cannot be combined with `deny_unknown_fields`, so the
/// option keys are spelled out here and folded into [`LoadOptions`].
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LoaderConfigFile {
    #[serde(default = "default_library")]
    library: String,
    #[serde(default = "default_symbol")]
    symbol: String,
    #[serde(default)]
    search_dirs: Vec<PathBuf>,
    #[serde(default)]
    binding: Binding,
    #[serde(default)]
    global: bool,
}

impl From<LoaderConfigFile> for LoaderConfig {
    fn from(file: LoaderConfigFile) -> Self {
        Self {
            library: file.library,
            symbol: file.symbol,
            options: LoadOptions {
                search_dirs: file.search_dirs,
                binding: file.binding,
                global: file.global,
            },
        }
    }
}

fn default_library() -> String {
    DEFAULT_LIBRARY.to_string()
}

fn default_symbol() -> String {
    DEFAULT_SYMBOL.to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            library: default_library(),
            symbol: default_symbol(),
            options: LoadOptions::default(),
        }
    }
}

impl LoaderConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| LoaderError::config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded loader config");
        Self::from_toml_str(&content)
    }

    /// Checks that the library and symbol names are usable.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.library)
            .map_err(|e| LoaderError::config(format!("library: {e}")))?;
        validate_symbol(&self.symbol).map_err(|e| LoaderError::config(format!("symbol: {e}")))?;
        Ok(())
    }
}

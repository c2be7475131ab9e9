//! Platform detection.
//!
//! The loader family is fixed at compile time; there is nothing to probe at
//! runtime.

/// Supported loader platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// `dlopen`/`dlsym`/`dlclose` (Linux, macOS, BSDs).
    Posix,
    /// `LoadLibrary`/`GetProcAddress`/`FreeLibrary`.
    Windows,
}

impl Platform {
    /// Returns the platform name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Posix => "posix",
            Self::Windows => "windows",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returns the loader platform of the compile target.
///
/// `None` on targets with neither loader family (e.g. `wasm32-unknown-unknown`).
#[must_use]
pub const fn detect_platform() -> Option<Platform> {
    if cfg!(unix) {
        Some(Platform::Posix)
    } else if cfg!(windows) {
        Some(Platform::Windows)
    } else {
        None
    }
}

//! Loader error types.

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Dynamic loading errors.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// Platform not supported.
    #[error("platform not supported: {0}")]
    NotSupported(String),

    /// Library base name rejected before any open attempt.
    #[error("invalid library name {0:?}")]
    InvalidName(String),

    /// Symbol name rejected before lookup.
    #[error("invalid symbol name {0:?}")]
    InvalidSymbol(String),

    /// No candidate could be opened.
    #[error("failed to open library {name} (tried {}): {reason}", .attempts.join(", "))]
    Open {
        /// Base name or path that was requested.
        name: String,
        /// Every file name handed to the OS, in order.
        attempts: Vec<String>,
        /// Last error reported by the OS loader.
        reason: String,
    },

    /// Operation requires an open library.
    #[error("no library is open")]
    NotOpen,

    /// Symbol lookup failed.
    #[error("symbol {symbol} not found: {reason}")]
    SymbolNotFound {
        /// Requested symbol name.
        symbol: String,
        /// Error reported by the OS loader.
        reason: String,
    },

    /// Symbol resolved to a null address.
    #[error("symbol {0} resolved to a null address")]
    NullSymbol(String),

    /// Symbol cast to a type that is not pointer sized.
    #[error("cannot cast symbol to a {actual}-byte type (expected {expected} bytes)")]
    SymbolSize {
        /// Pointer size on this target.
        expected: usize,
        /// Size of the requested type.
        actual: usize,
    },

    /// Unloading failed.
    #[error("failed to close library: {0}")]
    Close(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoaderError {
    /// Creates a not supported error.
    #[must_use]
    pub fn not_supported(msg: impl Into<String>) -> Self {
        Self::NotSupported(msg.into())
    }

    /// Creates an open error.
    #[must_use]
    pub fn open(name: impl Into<String>, attempts: Vec<String>, reason: impl Into<String>) -> Self {
        Self::Open {
            name: name.into(),
            attempts,
            reason: reason.into(),
        }
    }

    /// Creates a symbol lookup error.
    #[must_use]
    pub fn symbol(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SymbolNotFound {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Creates a close error.
    #[must_use]
    pub fn close(msg: impl Into<String>) -> Self {
        Self::Close(msg.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns `true` if the library could not be opened.
    #[must_use]
    pub const fn is_open_failure(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::InvalidName(_))
    }

    /// Returns `true` if a symbol could not be resolved.
    #[must_use]
    pub const fn is_symbol_failure(&self) -> bool {
        matches!(
            self,
            Self::SymbolNotFound { .. } | Self::NullSymbol(_) | Self::InvalidSymbol(_) | Self::NotOpen
        )
    }
}

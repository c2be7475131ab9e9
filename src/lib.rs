// Iron Lotus: Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! dynaload: Cross-Platform Dynamic Library Loading
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dynaload::prelude::*;
//!
//! let code = dynaload::app::run(&LoaderConfig::default());
//! # let _ = code;
//! ```

pub mod app;

pub use dynaload_loader as loader;

/// Prelude module for common imports.
pub mod prelude {
    pub use dynaload_loader::{
        Binding, LoadOptions, Loader, LoaderConfig, LoaderError, Platform, PlatformFactory,
        Symbol, detect_platform, make_loader, make_platform_factory,
    };
}

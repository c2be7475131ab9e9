// Iron Lotus: Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # dynaload-loader
//!
//! Runtime loading of shared libraries behind one [`Loader`] trait.
//!
//! - **POSIX** (Linux, macOS, BSDs): `dlopen` / `dlsym` / `dlclose`
//! - **Windows**: `LoadLibrary` / `GetProcAddress` / `FreeLibrary`
//!
//! The platform is fixed at compile time. [`make_platform_factory`] hands out
//! the matching [`PlatformFactory`], which creates loaders.
//!
//! ## Library names
//!
//! [`Loader::open`] takes a base name and tries platform candidates in order:
//!
//! | Platform | Candidates |
//! |----------|------------|
//! | POSIX    | `lib<name>.so`, `lib<name>.dylib`, `<name>.so` |
//! | Windows  | `<name>.dll` |
//!
//! ## Example
//!
//! ```rust,no_run
//! use dynaload_loader::{make_loader, LoaderError};
//!
//! fn main() -> Result<(), LoaderError> {
//!     let mut loader = make_loader()?;
//!     loader.open("platformlib")?;
//!
//!     let sym = loader.get_symbol("platform_lib_run")?;
//!     // SAFETY: platformlib exports `extern "C" fn() -> i32`.
//!     let run: extern "C" fn() -> i32 = unsafe { sym.cast()? };
//!     let rc = run();
//!
//!     loader.close()?;
//!     std::process::exit(rc);
//! }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod detect;
pub mod error;
pub mod factory;
pub mod loader;
pub mod naming;
pub mod symbol;

#[cfg(unix)]
pub mod posix;

#[cfg(windows)]
pub mod windows;

#[cfg(not(any(unix, windows)))]
mod unsupported;

pub use config::{Binding, LoadOptions, LoadOptionsBuilder, LoaderConfig};
pub use detect::{Platform, detect_platform};
pub use error::{LoaderError, Result};
pub use factory::{PlatformFactory, make_loader, make_loader_with, make_platform_factory};
pub use loader::Loader;
pub use symbol::Symbol;

#[cfg(unix)]
pub use posix::{PosixFactory, PosixLoader};

#[cfg(windows)]
pub use windows::{WindowsFactory, WindowsLoader};

//! # platformlib
//!
//! Demo shared library for the dynaload `loader-app`.
//!
//! Builds as `libplatformlib.so` / `libplatformlib.dylib` / `platformlib.dll`
//! and exports a single C entry point, [`platform_lib_run`].

#![warn(missing_docs, rust_2018_idioms)]

use std::io::Write;

/// Exit code returned by a successful run.
pub const RUN_OK: i32 = 0;

/// Message printed by [`platform_lib_run`].
pub const BANNER: &str = "platformlib: platform_lib_run called";

/// Entry point resolved by name at runtime.
///
/// Prints [`BANNER`] to stdout and returns [`RUN_OK`]. Never unwinds across
/// the FFI boundary; a failed write is reported as `1`.
#[unsafe(no_mangle)]
pub extern "C" fn platform_lib_run() -> i32 {
    let mut out = std::io::stdout().lock();
    match writeln!(out, "{BANNER}").and_then(|()| out.flush()) {
        Ok(()) => RUN_OK,
        Err(_) => 1,
    }
}

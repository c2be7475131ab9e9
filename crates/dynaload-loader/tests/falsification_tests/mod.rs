//! Popperian Falsification Tests for dynaload-loader

// Allow test-specific patterns that are denied in production code
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod loader;
mod platform;

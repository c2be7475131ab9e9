//! loader-app
//!
//! Loads `platformlib` at runtime and calls its `platform_lib_run` entry point.
//!
//! # Usage
//!
//! ```bash
//! cargo build --workspace
//! DYNALOAD_CONFIG=dynaload.toml cargo run --bin loader-app
//! ```
//!
//! with `dynaload.toml`:
//!
//! ```toml
//! search_dirs = ["target/debug"]
//! ```
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 1 | bad config or no platform loader |
//! | 2 | library could not be opened |
//! | 3 | entry point not found |
//! | other | value returned by the entry point |

use dynaload::app;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("loader-app: runtime loading library");

    let code = match app::load_config() {
        Ok(config) => app::run(&config),
        Err(failure) => {
            tracing::error!(error = %failure, "loader-app failed");
            failure.exit_code()
        }
    };

    std::process::exit(code);
}

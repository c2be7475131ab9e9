//! Load-and-call runner behind `loader-app`.
//!
//! Opens the configured library, resolves its entry point as
//! `extern "C" fn() -> i32`, calls it and unloads. Each failing stage maps to
//! a fixed process exit code.

use dynaload_loader::{LoaderConfig, LoaderError, PlatformFactory, make_platform_factory};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_ENV: &str = "DYNALOAD_CONFIG";

/// Entry point signature exported by loadable libraries.
pub type EntryPoint = extern "C" fn() -> i32;

/// Stage at which a run failed.
#[derive(Debug, thiserror::Error)]
pub enum RunFailure {
    /// Configuration could not be read or validated.
    #[error("config stage: {0}")]
    Config(#[source] LoaderError),

    /// No platform loader is available.
    #[error("factory stage: {0}")]
    Factory(#[source] LoaderError),

    /// The library could not be opened.
    #[error("open stage: {0}")]
    Open(#[source] LoaderError),

    /// The entry point could not be resolved.
    #[error("symbol stage: {0}")]
    Symbol(#[source] LoaderError),
}

impl RunFailure {
    /// Process exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Factory(_) => 1,
            Self::Open(_) => 2,
            Self::Symbol(_) => 3,
        }
    }
}

/// Reads the config file named by [`CONFIG_ENV`], or defaults when unset.
pub fn load_config() -> Result<LoaderConfig, RunFailure> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => LoaderConfig::load(&path).map_err(RunFailure::Config),
        None => Ok(LoaderConfig::default()),
    }
}

/// Runs with the platform factory and returns the process exit code.
pub fn run(config: &LoaderConfig) -> i32 {
    match try_run(config) {
        Ok(rc) => rc,
        Err(failure) => {
            tracing::error!(error = %failure, "loader-app failed");
            failure.exit_code()
        }
    }
}

/// Runs with the platform factory.
pub fn try_run(config: &LoaderConfig) -> Result<i32, RunFailure> {
    let factory = make_platform_factory().map_err(RunFailure::Factory)?;
    run_with(factory.as_ref(), config)
}

/// Runs with an explicit factory; returns the entry point's return value.
pub fn run_with(factory: &dyn PlatformFactory, config: &LoaderConfig) -> Result<i32, RunFailure> {
    config.validate().map_err(RunFailure::Config)?;

    let mut loader = factory.create_loader_with(config.options.clone());
    let path = loader.open(&config.library).map_err(RunFailure::Open)?;

    let entry = match resolve_entry(loader.as_ref(), &config.symbol) {
        Ok(entry) => entry,
        Err(e) => {
            if let Err(close_err) = loader.close() {
                tracing::warn!(error = %close_err, "close after symbol failure");
            }
            return Err(RunFailure::Symbol(e));
        }
    };

    tracing::info!(symbol = %config.symbol, path = %path.display(), "calling entry point");
    let rc = entry();

    if let Err(e) = loader.close() {
        tracing::warn!(error = %e, "failed to close library");
    }
    Ok(rc)
}

fn resolve_entry(loader: &dyn dynaload_loader::Loader, symbol: &str) -> Result<EntryPoint, LoaderError> {
    let sym = loader.get_symbol(symbol)?;
    // SAFETY: the configured symbol is documented to be an EntryPoint, and the
    // loader stays open until after the call.
    unsafe { sym.cast::<EntryPoint>() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let e = || LoaderError::NotOpen;
        assert_eq!(RunFailure::Config(e()).exit_code(), 1);
        assert_eq!(RunFailure::Factory(e()).exit_code(), 1);
        assert_eq!(RunFailure::Open(e()).exit_code(), 2);
        assert_eq!(RunFailure::Symbol(e()).exit_code(), 3);
    }

    #[test]
    fn test_failure_messages_name_stage() {
        let failure = RunFailure::Symbol(LoaderError::symbol("platform_lib_run", "undefined"));
        let msg = failure.to_string();
        assert!(msg.starts_with("symbol stage: "));
        assert!(msg.contains("platform_lib_run"));
    }

    #[test]
    fn test_open_failure_message_not_repeated() {
        let failure = RunFailure::Open(LoaderError::open(
            "platformlib",
            vec!["libplatformlib.so".into()],
            "not found",
        ));
        let msg = failure.to_string();
        assert!(msg.starts_with("open stage: "));
        assert_eq!(msg.matches("failed to open library").count(), 1);
    }

    #[cfg(any(unix, windows))]
    #[test]
    fn test_missing_library_is_open_failure() {
        let config = LoaderConfig {
            library: "dynaload_definitely_missing_lib".into(),
            ..LoaderConfig::default()
        };
        let failure = try_run(&config).unwrap_err();
        assert!(matches!(failure, RunFailure::Open(_)));
        assert_eq!(run(&config), 2);
    }

    #[test]
    fn test_invalid_config_rejected_before_open() {
        let config = LoaderConfig {
            symbol: String::new(),
            ..LoaderConfig::default()
        };
        if let Ok(factory) = make_platform_factory() {
            let failure = run_with(factory.as_ref(), &config).unwrap_err();
            assert!(matches!(failure, RunFailure::Config(_)));
            assert_eq!(failure.exit_code(), 1);
        }
    }
}

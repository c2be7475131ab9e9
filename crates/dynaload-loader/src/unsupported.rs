//! Unsupported platform implementation.
//!
//! Targets with neither `dlopen` nor `LoadLibrary` get no factory.

use crate::error::{LoaderError, Result};
use crate::factory::PlatformFactory;

/// Always fails with [`LoaderError::NotSupported`].
pub fn make_platform_factory() -> Result<Box<dyn PlatformFactory>> {
    Err(LoaderError::not_supported(std::env::consts::OS))
}

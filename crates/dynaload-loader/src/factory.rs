//! Platform factories.
//!
//! A [`PlatformFactory`] produces the platform's products. The loader is the
//! only product today; further OS-specific products belong on the same trait.

use crate::config::LoadOptions;
use crate::detect::Platform;
use crate::error::Result;
use crate::loader::Loader;

/// Produces platform-specific products.
pub trait PlatformFactory: Send + Sync {
    /// Returns the platform this factory builds for.
    fn platform(&self) -> Platform;

    /// Creates a loader with the given options.
    fn create_loader_with(&self, options: LoadOptions) -> Box<dyn Loader>;

    /// Creates a loader with default options.
    fn create_loader(&self) -> Box<dyn Loader> {
        self.create_loader_with(LoadOptions::default())
    }
}

/// Returns the factory for the compile target.
///
/// # Errors
/// Returns [`LoaderError::NotSupported`](crate::LoaderError::NotSupported) on
/// targets that are neither unix nor windows.
pub fn make_platform_factory() -> Result<Box<dyn PlatformFactory>> {
    #[cfg(unix)]
    {
        Ok(Box::new(crate::posix::PosixFactory::new()))
    }

    #[cfg(windows)]
    {
        Ok(Box::new(crate::windows::WindowsFactory::new()))
    }

    #[cfg(not(any(unix, windows)))]
    {
        crate::unsupported::make_platform_factory()
    }
}

/// Returns a default-configured loader for the compile target.
pub fn make_loader() -> Result<Box<dyn Loader>> {
    make_loader_with(LoadOptions::default())
}

/// Returns a loader for the compile target with the given options.
pub fn make_loader_with(options: LoadOptions) -> Result<Box<dyn Loader>> {
    let factory = make_platform_factory()?;
    tracing::debug!(platform = %factory.platform(), "created platform factory");
    Ok(factory.create_loader_with(options))
}

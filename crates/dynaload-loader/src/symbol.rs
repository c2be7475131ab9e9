//! Resolved symbol addresses.

use std::ffi::c_void;
use std::fmt;
use std::mem;
use std::ptr::NonNull;

use crate::error::{LoaderError, Result};

/// Address of an exported symbol.
///
/// Only valid while the library it came from stays open. The loader does not
/// track that lifetime; callers close the loader after they are done calling.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    addr: NonNull<c_void>,
}

impl Symbol {
    /// Wraps a raw address returned by the OS lookup.
    pub(crate) fn from_raw(symbol: &str, addr: *mut c_void) -> Result<Self> {
        let addr = NonNull::new(addr).ok_or_else(|| LoaderError::NullSymbol(symbol.to_string()))?;
        Ok(Self { addr })
    }

    /// Raw address.
    #[must_use]
    pub const fn as_ptr(&self) -> *mut c_void {
        self.addr.as_ptr()
    }

    /// Reinterprets the address as `T`, typically an `extern "C" fn` type.
    ///
    /// # Safety
    ///
    /// `T` must match the real type of the exported item, and the library must
    /// stay open for as long as the returned value is used.
    pub unsafe fn cast<T: Copy>(&self) -> Result<T> {
        let expected = mem::size_of::<*mut c_void>();
        let actual = mem::size_of::<T>();
        if actual != expected {
            return Err(LoaderError::SymbolSize { expected, actual });
        }

        let raw = self.addr.as_ptr();
        // SAFETY: sizes match and the caller guarantees T is the item's type.
        Ok(unsafe { mem::transmute_copy::<*mut c_void, T>(&raw) })
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol").field("addr", &self.addr).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern "C" fn answer() -> i32 {
        42
    }

    fn answer_ptr() -> *mut c_void {
        answer as extern "C" fn() -> i32 as *mut c_void
    }

    #[test]
    fn test_null_address_rejected() {
        let err = Symbol::from_raw("missing", std::ptr::null_mut()).unwrap_err();
        assert!(matches!(err, LoaderError::NullSymbol(ref s) if s == "missing"));
    }

    #[test]
    fn test_cast_to_fn() {
        let sym = Symbol::from_raw("answer", answer_ptr()).unwrap();
        let f: extern "C" fn() -> i32 = unsafe { sym.cast() }.unwrap();
        assert_eq!(f(), 42);
    }

    #[test]
    fn test_cast_wrong_size() {
        let sym = Symbol::from_raw("answer", answer_ptr()).unwrap();
        let err = unsafe { sym.cast::<u8>() }.unwrap_err();
        assert!(matches!(err, LoaderError::SymbolSize { actual: 1, .. }));
    }

    #[test]
    fn test_as_ptr_roundtrip() {
        let raw = answer_ptr();
        let sym = Symbol::from_raw("answer", raw).unwrap();
        assert_eq!(sym.as_ptr(), raw);
    }
}

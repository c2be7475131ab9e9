//! Falsification Tests: Category A - Platform Selection (F001-F010)

use std::collections::HashSet;

use dynaload_loader::naming::candidates;
use dynaload_loader::{Platform, detect_platform, make_loader, make_platform_factory};

/// F001: Platform variants are distinct
///
/// # Falsification Attempt
/// Collect every platform name and look for duplicates.
#[test]
fn f001_platform_names_distinct() {
    let mut seen = HashSet::new();
    for p in [Platform::Posix, Platform::Windows] {
        assert!(seen.insert(p.name()), "F001 FALSIFIED: Duplicate platform name: {}", p.name());
    }
}

/// F002: The factory matches the compile target
///
/// # Falsification Attempt
/// Compare the factory's platform against `detect_platform()`.
#[cfg(any(unix, windows))]
#[test]
fn f002_factory_matches_target() {
    let factory = make_platform_factory().unwrap();
    assert_eq!(
        Some(factory.platform()),
        detect_platform(),
        "F002 FALSIFIED: factory built for the wrong platform"
    );
}

/// F003: Loaders come out of the factory closed
///
/// # Falsification Attempt
/// Create a loader and check that nothing is open.
#[cfg(any(unix, windows))]
#[test]
fn f003_fresh_loader_closed() {
    let loader = make_loader().unwrap();
    assert!(!loader.is_open(), "F003 FALSIFIED: fresh loader reports open");
    assert!(loader.opened().is_none(), "F003 FALSIFIED: fresh loader has a path");
}

/// F004: POSIX candidate order is lib*.so, lib*.dylib, *.so
///
/// # Falsification Attempt
/// Expand a name and check the exact order.
#[test]
fn f004_posix_candidate_order() {
    assert_eq!(
        candidates(Platform::Posix, "platformlib"),
        ["libplatformlib.so", "libplatformlib.dylib", "platformlib.so"],
        "F004 FALSIFIED: POSIX candidate order changed"
    );
}

/// F005: Windows has exactly one candidate, *.dll
///
/// # Falsification Attempt
/// Expand a name and check the single candidate.
#[test]
fn f005_windows_candidate() {
    assert_eq!(
        candidates(Platform::Windows, "platformlib"),
        ["platformlib.dll"],
        "F005 FALSIFIED: Windows candidate changed"
    );
}

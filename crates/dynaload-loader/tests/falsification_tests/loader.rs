//! Falsification Tests: Category B - Loader Contract (F011-F030)

#![cfg(any(unix, windows))]

use std::path::Path;

use dynaload_loader::{LoadOptions, LoaderError, make_loader, make_loader_with};

/// F011: get_symbol before open fails instead of returning an address
///
/// # Falsification Attempt
/// Resolve a symbol on a fresh loader.
#[test]
fn f011_symbol_before_open() {
    let loader = make_loader().unwrap();
    let result = loader.get_symbol("platform_lib_run");
    assert!(
        matches!(result, Err(LoaderError::NotOpen)),
        "F011 FALSIFIED: expected NotOpen, got {result:?}"
    );
}

/// F012: close is idempotent
///
/// # Falsification Attempt
/// Close a loader that never opened, twice.
#[test]
fn f012_close_idempotent() {
    let mut loader = make_loader().unwrap();
    assert!(loader.close().is_ok(), "F012 FALSIFIED: first close failed");
    assert!(loader.close().is_ok(), "F012 FALSIFIED: second close failed");
}

/// F013: A missing library fails after trying every candidate
///
/// # Falsification Attempt
/// Open a name that cannot exist and count the attempts.
#[test]
fn f013_missing_library_tries_all_candidates() {
    let mut loader = make_loader().unwrap();
    let err = loader.open("dynaload_definitely_missing_lib").unwrap_err();

    let attempts = match err {
        LoaderError::Open { attempts, .. } => attempts,
        other => panic!("F013 FALSIFIED: expected Open error, got {other}"),
    };
    let expected = if cfg!(windows) { 1 } else { 3 };
    assert_eq!(attempts.len(), expected, "F013 FALSIFIED: wrong attempt count");
    assert!(!loader.is_open(), "F013 FALSIFIED: loader open after failure");
}

/// F014: Search directories are tried before the OS search path
///
/// # Falsification Attempt
/// Configure two directories and inspect the attempt order.
#[test]
fn f014_search_dirs_tried_first() {
    let dir = Path::new("/nonexistent/dynaload");
    let options = LoadOptions::builder().search_dir(dir).build();
    let mut loader = make_loader_with(options).unwrap();

    let err = loader.open("dynaload_definitely_missing_lib").unwrap_err();
    let attempts = match err {
        LoaderError::Open { attempts, .. } => attempts,
        other => panic!("F014 FALSIFIED: expected Open error, got {other}"),
    };
    assert!(
        Path::new(&attempts[0]).starts_with(dir),
        "F014 FALSIFIED: first attempt {} not in search dir",
        attempts[0]
    );
    assert!(
        !attempts.last().unwrap().contains('/'),
        "F014 FALSIFIED: bare candidate not tried last"
    );
}

/// F015: Invalid names never reach the OS loader
///
/// # Falsification Attempt
/// Open empty, NUL-bearing and path-like names.
#[test]
fn f015_invalid_names_rejected() {
    let mut loader = make_loader().unwrap();
    for name in ["", "plat\0form", "../platformlib"] {
        let result = loader.open(name);
        assert!(
            matches!(result, Err(LoaderError::InvalidName(_))),
            "F015 FALSIFIED: {name:?} accepted"
        );
    }
}

/// F016: A real system library opens and exports a known symbol
///
/// # Falsification Attempt
/// Open glibc by soname, resolve `strlen`, close.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[test]
fn f016_system_library_roundtrip() {
    let mut loader = make_loader().unwrap();
    loader.open_path(Path::new("libc.so.6")).unwrap();

    let sym = loader.get_symbol("strlen").unwrap();
    assert!(!sym.as_ptr().is_null(), "F016 FALSIFIED: null strlen");

    let missing = loader.get_symbol("dynaload_no_such_symbol");
    assert!(
        matches!(missing, Err(LoaderError::SymbolNotFound { .. })),
        "F016 FALSIFIED: missing symbol resolved"
    );

    loader.close().unwrap();
    assert!(!loader.is_open(), "F016 FALSIFIED: open after close");
}

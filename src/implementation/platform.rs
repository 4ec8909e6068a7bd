//! Platform adapter: the one module allowed to know about operating-system
//! particulars (dynamic loading, directory iteration, environment/registry
//! access, one-shot initialization, setuid policy). Everything above this
//! layer talks to these functions only, never to `libloading`/`std::fs`/
//! `std::env` directly.

use std::env;
use std::ffi::c_void;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use libloading::{Library, Symbol};

use super::error::IcdError;

#[cfg(unix)]
pub const PATH_SEPARATOR: char = ':';
#[cfg(windows)]
pub const PATH_SEPARATOR: char = ';';

#[cfg(target_os = "macos")]
pub const LIBRARY_PREFIX: &str = "lib";
#[cfg(target_os = "macos")]
pub const LIBRARY_SUFFIX: &str = ".dylib";

#[cfg(all(unix, not(target_os = "macos")))]
pub const LIBRARY_PREFIX: &str = "lib";
#[cfg(all(unix, not(target_os = "macos")))]
pub const LIBRARY_SUFFIX: &str = ".so";

#[cfg(windows)]
pub const LIBRARY_PREFIX: &str = "";
#[cfg(windows)]
pub const LIBRARY_SUFFIX: &str = ".dll";

pub const DRIVER_LIBRARY_PREFIX: &str = concat!("lib", "XGL_");
pub const LAYER_LIBRARY_PREFIX: &str = concat!("lib", "XGL_layer_");

/// An opened, leaked-for-the-caller shared library. Closing is explicit via
/// [`close_library`] rather than `Drop`, since scanned ICDs live for the
/// process lifetime and must not be unloaded by a stack-local `Library` going
/// out of scope.
pub struct LibraryHandle(Library);

/// Open a shared library at `path`. Errors are always recoverable — callers
/// log and skip rather than propagate a hard failure (§4.B).
pub fn open_library(path: &Path) -> Result<LibraryHandle, IcdError> {
    unsafe {
        Library::new(path).map(LibraryHandle).map_err(|source| IcdError::LibraryLoadFailed {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Drop a previously opened library, unloading it if this was the last
/// reference.
pub fn close_library(handle: LibraryHandle) {
    drop(handle);
}

/// Resolve `name` in `handle`, returning a raw function pointer or null if
/// absent. The pointer is valid only as long as `handle` stays open.
pub fn resolve_symbol(handle: &LibraryHandle, name: &str) -> *mut c_void {
    let cname = match std::ffi::CString::new(name) {
        Ok(c) => c,
        Err(_) => return std::ptr::null_mut(),
    };
    unsafe {
        match handle.0.get::<*mut c_void>(cname.as_bytes_with_nul()) {
            Ok(sym) => {
                let sym: Symbol<*mut c_void> = sym;
                *sym
            }
            Err(_) => std::ptr::null_mut(),
        }
    }
}

/// List directory entries as full paths. Missing or unreadable directories
/// yield an empty sequence rather than an error — scanning tolerates
/// misconfigured search paths.
pub fn iter_dir(path: &Path) -> Vec<PathBuf> {
    match fs::read_dir(path) {
        Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
        Err(_) => Vec::new(),
    }
}

/// Read an environment variable, returning `None` if unset or not valid
/// Unicode.
pub fn read_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

#[cfg(windows)]
pub fn read_registry(value: &str) -> Option<String> {
    use winreg::enums::HKEY_LOCAL_MACHINE;
    use winreg::RegKey;
    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    let key = hklm.open_subkey("Software\\XGL").ok()?;
    key.get_value(value).ok()
}

#[cfg(not(windows))]
pub fn read_registry(_value: &str) -> Option<String> {
    None
}

/// Run `init_fn` exactly once across however many times `run_once` is called
/// on the same `token`, even under racing callers. The token is a
/// process-lifetime static, matching the one-shot scan guards in §5.
pub fn run_once(token: &'static Once, init_fn: impl FnOnce()) {
    token.call_once(init_fn);
}

/// True when the process is running with elevated privileges relative to the
/// invoking user (`euid != uid`). When true, environment-derived search paths
/// must be ignored (§4.B, §6.2).
#[cfg(unix)]
pub fn is_setuid_elevated() -> bool {
    unsafe { libc::geteuid() != libc::getuid() }
}

#[cfg(not(unix))]
pub fn is_setuid_elevated() -> bool {
    false
}

/// Build a search path string following the platform's registry/env/default
/// precedence (§4.B, §6.2): Windows concatenates registry and env values
/// with `;`; non-Windows uses the env value only when not setuid-elevated;
/// otherwise falls back to `default_path`.
pub fn resolve_search_path(env_name: &str, registry_value: &str, default_path: &str) -> String {
    #[cfg(windows)]
    {
        let reg = read_registry(registry_value);
        let env = read_env(env_name);
        match (reg, env) {
            (Some(r), Some(e)) => format!("{};{}", r, e),
            (Some(r), None) => r,
            (None, Some(e)) => e,
            (None, None) => default_path.to_string(),
        }
    }
    #[cfg(not(windows))]
    {
        let _ = registry_value;
        if !is_setuid_elevated() {
            if let Some(e) = read_env(env_name) {
                return e;
            }
        }
        default_path.to_string()
    }
}

pub fn split_search_path(path: &str) -> Vec<PathBuf> {
    path.split(PATH_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
/// A `LibraryHandle` wrapping the running test binary itself, standing in for
/// a real ICD/layer library so chain-building tests never need an actual
/// driver `.so`/`.dll` on disk.
pub(crate) fn open_self() -> LibraryHandle {
    LibraryHandle(unsafe { Library::this() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn resolve_symbol_finds_a_libc_export() {
        let handle = open_self();
        let addr = resolve_symbol(&handle, "getpid");
        assert!(!addr.is_null());
    }

    #[test]
    fn resolve_symbol_missing_is_null() {
        let handle = open_self();
        let addr = resolve_symbol(&handle, "this_symbol_does_not_exist_anywhere");
        assert!(addr.is_null());
    }

    #[test]
    fn split_search_path_filters_empty_segments() {
        let parts = split_search_path("/a/b::/c/d:");
        assert_eq!(parts, vec![PathBuf::from("/a/b"), PathBuf::from("/c/d")]);
    }

    #[test]
    fn resolve_search_path_falls_back_to_default_when_env_unset() {
        let resolved = resolve_search_path(
            "XGL_LOADER_TEST_UNSET_VAR_DOES_NOT_EXIST",
            "DoesNotExist",
            "/default/search/path",
        );
        assert_eq!(resolved, "/default/search/path");
    }

    /// Property 2 (setuid safety), non-elevated half: when the process is
    /// not privilege-elevated (true of any ordinary test run), an env value
    /// is honored. The elevated half (env ignored when `euid != uid`) cannot
    /// be forced from an unprivileged test process, so it is exercised only
    /// by inspection of `resolve_search_path`'s `if !is_setuid_elevated()`
    /// guard, not by a runnable assertion here.
    #[test]
    #[cfg(unix)]
    fn resolve_search_path_honors_env_when_not_elevated() {
        assert!(!is_setuid_elevated(), "test runner is unexpectedly setuid-elevated");
        std::env::set_var("XGL_LOADER_TEST_ENV_VAR_HONORED", "/env/search/path");
        let resolved = resolve_search_path("XGL_LOADER_TEST_ENV_VAR_HONORED", "Unused", "/default/path");
        std::env::remove_var("XGL_LOADER_TEST_ENV_VAR_HONORED");
        assert_eq!(resolved, "/env/search/path");
    }
}

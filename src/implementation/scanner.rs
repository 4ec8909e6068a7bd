//! Driver and layer discovery (§4.B). Both scans are one-shot: once a
//! process has scanned, it never scans again, even across repeated
//! `CreateInstance` calls — guarded by the [`platform::run_once`] tokens
//! below, matching the historical loader's `pthread_once`/`InitOnceExecuteOnce`
//! use.

use std::path::Path;
use std::sync::Once;

use crate::ffi::*;

use super::config::{LoaderConfig, MAX_LAYERS};
use super::platform;
use super::registry::ScannedIcd;

static DRIVER_SCAN_ONCE: Once = Once::new();
static LAYER_SCAN_ONCE: Once = Once::new();

/// Scan configured driver search paths for conforming ICD libraries,
/// appending each to `out` in discovery order (most-recently-found ends up
/// first once the registry prepends, per §4.B/§5). Runs at most once per
/// process.
pub fn scan_drivers_once(cfg: &LoaderConfig, out: &'static std::sync::Mutex<Vec<ScannedIcd>>) {
    platform::run_once(&DRIVER_SCAN_ONCE, || {
        let mut found = scan_drivers(cfg);
        let mut guard = out.lock().unwrap();
        guard.append(&mut found);
    });
}

/// Scan configured layer search paths for probe-openable layer libraries,
/// recording their full paths. Runs at most once per process.
pub fn scan_layers_once(cfg: &LoaderConfig, out: &'static std::sync::Mutex<Vec<String>>) {
    platform::run_once(&LAYER_SCAN_ONCE, || {
        let found = scan_layers(cfg);
        let mut guard = out.lock().unwrap();
        *guard = found;
    });
}

/// The actual driver scan body, split out from [`scan_drivers_once`] so tests
/// can exercise it directly without the one-shot guard.
fn scan_drivers(cfg: &LoaderConfig) -> Vec<ScannedIcd> {
    let mut icds = Vec::new();
    for dir in platform::split_search_path(&cfg.drivers_path) {
        for path in platform::iter_dir(&dir) {
            if !is_candidate(&path, platform::DRIVER_LIBRARY_PREFIX) {
                continue;
            }
            match try_scan_driver(&path) {
                Ok(icd) => {
                    log::info!("found driver {}", path.display());
                    icds.push(icd);
                }
                Err(e) => {
                    log::warn!("skipping candidate driver {}: {}", path.display(), e);
                }
            }
        }
    }
    icds
}

fn try_scan_driver(path: &Path) -> Result<ScannedIcd, super::error::IcdError> {
    let handle = platform::open_library(path)?;

    let gpa_addr = platform::resolve_symbol(&handle, "vkGetProcAddr");
    if gpa_addr.is_null() {
        return Err(super::error::IcdError::MissingSymbol("vkGetProcAddr"));
    }
    let create_instance_addr = platform::resolve_symbol(&handle, "vkCreateInstance");
    if create_instance_addr.is_null() {
        return Err(super::error::IcdError::MissingSymbol("vkCreateInstance"));
    }
    let destroy_instance_addr = platform::resolve_symbol(&handle, "vkDestroyInstance");
    if destroy_instance_addr.is_null() {
        return Err(super::error::IcdError::MissingSymbol("vkDestroyInstance"));
    }
    let enumerate_gpus_addr = platform::resolve_symbol(&handle, "vkEnumerateGpus");
    if enumerate_gpus_addr.is_null() {
        return Err(super::error::IcdError::MissingSymbol("vkEnumerateGpus"));
    }

    let get_proc_addr: PFN_vkGetProcAddr = unsafe { std::mem::transmute(gpa_addr) };
    let create_instance: PFN_vkCreateInstance = unsafe { std::mem::transmute(create_instance_addr) };
    let destroy_instance: PFN_vkDestroyInstance = unsafe { std::mem::transmute(destroy_instance_addr) };
    let enumerate_gpus: PFN_vkEnumerateGpus = unsafe { std::mem::transmute(enumerate_gpus_addr) };

    Ok(ScannedIcd {
        library_path: path.display().to_string(),
        handle,
        get_proc_addr,
        create_instance,
        destroy_instance,
        enumerate_gpus,
        instance: crate::sys::VkInstance::NULL,
    })
}

/// The actual layer scan body. A layer is recorded by path alone — it is
/// opened for real only when activated (§4.E step 4); here we only probe that
/// the library opens cleanly, then close it immediately.
fn scan_layers(cfg: &LoaderConfig) -> Vec<String> {
    let mut layers = Vec::new();
    for dir in platform::split_search_path(&cfg.layers_path) {
        for path in platform::iter_dir(&dir) {
            if !is_candidate(&path, platform::LAYER_LIBRARY_PREFIX) {
                continue;
            }
            match platform::open_library(&path) {
                Ok(handle) => {
                    platform::close_library(handle);
                    if layers.len() >= MAX_LAYERS {
                        log::error!(
                            "layer search found more than {} layers, ignoring {}",
                            MAX_LAYERS,
                            path.display()
                        );
                        continue;
                    }
                    log::info!("found layer {}", path.display());
                    layers.push(path.display().to_string());
                }
                Err(e) => {
                    log::warn!("skipping candidate layer {}: {}", path.display(), e);
                }
            }
        }
    }
    layers
}

fn is_candidate(path: &Path, prefix: &str) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else { return false };
    name.starts_with(prefix) && name.ends_with(platform::LIBRARY_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_candidate_requires_prefix_and_suffix() {
        let good = Path::new("/usr/lib/xgl/icd.d").join(format!(
            "{}example{}",
            platform::DRIVER_LIBRARY_PREFIX,
            platform::LIBRARY_SUFFIX
        ));
        assert!(is_candidate(&good, platform::DRIVER_LIBRARY_PREFIX));

        let wrong_prefix = Path::new("/usr/lib/xgl/icd.d")
            .join(format!("notadriver{}", platform::LIBRARY_SUFFIX));
        assert!(!is_candidate(&wrong_prefix, platform::DRIVER_LIBRARY_PREFIX));

        let wrong_suffix =
            Path::new("/usr/lib/xgl/icd.d").join(format!("{}example.txt", platform::DRIVER_LIBRARY_PREFIX));
        assert!(!is_candidate(&wrong_suffix, platform::DRIVER_LIBRARY_PREFIX));
    }

    /// Property 1 (scan idempotence) reduces, at the level this module can
    /// test without the process-global `Once` gates, to: scanning a search
    /// path with no matching candidates is side-effect-free and repeatable.
    #[test]
    fn scan_drivers_over_empty_search_path_is_empty() {
        let cfg = LoaderConfig {
            drivers_path: "/nonexistent/xgl/icd.d/for-tests".to_string(),
            layers_path: "/nonexistent/xgl/layer.d/for-tests".to_string(),
        };
        assert!(scan_drivers(&cfg).is_empty());
        assert!(scan_drivers(&cfg).is_empty());
    }

    #[test]
    fn scan_layers_over_empty_search_path_is_empty() {
        let cfg = LoaderConfig {
            drivers_path: "/nonexistent/xgl/icd.d/for-tests".to_string(),
            layers_path: "/nonexistent/xgl/layer.d/for-tests".to_string(),
        };
        assert!(scan_layers(&cfg).is_empty());
    }
}

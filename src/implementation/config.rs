//! Loader configuration: compiled-in defaults, the environment/registry
//! precedence of §6.2, and an optional JSON settings file that layers on top
//! of both. Configuration is an optimization, never a requirement — a
//! missing or malformed settings file is silently ignored.

use std::path::PathBuf;

use serde::Deserialize;

use super::platform;

pub const DRIVER_PATH_ENV: &str = "LIBXGL_DRIVERS_PATH";
pub const LAYERS_PATH_ENV: &str = "LIBXGL_LAYERS_PATH";
pub const LAYER_NAMES_ENV: &str = "LIBXGL_LAYER_NAMES";
pub const SETTINGS_FILE_ENV: &str = "XGL_LOADER_SETTINGS_FILE";

pub const DEFAULT_XGL_DRIVERS_PATH: &str = "/usr/lib/xgl/icd.d";
pub const DEFAULT_XGL_LAYERS_PATH: &str = "/usr/lib/xgl/layer.d";

pub const MAX_GPUS: usize = 16;
pub const MAX_LAYERS: usize = 256;

/// Optional overrides read from `XGL_LOADER_SETTINGS_FILE`. Every field is
/// optional; an absent field keeps the compiled-in/env-derived value.
#[derive(Debug, Default, Deserialize)]
struct LoaderSettingsFile {
    drivers_path: Option<String>,
    layers_path: Option<String>,
}

/// Resolved search paths for a single `CreateInstance` call. Built once and
/// handed to the scanner.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub drivers_path: String,
    pub layers_path: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig::load()
    }
}

impl LoaderConfig {
    pub fn load() -> Self {
        let mut cfg = LoaderConfig {
            drivers_path: platform::resolve_search_path(
                DRIVER_PATH_ENV,
                "VulkanDriverPath",
                DEFAULT_XGL_DRIVERS_PATH,
            ),
            layers_path: platform::resolve_search_path(
                LAYERS_PATH_ENV,
                "VulkanLayerPath",
                DEFAULT_XGL_LAYERS_PATH,
            ),
        };
        cfg.apply_settings_file();
        cfg
    }

    fn apply_settings_file(&mut self) {
        let Some(path) = platform::read_env(SETTINGS_FILE_ENV) else { return };
        let Ok(contents) = std::fs::read_to_string(&path) else {
            log::trace!("loader settings file {} not readable, ignoring", path);
            return;
        };
        match serde_json::from_str::<LoaderSettingsFile>(&contents) {
            Ok(settings) => {
                if let Some(p) = settings.drivers_path {
                    self.drivers_path = p;
                }
                if let Some(p) = settings.layers_path {
                    self.layers_path = p;
                }
            }
            Err(e) => {
                log::warn!("malformed loader settings file {}: {}", path, e);
            }
        }
    }
}

/// Layer names requested via `LIBXGL_LAYER_NAMES`, tokenized by the platform
/// path separator. Order is preserved; §4.E.3 resolves each to a library.
pub fn layer_names_from_env() -> Vec<String> {
    let raw = platform::resolve_search_path(LAYER_NAMES_ENV, "VulkanLayerNames", "");
    raw.split(platform::PATH_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

pub fn basename(path: &str) -> String {
    PathBuf::from(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

//! Error types for the loader implementation

use thiserror::Error;
use crate::sys::VkResult;

/// Errors surfaced at the loader's public entry points, per the error kinds
/// the ABI actually distinguishes. Everything else a driver can fail with is
/// opaquely propagated as `Driver(VkResult)`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LoaderError {
    #[error("out of memory")]
    OutOfMemory,
    #[error("no ICD survived instance creation")]
    IncompatibleDriver,
    #[error("unknown instance handle")]
    InvalidHandle,
    #[error("invalid pointer argument")]
    InvalidPointer,
    #[error("invalid value")]
    InvalidValue,
    #[error("physical device not owned by any ICD")]
    Unavailable,
    #[error("driver returned {0}")]
    Driver(VkResult),
}

impl From<LoaderError> for VkResult {
    fn from(e: LoaderError) -> VkResult {
        match e {
            LoaderError::OutOfMemory => VkResult::ErrorOutOfHostMemory,
            LoaderError::IncompatibleDriver => VkResult::ErrorIncompatibleDriver,
            LoaderError::InvalidHandle => VkResult::ErrorInvalidHandle,
            LoaderError::InvalidPointer => VkResult::ErrorInvalidPointer,
            LoaderError::InvalidValue => VkResult::ErrorInvalidValue,
            LoaderError::Unavailable => VkResult::ErrorUnavailable,
            LoaderError::Driver(r) => r,
        }
    }
}

/// Failures confined to scanning and dynamic loading. These never cross the
/// public API directly: scan-time failures are logged and the candidate is
/// skipped (§4.B), never surfaced to the caller of `CreateInstance`.
#[derive(Debug, Error)]
pub enum IcdError {
    #[error("invalid library path: {0}")]
    InvalidPath(String),
    #[error("failed to load library {path}: {source}")]
    LibraryLoadFailed {
        path: String,
        #[source]
        source: libloading::Error,
    },
    #[error("library does not export required symbol: {0}")]
    MissingSymbol(&'static str),
}

//! An installable client driver (ICD) loader for a compute-only graphics
//! API: discovers drivers and layers on disk, builds per-device dispatch
//! tables, and routes calls through an activated layer interposition chain
//! down to the vendor driver.

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

pub mod core;
pub mod sys;
pub mod ffi;

#[cfg(feature = "implementation")]
pub mod implementation;

// Re-export commonly used items
pub use core::*;
pub use sys::*;
pub use ffi::*;

#[cfg(feature = "implementation")]
pub use implementation::{
    vkCreateDevice, vkCreateInstance, vkDbgRegisterMsgCallback, vkDbgSetGlobalOption,
    vkDbgUnregisterMsgCallback, vkDestroyInstance, vkEnumerateGpus, vkEnumerateLayers,
    vkGetProcAddr,
};

// For libc types
extern crate libc;

/// Version information
pub const LOADER_VERSION_MAJOR: u32 = 0;
pub const LOADER_VERSION_MINOR: u32 = 1;
pub const LOADER_VERSION_PATCH: u32 = 0;

/// Make version number from major, minor, and patch numbers
#[inline]
pub const fn make_version(major: u32, minor: u32, patch: u32) -> u32 {
    (major << 22) | (minor << 12) | patch
}

/// Loader API version
pub const LOADER_API_VERSION: u32 = make_version(
    LOADER_VERSION_MAJOR,
    LOADER_VERSION_MINOR,
    LOADER_VERSION_PATCH,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(LOADER_API_VERSION, make_version(0, 1, 0));
    }
}

//! Device creation: the one application-facing entry point that wires layer
//! activation (§4.E) into the call path. Every other graphics/compute
//! command is forwarded through a device's dispatch table directly by the
//! application (resolved once via `vkGetProcAddr`) and is out of scope here
//! (§1 Non-goals) — this loader never re-implements or re-dispatches them.

use crate::core::VkDeviceCreateInfo;
use crate::ffi::*;
use crate::sys::*;

use super::error::LoaderError;
use super::layers;
use super::registry::{self, LOADER_STATE};

/// Activate any layers requested for `physicalDevice` (idempotent per
/// device — a second call with the same create-info is a no-op) before
/// forwarding to the ICD's or layer chain's own `CreateDevice`.
#[no_mangle]
pub unsafe extern "C" fn vkCreateDevice(
    physicalDevice: VkPhysicalDevice,
    pCreateInfo: *const VkDeviceCreateInfo,
    pAllocator: *const VkAllocationCallbacks,
    pDevice: *mut VkDevice,
) -> VkResult {
    if physicalDevice.is_null() || pCreateInfo.is_null() || pDevice.is_null() {
        return VkResult::from(LoaderError::InvalidPointer);
    }

    layers::activate_layers(physicalDevice, pCreateInfo);

    let state = LOADER_STATE.lock().unwrap();
    let Some((ii, ci, slot)) = registry::find_gpu_slot(&state, physicalDevice) else {
        return VkResult::from(LoaderError::Unavailable);
    };

    match state.instances[ii].icds[ci].dispatch[slot].create_device {
        Some(create_device) => create_device(physicalDevice, pCreateInfo, pAllocator, pDevice),
        None => VkResult::from(LoaderError::Unavailable),
    }
}

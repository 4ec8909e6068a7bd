//! Entry points (§4.G): the loader's own C ABI, composing the registry,
//! dispatch, layer, and debug-callback components. Every function here is
//! what an application (or the next node up a layer chain) calls directly.

use std::ffi::{c_char, c_void, CStr};

use crate::core::{VkDbgGlobalOption, VkDbgMsgType};
use crate::ffi::*;
use crate::sys::*;

use super::debug;
use super::dispatch;
use super::layers::BaseLayerObject;
use super::registry::{self, LOADER_STATE};

/// Create an instance: scan for drivers/layers (once) and try every scanned
/// ICD in turn (§4.D).
#[no_mangle]
pub unsafe extern "C" fn vkCreateInstance(
    pCreateInfo: *const crate::core::VkInstanceCreateInfo,
    pAllocator: *const VkAllocationCallbacks,
    pInstance: *mut VkInstance,
) -> VkResult {
    registry::create_instance(pCreateInfo, pAllocator, pInstance)
}

/// Destroy an instance, unwinding every ICD and layer chain it owns (§4.D).
#[no_mangle]
pub unsafe extern "C" fn vkDestroyInstance(
    instance: VkInstance,
    pAllocator: *const VkAllocationCallbacks,
) -> VkResult {
    registry::destroy_instance(instance, pAllocator)
}

/// Enumerate the physical devices visible through `instance`, binding a
/// dispatch table to each (§4.D).
#[no_mangle]
pub unsafe extern "C" fn vkEnumerateGpus(
    instance: VkInstance,
    maxGpus: u32,
    pGpuCount: *mut u32,
    pGpus: *mut VkPhysicalDevice,
) -> VkResult {
    registry::enumerate_gpus(instance, maxGpus, pGpuCount, pGpus)
}

/// §4.G `GetProcAddr`: recover the dispatch table from the head of
/// `gpu.baseObject` (where `EnumerateGpus` wrote it), look `name` up there,
/// and on a miss delegate to the table's own GPA against `gpu.nextObject` —
/// the mechanism an activated layer chain relies on to forward a call it
/// doesn't intercept itself.
#[no_mangle]
pub unsafe extern "C" fn vkGetProcAddr(
    gpu: VkPhysicalDevice,
    pName: *const c_char,
) -> PFN_vkVoidFunction {
    if gpu.is_null() || pName.is_null() {
        return None;
    }
    let name = match CStr::from_ptr(pName).to_str() {
        Ok(n) => n,
        Err(_) => return None,
    };

    let gpuw = gpu.as_raw() as *const BaseLayerObject;
    let base_object = (*gpuw).base_object;
    let table_ptr = dispatch::read_dispatch_pointer(base_object);
    if table_ptr.is_null() {
        return None;
    }
    let table = &*table_ptr;

    let resolved = dispatch::lookup_dispatch_table(table, name);
    if resolved.is_some() {
        return resolved;
    }
    match table.get_proc_addr {
        Some(gpa) => {
            let next_object = (*gpuw).next_object;
            unsafe { gpa(next_object, pName) }
        }
        None => None,
    }
}

/// §4.G `EnumerateLayers`: report every scanned layer's name, truncating to
/// `maxStringSize` bytes (NUL included).
#[no_mangle]
pub unsafe extern "C" fn vkEnumerateLayers(
    gpu: VkPhysicalDevice,
    maxLayerCount: u32,
    maxStringSize: usize,
    pOutLayerCount: *mut u32,
    pOutLayers: *mut *mut c_char,
    _pReserved: *mut c_void,
) -> VkResult {
    if pOutLayerCount.is_null() || pOutLayers.is_null() {
        return VkResult::from(super::error::LoaderError::InvalidPointer);
    }

    let state = LOADER_STATE.lock().unwrap();
    if registry::find_gpu_slot(&state, gpu).is_none() {
        return VkResult::from(super::error::LoaderError::Unavailable);
    }

    let mut written: u32 = 0;
    'layers: for lib_path in state.scanned_layers.iter() {
        for display_name in super::layers::reported_names(lib_path) {
            if written >= maxLayerCount {
                break 'layers;
            }

            let dest = *pOutLayers.add(written as usize) as *mut u8;
            if !dest.is_null() && maxStringSize > 0 {
                let bytes = display_name.as_bytes();
                let copy_len = bytes.len().min(maxStringSize - 1);
                std::ptr::copy_nonoverlapping(bytes.as_ptr(), dest, copy_len);
                *dest.add(copy_len) = 0;
            }
            written += 1;
        }
    }

    *pOutLayerCount = written;
    VkResult::Success
}

/// §4.F `DbgRegisterMsgCallback`.
#[no_mangle]
pub unsafe extern "C" fn vkDbgRegisterMsgCallback(
    pfnMsgCallback: PFN_vkDbgMsgCallback,
    pUserData: *mut c_void,
) -> VkResult {
    debug::register_callback(pfnMsgCallback, pUserData)
}

/// §4.F `DbgUnregisterMsgCallback`.
#[no_mangle]
pub unsafe extern "C" fn vkDbgUnregisterMsgCallback(pfnMsgCallback: PFN_vkDbgMsgCallback) -> VkResult {
    debug::unregister_callback(pfnMsgCallback)
}

/// §4.F `DbgSetGlobalOption`.
#[no_mangle]
pub unsafe extern "C" fn vkDbgSetGlobalOption(
    dbgOption: VkDbgGlobalOption,
    dataSize: usize,
    pData: *const c_void,
) -> VkResult {
    debug::set_global_option(dbgOption, dataSize, pData)
}

/// Emit a message through the debug-callback registry (§4.F `log`). Exposed
/// for the loader's own diagnostics; not part of the ABI surface an
/// application calls directly.
pub fn log_message(msg_type: VkDbgMsgType, msg_code: i32, layer_prefix: &str, message: &str) {
    debug::log(msg_type, msg_code, layer_prefix, message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::registry::tests::reset_state;
    use super::registry::{Icd, Instance};

    fn bound_gpu() -> (VkInstance, VkPhysicalDevice) {
        let instance_handle = VkInstance::from_raw(7);
        let gpu = VkPhysicalDevice::from_raw(0x5000);
        let mut state = LOADER_STATE.lock().unwrap();
        let icd = Icd {
            scanned_index: 0,
            instance_handle,
            gpu_count: 1,
            gpus: vec![gpu],
            dispatch: Vec::new(),
            layer_count: vec![0],
            wrapped_gpus: vec![None],
            layer_libs: vec![Vec::new()],
        };
        state.instances.push(Instance { handle: instance_handle, icds: vec![icd] });
        (instance_handle, gpu)
    }

    /// Property 4 / S6: of 3 candidate layers one failed to probe-open during
    /// scanning and never made it into `scanned_layers`; `EnumerateLayers`
    /// faithfully reports names derived from the survivors (self-reported, or
    /// basename-derived when a layer exports no `vkEnumerateLayers` of its
    /// own), truncated to fit `maxStringSize` and bounded by `maxLayerCount`.
    #[test]
    fn enumerate_layers_reports_scanned_layers_truncated() {
        let _guard = reset_state();
        let (_instance, gpu) = bound_gpu();
        {
            let mut state = LOADER_STATE.lock().unwrap();
            state.scanned_layers = vec![
                "/usr/lib/xgl/layer.d/libXGL_layer_alpha.so".to_string(),
                "/usr/lib/xgl/layer.d/libXGL_layer_a_very_long_layer_name_indeed.so".to_string(),
            ];
        }

        let mut count: u32 = 0;
        let mut name_buf = vec![0u8; 8];
        let mut name_ptrs: Vec<*mut c_char> = vec![name_buf.as_mut_ptr() as *mut c_char, std::ptr::null_mut()];

        let result = unsafe {
            vkEnumerateLayers(gpu, 1, 8, &mut count, name_ptrs.as_mut_ptr(), std::ptr::null_mut())
        };
        assert_eq!(result, VkResult::Success);
        assert_eq!(count, 1, "bounded by maxLayerCount, not the total scanned");

        let written = unsafe { CStr::from_ptr(name_ptrs[0]) }.to_str().unwrap();
        assert!(written.len() <= 7);
        assert_eq!(written, "alpha");
    }

    #[test]
    fn enumerate_layers_unknown_gpu_is_unavailable() {
        let _guard = reset_state();
        let mut count: u32 = 0;
        let mut ptrs: Vec<*mut c_char> = Vec::new();
        let result = unsafe {
            vkEnumerateLayers(
                VkPhysicalDevice::from_raw(0xBAD),
                0,
                0,
                &mut count,
                ptrs.as_mut_ptr(),
                std::ptr::null_mut(),
            )
        };
        assert_eq!(result, VkResult::from(super::error::LoaderError::Unavailable));
    }
}

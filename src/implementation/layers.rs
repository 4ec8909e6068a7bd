//! The interposition layer chain (§4.E) — the hardest subsystem. Builds,
//! given a device and a requested layer list, a chain of [`BaseLayerObject`]
//! nodes such that a call dispatched on the device enters the outermost
//! layer, forwards through each activated layer in turn, and finally lands
//! at the vendor driver.

use std::ffi::CString;

use crate::ffi::PFN_vkGetProcAddr;
use crate::sys::VkPhysicalDevice;

use super::config::{self, MAX_LAYERS};
use super::platform::{self, LibraryHandle};

/// One node of the interposition chain: an address-lookup function, the next
/// node toward the vendor driver, and a stable identity pointer that never
/// changes across interposition.
///
/// `wrappedGpus` arrays are boxed slices (`Box<[BaseLayerObject]>`) rather
/// than `Vec`, so that every wrapper's address is stable for the life of the
/// instance — layers hold pointers to these nodes and a reallocating `Vec`
/// would invalidate them.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct BaseLayerObject {
    pub p_gpa: PFN_vkGetProcAddr,
    pub next_object: VkPhysicalDevice,
    pub base_object: VkPhysicalDevice,
}

impl Default for BaseLayerObject {
    fn default() -> Self {
        BaseLayerObject {
            p_gpa: None,
            next_object: VkPhysicalDevice::NULL,
            base_object: VkPhysicalDevice::NULL,
        }
    }
}

/// A layer library opened for real and threaded into a chain.
pub struct ActiveLayer {
    pub name: String,
    pub library_path: String,
    pub handle: LibraryHandle,
}

/// Resolve a requested layer name to a scanned library path (§4.E.a). Each
/// scanned layer is probe-opened; if it exports `vkEnumerateLayers`, that is
/// consulted for an exact name match, otherwise a default name is derived
/// from the library's basename and compared directly.
pub fn find_layer_name(scanned_layers: &[String], layer_name: &str) -> Option<String> {
    for lib_path in scanned_layers {
        let probe = match platform::open_library(std::path::Path::new(lib_path)) {
            Ok(h) => h,
            Err(_) => continue,
        };
        let addr = platform::resolve_symbol(&probe, "vkEnumerateLayers");
        if !addr.is_null() {
            let enumerate: crate::ffi::PFN_vkEnumerateLayers = unsafe { std::mem::transmute(addr) };
            if let Some(enumerate) = enumerate {
                const MAX_REPORTED: u32 = 16;
                const MAX_NAME: usize = 256;
                let mut buf = vec![vec![0u8; MAX_NAME]; MAX_REPORTED as usize];
                let mut ptrs: Vec<*mut std::ffi::c_char> =
                    buf.iter_mut().map(|b| b.as_mut_ptr() as *mut std::ffi::c_char).collect();
                let mut count: u32 = 0;
                let result = unsafe {
                    enumerate(
                        VkPhysicalDevice::NULL,
                        MAX_REPORTED,
                        MAX_NAME,
                        &mut count,
                        ptrs.as_mut_ptr(),
                        std::ptr::null_mut(),
                    )
                };
                if result.is_success() {
                    for i in 0..(count as usize).min(ptrs.len()) {
                        let reported = unsafe { std::ffi::CStr::from_ptr(ptrs[i]) }.to_string_lossy();
                        if reported == layer_name {
                            platform::close_library(probe);
                            return Some(lib_path.clone());
                        }
                    }
                }
            }
        } else {
            let default_name = format!(
                "{}{}{}",
                platform::LAYER_LIBRARY_PREFIX,
                layer_name,
                platform::LIBRARY_SUFFIX
            );
            if config::basename(lib_path) == default_name {
                platform::close_library(probe);
                return Some(lib_path.clone());
            }
        }
        platform::close_library(probe);
    }
    None
}

/// Probe-open a scanned layer library and collect the name(s) it reports for
/// itself via its own exported `vkEnumerateLayers`, falling back to a default
/// name derived from the library's basename when the export is absent (same
/// probe shape as [`find_layer_name`], but collecting rather than matching).
pub fn reported_names(lib_path: &str) -> Vec<String> {
    let probe = match platform::open_library(std::path::Path::new(lib_path)) {
        Ok(h) => h,
        Err(_) => return vec![default_layer_name(lib_path)],
    };
    let addr = platform::resolve_symbol(&probe, "vkEnumerateLayers");
    let names = if !addr.is_null() {
        let enumerate: crate::ffi::PFN_vkEnumerateLayers = unsafe { std::mem::transmute(addr) };
        match enumerate {
            Some(enumerate) => {
                const MAX_REPORTED: u32 = 16;
                const MAX_NAME: usize = 256;
                let mut buf = vec![vec![0u8; MAX_NAME]; MAX_REPORTED as usize];
                let mut ptrs: Vec<*mut std::ffi::c_char> =
                    buf.iter_mut().map(|b| b.as_mut_ptr() as *mut std::ffi::c_char).collect();
                let mut count: u32 = 0;
                let result = unsafe {
                    enumerate(
                        VkPhysicalDevice::NULL,
                        MAX_REPORTED,
                        MAX_NAME,
                        &mut count,
                        ptrs.as_mut_ptr(),
                        std::ptr::null_mut(),
                    )
                };
                if result.is_success() {
                    (0..(count as usize).min(ptrs.len()))
                        .map(|i| unsafe { std::ffi::CStr::from_ptr(ptrs[i]) }.to_string_lossy().into_owned())
                        .collect()
                } else {
                    Vec::new()
                }
            }
            None => Vec::new(),
        }
    } else {
        Vec::new()
    };
    platform::close_library(probe);

    if names.is_empty() {
        vec![default_layer_name(lib_path)]
    } else {
        names
    }
}

fn default_layer_name(lib_path: &str) -> String {
    let name = config::basename(lib_path);
    name.strip_prefix(platform::LAYER_LIBRARY_PREFIX)
        .and_then(|s| s.strip_suffix(platform::LIBRARY_SUFFIX))
        .map(|s| s.to_string())
        .unwrap_or(name)
}

/// Build the requested layer-name list for an activation: environment names
/// first, then create-info names, each deduplicated by exact match against
/// names already collected (REDESIGN/open-question §11.2 — no double count).
pub fn build_requested_layer_names(create_info_names: &[String]) -> Vec<String> {
    let mut names = config::layer_names_from_env();
    for n in create_info_names {
        if !names.iter().any(|existing| existing == n) {
            names.push(n.clone());
        }
    }
    names.truncate(MAX_LAYERS);
    names
}

/// Open every resolved layer library for real (§4.E step 4). Failures are
/// logged and the entry skipped; the returned vector holds only the layers
/// that opened successfully, in request order.
pub fn open_requested_layers(scanned_layers: &[String], requested_names: &[String]) -> Vec<ActiveLayer> {
    let mut opened = Vec::new();
    for name in requested_names {
        let Some(lib_path) = find_layer_name(scanned_layers, name) else {
            log::warn!("layer '{}' not found among scanned layer libraries", name);
            continue;
        };
        match platform::open_library(std::path::Path::new(&lib_path)) {
            Ok(handle) => {
                log::info!("inserting layer {} from {}", name, lib_path);
                opened.push(ActiveLayer {
                    name: name.clone(),
                    library_path: lib_path,
                    handle,
                });
            }
            Err(e) => {
                log::warn!("failed to open layer library {}: {}", lib_path, e);
            }
        }
    }
    opened
}

/// Resolve `"<layer>GetProcAddr"` in a layer's library, falling back to plain
/// `"vkGetProcAddr"` when the layer-specific symbol is absent.
pub fn resolve_layer_gpa(layer: &ActiveLayer) -> PFN_vkGetProcAddr {
    let specific = format!("{}GetProcAddr", layer.name);
    let addr = platform::resolve_symbol(&layer.handle, &specific);
    let addr = if addr.is_null() {
        platform::resolve_symbol(&layer.handle, "vkGetProcAddr")
    } else {
        addr
    };
    if addr.is_null() {
        None
    } else {
        unsafe { std::mem::transmute(addr) }
    }
}

/// Thread `layers` (outermost-first) into a contiguous, pointer-stable arena
/// of [`BaseLayerObject`] nodes terminating at `driver_gpu` (§4.E steps 5-6).
///
/// Returns the arena plus the GPA to use when building the slot's dispatch
/// table (the outermost layer's GPA) and the GPA the application-visible GPU
/// handle should be rewritten to use.
pub fn build_chain(
    layers: &[ActiveLayer],
    driver_gpu: VkPhysicalDevice,
    loader_gpa: PFN_vkGetProcAddr,
    icd_gpa: PFN_vkGetProcAddr,
) -> (Box<[BaseLayerObject]>, PFN_vkGetProcAddr) {
    let count = layers.len();
    let mut arena: Vec<BaseLayerObject> = vec![BaseLayerObject::default(); count];

    let mut next_gpa = loader_gpa;
    for i in (0..count).rev() {
        let next_object = if i + 1 == count {
            driver_gpu
        } else {
            // Address of the previously threaded (more-inner) node.
            VkPhysicalDevice::from_raw(&arena[i + 1] as *const BaseLayerObject as u64)
        };
        arena[i] = BaseLayerObject {
            p_gpa: next_gpa,
            next_object,
            base_object: driver_gpu,
        };
        next_gpa = resolve_layer_gpa(&layers[i]);
    }

    // The innermost wrapper forwards to the driver's own GetProcAddr, not the
    // next (nonexistent) layer's.
    if let Some(last) = arena.last_mut() {
        last.p_gpa = icd_gpa;
    }

    // `next_gpa` now holds the outermost layer's own resolved GPA — the value
    // used both to populate the slot's dispatch table and to rewrite the
    // application-visible GPU's `pGPA` (§4.E step 6, `i == 0` case).
    let outermost_gpa = if count == 0 { icd_gpa } else { next_gpa };
    (arena.into_boxed_slice(), outermost_gpa)
}

pub fn entry_point_cstring(name: &str) -> CString {
    CString::new(name).expect("entry-point names are ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe extern "C" fn icd_gpa_stub(
        _gpu: VkPhysicalDevice,
        _name: *const std::ffi::c_char,
    ) -> crate::ffi::PFN_vkVoidFunction {
        None
    }

    fn fake_layer(name: &str) -> ActiveLayer {
        ActiveLayer {
            name: name.to_string(),
            library_path: format!("libXGL_layer_{name}.so"),
            handle: super::super::platform::open_self(),
        }
    }

    /// Property 3 (§8): k activated layers thread into k wrapper nodes, every
    /// wrapper's `base_object` equals the driver gpu, and the innermost
    /// wrapper's `pGPA` equals the ICD's own scanned GetProcAddr.
    #[test]
    fn build_chain_threads_outermost_first() {
        let driver_gpu = VkPhysicalDevice::from_raw(0x1234);
        let icd_gpa: PFN_vkGetProcAddr = Some(icd_gpa_stub);
        let loader_gpa: PFN_vkGetProcAddr = Some(icd_gpa_stub);
        let layers = vec![fake_layer("alpha"), fake_layer("beta")];

        let (arena, outermost_gpa) = build_chain(&layers, driver_gpu, loader_gpa, icd_gpa);

        assert_eq!(arena.len(), 2);
        // Every wrapper's baseObject is the original driver gpu (S3/property 3).
        assert!(arena.iter().all(|w| w.base_object == driver_gpu));
        // The innermost (beta) wrapper forwards straight to the driver.
        assert_eq!(arena[1].next_object, driver_gpu);
        // The outer (alpha) wrapper forwards to beta's own address.
        assert_eq!(arena[0].next_object.as_raw(), &arena[1] as *const BaseLayerObject as u64);
        // The innermost wrapper's pGPA is the ICD's scanned GetProcAddr.
        assert_eq!(arena[1].p_gpa.map(|f| f as usize), icd_gpa.map(|f| f as usize));
        assert!(outermost_gpa.is_some());
    }

    #[test]
    fn build_chain_empty_layers_returns_icd_gpa() {
        let driver_gpu = VkPhysicalDevice::from_raw(0x1234);
        let icd_gpa: PFN_vkGetProcAddr = Some(icd_gpa_stub);
        let (arena, outermost_gpa) = build_chain(&[], driver_gpu, None, icd_gpa);
        assert_eq!(arena.len(), 0);
        assert_eq!(outermost_gpa.map(|f| f as usize), icd_gpa.map(|f| f as usize));
    }

    #[test]
    fn build_requested_layer_names_dedups_against_env() {
        // No LIBXGL_LAYER_NAMES set in this process by default.
        let names = build_requested_layer_names(&["alpha".to_string(), "alpha".to_string()]);
        assert_eq!(names, vec!["alpha".to_string()]);
    }
}

/// Walk a `pNext` extension chain looking for a [`VkLayerCreateInfo`] link
/// and return the layer names it requests.
fn layer_names_from_create_info(p_create_info: *const crate::core::VkDeviceCreateInfo) -> Vec<String> {
    use crate::core::{VkLayerCreateInfo, VkStructureType};

    if p_create_info.is_null() {
        return Vec::new();
    }
    let mut cur = unsafe { (*p_create_info).pNext };
    while !cur.is_null() {
        let s_type = unsafe { *(cur as *const VkStructureType) };
        if s_type == VkStructureType::LayerCreateInfo {
            let link = cur as *const VkLayerCreateInfo;
            let count = unsafe { (*link).layerCount } as usize;
            let names_ptr = unsafe { (*link).ppActiveLayerNames };
            let mut names = Vec::with_capacity(count);
            for i in 0..count {
                let cstr_ptr = unsafe { *names_ptr.add(i) };
                if cstr_ptr.is_null() {
                    continue;
                }
                let name = unsafe { std::ffi::CStr::from_ptr(cstr_ptr) }.to_string_lossy().into_owned();
                names.push(name);
            }
            return names;
        }
        cur = unsafe { *(cur as *const *const std::ffi::c_void).add(1) };
    }
    Vec::new()
}

/// §4.E `activate_layers`: resolve `gpu` to its owning ICD/slot, build and
/// open the requested layer chain if this is the first activation for that
/// slot, thread it with [`build_chain`], and splice it in front of the
/// application-visible GPU handle. Returns the number of layers installed,
/// or 0 if `gpu` is not owned by any known ICD.
pub fn activate_layers(
    gpu: VkPhysicalDevice,
    p_create_info: *const crate::core::VkDeviceCreateInfo,
) -> u32 {
    use super::registry::{find_gpu_slot, LOADER_STATE};

    let mut state = LOADER_STATE.lock().unwrap();
    let Some((ii, ci, slot)) = find_gpu_slot(&state, gpu) else {
        return 0;
    };

    let create_info_names = layer_names_from_create_info(p_create_info);

    if state.instances[ii].icds[ci].layer_count[slot] > 0 {
        let requested = build_requested_layer_names(&create_info_names);
        let installed = &state.instances[ii].icds[ci].layer_libs[slot];
        let names_match = requested.len() == installed.len()
            && requested.iter().zip(installed.iter()).all(|(r, a)| r == &a.name);
        if !names_match {
            log::error!(
                "gpu already has an activated layer chain; requested layer set differs and will not be reconfigured"
            );
        }
        return state.instances[ii].icds[ci].layer_count[slot] as u32;
    }

    let requested = build_requested_layer_names(&create_info_names);
    if requested.is_empty() {
        return 0;
    }

    let scanned_layers = state.scanned_layers.clone();
    let opened = open_requested_layers(&scanned_layers, &requested);
    if opened.is_empty() {
        return 0;
    }

    // `gpu` addresses the `BaseLayerObject` allocated for this slot in
    // `enumerate_gpus`; its own `base_object` is the real driver handle.
    let app_obj = gpu.as_raw() as *mut BaseLayerObject;
    let driver_gpu = unsafe { (*app_obj).base_object };

    let icd_gpa = state.scanned_icds[state.instances[ii].icds[ci].scanned_index].get_proc_addr;
    let icd = &mut state.instances[ii].icds[ci];
    let loader_gpa: PFN_vkGetProcAddr = Some(super::instance::vkGetProcAddr);

    let (arena, outermost_gpa) = build_chain(&opened, driver_gpu, loader_gpa, icd_gpa);
    let outermost_ptr = VkPhysicalDevice::from_raw(arena.as_ptr() as u64);

    super::dispatch::init_dispatch_table(&mut icd.dispatch[slot], outermost_gpa, outermost_ptr);

    // Splice the chain in front of the application-visible GPU handle
    // (§4.E step 6, `i == 0` case).
    unsafe {
        (*app_obj).next_object = outermost_ptr;
        (*app_obj).p_gpa = outermost_gpa;
    }

    let count = opened.len();
    icd.layer_count[slot] = count;
    icd.layer_libs[slot] = opened;
    icd.wrapped_gpus[slot] = Some(arena);

    count as u32
}

/// §4.E `deactivate_layers`: for every slot of `icd`, close each activated
/// layer's library handle, drop its wrapper arena, and reset the slot's
/// `layer_count` and `gpu_count` to zero. Called from `DestroyInstance`.
pub fn deactivate_icd_layers(icd: &mut super::registry::Icd) {
    for slot in 0..MAX_GPUS_FOR_DEACTIVATE {
        if slot >= icd.layer_libs.len() {
            break;
        }
        if icd.layer_libs[slot].is_empty() {
            continue;
        }
        log::trace!("deactivating {} layers on slot {}", icd.layer_libs[slot].len(), slot);
        for layer in icd.layer_libs[slot].drain(..) {
            platform::close_library(layer.handle);
        }
        icd.wrapped_gpus[slot] = None;
        icd.layer_count[slot] = 0;
    }
    icd.gpu_count = 0;
}

const MAX_GPUS_FOR_DEACTIVATE: usize = config::MAX_GPUS;

//! ICD registry (§4.D): the process-global list of scanned drivers and the
//! per-instance bookkeeping built on top of them. Everything here is
//! reachable only through [`LOADER_STATE`], a single coarse-grained mutex —
//! per the Design Notes, the loader is not internally re-entrant and treats
//! concurrent use from multiple application threads as the application's
//! problem to serialize (§5).

use std::sync::Mutex;

use lazy_static::lazy_static;

use crate::ffi::*;
use crate::sys::*;

use super::config::{LoaderConfig, MAX_GPUS};
use super::dispatch::{self, DispatchTable};
use super::error::LoaderError;
use super::layers::{self, ActiveLayer, BaseLayerObject};
use super::platform::LibraryHandle;
use super::scanner;

/// A driver library scanned once at process startup and never unloaded
/// (§3, §4.B). `instance` is non-null only while at least one [`Icd`] built
/// from it is alive.
pub struct ScannedIcd {
    pub library_path: String,
    pub handle: LibraryHandle,
    pub get_proc_addr: PFN_vkGetProcAddr,
    pub create_instance: PFN_vkCreateInstance,
    pub destroy_instance: PFN_vkDestroyInstance,
    pub enumerate_gpus: PFN_vkEnumerateGpus,
    pub instance: VkInstance,
}

unsafe impl Send for ScannedIcd {}

/// Per-(instance, ICD) bookkeeping: the driver-scoped instance handle plus
/// one slot per bound GPU, indexed [0, MAX_GPUS).
pub struct Icd {
    pub scanned_index: usize,
    pub instance_handle: VkInstance,
    pub gpu_count: usize,
    pub gpus: Vec<VkPhysicalDevice>,
    pub dispatch: Vec<Box<DispatchTable>>,
    pub layer_count: Vec<usize>,
    pub wrapped_gpus: Vec<Option<Box<[BaseLayerObject]>>>,
    pub layer_libs: Vec<Vec<ActiveLayer>>,
}

impl Icd {
    fn new(scanned_index: usize, instance_handle: VkInstance) -> Self {
        Icd {
            scanned_index,
            instance_handle,
            gpu_count: 0,
            gpus: Vec::new(),
            dispatch: Vec::new(),
            layer_count: vec![0; MAX_GPUS],
            wrapped_gpus: (0..MAX_GPUS).map(|_| None).collect(),
            layer_libs: (0..MAX_GPUS).map(|_| Vec::new()).collect(),
        }
    }
}

/// One application-visible instance: an ordered (most-recently-created-first)
/// list of per-driver `Icd`s.
pub struct Instance {
    pub handle: VkInstance,
    pub icds: Vec<Icd>,
}

/// The process-global loader state (§3's "Global loader state singleton"),
/// behind a single mutex rather than scattered statics — the Design Notes'
/// recommended shape.
#[derive(Default)]
pub struct LoaderState {
    pub config: Option<LoaderConfig>,
    /// True once the one-shot driver/layer scan has completed, independent of
    /// whether it found any ICDs — distinct from `scanned_icds.is_empty()`,
    /// which cannot tell "never scanned" apart from "scanned, found none"
    /// (§3's "scan-done flags").
    pub scanned: bool,
    pub scanned_icds: Vec<ScannedIcd>,
    pub scanned_layers: Vec<String>,
    pub instances: Vec<Instance>,
    pub debug_echo_enable: bool,
    pub break_on_error: bool,
    pub break_on_warning: bool,
    pub pending_callbacks: Vec<super::debug::MsgCallback>,
}

lazy_static! {
    pub static ref LOADER_STATE: Mutex<LoaderState> = Mutex::new(LoaderState::default());
    static ref SCANNED_ICDS_STORE: Mutex<Vec<ScannedIcd>> = Mutex::new(Vec::new());
    static ref SCANNED_LAYERS_STORE: Mutex<Vec<String>> = Mutex::new(Vec::new());
}

/// Run both one-shot scans (if not already done) and fold their results into
/// `state`. Cheap to call on every `CreateInstance` — the `Once` tokens make
/// repeat calls no-ops.
fn ensure_scanned(state: &mut LoaderState) {
    let cfg = state.config.get_or_insert_with(LoaderConfig::load).clone();
    scanner::scan_drivers_once(&cfg, &SCANNED_ICDS_STORE);
    scanner::scan_layers_once(&cfg, &SCANNED_LAYERS_STORE);

    if state.scanned_icds.is_empty() {
        let mut guard = SCANNED_ICDS_STORE.lock().unwrap();
        // `guard` holds ICDs in discovery order; each is prepended in turn so
        // the most recently discovered ICD ends up first, matching the
        // original loader's `new_node->next = list; list = new_node` prepend.
        for icd in guard.drain(..) {
            state.scanned_icds.insert(0, icd);
        }
    }
    if state.scanned_layers.is_empty() {
        let guard = SCANNED_LAYERS_STORE.lock().unwrap();
        state.scanned_layers = guard.clone();
    }
    state.scanned = true;
}

/// §4.D `CreateInstance`: scan (once), allocate an `Instance`, and try every
/// scanned ICD in turn. An ICD whose own `CreateInstance` fails is dropped
/// immediately rather than aborting the whole call; only if *every* ICD fails
/// is `IncompatibleDriver` returned.
pub fn create_instance(
    p_create_info: *const VkInstanceCreateInfo,
    p_allocator: *const VkAllocationCallbacks,
    p_instance: *mut VkInstance,
) -> VkResult {
    if p_create_info.is_null() || p_instance.is_null() {
        return VkResult::from(LoaderError::InvalidPointer);
    }

    let mut state = LOADER_STATE.lock().unwrap();
    ensure_scanned(&mut state);

    let handle = VkInstance::from_raw(next_synthetic_handle());
    let mut instance = Instance { handle, icds: Vec::new() };

    let mut last_error = VkResult::ErrorIncompatibleDriver;
    for (index, scanned) in state.scanned_icds.iter_mut().enumerate() {
        let Some(create) = scanned.create_instance else { continue };
        let mut driver_instance = VkInstance::NULL;
        let result = unsafe { create(p_create_info, p_allocator, &mut driver_instance) };
        if !result.is_success() {
            log::warn!("driver {} failed CreateInstance: {:?}", scanned.library_path, result);
            last_error = result;
            continue;
        }
        scanned.instance = driver_instance;
        instance.icds.insert(0, Icd::new(index, driver_instance));
    }

    if instance.icds.is_empty() {
        return last_error;
    }

    unsafe { *p_instance = handle };
    state.instances.insert(0, instance);
    VkResult::Success
}

/// §4.D `DestroyInstance`: unlink the instance, deactivate any layer chains
/// still attached to its ICDs, forward the teardown to every driver, and null
/// out each driver's recorded instance handle. `ScannedIcd` descriptors
/// themselves are never freed — they remain scanned for the rest of the
/// process (§3).
pub fn destroy_instance(instance: VkInstance, p_allocator: *const VkAllocationCallbacks) -> VkResult {
    if instance.is_null() {
        return VkResult::from(LoaderError::InvalidHandle);
    }

    let mut state = LOADER_STATE.lock().unwrap();
    let Some(pos) = state.instances.iter().position(|i| i.handle == instance) else {
        return VkResult::from(LoaderError::InvalidHandle);
    };
    let mut removed = state.instances.remove(pos);

    for icd in &mut removed.icds {
        layers::deactivate_icd_layers(icd);
        if let Some(scanned) = state.scanned_icds.get_mut(icd.scanned_index) {
            if let Some(destroy) = scanned.destroy_instance {
                unsafe { destroy(icd.instance_handle, p_allocator) };
            }
            scanned.instance = VkInstance::NULL;
        }
    }

    VkResult::Success
}

/// §4.D `EnumerateGpus`: pull physical devices from every ICD belonging to
/// `instance`, wrap each with a [`BaseLayerObject`], build its per-device
/// dispatch table, write the ABI dispatch pointer into the driver handle, and
/// mirror the current debug state onto the newly bound device.
pub fn enumerate_gpus(
    instance: VkInstance,
    max_gpus: u32,
    p_gpu_count: *mut u32,
    p_gpus: *mut VkPhysicalDevice,
) -> VkResult {
    if p_gpu_count.is_null() {
        return VkResult::from(LoaderError::InvalidPointer);
    }

    let mut state = LOADER_STATE.lock().unwrap();
    let Some(inst_pos) = state.instances.iter().position(|i| i.handle == instance) else {
        return VkResult::from(LoaderError::InvalidHandle);
    };

    let mut total: u32 = 0;
    let mut last_error = VkResult::Success;
    let mut any_succeeded = false;

    let debug_echo = state.debug_echo_enable;
    let break_on_error = state.break_on_error;
    let break_on_warning = state.break_on_warning;
    let pending_callbacks = state.pending_callbacks.clone();

    // Split the borrow so the per-ICD loop can read `scanned_icds` while
    // mutating the instance's own ICDs at the same time.
    let LoaderState { instances, scanned_icds, .. } = &mut *state;
    let instance_ref = &mut instances[inst_pos];

    for icd in instance_ref.icds.iter_mut() {
        if total >= max_gpus {
            break;
        }
        let scanned = &scanned_icds[icd.scanned_index];
        let Some(enumerate) = scanned.enumerate_gpus else { continue };

        let want = (max_gpus - total).min(MAX_GPUS as u32 - icd.gpu_count as u32);
        if want == 0 {
            continue;
        }
        let mut driver_gpus = vec![VkPhysicalDevice::NULL; want as usize];
        let mut driver_count: u32 = 0;
        let result = unsafe {
            enumerate(icd.instance_handle, want, &mut driver_count, driver_gpus.as_mut_ptr())
        };
        if !result.is_success() {
            last_error = result;
            continue;
        }

        for i in 0..driver_count as usize {
            let driver_gpu = driver_gpus[i];
            let slot = icd.gpu_count;
            if slot >= MAX_GPUS {
                break;
            }

            let base = Box::new(BaseLayerObject {
                p_gpa: scanned.get_proc_addr,
                next_object: driver_gpu,
                base_object: driver_gpu,
            });
            let gpu_identity = VkPhysicalDevice::from_raw(Box::as_ref(&base) as *const BaseLayerObject as u64);
            std::mem::forget(base);
            // `gpu_identity` now addresses a leaked, pointer-stable
            // `BaseLayerObject` owned logically by `icd`; it is freed when
            // the ICD is torn down in `destroy_instance`/`deactivate_layers`.

            let mut table = Box::new(DispatchTable::default());
            dispatch::init_dispatch_table(&mut table, scanned.get_proc_addr, driver_gpu);

            unsafe {
                if !dispatch::valid_loader_magic_value(driver_gpu) {
                    log::warn!(
                        "driver {} returned a GPU handle without the expected loader magic value",
                        scanned.library_path
                    );
                }
                dispatch::write_dispatch_pointer(driver_gpu, Box::as_mut(&mut table) as *mut DispatchTable);
            }

            super::debug::mirror_to_table(
                &table,
                debug_echo,
                break_on_error,
                break_on_warning,
                &pending_callbacks,
            );

            icd.gpus.push(gpu_identity);
            icd.dispatch.push(table);
            icd.gpu_count += 1;

            if !p_gpus.is_null() {
                unsafe { *p_gpus.add(total as usize) = gpu_identity };
            }
            total += 1;
            any_succeeded = true;
        }
    }

    unsafe { *p_gpu_count = total };

    // The pending callbacks just mirrored onto every newly bound device have
    // now been migrated; the loader-local buffer they lived in is retired.
    state.pending_callbacks.clear();

    if any_succeeded || last_error == VkResult::Success {
        VkResult::Success
    } else {
        last_error
    }
}

/// Resolve a `gpu` handle to its owning `(instance_index, icd_index, slot)`,
/// scanning every instance's every ICD for a `BaseLayerObject` whose own
/// address or `base_object` equals `gpu` (§4.E step 1).
pub fn find_gpu_slot(state: &LoaderState, gpu: VkPhysicalDevice) -> Option<(usize, usize, usize)> {
    for (ii, inst) in state.instances.iter().enumerate() {
        for (ci, icd) in inst.icds.iter().enumerate() {
            for (slot, &bound) in icd.gpus.iter().enumerate() {
                if bound == gpu {
                    return Some((ii, ci, slot));
                }
            }
        }
    }
    None
}

/// Synthetic, process-unique instance handles. Unlike GPU handles (which
/// must satisfy the vendor ABI's pointer-identity requirements), instance
/// handles are loader-internal and never dereferenced by a driver, so a
/// monotonically increasing counter is sufficient.
fn next_synthetic_handle() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

// `LOADER_STATE` is process-global; every `#[cfg(test)] mod tests` across
// this crate that touches it (here, and in `debug.rs`) locks this first so
// one test's scanned ICDs and instances never leak into another's.
#[cfg(test)]
pub(crate) static GLOBAL_STATE_TEST_LOCK: Mutex<()> = Mutex::new(());

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::os::raw::c_char;

    unsafe extern "C" fn ok_create_instance(
        _p_create_info: *const VkInstanceCreateInfo,
        _p_allocator: *const VkAllocationCallbacks,
        p_instance: *mut VkInstance,
    ) -> VkResult {
        *p_instance = VkInstance::from_raw(0xA11CE);
        VkResult::Success
    }

    unsafe extern "C" fn failing_create_instance(
        _p_create_info: *const VkInstanceCreateInfo,
        _p_allocator: *const VkAllocationCallbacks,
        _p_instance: *mut VkInstance,
    ) -> VkResult {
        VkResult::ErrorInitializationFailed
    }

    unsafe extern "C" fn noop_destroy_instance(_instance: VkInstance, _p_allocator: *const VkAllocationCallbacks) {}

    unsafe extern "C" fn enumerate_two_gpus(
        _instance: VkInstance,
        max_devices: u32,
        p_count: *mut u32,
        p_gpus: *mut VkPhysicalDevice,
    ) -> VkResult {
        let want = max_devices.min(2);
        *p_count = want;
        for i in 0..want as usize {
            *p_gpus.add(i) = VkPhysicalDevice::from_raw(0x6000 + i as u64);
        }
        VkResult::Success
    }

    unsafe extern "C" fn get_proc_addr_stub(
        _gpu: VkPhysicalDevice,
        _name: *const c_char,
    ) -> PFN_vkVoidFunction {
        None
    }

    fn fake_icd(create: PFN_vkCreateInstance, enumerate: PFN_vkEnumerateGpus) -> ScannedIcd {
        ScannedIcd {
            library_path: "libXGL_test.so".to_string(),
            handle: super::super::platform::open_self(),
            get_proc_addr: Some(get_proc_addr_stub),
            create_instance: create,
            destroy_instance: Some(noop_destroy_instance),
            enumerate_gpus: enumerate,
            instance: VkInstance::NULL,
        }
    }

    pub(crate) fn reset_state() -> std::sync::MutexGuard<'static, ()> {
        let guard = GLOBAL_STATE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut state = LOADER_STATE.lock().unwrap();
        state.scanned = false;
        state.scanned_icds.clear();
        state.instances.clear();
        state.pending_callbacks.clear();
        // Pre-fill config so `ensure_scanned` never reloads it from the
        // environment during these tests (the scan itself is still gated by
        // the shared, process-lifetime `Once` tokens, same as production).
        state.config = Some(LoaderConfig::default());
        drop(state);
        guard
    }

    /// S1: a single driver, two GPUs enumerated.
    #[test]
    fn single_driver_enumerates_two_gpus() {
        let _guard = reset_state();
        {
            let mut state = LOADER_STATE.lock().unwrap();
            state.scanned_icds.push(fake_icd(Some(ok_create_instance), Some(enumerate_two_gpus)));
        }

        let mut instance = VkInstance::NULL;
        let result = create_instance(std::ptr::null(), std::ptr::null(), &mut instance);
        assert_eq!(result, VkResult::Success);
        assert!(!instance.is_null());

        let mut count: u32 = 0;
        let mut gpus = vec![VkPhysicalDevice::NULL; 16];
        let result = enumerate_gpus(instance, 16, &mut count, gpus.as_mut_ptr());
        assert_eq!(result, VkResult::Success);
        assert_eq!(count, 2);
    }

    /// S2: two drivers, one fails `CreateInstance` — the instance still
    /// succeeds and carries only the surviving ICD; no `IncompatibleDriver`.
    #[test]
    fn one_failing_driver_does_not_fail_the_instance() {
        let _guard = reset_state();
        {
            let mut state = LOADER_STATE.lock().unwrap();
            state.scanned_icds.push(fake_icd(Some(failing_create_instance), Some(enumerate_two_gpus)));
            state.scanned_icds.push(fake_icd(Some(ok_create_instance), Some(enumerate_two_gpus)));
        }

        let mut instance = VkInstance::NULL;
        let result = create_instance(std::ptr::null(), std::ptr::null(), &mut instance);
        assert_eq!(result, VkResult::Success);

        let state = LOADER_STATE.lock().unwrap();
        let inst = state.instances.iter().find(|i| i.handle == instance).unwrap();
        assert_eq!(inst.icds.len(), 1);
    }

    /// S4: `DestroyInstance` on an unknown handle returns `InvalidHandle` and
    /// leaves existing instances untouched.
    #[test]
    fn destroy_unknown_instance_is_invalid_handle_with_no_side_effects() {
        let _guard = reset_state();
        {
            let mut state = LOADER_STATE.lock().unwrap();
            state.scanned_icds.push(fake_icd(Some(ok_create_instance), Some(enumerate_two_gpus)));
        }
        let mut instance = VkInstance::NULL;
        create_instance(std::ptr::null(), std::ptr::null(), &mut instance);

        let bogus = VkInstance::from_raw(0xDEAD_BEEF);
        let result = destroy_instance(bogus, std::ptr::null());
        assert_eq!(result, VkResult::from(LoaderError::InvalidHandle));

        let state = LOADER_STATE.lock().unwrap();
        assert!(state.instances.iter().any(|i| i.handle == instance));
    }

    #[test]
    fn find_gpu_slot_locates_bound_device() {
        let _guard = reset_state();
        {
            let mut state = LOADER_STATE.lock().unwrap();
            state.scanned_icds.push(fake_icd(Some(ok_create_instance), Some(enumerate_two_gpus)));
        }
        let mut instance = VkInstance::NULL;
        create_instance(std::ptr::null(), std::ptr::null(), &mut instance);
        let mut count: u32 = 0;
        let mut gpus = vec![VkPhysicalDevice::NULL; 16];
        enumerate_gpus(instance, 16, &mut count, gpus.as_mut_ptr());

        let state = LOADER_STATE.lock().unwrap();
        let found = find_gpu_slot(&state, gpus[0]);
        assert_eq!(found, Some((0, 0, 0)));
        assert_eq!(find_gpu_slot(&state, VkPhysicalDevice::from_raw(0x9999)), None);
    }
}

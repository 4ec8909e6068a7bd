//! Debug-callback registry (§4.F): a process-global list of message
//! callbacks plus three global debug options, mirrored onto every ICD/device
//! slot once drivers exist. Registration before any driver has been scanned
//! is buffered locally and replayed onto the first devices bound by
//! `EnumerateGpus` (see [`super::registry::enumerate_gpus`]).

use std::ffi::CString;
use std::os::raw::c_char;

use crate::core::{VkDbgGlobalOption, VkDbgMsgType};
use crate::ffi::PFN_vkDbgMsgCallback;
use crate::sys::VkResult;

use super::error::LoaderError;
use super::registry::LOADER_STATE;

/// A registered callback: function pointer plus opaque user data, compared
/// for removal by function-pointer identity only (the original ABI has no
/// other handle for a registration).
#[derive(Clone, Copy)]
pub struct MsgCallback {
    pub func: PFN_vkDbgMsgCallback,
    pub user_data: *mut std::ffi::c_void,
}

unsafe impl Send for MsgCallback {}

const MAX_LOG_MESSAGE: usize = 256;

/// §4.F `register_callback`. Before any ICD is scanned, the callback is
/// simply appended to the pending list. Once drivers exist, it is pushed to
/// every instance/ICD/device slot; the first slot that refuses the
/// registration rolls back every slot visited so far, on every ICD,
/// including earlier instances (§7's rollback policy).
pub fn register_callback(func: PFN_vkDbgMsgCallback, user_data: *mut std::ffi::c_void) -> VkResult {
    let mut state = LOADER_STATE.lock().unwrap();
    if !state.scanned {
        state.pending_callbacks.push(MsgCallback { func, user_data });
        return VkResult::Success;
    }

    let mut visited: Vec<(usize, usize, usize)> = Vec::new();
    for (ii, inst) in state.instances.iter().enumerate() {
        for (ci, icd) in inst.icds.iter().enumerate() {
            for slot in 0..icd.gpu_count {
                let Some(table) = icd.dispatch.get(slot) else { continue };
                let Some(register) = table.dbg_register_msg_callback else { continue };
                let result = unsafe { register(func, user_data) };
                if !result.is_success() {
                    rollback_registration(&state, &visited, func);
                    return result;
                }
                visited.push((ii, ci, slot));
            }
        }
    }
    state.pending_callbacks.push(MsgCallback { func, user_data });
    VkResult::Success
}

/// Unregister `func` from every `(instance, icd, slot)` already registered
/// before a later slot refused the registration (§4.F rollback policy).
fn rollback_registration(
    state: &super::registry::LoaderState,
    visited: &[(usize, usize, usize)],
    func: PFN_vkDbgMsgCallback,
) {
    for &(ii, ci, slot) in visited {
        let Some(table) = state.instances[ii].icds[ci].dispatch.get(slot) else { continue };
        if let Some(unregister) = table.dbg_unregister_msg_callback {
            unsafe { unregister(func) };
        }
    }
}

/// §4.F `unregister_callback`. Before any ICD is scanned, removes the first
/// pending callback matching `func` by pointer identity, failing
/// `InvalidPointer` if none match. Once drivers exist, unregisters on every
/// slot and returns the last non-success result observed — there is no
/// rollback for this operation, since un-registering is already the undo.
pub fn unregister_callback(func: PFN_vkDbgMsgCallback) -> VkResult {
    let mut state = LOADER_STATE.lock().unwrap();
    if !state.scanned {
        let pos = state
            .pending_callbacks
            .iter()
            .position(|c| fn_ptr_eq(c.func, func));
        return match pos {
            Some(i) => {
                state.pending_callbacks.remove(i);
                VkResult::Success
            }
            None => VkResult::from(LoaderError::InvalidPointer),
        };
    }

    let mut last_error = VkResult::Success;
    for inst in state.instances.iter() {
        for icd in inst.icds.iter() {
            for slot in 0..icd.gpu_count {
                let Some(table) = icd.dispatch.get(slot) else { continue };
                if let Some(unregister) = table.dbg_unregister_msg_callback {
                    let result = unsafe { unregister(func) };
                    if !result.is_success() {
                        last_error = result;
                    }
                }
            }
        }
    }
    state.pending_callbacks.retain(|c| !fn_ptr_eq(c.func, func));
    last_error
}

/// §4.F `set_global_option`. Before any ICD is scanned, updates the
/// in-loader boolean directly. Once drivers exist, forwards to every
/// per-slot `DbgSetGlobalOption`, remembering the last error but never
/// rolling back (§9 Open Question: the original loader "unfortunately
/// cannot" undo a partially applied option either).
pub fn set_global_option(option: VkDbgGlobalOption, data_size: usize, data: *const std::ffi::c_void) -> VkResult {
    if data_size == 0 || data.is_null() {
        return VkResult::from(LoaderError::InvalidValue);
    }
    let value = unsafe { *(data as *const u32) } != 0;

    let mut state = LOADER_STATE.lock().unwrap();
    match option {
        VkDbgGlobalOption::DebugEchoEnable => state.debug_echo_enable = value,
        VkDbgGlobalOption::BreakOnError => state.break_on_error = value,
        VkDbgGlobalOption::BreakOnWarning => state.break_on_warning = value,
    }

    if !state.scanned {
        return VkResult::Success;
    }

    let mut last_error = VkResult::Success;
    for inst in state.instances.iter() {
        for icd in inst.icds.iter() {
            for slot in 0..icd.gpu_count {
                let Some(table) = icd.dispatch.get(slot) else { continue };
                if let Some(set_option) = table.dbg_set_global_option {
                    let result = unsafe { set_option(option, data_size, data) };
                    if !result.is_success() {
                        last_error = result;
                    }
                }
            }
        }
    }
    last_error
}

/// Push the three global options and every currently registered callback
/// onto a single newly bound device's dispatch table (§4.D, run once per
/// slot right after `EnumerateGpus` builds it).
pub fn mirror_to_table(
    table: &super::dispatch::DispatchTable,
    echo: bool,
    break_on_error: bool,
    break_on_warning: bool,
    callbacks: &[MsgCallback],
) {
    if let Some(set_option) = table.dbg_set_global_option {
        unsafe {
            let e = echo as u32;
            set_option(VkDbgGlobalOption::DebugEchoEnable, std::mem::size_of::<u32>(), &e as *const u32 as *const _);
            let b1 = break_on_error as u32;
            set_option(VkDbgGlobalOption::BreakOnError, std::mem::size_of::<u32>(), &b1 as *const u32 as *const _);
            let b2 = break_on_warning as u32;
            set_option(VkDbgGlobalOption::BreakOnWarning, std::mem::size_of::<u32>(), &b2 as *const u32 as *const _);
        }
    }
    if let Some(register) = table.dbg_register_msg_callback {
        for cb in callbacks {
            unsafe { register(cb.func, cb.user_data) };
        }
    }
}

/// §4.F `log`: format into a fixed stack buffer (truncated, never
/// reallocated), echo to stderr when enabled or when no callback is
/// registered at all, fan out to every registered callback, and terminate
/// the process when the configured break-on-* policy applies.
pub fn log(msg_type: VkDbgMsgType, msg_code: i32, layer_prefix: &str, message: &str) {
    let mut buf = message.as_bytes().to_vec();
    buf.truncate(MAX_LOG_MESSAGE - 1);
    let truncated = String::from_utf8_lossy(&buf).into_owned();

    let state = LOADER_STATE.lock().unwrap();
    let has_callbacks = !state.pending_callbacks.is_empty()
        || state.instances.iter().any(|i| !i.icds.is_empty());

    if state.debug_echo_enable || !has_callbacks {
        match msg_type {
            VkDbgMsgType::Error => log::error!("[{}] {}", layer_prefix, truncated),
            VkDbgMsgType::Warning => log::warn!("[{}] {}", layer_prefix, truncated),
            VkDbgMsgType::Perf => log::info!("[{}] {}", layer_prefix, truncated),
            VkDbgMsgType::Info => log::info!("[{}] {}", layer_prefix, truncated),
            VkDbgMsgType::Debug => log::debug!("[{}] {}", layer_prefix, truncated),
        }
    }

    let prefix_c = CString::new(layer_prefix).unwrap_or_default();
    let msg_c = CString::new(truncated.clone()).unwrap_or_default();
    for cb in state.pending_callbacks.iter() {
        if let Some(func) = cb.func {
            unsafe {
                func(
                    msg_type,
                    crate::sys::VkPhysicalDevice::NULL,
                    msg_code,
                    prefix_c.as_ptr() as *const c_char,
                    msg_c.as_ptr() as *const c_char,
                    cb.user_data,
                );
            }
        }
    }

    let break_on_error = state.break_on_error;
    let break_on_warning = state.break_on_warning;
    drop(state);

    if (msg_type == VkDbgMsgType::Error && break_on_error)
        || (msg_type == VkDbgMsgType::Warning && break_on_warning)
    {
        std::process::exit(1);
    }
}

fn fn_ptr_eq(a: PFN_vkDbgMsgCallback, b: PFN_vkDbgMsgCallback) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a as usize == b as usize,
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::{PFN_vkDbgRegisterMsgCallback, PFN_vkDbgSetGlobalOption, PFN_vkDbgUnregisterMsgCallback};
    use crate::sys::{VkInstance, VkPhysicalDevice};
    use std::os::raw::c_void;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::super::registry::{tests::reset_state, Icd, Instance, ScannedIcd};
    use super::super::dispatch::DispatchTable;

    unsafe extern "C" fn get_proc_addr_stub(
        _gpu: VkPhysicalDevice,
        _name: *const c_char,
    ) -> crate::ffi::PFN_vkVoidFunction {
        None
    }

    fn fake_scanned_icd() -> ScannedIcd {
        ScannedIcd {
            library_path: "libXGL_test.so".to_string(),
            handle: super::super::platform::open_self(),
            get_proc_addr: Some(get_proc_addr_stub),
            create_instance: None,
            destroy_instance: None,
            enumerate_gpus: None,
            instance: VkInstance::NULL,
        }
    }

    static REGISTER_CALLS: AtomicUsize = AtomicUsize::new(0);
    static UNREGISTER_CALLS: AtomicUsize = AtomicUsize::new(0);
    static SET_OPTION_CALLS: AtomicUsize = AtomicUsize::new(0);

    unsafe extern "C" fn noop_cb(
        _msg_type: VkDbgMsgType,
        _src: VkPhysicalDevice,
        _code: i32,
        _prefix: *const c_char,
        _msg: *const c_char,
        _user_data: *mut c_void,
    ) {
    }

    unsafe extern "C" fn register_ok(
        _cb: PFN_vkDbgMsgCallback,
        _user_data: *mut c_void,
    ) -> VkResult {
        REGISTER_CALLS.fetch_add(1, Ordering::SeqCst);
        VkResult::Success
    }

    unsafe extern "C" fn register_fails(
        _cb: PFN_vkDbgMsgCallback,
        _user_data: *mut c_void,
    ) -> VkResult {
        REGISTER_CALLS.fetch_add(1, Ordering::SeqCst);
        VkResult::ErrorInitializationFailed
    }

    unsafe extern "C" fn unregister_ok(_cb: PFN_vkDbgMsgCallback) -> VkResult {
        UNREGISTER_CALLS.fetch_add(1, Ordering::SeqCst);
        VkResult::Success
    }

    unsafe extern "C" fn set_option_ok(
        _option: VkDbgGlobalOption,
        _size: usize,
        _data: *const c_void,
    ) -> VkResult {
        SET_OPTION_CALLS.fetch_add(1, Ordering::SeqCst);
        VkResult::Success
    }

    fn reset_counters() {
        REGISTER_CALLS.store(0, Ordering::SeqCst);
        UNREGISTER_CALLS.store(0, Ordering::SeqCst);
        SET_OPTION_CALLS.store(0, Ordering::SeqCst);
    }

    fn table_with(
        register: PFN_vkDbgRegisterMsgCallback,
        unregister: PFN_vkDbgUnregisterMsgCallback,
        set_option: PFN_vkDbgSetGlobalOption,
    ) -> DispatchTable {
        let mut table = DispatchTable::default();
        table.dbg_register_msg_callback = register;
        table.dbg_unregister_msg_callback = unregister;
        table.dbg_set_global_option = set_option;
        table
    }

    /// Before any driver is scanned, registration/unregistration only touches
    /// the pending-callback list.
    #[test]
    fn register_and_unregister_before_any_driver_is_pending_only() {
        let _guard = reset_state();
        reset_counters();

        let result = register_callback(Some(noop_cb), std::ptr::null_mut());
        assert_eq!(result, VkResult::Success);
        assert_eq!(REGISTER_CALLS.load(Ordering::SeqCst), 0);

        let result = unregister_callback(Some(noop_cb));
        assert_eq!(result, VkResult::Success);

        let result = unregister_callback(Some(noop_cb));
        assert_eq!(result, VkResult::from(LoaderError::InvalidPointer));
    }

    /// Property 6: if registration fails partway through the slots, every
    /// slot visited so far — across every ICD, including earlier ones —
    /// is rolled back via `DbgUnregisterMsgCallback`.
    #[test]
    fn register_callback_rolls_back_on_failure() {
        let _guard = reset_state();
        reset_counters();

        {
            let mut state = LOADER_STATE.lock().unwrap();
            // Need the scan-done flag set so `register_callback` takes the
            // "drivers exist" branch instead of the pending-only path.
            state.scanned = true;
            state.scanned_icds.push(fake_scanned_icd());

            let mut icd = Icd {
                scanned_index: 0,
                instance_handle: VkInstance::from_raw(1),
                gpu_count: 2,
                gpus: vec![VkPhysicalDevice::from_raw(1), VkPhysicalDevice::from_raw(2)],
                dispatch: Vec::new(),
                layer_count: vec![0; 2],
                wrapped_gpus: vec![None, None],
                layer_libs: vec![Vec::new(), Vec::new()],
            };
            icd.dispatch.push(Box::new(table_with(Some(register_ok), Some(unregister_ok), None)));
            icd.dispatch.push(Box::new(table_with(Some(register_fails), Some(unregister_ok), None)));

            state.instances.push(Instance { handle: VkInstance::from_raw(42), icds: vec![icd] });
        }

        let result = register_callback(Some(noop_cb), std::ptr::null_mut());
        assert_eq!(result, VkResult::ErrorInitializationFailed);
        // Slot 0 registered then was rolled back; slot 1's failing call never
        // gets an unregister (it never succeeded in the first place).
        assert_eq!(REGISTER_CALLS.load(Ordering::SeqCst), 2);
        assert_eq!(UNREGISTER_CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn set_global_option_rejects_null_or_empty_data() {
        let _guard = reset_state();
        let result = set_global_option(VkDbgGlobalOption::BreakOnError, 0, std::ptr::null());
        assert_eq!(result, VkResult::from(LoaderError::InvalidValue));
        let result = set_global_option(VkDbgGlobalOption::BreakOnError, 4, std::ptr::null());
        assert_eq!(result, VkResult::from(LoaderError::InvalidValue));
    }

    #[test]
    fn set_global_option_updates_state_with_no_drivers() {
        let _guard = reset_state();
        let value: u32 = 1;
        let result = set_global_option(
            VkDbgGlobalOption::BreakOnWarning,
            std::mem::size_of::<u32>(),
            &value as *const u32 as *const c_void,
        );
        assert_eq!(result, VkResult::Success);
        let state = LOADER_STATE.lock().unwrap();
        assert!(state.break_on_warning);
    }

    #[test]
    fn mirror_to_table_pushes_options_and_pending_callbacks() {
        let _guard = reset_state();
        reset_counters();
        let table = table_with(Some(register_ok), Some(unregister_ok), Some(set_option_ok));
        let callbacks = vec![MsgCallback { func: Some(noop_cb), user_data: std::ptr::null_mut() }];
        mirror_to_table(&table, true, false, true, &callbacks);
        assert_eq!(SET_OPTION_CALLS.load(Ordering::SeqCst), 3);
        assert_eq!(REGISTER_CALLS.load(Ordering::SeqCst), 1);
    }
}

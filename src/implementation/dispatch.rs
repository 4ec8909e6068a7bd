//! Dispatch table: a fixed-shape record of function pointers, one slot per
//! graphics entry point, populated by resolving names through a supplied
//! GPA function (§4.C).

use std::ffi::CString;

use crate::ffi::*;
use crate::sys::*;

macro_rules! dispatch_table {
    ($($field:ident : $pfn:ty => $name:expr),+ $(,)?) => {
        #[repr(C)]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct DispatchTable {
            /// The GPA this table was built from. Not itself looked up by
            /// name — used as the delegation target when `lookup` misses,
            /// mirroring the historical loader's `disp_table->GetProcAddr`.
            pub get_proc_addr: PFN_vkGetProcAddr,
            $(pub $field: $pfn,)+
        }

        impl DispatchTable {
            const ENTRIES: &'static [&'static str] = &[$($name),+];

            fn store(&mut self, name: &str, addr: PFN_vkVoidFunction) -> bool {
                match name {
                    $($name => { self.$field = unsafe { std::mem::transmute(addr) }; true })+
                    _ => false,
                }
            }

            /// Look up a single slot's resolved address by entry-point name.
            pub fn lookup(&self, name: &str) -> PFN_vkVoidFunction {
                match name {
                    $($name => unsafe { std::mem::transmute(self.$field) },)+
                    _ => None,
                }
            }
        }
    };
}

dispatch_table! {
    enumerate_layers: PFN_vkEnumerateLayers => "vkEnumerateLayers",
    create_device: PFN_vkCreateDevice => "vkCreateDevice",
    destroy_device: PFN_vkDestroyDevice => "vkDestroyDevice",
    get_device_queue: PFN_vkGetDeviceQueue => "vkGetDeviceQueue",
    queue_submit: PFN_vkQueueSubmit => "vkQueueSubmit",
    queue_wait_idle: PFN_vkQueueWaitIdle => "vkQueueWaitIdle",
    device_wait_idle: PFN_vkDeviceWaitIdle => "vkDeviceWaitIdle",
    allocate_memory: PFN_vkAllocateMemory => "vkAllocateMemory",
    free_memory: PFN_vkFreeMemory => "vkFreeMemory",
    map_memory: PFN_vkMapMemory => "vkMapMemory",
    unmap_memory: PFN_vkUnmapMemory => "vkUnmapMemory",
    create_buffer: PFN_vkCreateBuffer => "vkCreateBuffer",
    destroy_buffer: PFN_vkDestroyBuffer => "vkDestroyBuffer",
    get_buffer_memory_requirements: PFN_vkGetBufferMemoryRequirements => "vkGetBufferMemoryRequirements",
    bind_buffer_memory: PFN_vkBindBufferMemory => "vkBindBufferMemory",
    create_descriptor_set_layout: PFN_vkCreateDescriptorSetLayout => "vkCreateDescriptorSetLayout",
    destroy_descriptor_set_layout: PFN_vkDestroyDescriptorSetLayout => "vkDestroyDescriptorSetLayout",
    create_descriptor_pool: PFN_vkCreateDescriptorPool => "vkCreateDescriptorPool",
    destroy_descriptor_pool: PFN_vkDestroyDescriptorPool => "vkDestroyDescriptorPool",
    allocate_descriptor_sets: PFN_vkAllocateDescriptorSets => "vkAllocateDescriptorSets",
    update_descriptor_sets: PFN_vkUpdateDescriptorSets => "vkUpdateDescriptorSets",
    create_pipeline_layout: PFN_vkCreatePipelineLayout => "vkCreatePipelineLayout",
    destroy_pipeline_layout: PFN_vkDestroyPipelineLayout => "vkDestroyPipelineLayout",
    create_compute_pipelines: PFN_vkCreateComputePipelines => "vkCreateComputePipelines",
    destroy_pipeline: PFN_vkDestroyPipeline => "vkDestroyPipeline",
    create_shader_module: PFN_vkCreateShaderModule => "vkCreateShaderModule",
    destroy_shader_module: PFN_vkDestroyShaderModule => "vkDestroyShaderModule",
    create_command_pool: PFN_vkCreateCommandPool => "vkCreateCommandPool",
    destroy_command_pool: PFN_vkDestroyCommandPool => "vkDestroyCommandPool",
    allocate_command_buffers: PFN_vkAllocateCommandBuffers => "vkAllocateCommandBuffers",
    free_command_buffers: PFN_vkFreeCommandBuffers => "vkFreeCommandBuffers",
    begin_command_buffer: PFN_vkBeginCommandBuffer => "vkBeginCommandBuffer",
    end_command_buffer: PFN_vkEndCommandBuffer => "vkEndCommandBuffer",
    cmd_bind_pipeline: PFN_vkCmdBindPipeline => "vkCmdBindPipeline",
    cmd_bind_descriptor_sets: PFN_vkCmdBindDescriptorSets => "vkCmdBindDescriptorSets",
    cmd_dispatch: PFN_vkCmdDispatch => "vkCmdDispatch",
    cmd_dispatch_indirect: PFN_vkCmdDispatchIndirect => "vkCmdDispatchIndirect",
    cmd_pipeline_barrier: PFN_vkCmdPipelineBarrier => "vkCmdPipelineBarrier",
    cmd_copy_buffer: PFN_vkCmdCopyBuffer => "vkCmdCopyBuffer",
    create_fence: PFN_vkCreateFence => "vkCreateFence",
    destroy_fence: PFN_vkDestroyFence => "vkDestroyFence",
    reset_fences: PFN_vkResetFences => "vkResetFences",
    get_fence_status: PFN_vkGetFenceStatus => "vkGetFenceStatus",
    wait_for_fences: PFN_vkWaitForFences => "vkWaitForFences",
    create_semaphore: PFN_vkCreateSemaphore => "vkCreateSemaphore",
    destroy_semaphore: PFN_vkDestroySemaphore => "vkDestroySemaphore",
    create_event: PFN_vkCreateEvent => "vkCreateEvent",
    destroy_event: PFN_vkDestroyEvent => "vkDestroyEvent",
    get_event_status: PFN_vkGetEventStatus => "vkGetEventStatus",
    set_event: PFN_vkSetEvent => "vkSetEvent",
    reset_event: PFN_vkResetEvent => "vkResetEvent",
    cmd_set_event: PFN_vkCmdSetEvent => "vkCmdSetEvent",
    cmd_reset_event: PFN_vkCmdResetEvent => "vkCmdResetEvent",
    cmd_wait_events: PFN_vkCmdWaitEvents => "vkCmdWaitEvents",
    dbg_register_msg_callback: PFN_vkDbgRegisterMsgCallback => "vkDbgRegisterMsgCallback",
    dbg_unregister_msg_callback: PFN_vkDbgUnregisterMsgCallback => "vkDbgUnregisterMsgCallback",
    dbg_set_global_option: PFN_vkDbgSetGlobalOption => "vkDbgSetGlobalOption",
}

/// Populate every slot of `table` by calling `gpa(gpu, name)` for each known
/// entry-point name. If `EnumerateLayers` is left unresolved by the driver,
/// fall back to the loader's own implementation (§4.C).
pub fn init_dispatch_table(
    table: &mut DispatchTable,
    gpa: PFN_vkGetProcAddr,
    gpu: VkPhysicalDevice,
) {
    table.get_proc_addr = gpa;
    let Some(gpa) = gpa else { return };
    for name in DispatchTable::ENTRIES {
        let cname = CString::new(*name).expect("entry-point names are ASCII");
        let addr = unsafe { gpa(gpu, cname.as_ptr()) };
        if addr.is_some() {
            table.store(name, addr);
        }
    }
    if table.enumerate_layers.is_none() {
        table.enumerate_layers = Some(super::instance::vkEnumerateLayers);
    }
}

/// Look up `name` in `table`, returning its resolved address or `None` if
/// `table` does not carry that entry point.
pub fn lookup_dispatch_table(table: &DispatchTable, name: &str) -> PFN_vkVoidFunction {
    table.lookup(name)
}

/// The sentinel a conforming vendor driver writes into the first machine word
/// of every physical-device handle it hands back from `EnumerateGpus`, before
/// the loader overwrites that word with the real dispatch-table pointer
/// (§6.4). Grounded directly in the historical loader's
/// `valid_loader_magic_value` / `ICD_LOADER_MAGIC` check.
pub const ICD_LOADER_MAGIC: usize = 0x10ADED00;

/// Check that `gpu`'s first machine word still holds the loader magic value.
/// Called once per device, before the word is overwritten with a dispatch
/// pointer — a driver that fails this check is non-conforming but is not
/// treated as fatal, only logged (§4.D).
///
/// # Safety
/// `gpu` must point at memory at least `size_of::<usize>()` bytes long that
/// the calling driver owns for the lifetime of the device.
pub unsafe fn valid_loader_magic_value(gpu: VkPhysicalDevice) -> bool {
    if gpu.is_null() {
        return false;
    }
    let word = gpu.as_raw() as *const usize;
    *word == ICD_LOADER_MAGIC
}

/// Overwrite the first machine word at `gpu`'s address with `table`, exactly
/// as the original ICD ABI requires so that later `GetProcAddr(gpu, ...)`
/// calls can recover the dispatch table from the handle alone.
///
/// # Safety
/// Same preconditions as [`valid_loader_magic_value`]; `table` must outlive
/// every future dereference of `gpu`'s first word (it lives in the owning
/// `Icd`'s boxed `loader_dispatch` array for the life of the instance).
pub unsafe fn write_dispatch_pointer(gpu: VkPhysicalDevice, table: *mut DispatchTable) {
    if gpu.is_null() {
        return;
    }
    let word = gpu.as_raw() as *mut *mut DispatchTable;
    *word = table;
}

/// Recover the dispatch-table pointer previously written by
/// [`write_dispatch_pointer`] from the first machine word at `gpu`'s address.
///
/// # Safety
/// `gpu` must be a handle that previously had a dispatch pointer written into
/// it by `write_dispatch_pointer` and must still be live.
pub unsafe fn read_dispatch_pointer(gpu: VkPhysicalDevice) -> *mut DispatchTable {
    if gpu.is_null() {
        return std::ptr::null_mut();
    }
    let word = gpu.as_raw() as *const *mut DispatchTable;
    *word
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::VkPhysicalDevice;
    use std::ffi::CStr;

    #[test]
    fn magic_value_round_trip() {
        let mut word: usize = ICD_LOADER_MAGIC;
        let gpu = VkPhysicalDevice::from_raw(&mut word as *mut usize as u64);
        unsafe {
            assert!(valid_loader_magic_value(gpu));

            let mut table = Box::new(DispatchTable::default());
            write_dispatch_pointer(gpu, Box::as_mut(&mut table) as *mut DispatchTable);
            let recovered = read_dispatch_pointer(gpu);
            assert_eq!(recovered, Box::as_ref(&table) as *const DispatchTable as *mut DispatchTable);
        }
    }

    #[test]
    fn magic_value_rejects_null_and_garbage() {
        unsafe {
            assert!(!valid_loader_magic_value(VkPhysicalDevice::NULL));
            let mut word: usize = 0xdead_beef;
            let gpu = VkPhysicalDevice::from_raw(&mut word as *mut usize as u64);
            assert!(!valid_loader_magic_value(gpu));
        }
    }

    #[test]
    fn lookup_misses_unknown_name() {
        let table = DispatchTable::default();
        assert!(lookup_dispatch_table(&table, "vkSomethingNotInTheTable").is_none());
    }

    unsafe extern "C" fn fake_gpa(_gpu: VkPhysicalDevice, name: *const std::os::raw::c_char) -> PFN_vkVoidFunction {
        let name = CStr::from_ptr(name);
        if name.to_str() == Ok("vkCreateDevice") {
            let f: PFN_vkCreateDevice = Some(fake_create_device);
            std::mem::transmute::<PFN_vkCreateDevice, PFN_vkVoidFunction>(f)
        } else {
            None
        }
    }

    unsafe extern "C" fn fake_create_device(
        _physical_device: VkPhysicalDevice,
        _p_create_info: *const crate::core::VkDeviceCreateInfo,
        _p_allocator: *const VkAllocationCallbacks,
        _p_device: *mut VkDevice,
    ) -> VkResult {
        VkResult::Success
    }

    #[test]
    fn init_dispatch_table_resolves_known_name_and_falls_back_for_enumerate_layers() {
        let mut table = DispatchTable::default();
        init_dispatch_table(&mut table, Some(fake_gpa), VkPhysicalDevice::NULL);
        assert!(table.create_device.is_some());
        assert!(table.destroy_device.is_none());
        // The driver never resolved `vkEnumerateLayers`; the loader supplies its own.
        assert!(table.enumerate_layers.is_some());
    }
}

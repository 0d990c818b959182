use std::ffi::CString;

use windows::Win32::System::LibraryLoader::GetModuleHandleA;
use windows::Win32::System::ProcessStatus::{GetModuleInformation, MODULEINFO};
use windows::Win32::System::Threading::GetCurrentProcess;
use windows::core::PCSTR;

use super::ModuleInfo;

pub fn locate(name: &str) -> Option<ModuleInfo> {
    let name = CString::new(name).ok()?;

    let handle = match unsafe { GetModuleHandleA(PCSTR(name.as_ptr().cast())) } {
        Ok(handle) if !handle.is_invalid() => handle,
        _ => return None,
    };

    let mut info = MODULEINFO::default();
    let ok = unsafe {
        GetModuleInformation(
            GetCurrentProcess(),
            handle,
            &mut info,
            std::mem::size_of::<MODULEINFO>() as u32,
        )
    };

    if ok.is_ok() {
        Some(ModuleInfo {
            base: info.lpBaseOfDll as usize,
            size: info.SizeOfImage as usize,
        })
    } else {
        None
    }
}

use std::ffi::CStr;

use super::ModuleInfo;

struct Search<'a> {
    name: &'a str,
    found: Option<ModuleInfo>,
}

pub fn locate(name: &str) -> Option<ModuleInfo> {
    let mut search = Search { name, found: None };

    unsafe {
        libc::dl_iterate_phdr(
            Some(visit_module),
            (&raw mut search).cast::<libc::c_void>(),
        );
    }

    search.found
}

unsafe extern "C" fn visit_module(
    info: *mut libc::dl_phdr_info,
    _size: libc::size_t,
    data: *mut libc::c_void,
) -> libc::c_int {
    let search = unsafe { &mut *data.cast::<Search<'_>>() };
    let info = unsafe { &*info };

    if info.dlpi_name.is_null() {
        return 0;
    }

    let path = unsafe { CStr::from_ptr(info.dlpi_name) }.to_string_lossy();
    let file_name = path.rsplit('/').next().unwrap_or("");
    if file_name != search.name {
        return 0;
    }

    // Image extent: highest PT_LOAD end relative to the load bias.
    let mut end = 0usize;
    for i in 0..info.dlpi_phnum as usize {
        let phdr = unsafe { &*info.dlpi_phdr.add(i) };
        if phdr.p_type == libc::PT_LOAD {
            end = end.max((phdr.p_vaddr + phdr.p_memsz) as usize);
        }
    }

    if end == 0 {
        return 0;
    }

    search.found = Some(ModuleInfo {
        base: info.dlpi_addr as usize,
        size: end,
    });

    // Non-zero stops the iteration.
    1
}

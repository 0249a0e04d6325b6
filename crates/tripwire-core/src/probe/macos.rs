//! `sysctl`-based attachment query for Apple platforms.
//!
//! The kernel marks a process with `P_TRACED` while a debugger holds it via
//! `ptrace(PT_ATTACH)` or `task_for_pid`. We read our own `kinfo_proc` record
//! and test that flag.

use std::mem;
use std::ptr;

use libc::{c_int, c_uint, kinfo_proc};

use crate::error::{ProbeError, ProbeResult};

/// `P_TRACED` from `<sys/proc.h>`
const P_TRACED: c_int = 0x0000_0800;

pub(super) fn query() -> ProbeResult<bool>
{
    // SAFETY: kinfo_proc is plain old data; an all-zero value is valid and is
    // only read after sysctl has filled it in.
    let mut info: kinfo_proc = unsafe { mem::zeroed() };
    let mut size = mem::size_of::<kinfo_proc>();
    let mut mib: [c_int; 4] = [libc::CTL_KERN, libc::KERN_PROC, libc::KERN_PROC_PID, unsafe { libc::getpid() }];

    let rc = unsafe {
        libc::sysctl(
            mib.as_mut_ptr(),
            mib.len() as c_uint,
            ptr::addr_of_mut!(info).cast(),
            &mut size,
            ptr::null_mut(),
            0,
        )
    };

    if rc != 0 {
        let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
        return Err(ProbeError::Sysctl(errno));
    }

    Ok(info.kp_proc.p_flag & P_TRACED != 0)
}

//! Windows attachment query.

use crate::error::ProbeResult;

// Declared here rather than pulling in a Win32 binding crate for one function.
#[link(name = "kernel32")]
extern "system" {
    fn IsDebuggerPresent() -> i32;
}

#[allow(clippy::unnecessary_wraps)]
pub(super) fn query() -> ProbeResult<bool>
{
    // SAFETY: IsDebuggerPresent takes no arguments and only reads the PEB.
    Ok(unsafe { IsDebuggerPresent() } != 0)
}

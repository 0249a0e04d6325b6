//! Per-architecture trap sequences.
//!
//! Exactly one `issue` is compiled for any target. Each one stops the process
//! in an attached debugger and returns once the debugger continues it. None of
//! them may be called without a debugger attached: with nobody listening,
//! `int3` raises `SIGTRAP` and a self-delivered `SIGINT` kills the process.
//!
//! The ARM sequences make the `kill` system call directly instead of going
//! through `raise(3)`, so the signal is posted from the trapping instruction
//! and the debugger stops on our frame.

// x86 / x86-64

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(super) const SEQUENCE: &str = "int3";

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(super) unsafe fn issue()
{
    core::arch::asm!("int3");
}

// AArch64

#[cfg(all(target_arch = "aarch64", any(target_os = "linux", target_os = "android")))]
pub(super) const SEQUENCE: &str = "svc #0 (kill(getpid(), SIGINT))";

#[cfg(all(target_arch = "aarch64", any(target_os = "linux", target_os = "android")))]
pub(super) unsafe fn issue()
{
    let pid = libc::getpid();
    core::arch::asm!(
        "svc #0",
        inout("x0") pid as usize => _,
        in("x1") libc::SIGINT as usize,
        in("x8") libc::SYS_kill as usize,
        options(nostack),
    );
}

/// Darwin system call number of `kill`
#[cfg(all(any(target_arch = "arm", target_arch = "aarch64"), target_vendor = "apple"))]
const DARWIN_SYS_KILL: usize = 37;

#[cfg(all(target_arch = "aarch64", target_vendor = "apple"))]
pub(super) const SEQUENCE: &str = "svc #0x80 (kill(getpid(), SIGINT))";

#[cfg(all(target_arch = "aarch64", target_vendor = "apple"))]
pub(super) unsafe fn issue()
{
    let pid = libc::getpid();
    core::arch::asm!(
        "svc #0x80",
        inout("x0") pid as usize => _,
        inout("x1") libc::SIGINT as usize => _,
        in("x16") DARWIN_SYS_KILL,
        options(nostack),
    );
}

#[cfg(all(target_arch = "aarch64", windows))]
pub(super) const SEQUENCE: &str = "brk #0xf000";

#[cfg(all(target_arch = "aarch64", windows))]
pub(super) unsafe fn issue()
{
    core::arch::asm!("brk #0xf000");
}

// 32-bit ARM

#[cfg(all(target_arch = "arm", any(target_os = "linux", target_os = "android")))]
pub(super) const SEQUENCE: &str = "svc #0 (kill(getpid(), SIGINT))";

#[cfg(all(target_arch = "arm", any(target_os = "linux", target_os = "android")))]
pub(super) unsafe fn issue()
{
    let pid = libc::getpid();
    // r7 carries the EABI system call number but may be the Thumb frame
    // pointer, so it is swapped in and out by hand.
    core::arch::asm!(
        "mov {saved}, r7",
        "mov r7, {nr}",
        "svc #0",
        "mov r7, {saved}",
        saved = out(reg) _,
        nr = in(reg) libc::SYS_kill as usize,
        inout("r0") pid as usize => _,
        in("r1") libc::SIGINT as usize,
        options(nostack),
    );
}

#[cfg(all(target_arch = "arm", target_vendor = "apple"))]
pub(super) const SEQUENCE: &str = "swi 128 (kill(getpid(), SIGINT))";

#[cfg(all(target_arch = "arm", target_vendor = "apple"))]
pub(super) unsafe fn issue()
{
    let pid = libc::getpid();
    core::arch::asm!(
        "svc #0x80",
        inout("r0") pid as usize => _,
        inout("r1") libc::SIGINT as usize => _,
        in("r12") DARWIN_SYS_KILL,
        options(nostack),
    );
}

// ARM on an OS without a known system call convention

#[cfg(all(
    any(target_arch = "arm", target_arch = "aarch64"),
    not(any(target_os = "linux", target_os = "android", target_vendor = "apple", windows))
))]
pub(super) const SEQUENCE: &str = "kill(getpid(), SIGINT)";

#[cfg(all(
    any(target_arch = "arm", target_arch = "aarch64"),
    not(any(target_os = "linux", target_os = "android", target_vendor = "apple", windows))
))]
pub(super) unsafe fn issue()
{
    signal_self();
}

// `udf #0xfe` is the encoding `__debugbreak` emits on Windows on ARM.

#[cfg(all(target_arch = "arm", windows))]
pub(super) const SEQUENCE: &str = "udf #0xfe";

#[cfg(all(target_arch = "arm", windows))]
pub(super) unsafe fn issue()
{
    core::arch::asm!("udf #0xfe");
}

// PowerPC: inline assembly for PowerPC is not stable, so the getpid + kill
// system call pair goes through libc.

#[cfg(any(target_arch = "powerpc", target_arch = "powerpc64"))]
pub(super) const SEQUENCE: &str = "kill(getpid(), SIGINT)";

#[cfg(any(target_arch = "powerpc", target_arch = "powerpc64"))]
pub(super) unsafe fn issue()
{
    signal_self();
}

#[cfg(any(
    target_arch = "powerpc",
    target_arch = "powerpc64",
    all(
        any(target_arch = "arm", target_arch = "aarch64"),
        not(any(target_os = "linux", target_os = "android", target_vendor = "apple", windows))
    )
))]
unsafe fn signal_self()
{
    #[cfg(unix)]
    {
        libc::kill(libc::getpid(), libc::SIGINT);
    }
}

// Everything else: build.rs has already warned, and nothing is emitted.

#[cfg(not(any(
    target_arch = "arm",
    target_arch = "aarch64",
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "powerpc",
    target_arch = "powerpc64"
)))]
pub(super) const SEQUENCE: &str = "none";

#[cfg(not(any(
    target_arch = "arm",
    target_arch = "aarch64",
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "powerpc",
    target_arch = "powerpc64"
)))]
pub(super) unsafe fn issue() {}

/// Whether `issue` does anything on this target
pub(super) const SUPPORTED: bool = !matches!(SEQUENCE.as_bytes(), b"none");

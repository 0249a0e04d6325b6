//! # Debugger-Attachment Probe
//!
//! Answers "is a debugger tracing this process right now?".
//!
//! Each platform has its own submodule that performs the query with that
//! platform's native process introspection API:
//!
//! - **Linux / Android**: `TracerPid` field of `/proc/self/status`
//!   - See: [proc(5) man page](https://man7.org/linux/man-pages/man5/proc.5.html)
//! - **macOS / iOS**: `sysctl(KERN_PROC_PID)` and the `P_TRACED` process flag
//!   - See: [Apple QA1361](https://developer.apple.com/library/archive/qa/qa1361/_index.html)
//! - **Windows**: `IsDebuggerPresent()`
//!   - See: [IsDebuggerPresent](https://learn.microsoft.com/en-us/windows/win32/api/debugapi/nf-debugapi-isdebuggerpresent)
//!
//! The answer is never cached. A debugger can attach or detach between two
//! calls, and every trap attempt must see the current state.

#[cfg(any(target_os = "linux", target_os = "android"))]
mod linux;
#[cfg(target_vendor = "apple")]
mod macos;
#[cfg(windows)]
mod windows;

#[cfg(any(target_os = "linux", target_os = "android"))]
pub use linux::parse_tracer_pid;

use crate::error::ProbeResult;

/// Something that can tell whether a debugger is attached
///
/// [`SystemProbe`] asks the OS. Any `Fn() -> bool` is also a probe, which is
/// how tests stand in for a debugger that is (or is not) there:
///
/// ```rust
/// use tripwire_core::probe::AttachmentProbe;
///
/// let attached = || true;
/// assert!(attached.is_attached());
/// ```
pub trait AttachmentProbe
{
    /// Whether a debugger is attached at the instant of the call
    ///
    /// Implementations must not panic and must not cache.
    fn is_attached(&self) -> bool;
}

impl<F> AttachmentProbe for F
where
    F: Fn() -> bool,
{
    fn is_attached(&self) -> bool
    {
        self()
    }
}

/// Attachment probe backed by the host OS
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemProbe;

impl SystemProbe
{
    /// Query the OS, reporting why it could not answer
    ///
    /// ## Errors
    ///
    /// - `Io`, `MissingField`, `Malformed`: procfs could not be read or parsed (Linux)
    /// - `Sysctl`: the process query failed (Apple platforms)
    /// - `Unsupported`: no query exists for this OS
    pub fn query(self) -> ProbeResult<bool>
    {
        #[cfg(any(target_os = "linux", target_os = "android"))]
        {
            linux::query()
        }

        #[cfg(target_vendor = "apple")]
        {
            macos::query()
        }

        #[cfg(windows)]
        {
            windows::query()
        }

        #[cfg(not(any(target_os = "linux", target_os = "android", target_vendor = "apple", windows)))]
        {
            Err(crate::error::ProbeError::Unsupported(std::env::consts::OS))
        }
    }
}

impl AttachmentProbe for SystemProbe
{
    fn is_attached(&self) -> bool
    {
        match self.query() {
            Ok(attached) => attached,
            Err(err) => {
                tracing::debug!(target: "tripwire::probe", error = %err, "attachment query failed, assuming no debugger");
                false
            }
        }
    }
}

/// Is an interactive debugger attached to this process?
///
/// Never fails: if the OS cannot answer, the result is `false`.
///
/// ```rust
/// // Under `cargo test` nobody is tracing us.
/// if !tripwire_core::is_debugger_attached() {
///     println!("running free");
/// }
/// ```
#[must_use]
pub fn is_debugger_attached() -> bool
{
    SystemProbe.is_attached()
}

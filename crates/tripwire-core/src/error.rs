//! # Error Types
//!
//! Errors for the few fallible operations inside Tripwire.
//!
//! The diagnostic macros never hand an error back to their caller; they act by
//! side effect. Errors only exist where the OS can refuse to answer a question
//! (the attachment probe) or where configuration text has to be parsed.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.

use thiserror::Error;

/// Why the system attachment probe could not answer
///
/// [`is_debugger_attached`](crate::probe::is_debugger_attached) maps every one
/// of these to "not attached". They are only visible through
/// [`SystemProbe::query`](crate::probe::SystemProbe::query).
///
/// ## Error Categories
///
/// 1. **I/O errors**: Io (procfs unreadable, e.g. in a sandbox)
/// 2. **Format errors**: MissingField, Malformed (unexpected procfs layout)
/// 3. **Platform errors**: Sysctl (BSD process query failed)
/// 4. **Support errors**: Unsupported (no query for this OS)
#[derive(Error, Debug)]
pub enum ProbeError
{
    /// Reading the process status source failed
    ///
    /// On Linux this is `/proc/self/status`. It is missing when procfs is not
    /// mounted, and unreadable under some seccomp or container profiles.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The status source did not contain the expected field
    #[error("Field `{0}` not found in process status")]
    MissingField(&'static str),

    /// The field was present but its value could not be parsed
    #[error("Malformed `{field}` value: {value:?}")]
    Malformed
    {
        /// Name of the field
        field: &'static str,
        /// Raw text that failed to parse
        value: String,
    },

    /// `sysctl(KERN_PROC_PID)` failed
    ///
    /// The value is the `errno` reported by the call.
    #[error("sysctl process query failed: errno {0}")]
    Sysctl(i32),

    /// The host OS has no attachment query
    #[error("Debugger attachment query not supported on {0}")]
    Unsupported(&'static str),
}

/// A diagnostics mode name could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown diagnostics mode: {0}. Use 'enabled' or 'disabled'")]
pub struct ModeError(pub String);

/// Convenience type alias for probe results
///
/// ```rust
/// use tripwire_core::error::ProbeResult;
/// fn foo() -> ProbeResult<bool>
/// {
///     Ok(false)
/// }
/// ```
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

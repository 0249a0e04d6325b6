//! # tripwire-core
//!
//! Break into the debugger when a development-time check fails.
//!
//! This crate provides three layers, each built on the one before:
//! - **Probe**: is a debugger attached to this process right now?
//! - **Trap**: if so, stop in it with the CPU's breakpoint sequence
//! - **Macros**: `verify!`, `check!`, `not_reached!`, `not_tested!` and the
//!   `bail_unless*!` family, which log a failure, trap, and then abort,
//!   continue, or leave the current routine
//!
//! ## Platform Support
//!
//! - **Linux / Android**: `TracerPid` from procfs
//! - **macOS / iOS**: `sysctl(KERN_PROC_PID)` and `P_TRACED`
//! - **Windows**: `IsDebuggerPresent()`
//!
//! Trap sequences exist for x86, x86-64, ARM, AArch64 and PowerPC. Anywhere
//! else the build prints a warning and [`trap`] does nothing.
//!
//! ## Build modes
//!
//! The macros are verbose when `tripwire-core` is built with debug
//! assertions and silent otherwise. Set `TRIPWIRE_DIAGNOSTICS=on|off` at build
//! time, or enable the `force-enabled` / `force-disabled` features, to
//! override. [`DiagnosticsMode::current`] reports the result.
//!
//! ## Example
//!
//! ```rust
//! use tripwire_core::{bail_unless, check};
//!
//! fn checked_div(a: i32, b: i32) -> Option<i32>
//! {
//!     bail_unless!(b != 0, None);
//!     check!(a >= 0, "negative dividend {}", a);
//!     Some(a / b)
//! }
//!
//! assert_eq!(checked_div(10, 2), Some(5));
//! ```
//!
//! ## Why unsafe code is needed
//!
//! Asking the kernel about our own process and executing trap instructions
//! both go below what safe Rust can express: `sysctl`, `IsDebuggerPresent` and
//! inline assembly. Each unsafe block is small and wrapped in a safe function.

#![allow(unsafe_code)] // Required for the attachment query and inline trap sequences

pub mod arch;
pub mod error;
mod macros;
pub mod mode;
pub mod prelude;
pub mod probe;
pub mod report;
pub mod trap;

pub use arch::TrapArch;
// Re-export commonly used types
pub use error::{ModeError, ProbeError, ProbeResult};
pub use mode::{DiagnosticsMode, DIAGNOSTICS_ENABLED};
pub use probe::{is_debugger_attached, AttachmentProbe, SystemProbe};
pub use report::{Diagnostic, DiagnosticKind, SourceLocation};
pub use trap::{trap, Dispatcher, NativeTrap, TrapInstruction, TrapOutcome};

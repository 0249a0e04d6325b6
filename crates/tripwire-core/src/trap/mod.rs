//! # Trap Dispatcher
//!
//! Stops the process in an attached debugger, and does nothing otherwise.
//!
//! Every call walks the same short state machine:
//!
//! ```text
//! START -> PROBING -> ATTACHED     -> TRAPPING -> RETURNED
//!                  -> NOT_ATTACHED -----------> RETURNED
//! ```
//!
//! Nothing carries over to the next call. In particular the attachment answer
//! is not remembered, so a debugger attached halfway through a run catches the
//! next trap.
//!
//! ## Why not `raise(SIGTRAP)`?
//!
//! On some OS/architecture combinations a generic signal raised through libc
//! reaches the default handler before the debugger sees it. The sequences in
//! `native.rs` are the ones debuggers are known to stop on cleanly.

mod native;

use crate::probe::{AttachmentProbe, SystemProbe};

/// What a single dispatch did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrapOutcome
{
    /// A debugger was attached; the trap fired and the debugger resumed us
    Trapped,
    /// No debugger; nothing happened
    NotAttached,
    /// A debugger was attached but this target has no trap sequence
    Unsupported,
}

impl TrapOutcome
{
    #[must_use]
    pub const fn as_str(self) -> &'static str
    {
        match self {
            TrapOutcome::Trapped => "trapped",
            TrapOutcome::NotAttached => "not-attached",
            TrapOutcome::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for TrapOutcome
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.write_str(self.as_str())
    }
}

/// The instruction sequence that hands control to a debugger
///
/// [`NativeTrap`] is the real one. Any `Fn()` is also a trap instruction, so
/// tests can record whether it was fired.
pub trait TrapInstruction
{
    /// Execute the trap
    ///
    /// Only called after a probe reported a debugger attached.
    fn fire(&self);

    /// Whether [`fire`](Self::fire) does anything on this target
    fn is_supported(&self) -> bool
    {
        true
    }
}

impl<F> TrapInstruction for F
where
    F: Fn(),
{
    fn fire(&self)
    {
        self();
    }
}

/// The breakpoint sequence for the architecture this crate was built for
///
/// | Architecture | Sequence |
/// |---|---|
/// | x86, x86-64 | `int3` |
/// | AArch64 Linux/Android | `svc #0` making `kill(getpid(), SIGINT)` |
/// | AArch64 Apple | `svc #0x80` making `kill(getpid(), SIGINT)` |
/// | AArch64 Windows | `brk #0xf000` |
/// | ARM Linux/Android | `svc #0` making `kill(getpid(), SIGINT)` |
/// | ARM Apple | `swi 128` making `kill(getpid(), SIGINT)` |
/// | ARM Windows | `udf #0xfe` |
/// | PowerPC | `kill(getpid(), SIGINT)` through libc |
/// | other | nothing |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeTrap;

impl NativeTrap
{
    /// Human-readable description of the sequence [`fire`](TrapInstruction::fire) executes
    #[must_use]
    pub const fn sequence(self) -> &'static str
    {
        native::SEQUENCE
    }
}

impl TrapInstruction for NativeTrap
{
    fn fire(&self)
    {
        // SAFETY: the dispatcher only fires after the probe saw a debugger,
        // which intercepts the trap and resumes us after it.
        unsafe { native::issue() }
    }

    fn is_supported(&self) -> bool
    {
        native::SUPPORTED
    }
}

/// Probe-then-trap, generic over both halves
///
/// ```rust
/// use std::cell::Cell;
///
/// use tripwire_core::trap::{Dispatcher, TrapOutcome};
///
/// let fired = Cell::new(false);
/// let dispatcher = Dispatcher::new(|| false, || fired.set(true));
///
/// assert_eq!(dispatcher.dispatch(), TrapOutcome::NotAttached);
/// assert!(!fired.get());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher<P = SystemProbe, T = NativeTrap>
{
    probe: P,
    instruction: T,
}

impl Dispatcher
{
    /// Dispatcher using the OS probe and this target's trap sequence
    #[must_use]
    pub const fn native() -> Self
    {
        Dispatcher {
            probe: SystemProbe,
            instruction: NativeTrap,
        }
    }
}

impl<P, T> Dispatcher<P, T>
where
    P: AttachmentProbe,
    T: TrapInstruction,
{
    pub const fn new(probe: P, instruction: T) -> Self
    {
        Dispatcher { probe, instruction }
    }

    /// Probe for a debugger and trap into it if one is attached
    pub fn dispatch(&self) -> TrapOutcome
    {
        let attached = self.probe.is_attached();

        let outcome = if !attached {
            TrapOutcome::NotAttached
        } else if !self.instruction.is_supported() {
            TrapOutcome::Unsupported
        } else {
            self.instruction.fire();
            TrapOutcome::Trapped
        };

        tracing::trace!(target: "tripwire::trap", attached, outcome = outcome.as_str(), "trap dispatched");
        outcome
    }
}

/// Break into the attached debugger, if there is one
///
/// With no debugger attached this returns immediately: no instruction is
/// executed and no signal is raised. With one attached the process stops here
/// and continues from the next statement when the debugger resumes it.
pub fn trap()
{
    let _ = Dispatcher::native().dispatch();
}

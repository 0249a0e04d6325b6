//! # Trap Architectures
//!
//! The closed set of CPU families Tripwire knows how to trap on.
//!
//! Selection happens at compile time with `#[cfg(target_arch = "...")]` and
//! never changes for the lifetime of the build.

use std::fmt;

/// CPU family of the running build, as far as trapping is concerned
///
/// ## Supported Architectures
///
/// - **Arm**: 32-bit ARM and AArch64
/// - **X86**: 32-bit x86 and x86-64
/// - **PowerPc**: 32-bit and 64-bit PowerPC
/// - **Unsupported**: everything else; trapping is a no-op
///
/// ## Example
///
/// ```rust
/// use tripwire_core::TrapArch;
///
/// match TrapArch::current() {
///     TrapArch::X86 => println!("int3"),
///     TrapArch::Arm => println!("supervisor call"),
///     TrapArch::PowerPc => println!("kill(getpid(), SIGINT)"),
///     TrapArch::Unsupported(name) => println!("no trap on {}", name),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrapArch
{
    /// ARM, 32-bit (`arm`) or 64-bit (`aarch64`)
    ///
    /// Traps by asking the kernel to deliver `SIGINT` to ourselves through a
    /// supervisor call.
    Arm,
    /// x86 (`x86`) or x86-64 (`x86_64`)
    ///
    /// Traps with the one-byte `int3` breakpoint instruction (opcode `0xCC`).
    X86,
    /// PowerPC (`powerpc`, `powerpc64`)
    PowerPc,
    /// Any other architecture
    ///
    /// The `&'static str` contains the architecture name (e.g., "riscv64", "wasm32").
    Unsupported(&'static str),
}

impl TrapArch
{
    /// Architecture this crate was compiled for
    ///
    /// ```rust
    /// use tripwire_core::TrapArch;
    ///
    /// let arch = TrapArch::current();
    /// // On x86-64 Linux: TrapArch::X86
    /// // On Apple Silicon: TrapArch::Arm
    /// # let _ = arch;
    /// ```
    #[must_use]
    pub const fn current() -> Self
    {
        #[cfg(any(target_arch = "arm", target_arch = "aarch64"))]
        {
            TrapArch::Arm
        }

        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            TrapArch::X86
        }

        #[cfg(any(target_arch = "powerpc", target_arch = "powerpc64"))]
        {
            TrapArch::PowerPc
        }

        #[cfg(not(any(
            target_arch = "arm",
            target_arch = "aarch64",
            target_arch = "x86",
            target_arch = "x86_64",
            target_arch = "powerpc",
            target_arch = "powerpc64"
        )))]
        {
            TrapArch::Unsupported(std::env::consts::ARCH)
        }
    }

    /// Whether a trap sequence exists for this architecture
    #[must_use]
    pub const fn is_supported(self) -> bool
    {
        !matches!(self, TrapArch::Unsupported(_))
    }

    #[must_use]
    pub const fn name(self) -> &'static str
    {
        match self {
            TrapArch::Arm => "arm",
            TrapArch::X86 => "x86",
            TrapArch::PowerPc => "powerpc",
            TrapArch::Unsupported(name) => name,
        }
    }
}

impl fmt::Display for TrapArch
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_current_is_stable()
    {
        assert_eq!(TrapArch::current(), TrapArch::current());
    }

    #[test]
    fn test_current_matches_target()
    {
        let expected = match std::env::consts::ARCH {
            "x86" | "x86_64" => TrapArch::X86,
            "arm" | "aarch64" => TrapArch::Arm,
            "powerpc" | "powerpc64" => TrapArch::PowerPc,
            other => TrapArch::Unsupported(other),
        };
        assert_eq!(TrapArch::current(), expected);
    }

    #[test]
    fn test_unsupported()
    {
        let arch = TrapArch::Unsupported("riscv64");
        assert!(!arch.is_supported());
        assert_eq!(arch.to_string(), "riscv64");
        assert!(TrapArch::X86.is_supported());
    }
}

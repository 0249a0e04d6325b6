//! # Diagnostics Mode
//!
//! Runtime view of the compile-time diagnostics switch.
//!
//! The switch itself is the `tripwire_diagnostics` cfg, decided by
//! `build.rs`. The macros pick their verbose or silent expansion from it; this
//! module only reports which one was picked, so binaries can print it and
//! tests can skip what does not apply.

use std::fmt;
use std::str::FromStr;

use crate::error::ModeError;

/// `true` when the diagnostic macros expand to their verbose form.
pub const DIAGNOSTICS_ENABLED: bool = cfg!(tripwire_diagnostics);

/// Which implementation of the diagnostic macros this build uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticsMode
{
    /// Failed checks log, trap and apply their policy
    Enabled,
    /// Advisory and fatal checks vanish; guarded exits keep their control flow
    Disabled,
}

impl DiagnosticsMode
{
    /// Mode selected for this build of `tripwire-core`
    ///
    /// ```rust
    /// use tripwire_core::{DiagnosticsMode, DIAGNOSTICS_ENABLED};
    ///
    /// assert_eq!(DiagnosticsMode::current().is_enabled(), DIAGNOSTICS_ENABLED);
    /// ```
    #[must_use]
    pub const fn current() -> Self
    {
        if DIAGNOSTICS_ENABLED {
            DiagnosticsMode::Enabled
        } else {
            DiagnosticsMode::Disabled
        }
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool
    {
        matches!(self, DiagnosticsMode::Enabled)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str
    {
        match self {
            DiagnosticsMode::Enabled => "enabled",
            DiagnosticsMode::Disabled => "disabled",
        }
    }
}

impl fmt::Display for DiagnosticsMode
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagnosticsMode
{
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_lowercase().as_str() {
            "enabled" | "on" | "debug" | "verbose" => Ok(DiagnosticsMode::Enabled),
            "disabled" | "off" | "release" | "silent" => Ok(DiagnosticsMode::Disabled),
            _ => Err(ModeError(s.to_string())),
        }
    }
}

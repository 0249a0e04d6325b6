//! Build script for tripwire-core
//!
//! This script decides the diagnostics build mode and checks the target
//! before compilation:
//! - Minimum Rust version (labeled block `break` needs Rust 1.65.0+)
//! - Whether the diagnostic macros expand to their verbose or silent form
//! - Whether the target architecture has a known trap sequence
//!
//! ## Diagnostics mode
//!
//! `cfg(tripwire_diagnostics)` is set when diagnostics are enabled. The
//! decision, in priority order:
//!
//! 1. Feature `force-disabled` turns diagnostics off
//! 2. Feature `force-enabled` turns diagnostics on
//! 3. `TRIPWIRE_DIAGNOSTICS` (`on`, `off` or `auto`) at build time
//! 4. Otherwise diagnostics follow `debug_assertions`

use std::env;

const MODE_VAR: &str = "TRIPWIRE_DIAGNOSTICS";

/// Architectures with a trap sequence in `src/trap/native.rs`.
const TRAP_ARCHES: &[&str] = &["x86", "x86_64", "arm", "aarch64", "powerpc", "powerpc64"];

fn main()
{
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={MODE_VAR}");
    println!("cargo:rustc-check-cfg=cfg(tripwire_diagnostics)");

    // Check minimum Rust version
    if let Ok(rustc_version) = rustc_version::version() {
        let min_rust_version = rustc_version::Version::new(1, 65, 0);

        if rustc_version < min_rust_version {
            panic!("tripwire-core requires Rust {min_rust_version} or newer, found {rustc_version}");
        }
    } else {
        // If we can't get version (e.g., in some build environments), just warn
        println!("cargo:warning=could not verify Rust version");
    }

    if diagnostics_enabled() {
        println!("cargo:rustc-cfg=tripwire_diagnostics");
    }

    check_trap_architecture();
}

fn diagnostics_enabled() -> bool
{
    if env::var_os("CARGO_FEATURE_FORCE_DISABLED").is_some() {
        return false;
    }
    if env::var_os("CARGO_FEATURE_FORCE_ENABLED").is_some() {
        return true;
    }

    // Set by Cargo from the profile's `debug-assertions`, not from its name
    let debug_assertions = env::var_os("CARGO_CFG_DEBUG_ASSERTIONS").is_some();

    match env::var(MODE_VAR) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "on" | "enabled" | "1" | "true" | "debug" => true,
            "off" | "disabled" | "0" | "false" | "release" => false,
            "" | "auto" => debug_assertions,
            other => panic!("{MODE_VAR} must be one of on, off or auto, found {other:?}"),
        },
        Err(_) => debug_assertions,
    }
}

fn check_trap_architecture()
{
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    if !TRAP_ARCHES.contains(&arch.as_str()) {
        println!(
            "cargo:warning=tripwire: no debugger trap sequence for target architecture `{arch}`, \
             trap() will be a no-op (debugger integration disabled)"
        );
    }
}

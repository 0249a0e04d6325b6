//! procfs-based attachment query.
//!
//! `ptrace(2)` attachment shows up as a non-zero `TracerPid` in
//! `/proc/self/status`. Reading the file is cheap and needs no privileges.

use std::fs;

use crate::error::{ProbeError, ProbeResult};

const STATUS_PATH: &str = "/proc/self/status";
const TRACER_FIELD: &str = "TracerPid";

pub(super) fn query() -> ProbeResult<bool>
{
    let status = fs::read_to_string(STATUS_PATH)?;
    Ok(parse_tracer_pid(&status)? != 0)
}

/// Extract the tracer PID from the text of a `/proc/<pid>/status` file
///
/// Returns `0` when no tracer is attached.
///
/// ## Errors
///
/// - `MissingField`: no `TracerPid:` line
/// - `Malformed`: the value is not a PID
///
/// ## Example
///
/// ```rust
/// use tripwire_core::probe::parse_tracer_pid;
///
/// let status = "Name:\tcat\nState:\tR (running)\nTracerPid:\t4242\n";
/// assert_eq!(parse_tracer_pid(status).unwrap(), 4242);
/// ```
pub fn parse_tracer_pid(status: &str) -> ProbeResult<u32>
{
    let line = status
        .lines()
        .find_map(|line| {
            line.strip_prefix(TRACER_FIELD)
                .and_then(|rest| rest.strip_prefix(':'))
        })
        .ok_or(ProbeError::MissingField(TRACER_FIELD))?;

    let value = line.trim();
    value.parse::<u32>().map_err(|_| ProbeError::Malformed {
        field: TRACER_FIELD,
        value: value.to_string(),
    })
}

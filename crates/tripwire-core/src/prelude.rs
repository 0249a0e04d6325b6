//! Common module for library exports

pub use crate::mode::{DiagnosticsMode, DIAGNOSTICS_ENABLED};
pub use crate::probe::is_debugger_attached;
pub use crate::trap::trap;
pub use crate::{
    bail_unless, bail_unless_to, bail_unless_with, check, diag_log, not_reached, not_tested, routine_name, todo_note, verify,
};

//! # Diagnostic Reports
//!
//! What a failed check produces, and where it goes.
//!
//! A [`Diagnostic`] lives for exactly one statement: the macro builds it at the
//! failure site, hands it to [`emit`], [`raise`] or [`raise_fatal`], and it is
//! gone. The logging sink is `tracing`; every diagnostic becomes one event on
//! target `tripwire` whose message is
//!
//! ```text
//! {file}:{line} <{routine}> {headline}[: {message}]
//! ```
//!
//! with the same data repeated as structured fields (`kind`, `expression`,
//! `file`, `line`, `column`, `routine`) for JSON output.

use std::fmt;

use crate::trap::trap;

/// Which check produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind
{
    /// `verify!` failed; the process aborts
    Assertion,
    /// `check!` failed; execution continues
    Check,
    /// `not_reached!` was reached; the process aborts
    NotReached,
    /// `not_tested!` was reached; execution continues
    NotTested,
    /// A `bail_unless*!` condition failed; the routine exits early
    Bail,
    /// Plain `diag_log!` line
    Log,
}

impl DiagnosticKind
{
    /// Whether the process is terminated after reporting
    #[must_use]
    pub const fn is_fatal(self) -> bool
    {
        matches!(self, DiagnosticKind::Assertion | DiagnosticKind::NotReached)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str
    {
        match self {
            DiagnosticKind::Assertion => "assertion",
            DiagnosticKind::Check => "check",
            DiagnosticKind::NotReached => "not-reached",
            DiagnosticKind::NotTested => "not-tested",
            DiagnosticKind::Bail => "bail",
            DiagnosticKind::Log => "log",
        }
    }
}

impl fmt::Display for DiagnosticKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.as_str())
    }
}

/// Where in the source a diagnostic was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation
{
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for SourceLocation
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One failed check, ready for the sink
///
/// The macros build these; building one by hand is useful when a check does not
/// fit any of them:
///
/// ```rust
/// use tripwire_core::report::{Diagnostic, DiagnosticKind, SourceLocation};
///
/// let diagnostic = Diagnostic {
///     kind: DiagnosticKind::Check,
///     expression: Some("queue.len() < 64"),
///     location: SourceLocation { file: "src/queue.rs", line: 12, column: 5 },
///     routine: "queue::push",
///     message: None,
/// };
/// assert_eq!(diagnostic.to_string(), "src/queue.rs:12 <queue::push> Failed check `queue.len() < 64`");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Diagnostic<'a>
{
    pub kind: DiagnosticKind,
    /// Source text of the failed condition, for kinds that have one
    pub expression: Option<&'static str>,
    pub location: SourceLocation,
    /// Path of the enclosing function, see [`routine_name!`](crate::routine_name)
    pub routine: &'static str,
    /// Extra caller-supplied context
    pub message: Option<fmt::Arguments<'a>>,
}

impl Diagnostic<'_>
{
    /// Fixed part of the line, without location or extra message
    #[must_use]
    pub fn headline(&self) -> String
    {
        let expression = self.expression.unwrap_or("");
        match self.kind {
            DiagnosticKind::Assertion => format!("Failed assertion `{expression}`"),
            DiagnosticKind::Check => format!("Failed check `{expression}`"),
            DiagnosticKind::Bail => format!("Failed check `{expression}`, bailing."),
            DiagnosticKind::NotReached => "Entered THE TWILIGHT ZONE".to_string(),
            DiagnosticKind::NotTested => "NOT TESTED".to_string(),
            DiagnosticKind::Log => String::new(),
        }
    }
}

impl fmt::Display for Diagnostic<'_>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{} <{}> ", self.location, self.routine)?;

        let headline = self.headline();
        match (headline.is_empty(), self.message) {
            (true, Some(message)) => write!(f, "{message}"),
            (true, None) => Ok(()),
            (false, Some(message)) => write!(f, "{headline}: {message}"),
            (false, None) => f.write_str(&headline),
        }
    }
}

/// Write a diagnostic to the logging sink, nothing else
pub fn emit(diagnostic: &Diagnostic<'_>)
{
    let kind = diagnostic.kind.as_str();
    let expression = diagnostic.expression.unwrap_or_default();
    let SourceLocation { file, line, column } = diagnostic.location;
    let routine = diagnostic.routine;

    match diagnostic.kind {
        DiagnosticKind::Assertion | DiagnosticKind::NotReached => {
            tracing::error!(target: "tripwire", kind, expression, file, line, column, routine, "{}", diagnostic);
        }
        DiagnosticKind::Check | DiagnosticKind::NotTested | DiagnosticKind::Bail => {
            tracing::warn!(target: "tripwire", kind, expression, file, line, column, routine, "{}", diagnostic);
        }
        DiagnosticKind::Log => {
            tracing::info!(target: "tripwire", kind, expression, file, line, column, routine, "{}", diagnostic);
        }
    }
}

/// Report a non-fatal failure: log it, then trap
///
/// Control returns to the caller, which applies its own policy (carry on,
/// return a fallback, leave a labeled block).
pub fn raise(diagnostic: &Diagnostic<'_>)
{
    emit(diagnostic);
    trap();
}

/// Report a fatal failure: log it, trap, then abort the process
///
/// The abort happens whether or not a debugger was attached and whether or not
/// it resumed the process.
#[cold]
pub fn raise_fatal(diagnostic: &Diagnostic<'_>) -> !
{
    emit(diagnostic);
    trap();
    std::process::abort()
}

/// Strip the helper item and closure frames from a `type_name` path
///
/// Used by [`routine_name!`](crate::routine_name).
#[doc(hidden)]
#[must_use]
pub fn trim_routine(name: &'static str) -> &'static str
{
    let mut name = name.strip_suffix("::__tripwire_here").unwrap_or(name);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn location() -> SourceLocation
    {
        SourceLocation {
            file: "src/lib.rs",
            line: 7,
            column: 9,
        }
    }

    #[test]
    fn test_headlines()
    {
        let mut diagnostic = Diagnostic {
            kind: DiagnosticKind::Assertion,
            expression: Some("1 == 2"),
            location: location(),
            routine: "demo::run",
            message: None,
        };
        assert_eq!(diagnostic.headline(), "Failed assertion `1 == 2`");

        diagnostic.kind = DiagnosticKind::Bail;
        assert_eq!(diagnostic.headline(), "Failed check `1 == 2`, bailing.");

        diagnostic.kind = DiagnosticKind::NotReached;
        diagnostic.expression = None;
        assert_eq!(diagnostic.headline(), "Entered THE TWILIGHT ZONE");

        diagnostic.kind = DiagnosticKind::NotTested;
        assert_eq!(diagnostic.headline(), "NOT TESTED");
    }

    #[test]
    fn test_display_with_message()
    {
        let count = 3;
        let line = Diagnostic {
            kind: DiagnosticKind::Check,
            expression: Some("count == 0"),
            location: location(),
            routine: "demo::run",
            message: Some(format_args!("{count} items left")),
        }
        .to_string();

        assert_eq!(line, "src/lib.rs:7 <demo::run> Failed check `count == 0`: 3 items left");
    }

    #[test]
    fn test_display_log_is_message_only()
    {
        let line = Diagnostic {
            kind: DiagnosticKind::Log,
            expression: None,
            location: location(),
            routine: "demo::run",
            message: Some(format_args!("hello")),
        }
        .to_string();

        assert_eq!(line, "src/lib.rs:7 <demo::run> hello");
    }

    #[test]
    fn test_fatal_kinds()
    {
        assert!(DiagnosticKind::Assertion.is_fatal());
        assert!(DiagnosticKind::NotReached.is_fatal());
        assert!(!DiagnosticKind::Check.is_fatal());
        assert!(!DiagnosticKind::NotTested.is_fatal());
        assert!(!DiagnosticKind::Bail.is_fatal());
        assert!(!DiagnosticKind::Log.is_fatal());
    }

    #[test]
    fn test_trim_routine()
    {
        assert_eq!(trim_routine("app::main::__tripwire_here"), "app::main");
        assert_eq!(trim_routine("app::main::{{closure}}::__tripwire_here"), "app::main");
        assert_eq!(
            trim_routine("app::Server::run::{{closure}}::{{closure}}::__tripwire_here"),
            "app::Server::run"
        );
        assert_eq!(trim_routine("plain"), "plain");
    }
}

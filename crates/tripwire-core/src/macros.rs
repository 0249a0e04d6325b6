//! # Diagnostic Macros
//!
//! Fail-fast checks for development builds, near-silent in release builds.
//!
//! | Macro | On failure | Fatal? |
//! |---|---|---|
//! | [`verify!`] | log, trap, abort | yes |
//! | [`check!`] | log, trap, continue | no |
//! | [`not_reached!`] | (always) log, trap, abort | yes |
//! | [`not_tested!`] | (always) log, trap, continue | no |
//! | [`bail_unless!`] | log, trap, `return value` | local |
//! | [`bail_unless_with!`] | log, trap, `return f()` | local |
//! | [`bail_unless_to!`] | log, trap, `break 'label` | local |
//!
//! [`todo_note!`] is the odd one out: it warns at compile time, in every build
//! mode, and never runs anything.
//!
//! ## Two implementations
//!
//! Every public macro forwards to one of two hidden families, picked when
//! `tripwire-core` is compiled (see `build.rs`):
//!
//! - `__*_verbose!` when `cfg(tripwire_diagnostics)` is set
//! - `__*_silent!` otherwise
//!
//! In the silent family `verify!`, `check!`, `not_reached!`, `not_tested!`
//! and `diag_log!` expand to dead code: conditions and message arguments are
//! type-checked but **never evaluated**. Do not put side effects you rely on
//! inside them. The `bail_unless*!` family always evaluates its condition and
//! always leaves the routine when it fails; only the log line and the trap are
//! dropped.
//!
//! Fallback values and computations of the `bail_unless*!` family are only
//! evaluated when the condition fails.
//!
//! All markers are statements of type `()` in both families, so code that
//! compiles in one build mode compiles in the other.

/// Path of the enclosing function, e.g. `my_crate::server::Server::run`
///
/// Closures are attributed to the function that contains them.
///
/// ```rust
/// fn handler() -> &'static str
/// {
///     tripwire_core::routine_name!()
/// }
///
/// assert!(handler().ends_with("handler"));
/// ```
#[macro_export]
macro_rules! routine_name {
    () => {{
        fn __tripwire_here() {}
        fn __tripwire_type_name_of<T>(_: T) -> &'static str
        {
            ::core::any::type_name::<T>()
        }
        $crate::report::trim_routine(__tripwire_type_name_of(__tripwire_here))
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __diagnostic {
    ($kind:ident, $expression:expr, $message:expr) => {
        $crate::report::Diagnostic {
            kind: $crate::report::DiagnosticKind::$kind,
            expression: $expression,
            location: $crate::report::SourceLocation {
                file: ::core::file!(),
                line: ::core::line!(),
                column: ::core::column!(),
            },
            routine: $crate::routine_name!(),
            message: $message,
        }
    };
}

// Public entry points

/// Fatal assertion: abort the process if `cond` is false
///
/// On failure: logs ``Failed assertion `cond` ``, traps into an attached
/// debugger, then aborts. Use [`check!`] or [`bail_unless!`] if the failure is
/// recoverable.
///
/// An optional `format!`-style message is appended to the log line.
///
/// With diagnostics disabled this is a no-op and `cond` is **not evaluated**.
///
/// ```rust
/// let ready = true;
/// tripwire_core::verify!(ready);
/// tripwire_core::verify!(1 + 1 == 2, "arithmetic is broken");
/// ```
#[cfg(tripwire_diagnostics)]
#[macro_export]
macro_rules! verify {
    ($($tokens:tt)*) => { $crate::__verify_verbose!($($tokens)*) };
}

/// Fatal assertion: abort the process if `cond` is false
///
/// Diagnostics are disabled in this build; see the module documentation.
#[cfg(not(tripwire_diagnostics))]
#[macro_export]
macro_rules! verify {
    ($($tokens:tt)*) => { $crate::__verify_silent!($($tokens)*) };
}

/// Recoverable check: log and trap if `cond` is false, then carry on
///
/// With diagnostics disabled this is a no-op and `cond` is **not evaluated**.
///
/// ```rust
/// let x = 5;
/// tripwire_core::check!(x > 0);
/// tripwire_core::check!(x < 10, "x = {}", x);
/// ```
#[cfg(tripwire_diagnostics)]
#[macro_export]
macro_rules! check {
    ($($tokens:tt)*) => { $crate::__check_verbose!($($tokens)*) };
}

/// Recoverable check: log and trap if `cond` is false, then carry on
///
/// Diagnostics are disabled in this build; see the module documentation.
#[cfg(not(tripwire_diagnostics))]
#[macro_export]
macro_rules! check {
    ($($tokens:tt)*) => { $crate::__check_silent!($($tokens)*) };
}

/// Marks code that must never run; aborts the process if it does
///
/// Logs `Entered THE TWILIGHT ZONE`, traps, aborts. If the path is
/// intentionally reachable use [`not_tested!`].
///
/// The marker is typed `()`, not `!`, because it vanishes when diagnostics are
/// disabled. Follow it with a value where one is needed.
#[cfg(tripwire_diagnostics)]
#[macro_export]
macro_rules! not_reached {
    ($($tokens:tt)*) => { $crate::__not_reached_verbose!($($tokens)*) };
}

/// Marks code that must never run; aborts the process if it does
///
/// Diagnostics are disabled in this build; see the module documentation.
#[cfg(not(tripwire_diagnostics))]
#[macro_export]
macro_rules! not_reached {
    ($($tokens:tt)*) => { $crate::__not_reached_silent!($($tokens)*) };
}

/// Marks a code path nobody has exercised yet
///
/// Logs `NOT TESTED` and traps every time it runs, then carries on.
#[cfg(tripwire_diagnostics)]
#[macro_export]
macro_rules! not_tested {
    ($($tokens:tt)*) => { $crate::__not_tested_verbose!($($tokens)*) };
}

/// Marks a code path nobody has exercised yet
///
/// Diagnostics are disabled in this build; see the module documentation.
#[cfg(not(tripwire_diagnostics))]
#[macro_export]
macro_rules! not_tested {
    ($($tokens:tt)*) => { $crate::__not_tested_silent!($($tokens)*) };
}

/// Return `value` from the enclosing function if `cond` is false
///
/// With diagnostics enabled the failure is logged and trapped first. The
/// early return happens in every build mode. `value` is only evaluated on
/// failure.
///
/// ```rust
/// #[derive(Debug, PartialEq)]
/// enum Status
/// {
///     Ok,
///     NoInput,
/// }
///
/// fn process(input: Option<&str>) -> Status
/// {
///     tripwire_core::bail_unless!(input.is_some(), Status::NoInput);
///     Status::Ok
/// }
///
/// assert_eq!(process(Some("x")), Status::Ok);
/// ```
#[cfg(tripwire_diagnostics)]
#[macro_export]
macro_rules! bail_unless {
    ($($tokens:tt)*) => { $crate::__bail_unless_verbose!($($tokens)*) };
}

/// Return `value` from the enclosing function if `cond` is false
///
/// Diagnostics are disabled in this build: the early return still happens.
#[cfg(not(tripwire_diagnostics))]
#[macro_export]
macro_rules! bail_unless {
    ($($tokens:tt)*) => { $crate::__bail_unless_silent!($($tokens)*) };
}

/// Return `compute()` from the enclosing function if `cond` is false
///
/// `compute` is any zero-argument callable. It is only called on failure.
///
/// ```rust
/// fn parse(text: &str) -> Result<u8, String>
/// {
///     tripwire_core::bail_unless_with!(!text.is_empty(), || Err("empty input".to_string()));
///     text.parse::<u8>().map_err(|e| e.to_string())
/// }
///
/// assert_eq!(parse("7"), Ok(7));
/// ```
#[cfg(tripwire_diagnostics)]
#[macro_export]
macro_rules! bail_unless_with {
    ($($tokens:tt)*) => { $crate::__bail_unless_with_verbose!($($tokens)*) };
}

/// Return `compute()` from the enclosing function if `cond` is false
///
/// Diagnostics are disabled in this build: the early return still happens.
#[cfg(not(tripwire_diagnostics))]
#[macro_export]
macro_rules! bail_unless_with {
    ($($tokens:tt)*) => { $crate::__bail_unless_with_silent!($($tokens)*) };
}

/// Leave the labeled block or loop `'label` if `cond` is false
///
/// The optional third argument is the value to break with.
///
/// ```rust
/// let config: Option<u16> = None;
/// let port = 'lookup: {
///     tripwire_core::bail_unless_to!(config.is_some(), 'lookup, 8080);
///     config.unwrap_or_default()
/// };
/// # let _ = port;
/// ```
#[cfg(tripwire_diagnostics)]
#[macro_export]
macro_rules! bail_unless_to {
    ($($tokens:tt)*) => { $crate::__bail_unless_to_verbose!($($tokens)*) };
}

/// Leave the labeled block or loop `'label` if `cond` is false
///
/// Diagnostics are disabled in this build: the jump still happens.
#[cfg(not(tripwire_diagnostics))]
#[macro_export]
macro_rules! bail_unless_to {
    ($($tokens:tt)*) => { $crate::__bail_unless_to_silent!($($tokens)*) };
}

/// Log a line in diagnostic format (`file:line <routine> message`)
///
/// Compiled out, arguments unevaluated, when diagnostics are disabled.
#[cfg(tripwire_diagnostics)]
#[macro_export]
macro_rules! diag_log {
    ($($tokens:tt)*) => { $crate::__diag_log_verbose!($($tokens)*) };
}

/// Log a line in diagnostic format (`file:line <routine> message`)
///
/// Diagnostics are disabled in this build; see the module documentation.
#[cfg(not(tripwire_diagnostics))]
#[macro_export]
macro_rules! diag_log {
    ($($tokens:tt)*) => { $crate::__diag_log_silent!($($tokens)*) };
}

/// Leave a compile-time reminder at the call site
///
/// Expands to a call of a deprecated local function named `TODO`, so every
/// build of the calling crate prints a warning carrying the note:
///
/// ```text
/// warning: use of deprecated function `app::connect::TODO`: retry on timeout
/// ```
///
/// The build does not fail unless the caller denies warnings. Unlike the other
/// macros this one is active in every build mode, and it does nothing at run
/// time.
///
/// ```rust
/// fn connect() -> bool
/// {
///     tripwire_core::todo_note!("retry on timeout");
///     true
/// }
///
/// assert!(connect());
/// ```
#[macro_export]
macro_rules! todo_note {
    ($note:literal $(,)?) => {{
        #[deprecated(note = $note)]
        #[allow(non_snake_case)]
        fn TODO() {}
        TODO();
    }};
}

// Verbose family

#[doc(hidden)]
#[macro_export]
macro_rules! __verify_verbose {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::report::raise_fatal(&$crate::__diagnostic!(
                Assertion,
                ::core::option::Option::Some(::core::stringify!($cond)),
                ::core::option::Option::None
            ));
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::report::raise_fatal(&$crate::__diagnostic!(
                Assertion,
                ::core::option::Option::Some(::core::stringify!($cond)),
                ::core::option::Option::Some(::core::format_args!($($arg)+))
            ));
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_verbose {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::report::raise(&$crate::__diagnostic!(
                Check,
                ::core::option::Option::Some(::core::stringify!($cond)),
                ::core::option::Option::None
            ));
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::report::raise(&$crate::__diagnostic!(
                Check,
                ::core::option::Option::Some(::core::stringify!($cond)),
                ::core::option::Option::Some(::core::format_args!($($arg)+))
            ));
        }
    };
}

// `if true` keeps the expansion typed `()` rather than diverging, matching the
// silent form.
#[doc(hidden)]
#[macro_export]
macro_rules! __not_reached_verbose {
    () => {
        if true {
            $crate::report::raise_fatal(&$crate::__diagnostic!(
                NotReached,
                ::core::option::Option::None,
                ::core::option::Option::None
            ));
        }
    };
    ($($arg:tt)+) => {
        if true {
            $crate::report::raise_fatal(&$crate::__diagnostic!(
                NotReached,
                ::core::option::Option::None,
                ::core::option::Option::Some(::core::format_args!($($arg)+))
            ));
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __not_tested_verbose {
    () => {
        $crate::report::raise(&$crate::__diagnostic!(
            NotTested,
            ::core::option::Option::None,
            ::core::option::Option::None
        ))
    };
    ($($arg:tt)+) => {
        $crate::report::raise(&$crate::__diagnostic!(
            NotTested,
            ::core::option::Option::None,
            ::core::option::Option::Some(::core::format_args!($($arg)+))
        ))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bail_unless_verbose {
    ($cond:expr, $value:expr $(,)?) => {
        if !$cond {
            $crate::report::raise(&$crate::__diagnostic!(
                Bail,
                ::core::option::Option::Some(::core::stringify!($cond)),
                ::core::option::Option::None
            ));
            return $value;
        }
    };
    ($cond:expr, $value:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::report::raise(&$crate::__diagnostic!(
                Bail,
                ::core::option::Option::Some(::core::stringify!($cond)),
                ::core::option::Option::Some(::core::format_args!($($arg)+))
            ));
            return $value;
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bail_unless_with_verbose {
    ($cond:expr, $compute:expr $(,)?) => {
        if !$cond {
            $crate::report::raise(&$crate::__diagnostic!(
                Bail,
                ::core::option::Option::Some(::core::stringify!($cond)),
                ::core::option::Option::None
            ));
            return ($compute)();
        }
    };
    ($cond:expr, $compute:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::report::raise(&$crate::__diagnostic!(
                Bail,
                ::core::option::Option::Some(::core::stringify!($cond)),
                ::core::option::Option::Some(::core::format_args!($($arg)+))
            ));
            return ($compute)();
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bail_unless_to_verbose {
    ($cond:expr, $label:lifetime $(,)?) => {
        if !$cond {
            $crate::report::raise(&$crate::__diagnostic!(
                Bail,
                ::core::option::Option::Some(::core::stringify!($cond)),
                ::core::option::Option::None
            ));
            break $label;
        }
    };
    ($cond:expr, $label:lifetime, $value:expr $(,)?) => {
        if !$cond {
            $crate::report::raise(&$crate::__diagnostic!(
                Bail,
                ::core::option::Option::Some(::core::stringify!($cond)),
                ::core::option::Option::None
            ));
            break $label $value;
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __diag_log_verbose {
    ($($arg:tt)+) => {
        $crate::report::emit(&$crate::__diagnostic!(
            Log,
            ::core::option::Option::None,
            ::core::option::Option::Some(::core::format_args!($($arg)+))
        ))
    };
}

// Silent family

#[doc(hidden)]
#[macro_export]
macro_rules! __verify_silent {
    ($cond:expr $(,)?) => {
        if false {
            let _: bool = $cond;
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if false {
            let _: bool = $cond;
            let _ = ::core::format_args!($($arg)+);
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_silent {
    ($($tokens:tt)*) => { $crate::__verify_silent!($($tokens)*) };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __not_reached_silent {
    () => {
        ()
    };
    ($($arg:tt)+) => {
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __not_tested_silent {
    ($($tokens:tt)*) => { $crate::__not_reached_silent!($($tokens)*) };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bail_unless_silent {
    ($cond:expr, $value:expr $(, $($arg:tt)*)?) => {
        if !$cond {
            return $value;
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bail_unless_with_silent {
    ($cond:expr, $compute:expr $(, $($arg:tt)*)?) => {
        if !$cond {
            return ($compute)();
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bail_unless_to_silent {
    ($cond:expr, $label:lifetime $(,)?) => {
        if !$cond {
            break $label;
        }
    };
    ($cond:expr, $label:lifetime, $value:expr $(,)?) => {
        if !$cond {
            break $label $value;
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __diag_log_silent {
    ($($arg:tt)+) => {
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    };
}

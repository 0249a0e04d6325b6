//! Behaviour of the diagnostics-enabled macro family
//!
//! These call the `__*_verbose!` implementations directly, so they hold in
//! every build mode. The fatal ones are covered by the `tripwire` binary's
//! tests, since they abort the process.

mod support;

use support::{capture, diagnostics, traps, untraced};
use tracing::Level;

#[test]
fn test_check_true_is_silent()
{
    let (_, events) = capture(|| {
        let x = 3;
        tripwire_core::__check_verbose!(x > 0);
        tripwire_core::__check_verbose!(x == 3, "x should be {}", 3);
    });

    assert!(events.is_empty(), "unexpected events: {events:?}");
}

#[test]
fn test_check_false_logs_traps_and_continues()
{
    if !untraced() {
        return;
    }

    let (x, events) = capture(|| {
        let x = -1;
        tripwire_core::__check_verbose!(x > 0);
        x
    });

    assert_eq!(x, -1);

    let diagnostics = diagnostics(&events);
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = diagnostics[0];
    assert_eq!(diagnostic.level, Level::WARN);
    assert!(diagnostic.message().contains("Failed check `x > 0`"));
    assert!(diagnostic.message().contains("verbose.rs:"));
    assert_eq!(diagnostic.field("kind"), Some("check"));
    assert_eq!(diagnostic.field("expression"), Some("x > 0"));

    let traps = traps(&events);
    assert_eq!(traps.len(), 1);
    assert_eq!(traps[0].field("outcome"), Some("not-attached"));
    assert_eq!(traps[0].field("attached"), Some("false"));
}

#[test]
fn test_message_precedes_trap()
{
    if !untraced() {
        return;
    }

    let (_, events) = capture(|| {
        tripwire_core::__check_verbose!(1 == 2);
    });

    let order: Vec<&str> = events
        .iter()
        .filter(|e| e.is_diagnostic() || e.is_trap())
        .map(|e| e.target.as_str())
        .collect();
    assert_eq!(order, ["tripwire", "tripwire::trap"]);
}

#[test]
fn test_check_with_message()
{
    if !untraced() {
        return;
    }

    let (_, events) = capture(|| {
        let budget = 10;
        let spent = 12;
        tripwire_core::__check_verbose!(spent <= budget, "over budget by {}", spent - budget);
    });

    let diagnostics = diagnostics(&events);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0]
        .message()
        .ends_with("Failed check `spent <= budget`: over budget by 2"));
}

#[test]
fn test_message_names_routine()
{
    if !untraced() {
        return;
    }

    fn load_settings()
    {
        tripwire_core::__check_verbose!(false);
    }

    let (_, events) = capture(load_settings);

    let diagnostics = diagnostics(&events);
    assert_eq!(diagnostics.len(), 1);
    let routine = diagnostics[0].field("routine").unwrap();
    assert!(routine.ends_with("load_settings"), "routine was {routine}");
    assert!(diagnostics[0].message().contains(&format!("<{routine}>")));
}

#[test]
fn test_not_tested_always_fires()
{
    if !untraced() {
        return;
    }

    let (after, events) = capture(|| {
        tripwire_core::__not_tested_verbose!();
        tripwire_core::__not_tested_verbose!("retry path, attempt {}", 2);
        "after"
    });

    assert_eq!(after, "after");

    let diagnostics = diagnostics(&events);
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics[0].message().ends_with("NOT TESTED"));
    assert!(diagnostics[1].message().ends_with("NOT TESTED: retry path, attempt 2"));
    assert_eq!(traps(&events).len(), 2);
}

#[derive(Debug, PartialEq)]
enum ErrorCode
{
    MissingPointer,
}

fn guarded(ptr: Option<&u8>) -> Result<u8, ErrorCode>
{
    tripwire_core::__bail_unless_verbose!(ptr.is_some(), Err(ErrorCode::MissingPointer));
    Ok(*ptr.unwrap_or(&0))
}

#[test]
fn test_bail_unless_returns_fallback()
{
    if !untraced() {
        return;
    }

    let (result, events) = capture(|| guarded(None));

    assert_eq!(result, Err(ErrorCode::MissingPointer));
    let diagnostics = diagnostics(&events);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message().ends_with("Failed check `ptr.is_some()`, bailing."));
    assert_eq!(diagnostics[0].field("kind"), Some("bail"));
    assert_eq!(traps(&events).len(), 1);
}

#[test]
fn test_bail_unless_passes_through()
{
    let value = 7;
    let (result, events) = capture(|| guarded(Some(&value)));

    assert_eq!(result, Ok(7));
    assert!(events.is_empty());
}

#[test]
fn test_bail_unless_fallback_evaluated_only_on_failure()
{
    use std::cell::Cell;

    let evaluated = Cell::new(0);
    let fallback = || {
        evaluated.set(evaluated.get() + 1);
        -1
    };

    let run = |ok: bool| -> i32 {
        tripwire_core::__bail_unless_verbose!(ok, fallback());
        1
    };

    let (results, _) = capture(|| (run(true), run(true)));
    assert_eq!(results, (1, 1));
    assert_eq!(evaluated.get(), 0);

    if untraced() {
        let (result, _) = capture(|| run(false));
        assert_eq!(result, -1);
        assert_eq!(evaluated.get(), 1);
    }
}

#[test]
fn test_bail_unless_with_calls_computation()
{
    if !untraced() {
        return;
    }

    fn parse(text: &str) -> Result<u32, String>
    {
        tripwire_core::__bail_unless_with_verbose!(!text.is_empty(), || Err(String::from("empty")), "input was {:?}", text);
        text.parse().map_err(|_| String::from("nan"))
    }

    let (results, events) = capture(|| (parse("42"), parse("")));

    assert_eq!(results, (Ok(42), Err(String::from("empty"))));
    let diagnostics = diagnostics(&events);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0]
        .message()
        .ends_with("Failed check `!text.is_empty()`, bailing.: input was \"\""));
}

#[test]
fn test_bail_unless_to_breaks_labeled_block()
{
    if !untraced() {
        return;
    }

    let (reached, events) = capture(|| {
        let mut reached = Vec::new();
        'work: {
            reached.push("start");
            tripwire_core::__bail_unless_to_verbose!(reached.len() > 1, 'work);
            reached.push("unreachable");
        }
        reached.push("cleanup");
        reached
    });

    assert_eq!(reached, ["start", "cleanup"]);
    assert_eq!(diagnostics(&events).len(), 1);
    assert_eq!(traps(&events).len(), 1);
}

#[test]
fn test_bail_unless_to_breaks_with_value()
{
    if !untraced() {
        return;
    }

    let (port, _) = capture(|| {
        let configured: Option<u16> = None;
        'lookup: {
            tripwire_core::__bail_unless_to_verbose!(configured.is_some(), 'lookup, 8080);
            configured.unwrap_or(1)
        }
    });

    assert_eq!(port, 8080);
}

#[test]
fn test_bail_unless_to_in_loop()
{
    if !untraced() {
        return;
    }

    let (seen, events) = capture(|| {
        let mut seen = Vec::new();
        'scan: for n in [1, 2, -3, 4] {
            tripwire_core::__bail_unless_to_verbose!(n > 0, 'scan);
            seen.push(n);
        }
        seen
    });

    assert_eq!(seen, [1, 2]);
    assert_eq!(diagnostics(&events).len(), 1);
}

#[test]
fn test_diag_log_uses_diagnostic_format()
{
    let (_, events) = capture(|| {
        tripwire_core::__diag_log_verbose!("connected to {}", "db-1");
    });

    let diagnostics = diagnostics(&events);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].level, Level::INFO);
    assert!(diagnostics[0].message().contains("verbose.rs:"));
    assert!(diagnostics[0].message().ends_with("> connected to db-1"));
    assert!(traps(&events).is_empty());
}

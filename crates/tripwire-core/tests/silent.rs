//! Behaviour of the diagnostics-disabled macro family
//!
//! These call the `__*_silent!` implementations directly, so they hold in
//! every build mode.

mod support;

use std::cell::Cell;

use support::capture;

#[test]
fn test_advisory_and_fatal_are_noops()
{
    let (after, events) = capture(|| {
        tripwire_core::__verify_silent!(1 == 2);
        tripwire_core::__verify_silent!(false, "still {}", "nothing");
        tripwire_core::__check_silent!(1 > 2);
        tripwire_core::__not_reached_silent!();
        tripwire_core::__not_reached_silent!("why {}", "here");
        tripwire_core::__not_tested_silent!();
        tripwire_core::__diag_log_silent!("dropped {}", 1);
        "after"
    });

    assert_eq!(after, "after");
    assert!(events.is_empty(), "unexpected events: {events:?}");
}

#[test]
fn test_conditions_are_not_evaluated()
{
    let calls = Cell::new(0);
    let touch = || {
        calls.set(calls.get() + 1);
        false
    };

    tripwire_core::__verify_silent!(touch());
    tripwire_core::__check_silent!(touch(), "message {}", calls.get());
    tripwire_core::__diag_log_silent!("{}", touch());

    assert_eq!(calls.get(), 0);
}

fn lookup(key: Option<&str>) -> &'static str
{
    tripwire_core::__bail_unless_silent!(key.is_some(), "fallback", "no key");
    "found"
}

#[test]
fn test_bail_unless_still_returns()
{
    let (results, events) = capture(|| (lookup(Some("k")), lookup(None)));

    assert_eq!(results, ("found", "fallback"));
    assert!(events.is_empty());
}

#[test]
fn test_bail_unless_condition_is_evaluated_once()
{
    let calls = Cell::new(0);
    let probe = |ok: bool| {
        calls.set(calls.get() + 1);
        ok
    };

    let run = |ok: bool| -> u8 {
        tripwire_core::__bail_unless_silent!(probe(ok), 0);
        1
    };

    assert_eq!(run(true), 1);
    assert_eq!(run(false), 0);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_bail_unless_with_still_returns()
{
    fn parse(text: &str) -> Option<u8>
    {
        tripwire_core::__bail_unless_with_silent!(!text.is_empty(), || None);
        text.parse().ok()
    }

    let (results, events) = capture(|| (parse("9"), parse("")));

    assert_eq!(results, (Some(9), None));
    assert!(events.is_empty());
}

#[test]
fn test_bail_unless_to_still_jumps()
{
    let (value, events) = capture(|| {
        'pick: {
            tripwire_core::__bail_unless_to_silent!(false, 'pick, 1);
            2
        }
    });

    assert_eq!(value, 1);
    assert!(events.is_empty());

    let mut visited = 0;
    'walk: {
        tripwire_core::__bail_unless_to_silent!(visited > 0, 'walk);
        visited += 10;
    }
    assert_eq!(visited, 0);
}

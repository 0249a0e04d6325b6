//! The public macros forward to the family selected for this build

mod support;

use std::cell::Cell;

use support::{capture, diagnostics, untraced};
use tripwire_core::prelude::*;

#[test]
fn test_true_conditions_are_noops_in_any_mode()
{
    let (value, events) = capture(|| {
        let x = 1;
        verify!(x == 1);
        check!(x > 0);
        check!(x < 2, "x = {}", x);
        'block: {
            bail_unless_to!(x == 1, 'block);
        }
        x
    });

    assert_eq!(value, 1);
    assert!(events.is_empty(), "unexpected events: {events:?}");
}

#[test]
fn test_check_follows_build_mode()
{
    if !untraced() {
        return;
    }

    let evaluated = Cell::new(false);
    let (_, events) = capture(|| {
        check!({
            evaluated.set(true);
            false
        });
    });

    let expected = usize::from(DIAGNOSTICS_ENABLED);
    assert_eq!(diagnostics(&events).len(), expected);
    assert_eq!(evaluated.get(), DIAGNOSTICS_ENABLED);
}

#[test]
fn test_not_tested_follows_build_mode()
{
    if !untraced() {
        return;
    }

    let (_, events) = capture(|| not_tested!());
    assert_eq!(diagnostics(&events).len(), usize::from(DIAGNOSTICS_ENABLED));
}

#[derive(Debug, PartialEq)]
enum Status
{
    Ready,
    Empty,
}

fn status(items: &[u8]) -> Status
{
    bail_unless!(!items.is_empty(), Status::Empty);
    Status::Ready
}

#[test]
fn test_bail_unless_returns_in_any_mode()
{
    if !untraced() {
        return;
    }

    let (results, events) = capture(|| (status(&[1]), status(&[])));

    assert_eq!(results, (Status::Ready, Status::Empty));
    assert_eq!(diagnostics(&events).len(), usize::from(DIAGNOSTICS_ENABLED));
}

#[test]
fn test_bail_unless_with_returns_in_any_mode()
{
    if !untraced() {
        return;
    }

    fn first(items: &[u8]) -> Result<u8, &'static str>
    {
        bail_unless_with!(!items.is_empty(), || Err("empty"));
        Ok(items[0])
    }

    assert_eq!(first(&[4, 5]), Ok(4));
    assert_eq!(first(&[]), Err("empty"));
}

#[test]
fn test_mode_reporting()
{
    assert_eq!(DiagnosticsMode::current().is_enabled(), DIAGNOSTICS_ENABLED);
}

#[test]
fn test_routine_name()
{
    fn named() -> &'static str
    {
        routine_name!()
    }

    assert!(named().ends_with("test_routine_name::named"), "got {}", named());

    let from_closure = (|| routine_name!())();
    assert!(from_closure.ends_with("test_routine_name"), "got {from_closure}");
}

#[test]
#[allow(deprecated)]
fn test_todo_note_compiles_in_any_mode_and_does_nothing()
{
    let (value, events) = capture(|| {
        todo_note!("replace the linear scan");
        tripwire_core::todo_note!("second note in the same scope",);
        7
    });

    assert_eq!(value, 7);
    assert!(events.is_empty(), "unexpected events: {events:?}");
}

#[test]
fn test_diag_log_follows_build_mode()
{
    let touched = Cell::new(false);
    let (_, events) = capture(|| {
        diag_log!("cache warmed: {}", {
            touched.set(true);
            3
        });
    });

    assert_eq!(diagnostics(&events).len(), usize::from(DIAGNOSTICS_ENABLED));
    assert_eq!(touched.get(), DIAGNOSTICS_ENABLED);
}

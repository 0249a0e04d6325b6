//! Captures `tracing` events so tests can count diagnostics and traps.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// One recorded event
#[derive(Debug, Clone)]
pub struct Captured
{
    pub target: String,
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

impl Captured
{
    pub fn message(&self) -> &str
    {
        self.field("message").unwrap_or_default()
    }

    pub fn field(&self, name: &str) -> Option<&str>
    {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is_diagnostic(&self) -> bool
    {
        self.target == "tripwire"
    }

    pub fn is_trap(&self) -> bool
    {
        self.target == "tripwire::trap"
    }
}

struct FieldVisitor<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldVisitor<'_>
{
    fn record_str(&mut self, field: &Field, value: &str)
    {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug)
    {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

/// Layer that keeps every event it sees
#[derive(Clone, Default)]
pub struct Capture
{
    events: Arc<Mutex<Vec<Captured>>>,
}

impl<S> Layer<S> for Capture
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>)
    {
        let mut fields = BTreeMap::new();
        event.record(&mut FieldVisitor(&mut fields));

        self.events.lock().unwrap().push(Captured {
            target: event.metadata().target().to_string(),
            level: *event.metadata().level(),
            fields,
        });
    }
}

/// Run `f` with a capturing subscriber installed on this thread
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<Captured>)
{
    let layer = Capture::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    let events = std::mem::take(&mut *layer.events.lock().unwrap());
    (result, events)
}

pub fn diagnostics(events: &[Captured]) -> Vec<&Captured>
{
    events.iter().filter(|e| e.is_diagnostic()).collect()
}

pub fn traps(events: &[Captured]) -> Vec<&Captured>
{
    events.iter().filter(|e| e.is_trap()).collect()
}

/// The harness must not be traced, or dispatched traps would stop it.
pub fn untraced() -> bool
{
    !tripwire_core::is_debugger_attached()
}

use std::sync::{Arc, Mutex};

use crate::kernel::component::{Declaration, DeclarationBuilder, HookResult};
use crate::kernel::error::BoxError;
use crate::kernel::lookup::Lookup;

/// Records lifecycle events across components in the order they happen.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    events: Arc<Mutex<Vec<String>>>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Names of constructed components, in construction order.
    pub fn constructed(&self) -> Vec<String> {
        self.with_prefix("construct:")
    }

    pub fn with_prefix(&self, prefix: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| event.strip_prefix(prefix).map(str::to_string))
            .collect()
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.events().iter().position(|recorded| recorded == event)
    }
}

/// Test component that reports its lifecycle to a [`Tracker`].
#[derive(Debug)]
pub struct Probe {
    pub name: String,
    pub tracker: Tracker,
}

/// A probe that records only its construction.
pub fn probe(name: &str, tracker: &Tracker) -> DeclarationBuilder<Probe> {
    let tracker = tracker.clone();
    let owned = name.to_string();
    Declaration::named::<Probe, _>(name, move |_deps| {
        tracker.record(format!("construct:{}", owned));
        Ok(Probe {
            name: owned.clone(),
            tracker: tracker.clone(),
        })
    })
}

/// A probe that records construction, init and start.
pub fn hooked_probe(name: &str, tracker: &Tracker) -> DeclarationBuilder<Probe> {
    probe(name, tracker)
        .on_init(|this: Arc<Probe>| async move {
            this.tracker.record(format!("init:{}", this.name));
            Ok(())
        })
        .on_start(|this: Arc<Probe>, _lookup: Lookup| async move {
            this.tracker.record(format!("start:{}", this.name));
            Ok(())
        })
}

/// A probe whose construction step fails.
pub fn failing_probe(name: &str, tracker: &Tracker) -> DeclarationBuilder<Probe> {
    let tracker = tracker.clone();
    let owned = name.to_string();
    Declaration::named::<Probe, _>(name, move |_deps| {
        tracker.record(format!("construct-failed:{}", owned));
        Err(BoxError::from(format!("{} cannot be built", owned)))
    })
}

pub fn fail_with(message: &str) -> HookResult {
    Err(BoxError::from(message.to_string()))
}

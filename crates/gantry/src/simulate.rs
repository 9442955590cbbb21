//! Scripted components: stand-ins declared from manifest entries.
//!
//! Each phase prints one line to stdout so a run can be followed from the
//! terminal. A `fail` entry makes the named phase return an error instead.
use std::sync::Arc;

use gantry_core::config::{ComponentSpec, FailPhase, Manifest};
use gantry_core::kernel::{BoxError, Result};
use gantry_core::{Application, Declaration, LogSink, Lookup};

#[derive(Debug)]
pub struct ScriptedComponent {
    name: String,
    fail: Option<FailPhase>,
}

impl ScriptedComponent {
    fn failure(&self, phase: FailPhase) -> Option<BoxError> {
        (self.fail == Some(phase)).then(|| format!("{} was scripted to fail during {:?}", self.name, phase).into())
    }
}

/// Build the declaration for one manifest entry.
pub fn declaration(entry: &ComponentSpec) -> Declaration {
    let script = entry.clone();
    let builder = Declaration::named::<ScriptedComponent, _>(entry.id(), move |deps| {
        let component = ScriptedComponent {
            name: script.name.clone(),
            fail: script.fail,
        };
        if let Some(err) = component.failure(FailPhase::Construct) {
            return Err(err);
        }
        let inputs: Vec<&str> = deps.ids().map(|id| id.as_str()).collect();
        if inputs.is_empty() {
            println!("constructed {}", component.name);
        } else {
            println!("constructed {} with {}", component.name, inputs.join(", "));
        }
        Ok(component)
    })
    .load_order(entry.load_order);

    let mut builder = entry
        .dependency_ids()
        .into_iter()
        .fold(builder, |builder, dependency| builder.depends_on_id(dependency));

    if entry.has_init_hook() {
        builder = builder.on_init(|this: Arc<ScriptedComponent>| async move {
            if let Some(err) = this.failure(FailPhase::Init) {
                return Err(err);
            }
            println!("initialized {}", this.name);
            Ok(())
        });
    }
    if entry.has_start_hook() {
        builder = builder.on_start(|this: Arc<ScriptedComponent>, lookup: Lookup| async move {
            if let Some(err) = this.failure(FailPhase::Start) {
                return Err(err);
            }
            let peers = lookup.registered_ids().await.len();
            println!("started {} ({} peers visible)", this.name, peers.saturating_sub(1));
            Ok(())
        });
    }
    builder.build()
}

/// Declare every manifest component and import its bundles, reporting
/// through `sink`.
pub fn application(manifest: &Manifest, sink: Arc<dyn LogSink>) -> Result<Application> {
    let mut app = Application::with_settings(manifest.settings.clone()).with_sink(sink);
    for entry in &manifest.components {
        app.declare(declaration(entry))?;
    }
    for bundle in manifest.bundles() {
        app.import(bundle)?;
    }
    Ok(app)
}

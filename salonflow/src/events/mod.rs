//! Lifecycle event emission.
//!
//! The controller reports every transition through an [`EventSink`] so hosts
//! can wire the wizard to logging or analytics without polling snapshots.

mod event;
mod sink;

pub use event::WizardEvent;
pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

use parking_lot::RwLock;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// Global default sink used by controllers built without an explicit one
static GLOBAL_EVENT_SINK: RwLock<Option<Arc<dyn EventSink>>> = RwLock::new(None);

/// Sets the global default event sink.
pub fn set_event_sink(sink: Arc<dyn EventSink>) {
    *GLOBAL_EVENT_SINK.write() = Some(sink);
}

/// Clears the global default event sink.
pub fn clear_event_sink() {
    *GLOBAL_EVENT_SINK.write() = None;
}

/// Gets the global default event sink.
///
/// Returns a [`NoOpEventSink`] if none is set.
#[must_use]
pub fn get_event_sink() -> Arc<dyn EventSink> {
    GLOBAL_EVENT_SINK
        .read()
        .clone()
        .unwrap_or_else(|| Arc::new(NoOpEventSink))
}

/// Installs a global tracing subscriber honoring `RUST_LOG`, defaulting to
/// `info`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn install_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

//! Event sink trait and implementations.

use crate::events::WizardEvent;
use async_trait::async_trait;
use tracing::{debug, info, Level};

/// Trait for sinks that receive wizard lifecycle events.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Delivers an event asynchronously.
    async fn emit(&self, event: &WizardEvent);

    /// Delivers an event without blocking.
    ///
    /// Must never fail; delivery problems are logged and suppressed.
    fn try_emit(&self, event: &WizardEvent);
}

/// A no-op sink that discards all events.
///
/// Used as the default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: &WizardEvent) {
        // Intentionally empty - discards all events
    }

    fn try_emit(&self, _event: &WizardEvent) {
        // Intentionally empty - discards all events
    }
}

/// A sink that logs events through the tracing framework.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a logging sink with the given level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }

    /// Creates an info-level logging sink.
    #[must_use]
    pub fn info() -> Self {
        Self::new(Level::INFO)
    }

    fn log_event(&self, event: &WizardEvent) {
        match self.level {
            Level::DEBUG => {
                debug!(kind = %event.kind, data = ?event.data, "Event: {}", event.kind);
            }
            _ => {
                info!(kind = %event.kind, data = ?event.data, "Event: {}", event.kind);
            }
        }
    }
}

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, event: &WizardEvent) {
        self.log_event(event);
    }

    fn try_emit(&self, event: &WizardEvent) {
        self.log_event(event);
    }
}

/// A collecting sink for tests.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: parking_lot::RwLock<Vec<WizardEvent>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<WizardEvent> {
        self.events.read().clone()
    }

    /// Returns the collected event kinds in emission order.
    #[must_use]
    pub fn kinds(&self) -> Vec<String> {
        self.events.read().iter().map(|e| e.kind.clone()).collect()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Clears all collected events.
    pub fn clear(&self) {
        self.events.write().clear();
    }

    /// Returns events whose kind starts with the given prefix.
    #[must_use]
    pub fn events_of_kind(&self, prefix: &str) -> Vec<WizardEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.kind.starts_with(prefix))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event: &WizardEvent) {
        self.events.write().push(event.clone());
    }

    fn try_emit(&self, event: &WizardEvent) {
        self.events.write().push(event.clone());
    }
}

//! Event sink trait and implementations.

use async_trait::async_trait;
use tracing::{debug, error, info, Level};

/// Trait for event sinks that receive pipeline events.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emits an event asynchronously.
    ///
    /// # Arguments
    ///
    /// * `event_type` - The type of event (e.g., "stage.started")
    /// * `data` - Optional event data
    async fn emit(&self, event_type: &str, data: Option<serde_json::Value>);

    /// Emits an event without waiting.
    ///
    /// Must never fail; sinks swallow their own errors.
    fn try_emit(&self, event_type: &str, data: Option<serde_json::Value>);
}

/// A no-op event sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event_type: &str, _data: Option<serde_json::Value>) {}

    fn try_emit(&self, _event_type: &str, _data: Option<serde_json::Value>) {}
}

/// An event sink that logs events using the tracing framework.
///
/// Failure events (`*.failed`) are always logged at error level.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    /// The log level for ordinary events.
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a new logging event sink with the specified level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }

    fn log_event(&self, event_type: &str, data: Option<&serde_json::Value>) {
        if event_type.ends_with(".failed") {
            error!(event_type = %event_type, event_data = ?data, "Event: {}", event_type);
        } else if self.level == Level::DEBUG {
            debug!(event_type = %event_type, event_data = ?data, "Event: {}", event_type);
        } else {
            info!(event_type = %event_type, event_data = ?data, "Event: {}", event_type);
        }
    }
}

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, event_type: &str, data: Option<serde_json::Value>) {
        self.log_event(event_type, data.as_ref());
    }

    fn try_emit(&self, event_type: &str, data: Option<serde_json::Value>) {
        self.log_event(event_type, data.as_ref());
    }
}

/// A collecting event sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: parking_lot::RwLock<Vec<(String, Option<serde_json::Value>)>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<(String, Option<serde_json::Value>)> {
        self.events.read().clone()
    }

    /// Returns just the event types, in emission order.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.events.read().iter().map(|(t, _)| t.clone()).collect()
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

    /// Returns events matching a type prefix.
    #[must_use]
    pub fn events_of_type(&self, type_prefix: &str) -> Vec<(String, Option<serde_json::Value>)> {
        self.events
            .read()
            .iter()
            .filter(|(t, _)| t.starts_with(type_prefix))
            .cloned()
            .collect()
    }

    /// Returns the `stage` field of every event of the given type.
    #[must_use]
    pub fn stages_for(&self, event_type: &str) -> Vec<String> {
        self.events
            .read()
            .iter()
            .filter(|(t, _)| t == event_type)
            .filter_map(|(_, data)| {
                data.as_ref()
                    .and_then(|d| d.get("stage"))
                    .and_then(|s| s.as_str())
                    .map(str::to_string)
            })
            .collect()
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event_type: &str, data: Option<serde_json::Value>) {
        self.try_emit(event_type, data);
    }

    fn try_emit(&self, event_type: &str, data: Option<serde_json::Value>) {
        self.events.write().push((event_type.to_string(), data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_sink() {
        let sink = NoOpEventSink;
        sink.emit("stage.started", None).await;
        sink.try_emit("stage.failed", Some(serde_json::json!({"stage": "ngc"})));
    }

    #[tokio::test]
    async fn test_logging_sink_levels() {
        LoggingEventSink::default()
            .emit("stage.completed", Some(serde_json::json!({"stage": "ngc"})))
            .await;
        LoggingEventSink::debug().try_emit("stage.failed", None);
    }

    #[tokio::test]
    async fn test_collecting_sink_order() {
        let sink = CollectingEventSink::new();
        assert!(sink.is_empty());

        sink.emit("pipeline.started", None).await;
        sink.try_emit("stage.started", Some(serde_json::json!({"stage": "ngc"})));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.event_types(), vec!["pipeline.started", "stage.started"]);
    }

    #[tokio::test]
    async fn test_collecting_sink_filters() {
        let sink = CollectingEventSink::new();
        sink.emit("stage.started", Some(serde_json::json!({"stage": "ngc"}))).await;
        sink.emit("stage.started", Some(serde_json::json!({"stage": "compile-main"}))).await;
        sink.emit("stage.failed", Some(serde_json::json!({"stage": "compile-main"}))).await;
        sink.emit("pipeline.failed", None).await;

        assert_eq!(sink.events_of_type("stage.").len(), 3);
        assert_eq!(sink.stages_for("stage.started"), vec!["ngc", "compile-main"]);
        assert_eq!(sink.stages_for("stage.failed"), vec!["compile-main"]);
    }
}

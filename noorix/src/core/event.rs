//! Pipeline event type for lifecycle notifications.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Stage;

/// An event emitted by the pipeline during a run.
///
/// Events are forwarded to an [`EventSink`](crate::events::EventSink) for
/// logging, monitoring, or test inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageEvent {
    /// The event type (e.g., "stage.started", "stage.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// When the event occurred (ISO 8601).
    pub timestamp: String,

    /// The event payload data.
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
}

impl StageEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            timestamp: crate::utils::iso_timestamp(),
            data: HashMap::new(),
        }
    }

    /// Adds a data field to the event.
    #[must_use]
    pub fn add_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Converts the payload (plus timestamp) into a JSON object.
    #[must_use]
    pub fn payload(&self) -> serde_json::Value {
        let mut map: serde_json::Map<String, serde_json::Value> =
            self.data.clone().into_iter().collect();
        map.insert("timestamp".to_string(), serde_json::json!(self.timestamp));
        serde_json::Value::Object(map)
    }

    /// Creates a "stage.started" event.
    #[must_use]
    pub fn started(stage: Stage) -> Self {
        Self::new("stage.started").add_data("stage", serde_json::json!(stage.as_str()))
    }

    /// Creates a "stage.completed" event.
    #[must_use]
    pub fn completed(stage: Stage, duration_ms: f64, chars: usize) -> Self {
        Self::new("stage.completed")
            .add_data("stage", serde_json::json!(stage.as_str()))
            .add_data("duration_ms", serde_json::json!(duration_ms))
            .add_data("chars", serde_json::json!(chars))
    }

    /// Creates a "stage.failed" event.
    #[must_use]
    pub fn failed(stage: Stage, error: &str) -> Self {
        Self::new("stage.failed")
            .add_data("stage", serde_json::json!(stage.as_str()))
            .add_data("error", serde_json::json!(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = StageEvent::new("pipeline.started");
        assert_eq!(event.event_type, "pipeline.started");
        assert!(event.data.is_empty());
    }

    #[test]
    fn test_event_started() {
        let event = StageEvent::started(Stage::Title);
        assert_eq!(event.event_type, "stage.started");
        assert_eq!(event.data.get("stage"), Some(&serde_json::json!("title")));
    }

    #[test]
    fn test_event_completed() {
        let event = StageEvent::completed(Stage::Description, 12.5, 240);
        assert_eq!(event.data.get("duration_ms"), Some(&serde_json::json!(12.5)));
        assert_eq!(event.data.get("chars"), Some(&serde_json::json!(240)));
    }

    #[test]
    fn test_event_payload_includes_timestamp() {
        let event = StageEvent::failed(Stage::Hashtags, "quota");
        let payload = event.payload();
        assert_eq!(payload["stage"], "hashtags");
        assert_eq!(payload["error"], "quota");
        assert!(payload["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_event_serialization() {
        let event = StageEvent::new("test").add_data("x", serde_json::json!(1));
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: StageEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event.event_type, deserialized.event_type);
    }
}

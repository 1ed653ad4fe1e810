//! Event sink system for observability.
//!
//! The pipeline reports its lifecycle (`pipeline.*`, `stage.*`, `export.*`)
//! through an [`EventSink`]. Sinks are for logging and inspection only; they
//! never influence the run.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

use crate::core::StageEvent;

/// Forwards a [`StageEvent`] to `sink` as `(type, payload)`.
pub async fn emit_event(sink: &dyn EventSink, event: StageEvent) {
    let payload = event.payload();
    sink.emit(&event.event_type, Some(payload)).await;
}

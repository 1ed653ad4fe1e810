//! Core domain model types for noorix.
//!
//! This module contains the fundamental types used throughout the crate:
//! - Stage identifiers and the active-stage discriminant
//! - The generation request and length preference
//! - Stage results and the observable pipeline state
//! - Pipeline events

mod event;
mod request;
mod result;
mod state;
mod status;

pub use event::StageEvent;
pub use request::{GenerationRequest, LengthPreference};
pub use result::{StageResult, StageResults};
pub use state::{PipelineFailure, PipelineState};
pub use status::{ActiveStage, Stage};

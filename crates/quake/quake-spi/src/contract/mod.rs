//! Collaborator contracts.

mod event_source;
mod magnitude_model;

pub use event_source::EventSource;
pub use magnitude_model::MagnitudeModel;

//! Core data models for the map dataset.

pub mod point;
pub mod record;

pub use point::{GeoPoint, ViewState};
pub use record::{RawRecord, RecordId};

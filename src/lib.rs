//! Archmap - map projection for a dataset of architectural works
//!
//! This library turns loosely-typed records into map points, a camera view,
//! firm-filtered subsets, popup links and GeoJSON. It is shared by the
//! `serve` binary.

pub mod config;
pub mod dataset;
pub mod error;
pub mod firms;
pub mod geojson;
pub mod models;
pub mod projector;

pub use config::ProjectorConfig;
pub use models::{GeoPoint, RawRecord, RecordId, ViewState};
pub use projector::{FirmFilter, GeoPointProjector};

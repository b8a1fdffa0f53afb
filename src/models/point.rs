//! Derived map geometry: validated points and the camera that frames them.

use serde::{Deserialize, Serialize};

use super::RawRecord;

/// Validated latitude/longitude pair derived from a record.
///
/// Borrows the record it came from; points are rebuilt whenever the record
/// set changes and never outlive it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint<'a> {
    pub latitude: f64,
    pub longitude: f64,
    pub source: &'a RawRecord,
}

impl<'a> GeoPoint<'a> {
    pub fn new(latitude: f64, longitude: f64, source: &'a RawRecord) -> Self {
        Self {
            latitude,
            longitude,
            source,
        }
    }

    /// Reorder into `[lng, lat]` for longitude-first consumers such as GeoJSON.
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Point in geo-types convention (x = longitude, y = latitude)
    pub fn to_geo(&self) -> geo_types::Point<f64> {
        geo_types::Point::new(self.longitude, self.latitude)
    }
}

/// Map camera: center coordinate and zoom level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom_level: u8,
}

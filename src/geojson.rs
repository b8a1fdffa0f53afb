//! GeoJSON encoding of projected points.
//!
//! GeoJSON positions are `[lng, lat]`; the reorder happens in
//! [`GeoPoint::to_lng_lat`] and nowhere else.

use serde::{Deserialize, Serialize};

use crate::models::{GeoPoint, RecordId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub geometry: Geometry,
    pub properties: Properties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub geo_type: String,
    /// `[lng, lat]`
    pub coordinates: [f64; 2],
}

/// Record fields carried into each feature
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Properties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default)]
    pub author: Vec<String>,
    #[serde(default)]
    pub country: Vec<String>,
    #[serde(default)]
    pub city: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actualizacion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Feature {
    pub fn from_point(point: &GeoPoint<'_>) -> Self {
        let record = point.source;
        Self {
            feature_type: "Feature".to_string(),
            geometry: Geometry {
                geo_type: "Point".to_string(),
                coordinates: point.to_lng_lat(),
            },
            properties: Properties {
                id: record.id.clone(),
                slug: record.slug.clone(),
                title: record.title.clone(),
                img: record.img.clone(),
                author: record.author.clone(),
                country: record.country.clone(),
                city: record.city.clone(),
                actualizacion: record.actualizacion.clone(),
                hash: record.hash.clone(),
                date: record.date.clone(),
            },
        }
    }
}

impl FeatureCollection {
    pub fn from_points(points: &[GeoPoint<'_>]) -> Self {
        Self {
            collection_type: "FeatureCollection".to_string(),
            features: points.iter().map(Feature::from_point).collect(),
        }
    }
}

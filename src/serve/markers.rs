//! Marker payloads for the map front-end.

use serde::Serialize;

use archmap::models::{GeoPoint, RecordId, ViewState};
use archmap::projector::{DisplayUrls, GeoPointProjector};

/// One map marker with everything its popup shows
#[derive(Debug, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub position: [f64; 2],
    pub popup: Popup,
    pub highlighted: bool,
}

#[derive(Debug, Serialize)]
pub struct Popup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub city: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub country: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub urls: DisplayUrls,
}

#[derive(Debug, Serialize)]
pub struct MarkerSet {
    pub markers: Vec<Marker>,
    pub view: ViewState,
}

/// Build markers for already-projected points. Positions stay `[lat, lng]`.
pub fn build_markers(
    projector: &GeoPointProjector,
    points: &[GeoPoint<'_>],
    view: ViewState,
) -> MarkerSet {
    let markers = points
        .iter()
        .map(|point| {
            let record = point.source;
            Marker {
                id: record.id.clone(),
                position: [point.latitude, point.longitude],
                popup: Popup {
                    title: record.title.clone(),
                    authors: record.author.clone(),
                    city: record.city.clone(),
                    country: record.country.clone(),
                    date: record.date.clone(),
                    urls: projector.derive_display_urls(record),
                },
                highlighted: projector.is_highlighted(record),
            }
        })
        .collect();

    MarkerSet { markers, view }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archmap::{FirmFilter, ProjectorConfig, RawRecord};
    use serde_json::json;

    #[test]
    fn test_marker_payload() {
        let records: Vec<RawRecord> = serde_json::from_value(json!([{
            "id": 3,
            "coords": "41.38,2.17",
            "title": "Pabellón",
            "author": "Mies",
            "city": "Barcelona",
            "img": "p.jpg",
            "hash": "h1"
        }]))
        .unwrap();

        let projector = GeoPointProjector::new(ProjectorConfig {
            highlight_firms: vec!["Mies".to_string()],
            ..Default::default()
        });
        let (points, view) = projector.project(&records, &FirmFilter::default());
        let set = build_markers(&projector, &points, view);

        let value = serde_json::to_value(&set).unwrap();
        let marker = &value["markers"][0];
        assert_eq!(marker["position"], json!([41.38, 2.17]));
        assert_eq!(marker["highlighted"], true);
        assert_eq!(marker["popup"]["authors"], json!(["Mies"]));
        assert_eq!(marker["popup"]["city"], json!(["Barcelona"]));
        assert!(marker["popup"]["image_url"]
            .as_str()
            .unwrap()
            .ends_with("/3/av_thumb__p.jpg?h=h1"));
        assert!(marker["popup"].get("article_url").is_none());
        assert_eq!(value["view"]["zoom_level"], 10);
    }
}

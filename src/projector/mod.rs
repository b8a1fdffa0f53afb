//! Record-to-map projection.
//!
//! Turns raw records into validated points, frames them with a camera,
//! filters them by firm and builds popup links. Everything here is a pure
//! function of its inputs plus the immutable [`ProjectorConfig`].

mod filter;
mod points;
mod urls;
mod view;

pub use filter::{filter_by_firms, FirmFilter};
pub use points::{parse_coords, parse_points};
pub use urls::{derive_display_urls, DisplayUrls};
pub use view::{compute_view_state, zoom_for_span};

use hashbrown::HashSet;

use crate::config::ProjectorConfig;
use crate::models::{GeoPoint, RawRecord, ViewState};

/// Projector bound to one configuration
#[derive(Debug, Clone)]
pub struct GeoPointProjector {
    config: ProjectorConfig,
    highlighted: HashSet<String>,
}

impl GeoPointProjector {
    pub fn new(config: ProjectorConfig) -> Self {
        let highlighted = config
            .highlight_firms
            .iter()
            .map(|f| f.trim().to_string())
            .collect();
        Self {
            config,
            highlighted,
        }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    pub fn parse_points<'a, I>(&self, records: I) -> Vec<GeoPoint<'a>>
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        parse_points(records)
    }

    pub fn compute_view_state(&self, points: &[GeoPoint<'_>]) -> ViewState {
        compute_view_state(points, &self.config.view)
    }

    pub fn filter_by_firms<'a, I>(&self, records: I, filter: &FirmFilter) -> Vec<&'a RawRecord>
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        filter_by_firms(records, filter)
    }

    pub fn derive_display_urls(&self, record: &RawRecord) -> DisplayUrls {
        derive_display_urls(record, &self.config.urls)
    }

    /// Whether any author of `record` is in the configured highlight list
    pub fn is_highlighted(&self, record: &RawRecord) -> bool {
        record
            .author
            .iter()
            .any(|a| self.highlighted.contains(a.as_str()))
    }

    /// Filter, then project. The common path for a front-end refresh.
    pub fn project<'a>(
        &self,
        records: &'a [RawRecord],
        filter: &FirmFilter,
    ) -> (Vec<GeoPoint<'a>>, ViewState) {
        let points = parse_points(filter_by_firms(records, filter));
        let view = self.compute_view_state(&points);
        (points, view)
    }
}

impl Default for GeoPointProjector {
    fn default() -> Self {
        Self::new(ProjectorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset() -> Vec<RawRecord> {
        serde_json::from_value(json!([
            { "id": 1, "coords": "40.0,-3.0", "author": ["OMA"] },
            { "id": 2, "coords": "", "author": ["OMA"] },
            { "id": 3, "coords": "abc,def", "author": ["MVRDV"] },
            { "id": 4, "coords": "40.05,-2.95", "author": "[\"MVRDV\", \"OMA\"]" },
            { "id": 5, "coords": "41.0,-3.0", "author": "Sejima" }
        ]))
        .unwrap()
    }

    #[test]
    fn test_project_unfiltered() {
        let records = dataset();
        let projector = GeoPointProjector::default();
        let (points, view) = projector.project(&records, &FirmFilter::default());

        assert_eq!(points.len(), 3);
        assert_eq!(view.zoom_level, 6);
        assert_eq!(view.center_latitude, 40.5);
    }

    #[test]
    fn test_project_filtered_tightens_view() {
        let records = dataset();
        let projector = GeoPointProjector::default();
        let (points, view) = projector.project(&records, &FirmFilter::new(["OMA"]));

        assert_eq!(points.len(), 2);
        assert_eq!(view.zoom_level, 10);
    }

    #[test]
    fn test_project_nothing_matches() {
        let records = dataset();
        let projector = GeoPointProjector::default();
        let (points, view) = projector.project(&records, &FirmFilter::new(["Nobody"]));

        assert!(points.is_empty());
        assert_eq!(view, projector.config().view.fallback);
    }

    #[test]
    fn test_highlight() {
        let records = dataset();
        let config = ProjectorConfig {
            highlight_firms: vec!["Sejima ".to_string()],
            ..Default::default()
        };
        let projector = GeoPointProjector::new(config);

        assert!(projector.is_highlighted(&records[4]));
        assert!(!projector.is_highlighted(&records[0]));
    }
}

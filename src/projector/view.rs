//! Camera heuristic.
//!
//! The zoom is picked from a coarse threshold table on the larger of the two
//! bounding-box spans. It ignores aspect ratio and projection distortion;
//! front-ends rely on these exact tiers, so the table is applied as-is.

use geo::BoundingRect;
use geo_types::MultiPoint;

use crate::config::ViewConfig;
use crate::models::{GeoPoint, ViewState};

/// Center on the bounding-box midpoint and pick a zoom tier for its span.
pub fn compute_view_state(points: &[GeoPoint<'_>], config: &ViewConfig) -> ViewState {
    let multi: MultiPoint<f64> = points.iter().map(GeoPoint::to_geo).collect();

    let Some(rect) = multi.bounding_rect() else {
        return config.fallback;
    };

    let center = rect.center();
    let span = rect.width().max(rect.height());

    ViewState {
        center_latitude: center.y,
        center_longitude: center.x,
        zoom_level: zoom_for_span(span, config),
    }
}

/// First tier with `span < max_span`, else the widest zoom.
pub fn zoom_for_span(span: f64, config: &ViewConfig) -> u8 {
    config
        .zoom_tiers
        .iter()
        .find(|tier| span < tier.max_span)
        .map(|tier| tier.zoom)
        .unwrap_or(config.widest_zoom)
}

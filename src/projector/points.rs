//! Coordinate parsing.

use crate::models::{GeoPoint, RawRecord};

/// Parse a `"<lat>,<lng>"` string.
///
/// Splits on the first comma; both halves must parse as finite numbers.
pub fn parse_coords(coords: &str) -> Option<(f64, f64)> {
    let (lat, lng) = coords.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;

    if lat.is_finite() && lng.is_finite() {
        Some((lat, lng))
    } else {
        None
    }
}

/// Project records onto map points, preserving order.
///
/// Records without usable coordinates are skipped without error.
pub fn parse_points<'a, I>(records: I) -> Vec<GeoPoint<'a>>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    records
        .into_iter()
        .filter_map(|record| {
            let (lat, lng) = parse_coords(record.coords.as_deref()?)?;
            Some(GeoPoint::new(lat, lng, record))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_coords(coords: Option<&str>) -> RawRecord {
        RawRecord {
            coords: coords.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_coords() {
        assert_eq!(parse_coords("40.0,-3.0"), Some((40.0, -3.0)));
        assert_eq!(parse_coords(" 41.38 , 2.17 "), Some((41.38, 2.17)));
        assert_eq!(parse_coords("1e1,2"), Some((10.0, 2.0)));
    }

    #[test]
    fn test_parse_coords_rejects_malformed() {
        assert_eq!(parse_coords(""), None);
        assert_eq!(parse_coords("40.0"), None);
        assert_eq!(parse_coords("40.0;-3.0"), None);
        assert_eq!(parse_coords("abc,def"), None);
        assert_eq!(parse_coords(",5"), None);
        assert_eq!(parse_coords("1,2,3"), None);
        assert_eq!(parse_coords("NaN,1"), None);
        assert_eq!(parse_coords("1,inf"), None);
    }

    #[test]
    fn test_mixed_batch() {
        let records = vec![
            with_coords(Some("40.0,-3.0")),
            with_coords(Some("")),
            with_coords(Some("abc,def")),
        ];

        let points = parse_points(&records);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].latitude, 40.0);
        assert_eq!(points[0].longitude, -3.0);
        assert!(std::ptr::eq(points[0].source, &records[0]));
    }

    #[test]
    fn test_order_preserved() {
        let records = vec![
            with_coords(Some("1,1")),
            with_coords(None),
            with_coords(Some("2,2")),
            with_coords(Some("no comma")),
            with_coords(Some("3,3")),
        ];

        let lats: Vec<f64> = parse_points(&records).iter().map(|p| p.latitude).collect();
        assert_eq!(lats, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_latitude_first() {
        let records = vec![with_coords(Some("-33.86,151.21"))];
        let points = parse_points(&records);
        assert_eq!(points[0].latitude, -33.86);
        assert_eq!(points[0].longitude, 151.21);
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<RawRecord> = Vec::new();
        assert!(parse_points(&records).is_empty());
    }
}

//! Geometry helpers shared by the index, scoring, and area analysis.
//!
//! Great-circle distances come from `geo`; the degree/metre conversions are
//! deliberate flat-earth approximations (see crate-level constants) because
//! the downstream scoring thresholds were tuned against them.

use geo::{Coord, Distance, Haversine, Point};

use crate::{KILOMETERS_PER_DEGREE, METERS_PER_DEGREE};

/// Great-circle distance between two coordinates in metres.
pub fn haversine_m(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b))
}

/// Approximate degree delta covering `meters` at city scale.
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Total great-circle length of a vertex chain in metres.
pub fn path_length_m(path: &[Coord<f64>]) -> f64 {
    path.windows(2).map(|pair| haversine_m(pair[0], pair[1])).sum()
}

/// Axis-aligned geographic rectangle, x = longitude, y = latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Square box of `±delta_deg` degrees around a point.
    pub fn around(point: Point<f64>, delta_deg: f64) -> Self {
        Self {
            min_lon: point.x() - delta_deg,
            min_lat: point.y() - delta_deg,
            max_lon: point.x() + delta_deg,
            max_lat: point.y() + delta_deg,
        }
    }

    /// Tight box over a set of points, `None` for an empty set.
    pub fn of(points: &[Point<f64>]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self {
            min_lon: first.x(),
            min_lat: first.y(),
            max_lon: first.x(),
            max_lat: first.y(),
        };
        for point in &points[1..] {
            bbox.min_lon = bbox.min_lon.min(point.x());
            bbox.min_lat = bbox.min_lat.min(point.y());
            bbox.max_lon = bbox.max_lon.max(point.x());
            bbox.max_lat = bbox.max_lat.max(point.y());
        }
        Some(bbox)
    }
}

/// Ray-casting point-in-polygon test. A horizontal ray is cast from the
/// point; an odd number of edge crossings means inside. Polygons with fewer
/// than three vertices never contain anything.
pub fn point_in_polygon(point: Point<f64>, polygon: &[Point<f64>]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let (px, py) = (point.x(), point.y());
    let mut inside = false;
    let mut j = polygon.len() - 1;

    for i in 0..polygon.len() {
        let (xi, yi) = (polygon[i].x(), polygon[i].y());
        let (xj, yj) = (polygon[j].x(), polygon[j].y());

        let crosses_latitude = (yi > py) != (yj > py);
        if crosses_latitude && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Polygon area in km² via the shoelace formula over raw degrees, then a
/// flat square-degree to square-kilometre conversion.
pub fn polygon_area_km2(polygon: &[Point<f64>]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..polygon.len() {
        let j = (i + 1) % polygon.len();
        sum += polygon[i].x() * polygon[j].y() - polygon[j].x() * polygon[i].y();
    }

    let area_square_degrees = (sum / 2.0).abs();
    area_square_degrees * KILOMETERS_PER_DEGREE * KILOMETERS_PER_DEGREE
}

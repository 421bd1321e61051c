//! Aggregate crime statistics for a user-drawn polygon.
//!
//! Incidents are pre-filtered with a cheap bounding-box query, then tested
//! strictly against the polygon with ray casting. The risk percentage
//! combines incident density, average severity, and the time-of-day
//! multiplier on a 0-100 scale.

use geo::Point;
use hashbrown::HashMap;
use log::debug;

use crate::MAX_RISK_SCORE;
use crate::geometry::{BoundingBox, point_in_polygon, polygon_area_km2};
use crate::index::SpatialIndex;
use crate::model::AreaAnalysis;
use crate::risk::TimeContext;

/// Severity at or above which an incident counts as high-risk.
const HIGH_RISK_SEVERITY: f64 = 7.0;
/// Scale factor mapping incidents-per-km² into the percentage range.
const DENSITY_SCALE: f64 = 100_000.0;
/// Final damping so typical urban areas do not all read as alarming.
const RISK_ATTENUATION: f64 = 0.2;

/// Analyzes all indexed incidents inside `polygon`. A polygon with fewer
/// than three vertices, or one containing no incidents, yields the
/// zero-valued analysis.
pub fn analyze_area(
    index: &SpatialIndex,
    polygon: &[Point<f64>],
    time: &TimeContext,
) -> AreaAnalysis {
    let Some(bbox) = BoundingBox::of(polygon) else {
        return AreaAnalysis::empty();
    };

    let inside: Vec<_> = index
        .stored_in_bbox(&bbox)
        .map(|stored| &stored.record)
        .filter(|record| point_in_polygon(record.point(), polygon))
        .collect();

    debug!(
        "Area query: {} incidents inside a {}-vertex polygon",
        inside.len(),
        polygon.len()
    );

    if inside.is_empty() {
        return AreaAnalysis::empty();
    }

    let crime_count = inside.len() as u32;
    let mut crime_type_counts: HashMap<String, u32> = HashMap::new();
    for record in &inside {
        *crime_type_counts.entry_ref(record.category.as_str()).or_insert(0) += 1;
    }

    let average_severity =
        inside.iter().map(|record| record.severity).sum::<f64>() / f64::from(crime_count);
    let high_risk_crime_count = inside
        .iter()
        .filter(|record| record.severity >= HIGH_RISK_SEVERITY)
        .count() as u32;

    let area_km2 = polygon_area_km2(polygon);
    let crime_density = if area_km2 > 0.0 {
        f64::from(crime_count) / area_km2
    } else {
        0.0
    };

    let risk_percentage = (crime_density
        * DENSITY_SCALE
        * average_severity
        * time.multiplier()
        * RISK_ATTENUATION)
        .clamp(0.0, MAX_RISK_SCORE)
        .round() as u32;

    AreaAnalysis {
        crime_type_counts,
        crime_count,
        average_severity,
        risk_percentage,
        high_risk_crime_count,
    }
}

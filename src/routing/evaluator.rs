//! Scores a single route candidate against the spatial index.
//!
//! The route geometry is sampled adaptively, each sample gets a local risk
//! query, and samples are integrated along the route weighted by a bell
//! curve peaked at the midpoint: risk right at the endpoints is something
//! the traveler cannot route around, so it counts for less.

use geo::Point;

use crate::error::Error;
use crate::index::SpatialIndex;
use crate::risk::RiskModel;
use crate::routing::sampler::sample_every;
use crate::{DEFAULT_RISK_RADIUS_METERS, MAX_RISK_SCORE};
use crate::{geometry::haversine_m, model::RouteInput};

/// Target spacing between risk samples in metres.
const SAMPLE_SPACING_METERS: f64 = 25.0;
/// Bounds on the adaptive sample count per route.
const MIN_SAMPLES: u32 = 20;
const MAX_SAMPLES: u32 = 400;
/// Fraction of the risk scale above which a sample counts as high-risk.
const HIGH_RISK_THRESHOLD: f64 = 0.35;
/// Fraction above which a sample is double-counted.
const SEVERE_RISK_THRESHOLD: f64 = 0.7;
/// Amplification applied after length normalization so that differences
/// between candidates stay visible, especially on short routes.
const RISK_AMPLIFICATION_FACTOR: f64 = 1.5;

/// Outcome of scoring one route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteScore {
    /// Length-normalized risk, 0-100.
    pub risk_score: f64,
    /// High-risk sample count; severe samples count twice.
    pub high_risk_segments: u32,
}

/// Number of risk samples for a route of the given length: one per 25 m,
/// between 20 and 400. Also serves as the step denominator for the
/// high-risk penalty during ranking.
pub(crate) fn adaptive_sample_count(route_length_m: f64) -> u32 {
    ((route_length_m / SAMPLE_SPACING_METERS) as u32).clamp(MIN_SAMPLES, MAX_SAMPLES)
}

/// Position weight along the route, a bell curve peaking at the midpoint.
fn positional_weight(position: f64) -> f64 {
    0.5 + 0.5 * (-16.0 * (position - 0.5) * (position - 0.5)).exp()
}

/// Scores one candidate: aggregate risk and high-risk segment count.
///
/// # Errors
///
/// Fails on empty geometry or a non-finite/negative supplied distance. The
/// ranking pipeline maps such failures to a default medium score rather
/// than aborting the request; calling this directly lets a caller tell
/// "scored zero" apart from "could not score".
pub fn evaluate_route(
    index: &SpatialIndex,
    model: &RiskModel,
    route: &RouteInput,
    time_multiplier: f64,
) -> Result<RouteScore, Error> {
    let coords = &route.geometry.0;
    if coords.is_empty() {
        return Err(Error::EmptyGeometry);
    }
    if !route.distance_m.is_finite() || route.distance_m < 0.0 {
        return Err(Error::InvalidData(format!(
            "route distance {} is not a valid length",
            route.distance_m
        )));
    }

    // Route length comes from the provider's leg distances, not from the
    // geometry, which may be simplified.
    let sample_count = adaptive_sample_count(route.distance_m);
    let sample_distance = route.distance_m / f64::from(sample_count);
    let samples = sample_every(coords, sample_distance);

    let mut risk_integral = 0.0;
    let mut sampled_length = 0.0;
    let mut high_risk_segments = 0u32;
    let position_denominator = samples.len().saturating_sub(1).max(1) as f64;

    for (idx, sample) in samples.iter().enumerate() {
        let point_risk = model.risk_at(
            index,
            Point::from(*sample),
            DEFAULT_RISK_RADIUS_METERS,
        ) * time_multiplier;

        if point_risk > MAX_RISK_SCORE * HIGH_RISK_THRESHOLD {
            // Severe points count twice, penalizing them non-linearly.
            if point_risk > MAX_RISK_SCORE * SEVERE_RISK_THRESHOLD {
                high_risk_segments += 2;
            } else {
                high_risk_segments += 1;
            }
        }

        let position = idx as f64 / position_denominator;
        let weight = positional_weight(position);

        if idx > 0 {
            let segment_length = haversine_m(samples[idx - 1], *sample);
            risk_integral += point_risk * segment_length * weight;
            sampled_length += segment_length;
        } else {
            // The first sample has no segment behind it.
            risk_integral += point_risk * weight;
        }
    }

    // Normalizing by length keeps long routes from scoring higher purely
    // because they have more samples.
    let risk_score = if sampled_length > 0.0 {
        (risk_integral / sampled_length * RISK_AMPLIFICATION_FACTOR).clamp(0.0, MAX_RISK_SCORE)
    } else {
        0.0
    };

    Ok(RouteScore {
        risk_score,
        high_risk_segments,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use geo::{LineString, coord};

    use super::*;
    use crate::model::IncidentRecord;

    const DEGREES_PER_METER: f64 = 1.0 / 111_195.0;

    fn northward_route(start: (f64, f64), length_m: f64) -> RouteInput {
        let steps = (length_m / 10.0) as usize;
        let coords: Vec<_> = (0..=steps)
            .map(|i| coord! { x: start.0, y: start.1 + i as f64 * 10.0 * DEGREES_PER_METER })
            .collect();
        RouteInput {
            geometry: LineString::new(coords),
            distance_m: length_m,
            duration_s: length_m / 1.4,
        }
    }

    fn cluster_at(lon: f64, lat: f64, count: usize) -> Vec<IncidentRecord> {
        (0..count)
            .map(|_| IncidentRecord {
                latitude: lat,
                longitude: lon,
                severity: 9.0,
                date: "2024-06-01".to_string(),
                category: "violent-crime".to_string(),
                region: None,
            })
            .collect()
    }

    fn index_of(records: Vec<IncidentRecord>) -> SpatialIndex {
        SpatialIndex::build_as_of(records, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn empty_geometry_is_an_error() {
        let route = RouteInput {
            geometry: LineString::new(Vec::new()),
            distance_m: 500.0,
            duration_s: 360.0,
        };
        let result = evaluate_route(&index_of(Vec::new()), &RiskModel::default(), &route, 1.0);
        assert!(matches!(result, Err(Error::EmptyGeometry)));
    }

    #[test]
    fn invalid_distance_is_an_error() {
        let mut route = northward_route((-0.97, 51.45), 500.0);
        route.distance_m = f64::NAN;
        let result = evaluate_route(&index_of(Vec::new()), &RiskModel::default(), &route, 1.0);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn route_through_empty_index_scores_zero() {
        let route = northward_route((-0.97, 51.45), 800.0);
        let score =
            evaluate_route(&index_of(Vec::new()), &RiskModel::default(), &route, 1.8).unwrap();
        assert_eq!(score.risk_score, 0.0);
        assert_eq!(score.high_risk_segments, 0);
    }

    #[test]
    fn route_through_hotspot_outscores_route_around_it() {
        // 800 m route: 32 samples 25 m apart, emitted every third 10 m
        // vertex, so the 390 m vertex is guaranteed to be sampled. The
        // hotspot sits exactly there.
        let hotspot_lat = 51.45 + 390.0 * DEGREES_PER_METER;
        let index = index_of(cluster_at(-0.97, hotspot_lat, 150));
        let model = RiskModel::default();

        let through = northward_route((-0.97, 51.45), 800.0);
        // Parallel route ~1 km to the east, outside the 250 m risk radius
        let around = northward_route((-0.9555, 51.45), 800.0);

        let through_score = evaluate_route(&index, &model, &through, 1.0).unwrap();
        let around_score = evaluate_route(&index, &model, &around, 1.0).unwrap();

        assert!(through_score.risk_score > around_score.risk_score);
        assert!(through_score.high_risk_segments > 0);
        assert_eq!(around_score.high_risk_segments, 0);
    }

    #[test]
    fn severe_samples_count_twice() {
        // Same geometry as above: the 390 m vertex is sampled and the
        // saturated cluster puts its raw risk exactly at the clamp (100),
        // while the neighbouring samples 30 m out stay in single digits.
        let hotspot_lat = 51.45 + 390.0 * DEGREES_PER_METER;
        let index = index_of(cluster_at(-0.97, hotspot_lat, 150));
        let model = RiskModel::default();
        let route = northward_route((-0.97, 51.45), 800.0);

        // At full multiplier the hotspot sample scores 100 (severe); at
        // half multiplier it scores 50, between the two thresholds
        let severe = evaluate_route(&index, &model, &route, 1.0).unwrap();
        let high = evaluate_route(&index, &model, &route, 0.5).unwrap();

        assert_eq!(high.high_risk_segments, 1);
        assert_eq!(severe.high_risk_segments, 2);
    }

    #[test]
    fn time_multiplier_scales_risk() {
        let midpoint_lat = 51.45 + 400.0 * DEGREES_PER_METER;
        let index = index_of(cluster_at(-0.97, midpoint_lat, 5));
        let model = RiskModel::default();
        let route = northward_route((-0.97, 51.45), 800.0);

        let day = evaluate_route(&index, &model, &route, 0.7).unwrap();
        let night = evaluate_route(&index, &model, &route, 1.8).unwrap();
        assert!(night.risk_score > day.risk_score);
    }

    #[test]
    fn sample_count_bounds() {
        assert_eq!(adaptive_sample_count(100.0), 20);
        assert_eq!(adaptive_sample_count(1000.0), 40);
        assert_eq!(adaptive_sample_count(50_000.0), 400);
    }
}

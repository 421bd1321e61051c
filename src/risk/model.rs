//! Point risk scoring from nearby incidents.
//!
//! Each incident within the search radius contributes
//! `distance_factor * severity_factor * type_weight * recency_factor *
//! severity_multiplier`; the sum is density-dampened, scaled, and clamped to
//! `[0, 100]`. The computation is total: absence of data is exactly zero
//! risk, and no input can make it fail. Under-reporting is always preferred
//! over over-reporting here, since the output drives safety-relevant
//! display.

use geo::Point;
use hashbrown::HashMap;

use crate::MAX_RISK_SCORE;
use crate::geometry::{BoundingBox, haversine_m, meters_to_degrees};
use crate::index::{SpatialIndex, StoredIncident};

/// Incidents older than this are fully decayed.
const MAX_INCIDENT_AGE_DAYS: i64 = 365 * 2;
/// Decay time constant as a fraction of [`MAX_INCIDENT_AGE_DAYS`].
const RECENCY_DECAY_CONSTANT: f64 = 0.4;
/// Extra multiplier for incidents with severity above 7.
const SEVERITY_MULTIPLIER: f64 = 1.2;
/// Floor on incident distance, avoids the inverse-square singularity.
const MIN_DISTANCE_METERS: f64 = 5.0;
/// Fewer incidents than this within the radius dampens the score; an
/// isolated incident must not read as a high-risk area.
const MIN_RISK_POINTS: usize = 3;
/// Empirical scale mapping raw contributions into the 0-100 range.
const RISK_SCALE: f64 = 12.0;

/// Category-to-weight lookup for pedestrian relevance. Static policy data
/// injected into [`RiskModel`], so the table can be swapped without touching
/// the scoring algorithm. Lookups are case-insensitive; unknown categories
/// get a conservative default.
#[derive(Debug, Clone)]
pub struct CategoryWeights {
    weights: HashMap<String, f64>,
    default_weight: f64,
}

impl CategoryWeights {
    pub fn new<I, S>(entries: I, default_weight: f64) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let weights = entries
            .into_iter()
            .map(|(category, weight)| (category.into().to_lowercase(), weight))
            .collect();
        Self {
            weights,
            default_weight,
        }
    }

    pub fn weight(&self, category: &str) -> f64 {
        self.weights
            .get(&category.to_lowercase())
            .copied()
            .unwrap_or(self.default_weight)
    }
}

impl Default for CategoryWeights {
    /// Production table: violent and weapon categories weigh the most,
    /// low-harm property categories the least.
    fn default() -> Self {
        Self::new(
            [
                ("violent-crime", 1.5),
                ("violence-and-sexual-offences", 1.5),
                ("robbery", 1.4),
                ("possession-of-weapons", 1.2),
                ("anti-social-behaviour", 1.0),
                ("criminal-damage-arson", 0.9),
                ("burglary", 0.8),
                ("drugs", 0.8),
                ("public-order", 0.7),
                ("theft-from-the-person", 0.7),
                ("vehicle-crime", 0.6),
                ("other-theft", 0.5),
                ("bicycle-theft", 0.4),
                ("other-crime", 0.4),
                ("shoplifting", 0.3),
            ],
            0.5,
        )
    }
}

/// Owns the decay and weighting policy for point risk queries.
#[derive(Debug, Clone, Default)]
pub struct RiskModel {
    weights: CategoryWeights,
}

impl RiskModel {
    pub fn new(weights: CategoryWeights) -> Self {
        Self { weights }
    }

    /// Risk at a point considering all indexed incidents within `radius_m`,
    /// on a 0 (no risk) to 100 (extremely high risk) scale.
    pub fn risk_at(&self, index: &SpatialIndex, point: Point<f64>, radius_m: f64) -> f64 {
        let bbox = BoundingBox::around(point, meters_to_degrees(radius_m));

        // Bounding-box pre-filter, then exact great-circle cut at the radius.
        let nearby: Vec<(&StoredIncident, f64)> = index
            .stored_in_bbox(&bbox)
            .filter_map(|stored| {
                let distance =
                    haversine_m(point.0, stored.record.point().0).max(MIN_DISTANCE_METERS);
                (distance <= radius_m).then_some((stored, distance))
            })
            .collect();

        if nearby.is_empty() {
            return 0.0;
        }

        let total: f64 = nearby
            .iter()
            .map(|(stored, distance)| self.contribution(index, stored, *distance))
            .sum();

        let density_factor = if nearby.len() < MIN_RISK_POINTS {
            nearby.len() as f64 / MIN_RISK_POINTS as f64
        } else {
            1.0
        };

        (total * density_factor * RISK_SCALE).clamp(0.0, MAX_RISK_SCORE)
    }

    fn contribution(&self, index: &SpatialIndex, stored: &StoredIncident, distance_m: f64) -> f64 {
        // Inverse-square falloff; distance is already floored at 5 m.
        let distance_factor = 1.0 / distance_m.powi(2);
        // Severity 0-10 maps to 0.1-1.1.
        let severity_factor = 0.1 + stored.record.severity / 10.0;
        let type_weight = self.weights.weight(&stored.record.category);
        let recency_factor = recency_factor(index.days_old(stored));
        let severity_multiplier = if stored.record.severity > 7.0 {
            SEVERITY_MULTIPLIER
        } else {
            1.0
        };

        distance_factor * severity_factor * type_weight * recency_factor * severity_multiplier
    }
}

/// Exponential decay by incident age. Today or future-dated incidents count
/// in full; undated incidents are treated as maximally old.
fn recency_factor(days_old: Option<i64>) -> f64 {
    let days = days_old.unwrap_or(MAX_INCIDENT_AGE_DAYS);
    if days <= 0 {
        1.0
    } else {
        (-(days as f64) / (MAX_INCIDENT_AGE_DAYS as f64 * RECENCY_DECAY_CONSTANT)).exp()
    }
}

//! Mode-dependent ranking of scored route candidates.
//!
//! Speed mode is a hard guarantee: the fastest candidate wins, full stop,
//! independent of risk normalization noise. Safety mode runs the richer
//! multi-factor cost so the choice reads as "mostly safe, but not absurdly
//! long". This split is deliberate; a single continuous weight would let
//! risk noise leak into the fastest-route promise.

use geo::{LineString, Point};
use itertools::{Itertools, MinMaxResult};

use crate::WALKING_SPEED_MPS;
use crate::error::Error;
use crate::geometry::haversine_m;
use crate::model::{RankedRoutes, RouteCandidate, RouteInput};
use crate::routing::evaluator::adaptive_sample_count;

/// Weight given to the safety component in safety-preferred mode.
const SAFETY_WEIGHT: f64 = 0.95;
/// Share of the efficiency component driven by duration (the rest is
/// distance) once safety dominates.
const TIME_WEIGHT: f64 = 0.25;
/// Floor for the distance scaling factor, keeps the efficiency signal
/// non-degenerate when all candidates are nearly equal length.
const MIN_SCALING_FACTOR: f64 = 0.3;
/// Penalty weight per high-risk step share.
const HIGH_RISK_PENALTY: f64 = 0.4;
/// Center of the logistic safety curve in relative-risk space. The curve
/// is steep on purpose: small differences near this threshold swing the
/// cost sharply away from moderately-risky routes.
const RISK_LOGISTIC_CENTER: f64 = 0.4;
const RISK_LOGISTIC_STEEPNESS: f64 = 10.0;
/// Maximum number of alternatives returned beside the best route.
const MAX_ALTERNATIVES: usize = 2;

/// Selection policy for route ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePreference {
    /// Minimize exposure to reported crime, tempered by efficiency.
    Safety,
    /// Fastest route wins unconditionally; risk is computed for display
    /// only.
    Speed,
}

/// Ranks scored candidates into a best route and up to two alternatives.
///
/// # Errors
///
/// [`Error::NoCandidates`] when the input is empty. The caller is expected
/// to substitute a straight-line fallback (see [`straight_line_route`])
/// rather than fail the user-facing request.
pub fn rank_routes(
    candidates: Vec<RouteCandidate>,
    preference: RoutePreference,
) -> Result<RankedRoutes, Error> {
    if candidates.is_empty() {
        return Err(Error::NoCandidates);
    }

    Ok(match preference {
        RoutePreference::Speed => rank_by_duration(candidates),
        RoutePreference::Safety => rank_by_safety_cost(candidates),
    })
}

fn rank_by_duration(mut candidates: Vec<RouteCandidate>) -> RankedRoutes {
    candidates.sort_by(|a, b| a.duration_s.total_cmp(&b.duration_s));
    let best = candidates.remove(0);
    candidates.truncate(MAX_ALTERNATIVES);
    RankedRoutes {
        best,
        alternatives: candidates,
    }
}

fn rank_by_safety_cost(candidates: Vec<RouteCandidate>) -> RankedRoutes {
    let (min_dist, max_dist) = min_max(candidates.iter().map(|c| c.distance_m));
    let (min_duration, max_duration) = min_max(candidates.iter().map(|c| c.duration_s));
    let (min_risk, max_risk) = min_max(candidates.iter().map(|c| c.risk_score));

    let distance_scaling_factor = if max_dist > 0.0 {
        ((max_dist - min_dist) / max_dist).clamp(MIN_SCALING_FACTOR, 1.0)
    } else {
        MIN_SCALING_FACTOR
    };

    let mut ranked: Vec<(RouteCandidate, f64)> = candidates
        .into_iter()
        .map(|candidate| {
            let normalized_distance =
                (candidate.distance_m - min_dist) / (max_dist - min_dist).max(1.0);
            let normalized_duration =
                (candidate.duration_s - min_duration) / (max_duration - min_duration).max(1.0);
            // Risk is re-scaled relative to this batch of candidates; the
            // epsilon keeps a uniform batch from dividing by zero.
            let relative_risk = (candidate.risk_score - min_risk) / (max_risk - min_risk + 1e-3);

            let cost = safety_cost(
                relative_risk,
                normalized_distance,
                normalized_duration,
                distance_scaling_factor,
            ) + high_risk_penalty(&candidate);

            log::debug!(
                "Safety cost {cost:.4} for candidate ({:.0} m, {:.0} s, risk {:.1}, {} high-risk steps)",
                candidate.distance_m,
                candidate.duration_s,
                candidate.risk_score,
                candidate.high_risk_segments
            );

            (candidate, cost)
        })
        .collect();

    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut ordered: Vec<RouteCandidate> =
        ranked.into_iter().map(|(candidate, _)| candidate).collect();
    let best = ordered.remove(0);
    ordered.truncate(MAX_ALTERNATIVES);
    RankedRoutes {
        best,
        alternatives: ordered,
    }
}

fn safety_cost(
    relative_risk: f64,
    normalized_distance: f64,
    normalized_duration: f64,
    distance_scaling_factor: f64,
) -> f64 {
    let safety_component = SAFETY_WEIGHT
        / (1.0 + (-RISK_LOGISTIC_STEEPNESS * (relative_risk - RISK_LOGISTIC_CENTER)).exp());

    let efficiency_raw =
        TIME_WEIGHT * normalized_duration + (1.0 - TIME_WEIGHT) * normalized_distance;
    let efficiency_component = (1.0 - SAFETY_WEIGHT) * efficiency_raw * distance_scaling_factor;

    safety_component + efficiency_component
}

/// Penalty proportional to the share of high-risk steps. The denominator is
/// the adaptive sample count the evaluator used for this distance.
fn high_risk_penalty(candidate: &RouteCandidate) -> f64 {
    if candidate.high_risk_segments == 0 {
        return 0.0;
    }
    let total_steps = adaptive_sample_count(candidate.distance_m);
    HIGH_RISK_PENALTY * f64::from(candidate.high_risk_segments) / f64::from(total_steps)
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    match values.minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => (0.0, 0.0),
        MinMaxResult::OneElement(value) => (value, value),
        MinMaxResult::MinMax(min, max) => (min, max),
    }
}

/// Builds the straight-line fallback the caller substitutes when no
/// candidates are available: direct haversine distance and a duration
/// estimated from a fixed walking speed.
pub fn straight_line_route(origin: Point<f64>, dest: Point<f64>) -> RouteInput {
    let distance_m = haversine_m(origin.0, dest.0);
    RouteInput {
        geometry: LineString::from(vec![origin, dest]),
        distance_m,
        duration_s: distance_m / WALKING_SPEED_MPS,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::{LineString, coord};

    use super::*;

    fn candidate(
        distance_m: f64,
        duration_s: f64,
        risk_score: f64,
        high_risk_segments: u32,
    ) -> RouteCandidate {
        RouteCandidate {
            geometry: LineString::new(vec![
                coord! { x: -0.97, y: 51.45 },
                coord! { x: -0.96, y: 51.46 },
            ]),
            distance_m,
            duration_s,
            risk_score,
            high_risk_segments,
        }
    }

    #[test]
    fn empty_input_signals_no_candidates() {
        let result = rank_routes(Vec::new(), RoutePreference::Speed);
        assert!(matches!(result, Err(Error::NoCandidates)));
    }

    #[test]
    fn speed_mode_picks_global_minimum_duration() {
        // Riskiest candidate is also the fastest; speed mode must still
        // pick it
        for count in 1..=10u32 {
            let candidates: Vec<_> = (0..count)
                .map(|i| {
                    candidate(
                        1000.0 + f64::from(i) * 37.0,
                        600.0 + f64::from((i * 7) % 13) * 60.0,
                        90.0 - f64::from(i),
                        3,
                    )
                })
                .collect();
            let min_duration = candidates
                .iter()
                .map(|c| c.duration_s)
                .fold(f64::INFINITY, f64::min);

            let ranked = rank_routes(candidates, RoutePreference::Speed).unwrap();
            assert_eq!(ranked.best.duration_s, min_duration);
            assert!(ranked.alternatives.len() <= 2);
        }
    }

    #[test]
    fn speed_mode_alternatives_sorted_by_duration() {
        let candidates = vec![
            candidate(1000.0, 900.0, 10.0, 0),
            candidate(1100.0, 600.0, 20.0, 0),
            candidate(1200.0, 800.0, 30.0, 0),
            candidate(1300.0, 700.0, 40.0, 0),
        ];
        let ranked = rank_routes(candidates, RoutePreference::Speed).unwrap();
        assert_eq!(ranked.best.duration_s, 600.0);
        assert_eq!(ranked.alternatives.len(), 2);
        assert_eq!(ranked.alternatives[0].duration_s, 700.0);
        assert_eq!(ranked.alternatives[1].duration_s, 800.0);
    }

    #[test]
    fn safety_mode_avoids_risky_route_for_modest_detour() {
        let risky_short = candidate(1000.0, 720.0, 80.0, 6);
        let safe_detour = candidate(1300.0, 940.0, 15.0, 0);
        let ranked =
            rank_routes(vec![risky_short, safe_detour.clone()], RoutePreference::Safety).unwrap();
        assert_eq!(ranked.best, safe_detour);
    }

    #[test]
    fn safety_mode_never_picks_dominated_candidate() {
        // Max risk AND max distance, with a non-dominated alternative
        let dominated = candidate(2000.0, 1400.0, 95.0, 8);
        let better = candidate(1200.0, 900.0, 30.0, 0);
        let middling = candidate(1500.0, 1000.0, 55.0, 2);

        let ranked = rank_routes(
            vec![dominated.clone(), better, middling],
            RoutePreference::Safety,
        )
        .unwrap();
        assert_ne!(ranked.best, dominated);
    }

    #[test]
    fn single_candidate_wins_either_mode() {
        let only = candidate(1000.0, 700.0, 50.0, 1);
        for preference in [RoutePreference::Safety, RoutePreference::Speed] {
            let ranked = rank_routes(vec![only.clone()], preference).unwrap();
            assert_eq!(ranked.best, only);
            assert!(ranked.alternatives.is_empty());
        }
    }

    #[test]
    fn high_risk_penalty_scales_with_step_share() {
        assert_eq!(high_risk_penalty(&candidate(1000.0, 700.0, 50.0, 0)), 0.0);
        // 1000 m route has 40 adaptive steps
        let penalty = high_risk_penalty(&candidate(1000.0, 700.0, 50.0, 10));
        assert_relative_eq!(penalty, 0.4 * 10.0 / 40.0, max_relative = 1e-12);
    }

    #[test]
    fn straight_line_fallback_uses_walking_speed() {
        let origin = Point::new(-0.97, 51.45);
        let dest = Point::new(-0.97, 51.46);
        let fallback = straight_line_route(origin, dest);

        assert_eq!(fallback.geometry.0.len(), 2);
        assert_relative_eq!(
            fallback.duration_s,
            fallback.distance_m / 1.4,
            max_relative = 1e-12
        );
        // One hundredth of a degree of latitude is about 1.1 km
        assert_relative_eq!(fallback.distance_m, 1_112.0, max_relative = 1e-3);
    }
}

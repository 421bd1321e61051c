//! Adaptive path sampling.
//!
//! Dense provider geometry is thinned to roughly one vertex per step
//! distance before risk scoring. This is a lossy simplification for
//! performance, not a geometric resampling: emitted spacing is "at least
//! `step_m` per pair", never exact.

use geo::Coord;

use crate::geometry::haversine_m;

/// Thins a vertex chain to samples at least `step_m` apart. The first
/// vertex is always retained; a vertex is emitted whenever the accumulated
/// great-circle distance since the last emission reaches `step_m`.
/// Degenerate input (fewer than two vertices) is returned unchanged.
pub fn sample_every(path: &[Coord<f64>], step_m: f64) -> Vec<Coord<f64>> {
    if path.len() < 2 {
        return path.to_vec();
    }

    let mut samples = vec![path[0]];
    let mut accumulated = 0.0;

    for pair in path.windows(2) {
        accumulated += haversine_m(pair[0], pair[1]);
        if accumulated >= step_m {
            samples.push(pair[1]);
            accumulated = 0.0;
        }
    }

    samples
}

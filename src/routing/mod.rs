//! Route scoring and ranking pipeline.
//!
//! Candidates arrive pre-computed from an external directions provider;
//! this module scores each one against the spatial index (in parallel) and
//! ranks the batch under the caller's safety/speed preference. One bad
//! candidate never aborts the request: a candidate that cannot be scored
//! keeps a default medium risk and stays rankable.

pub mod evaluator;
pub mod ranker;
pub mod sampler;

pub use evaluator::{RouteScore, evaluate_route};
pub use ranker::{RoutePreference, rank_routes, straight_line_route};
pub use sampler::sample_every;

use log::warn;
use rayon::prelude::*;

use crate::error::Error;
use crate::index::SpatialIndex;
use crate::model::{RankedRoutes, RouteCandidate, RouteInput};
use crate::risk::{RiskModel, TimeContext};
use crate::DEFAULT_RISK_SCORE;

/// Scores every candidate and ranks the batch.
///
/// The time context is snapshotted once for the whole batch, so a
/// simulation control moving mid-evaluation cannot skew individual
/// candidates against each other.
///
/// # Errors
///
/// [`Error::NoCandidates`] when `inputs` is empty; the caller should fall
/// back to [`straight_line_route`] and re-enter the pipeline with it.
pub fn evaluate_and_rank(
    index: &SpatialIndex,
    model: &RiskModel,
    time: &TimeContext,
    inputs: Vec<RouteInput>,
    preference: RoutePreference,
) -> Result<RankedRoutes, Error> {
    if inputs.is_empty() {
        return Err(Error::NoCandidates);
    }

    let time_multiplier = time.multiplier();

    let candidates: Vec<RouteCandidate> = inputs
        .into_par_iter()
        .map(|input| match evaluate_route(index, model, &input, time_multiplier) {
            Ok(score) => {
                RouteCandidate::from_input(input, score.risk_score, score.high_risk_segments)
            }
            Err(err) => {
                // Degrade to a low-confidence default instead of aborting
                // the whole ranking.
                warn!("Could not score candidate ({err}), assigning default medium risk");
                RouteCandidate::from_input(input, DEFAULT_RISK_SCORE, 0)
            }
        })
        .collect();

    rank_routes(candidates, preference)
}

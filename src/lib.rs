//! Core engine for crime-aware pedestrian route choice.
//!
//! The crate indexes historical incident records in an immutable spatial
//! tree, converts nearby incidents into a bounded risk score at a point or
//! along a path, and ranks externally supplied route candidates under a
//! safety/speed tradeoff. All I/O (fetching incidents, fetching route
//! geometries) happens before these components are invoked; everything here
//! is a pure function over an immutable index and is safe to call from any
//! number of threads.

pub mod algo;
pub mod error;
pub mod geometry;
pub mod index;
pub mod model;
pub mod prelude;
pub mod risk;
pub mod routing;

pub use error::Error;
pub use index::SpatialIndex;
pub use model::{AreaAnalysis, IncidentRecord, RankedRoutes, RouteCandidate, RouteInput};
pub use risk::{CategoryWeights, RiskModel, TimeContext};
pub use routing::{RoutePreference, evaluate_and_rank};

/// Quick metres-to-degrees conversion used for radius and bounding-box
/// queries. A flat-earth approximation: error grows with latitude magnitude,
/// acceptable at city scale, not valid near the poles. The exact value is
/// load-bearing for the scoring thresholds, so it is not latitude-corrected.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Kilometres per degree, used when converting square-degree polygon areas
/// to square kilometres. Same approximation caveats as [`METERS_PER_DEGREE`].
pub const KILOMETERS_PER_DEGREE: f64 = 111.0;

/// Upper bound of the risk scale. Scores are clamped to `[0, MAX_RISK_SCORE]`.
pub const MAX_RISK_SCORE: f64 = 100.0;

/// Search radius around a sample point when scoring routes.
pub const DEFAULT_RISK_RADIUS_METERS: f64 = 250.0;

/// Risk score assigned to a candidate whose evaluation failed. A medium
/// value: the candidate stays rankable without reading as verified-safe.
pub const DEFAULT_RISK_SCORE: f64 = 50.0;

/// Assumed pedestrian speed (5 km/h) for straight-line fallback durations.
pub const WALKING_SPEED_MPS: f64 = 1.4;

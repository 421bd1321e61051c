// Re-export key components
pub use crate::algo::analyze_area;
pub use crate::error::Error;
pub use crate::geometry::BoundingBox;
pub use crate::index::SpatialIndex;
pub use crate::model::{AreaAnalysis, IncidentRecord, RankedRoutes, RouteCandidate, RouteInput};
pub use crate::risk::{CategoryWeights, RiskModel, TimeContext, TimePeriod, TimeRiskLevel};
pub use crate::routing::{
    RoutePreference, RouteScore, evaluate_and_rank, evaluate_route, rank_routes, sample_every,
    straight_line_route,
};

// Shared scale constants
pub use crate::{DEFAULT_RISK_RADIUS_METERS, MAX_RISK_SCORE, WALKING_SPEED_MPS};

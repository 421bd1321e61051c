use geo::LineString;

/// An unscored route candidate as supplied by an external directions
/// provider: geometry plus the provider's own distance and duration.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInput {
    /// Ordered route vertices, x = longitude, y = latitude.
    pub geometry: LineString<f64>,
    pub distance_m: f64,
    pub duration_s: f64,
}

/// A scored route candidate. Created per routing request and discarded once
/// the caller has consumed the ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    pub geometry: LineString<f64>,
    pub distance_m: f64,
    pub duration_s: f64,
    /// Normalized risk score, 0-100, higher is more dangerous.
    pub risk_score: f64,
    /// Count of high-risk sample points along the route; severe points are
    /// double-counted.
    pub high_risk_segments: u32,
}

impl RouteCandidate {
    pub(crate) fn from_input(input: RouteInput, risk_score: f64, high_risk_segments: u32) -> Self {
        Self {
            geometry: input.geometry,
            distance_m: input.distance_m,
            duration_s: input.duration_s,
            risk_score,
            high_risk_segments,
        }
    }
}

/// Result of ranking: a single best route plus at most two alternatives in
/// preference order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRoutes {
    pub best: RouteCandidate,
    pub alternatives: Vec<RouteCandidate>,
}

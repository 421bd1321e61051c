//! Data model for incident records, route candidates, and area analyses.

pub mod area;
pub mod incident;
pub mod route;

pub use area::AreaAnalysis;
pub use incident::IncidentRecord;
pub use route::{RankedRoutes, RouteCandidate, RouteInput};

pub(crate) use incident::parse_incident_date;

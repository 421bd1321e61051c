use hashbrown::HashMap;
use serde::Serialize;

/// Aggregate crime statistics for a user-defined polygon. Computed on
/// demand, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AreaAnalysis {
    /// Incident count per category inside the polygon.
    pub crime_type_counts: HashMap<String, u32>,
    pub crime_count: u32,
    pub average_severity: f64,
    /// Overall risk for the area, 0-100.
    pub risk_percentage: u32,
    /// Incidents with severity >= 7.0.
    pub high_risk_crime_count: u32,
}

impl AreaAnalysis {
    /// Zero-valued analysis for an area with no incidents. Absence of data
    /// must never read as risk.
    pub fn empty() -> Self {
        Self::default()
    }
}

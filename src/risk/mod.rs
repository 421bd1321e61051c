//! Risk scoring policy: incident decay model and time-of-day context.

pub mod model;
pub mod time;

pub use model::{CategoryWeights, RiskModel};
pub use time::{TimeContext, TimePeriod, TimeRiskLevel, multiplier_for_hour};

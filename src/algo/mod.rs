//! Higher-level analyses built on the spatial index.

pub mod area_risk;

pub use area_risk::analyze_area;

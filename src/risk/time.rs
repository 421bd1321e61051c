//! Time-of-day risk context.
//!
//! A [`TimeContext`] is a small value snapshot: either the wall clock or a
//! simulated hour set by a user-facing control. Callers take one snapshot
//! per evaluation, so a simulation slider moving mid-computation can never
//! change a score halfway through.

use chrono::{Local, Timelike};

/// Display label for a block of the day. Not consumed by scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePeriod {
    Night,
    Morning,
    MidMorning,
    Afternoon,
    Evening,
}

impl TimePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Night => "Night",
            TimePeriod::Morning => "Morning",
            TimePeriod::MidMorning => "Mid-morning",
            TimePeriod::Afternoon => "Afternoon",
            TimePeriod::Evening => "Evening",
        }
    }
}

/// Coarse risk band derived from the hour multiplier, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRiskLevel {
    Low,
    Medium,
    High,
}

impl TimeRiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRiskLevel::Low => "Low",
            TimeRiskLevel::Medium => "Medium",
            TimeRiskLevel::High => "High",
        }
    }
}

/// Risk multiplier for an hour of day. Night hours weigh heaviest, midday
/// the least.
pub fn multiplier_for_hour(hour: u32) -> f64 {
    match hour % 24 {
        0..=5 => 1.8,
        6..=8 => 1.0,
        9..=16 => 0.7,
        17..=19 => 1.1,
        _ => 1.5, // 20..=23
    }
}

/// Human label for an hour of day.
pub fn period_for_hour(hour: u32) -> TimePeriod {
    match hour % 24 {
        0..=5 => TimePeriod::Night,
        6..=8 => TimePeriod::Morning,
        9..=11 => TimePeriod::MidMorning,
        12..=16 => TimePeriod::Afternoon,
        17..=19 => TimePeriod::Evening,
        _ => TimePeriod::Night, // 20..=23
    }
}

/// Hour source for risk evaluation: real wall-clock time, or a simulated
/// hour supplied by a time-simulation control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeContext {
    simulated_hour: Option<u32>,
}

impl TimeContext {
    pub fn real_time() -> Self {
        Self::default()
    }

    pub fn simulated(hour: u32) -> Self {
        Self {
            simulated_hour: Some(hour % 24),
        }
    }

    /// The simulated hour if set, otherwise the current local hour.
    pub fn effective_hour(&self) -> u32 {
        self.simulated_hour
            .unwrap_or_else(|| Local::now().hour())
    }

    pub fn multiplier(&self) -> f64 {
        multiplier_for_hour(self.effective_hour())
    }

    pub fn period(&self) -> TimePeriod {
        period_for_hour(self.effective_hour())
    }

    pub fn risk_level(&self) -> TimeRiskLevel {
        let multiplier = self.multiplier();
        if multiplier >= 1.5 {
            TimeRiskLevel::High
        } else if multiplier >= 1.0 {
            TimeRiskLevel::Medium
        } else {
            TimeRiskLevel::Low
        }
    }
}

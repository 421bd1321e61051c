use chrono::NaiveDate;
use geo::Point;
use serde::{Deserialize, Serialize};

/// One reported incident, as delivered by the external data-access layer.
/// Immutable once loaded: records are created in a batch at index-build time
/// and discarded together with the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub latitude: f64,
    pub longitude: f64,
    /// Severity on a 0-10 scale.
    pub severity: f64,
    /// Raw upstream date string, "YYYY-MM-DD" or "YYYY-MM". Parsed leniently
    /// once at index build; unparseable dates read as maximally old.
    pub date: String,
    pub category: String,
    /// Optional district label (e.g. a borough) carried for grouping.
    #[serde(default)]
    pub region: Option<String>,
}

impl IncidentRecord {
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

/// Lenient date parsing: full ISO date first, then a "YYYY-MM" prefix
/// pinned to the first of the month. Anything else is `None`.
pub(crate) fn parse_incident_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    let year_month = raw.get(..7)?;
    NaiveDate::parse_from_str(&format!("{year_month}-01"), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_iso_date() {
        assert_eq!(
            parse_incident_date("2024-05-14"),
            NaiveDate::from_ymd_opt(2024, 5, 14)
        );
    }

    #[test]
    fn year_month_pins_to_first_of_month() {
        assert_eq!(
            parse_incident_date("2024-05"),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
    }

    #[test]
    fn rejects_blank_and_garbage() {
        assert_eq!(parse_incident_date(""), None);
        assert_eq!(parse_incident_date("   "), None);
        assert_eq!(parse_incident_date("not-a-date"), None);
        assert_eq!(parse_incident_date("24-1"), None);
    }

    #[test]
    fn deserializes_without_region() {
        let record: IncidentRecord = serde_json::from_str(
            r#"{"latitude": 51.45, "longitude": -0.97, "severity": 6.0,
                "date": "2024-03", "category": "burglary"}"#,
        )
        .unwrap();
        assert_eq!(record.region, None);
        assert_eq!(record.point(), Point::new(-0.97, 51.45));
    }
}

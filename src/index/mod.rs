//! Immutable spatial index over incident records.
//!
//! Records are bulk-loaded once into an R*-tree keyed by (longitude,
//! latitude). The index is never mutated after construction, so it can be
//! shared across any number of concurrent readers without synchronization;
//! loading a fresh incident batch means building a new index.

use chrono::{Local, NaiveDate};
use log::info;
use rstar::{AABB, RTree, primitives::GeomWithData};

use crate::geometry::BoundingBox;
use crate::model::{IncidentRecord, parse_incident_date};

type TreeEntry = GeomWithData<[f64; 2], usize>;

/// An incident record with its date parsed once at build time.
#[derive(Debug, Clone)]
pub(crate) struct StoredIncident {
    pub record: IncidentRecord,
    pub date: Option<NaiveDate>,
}

pub struct SpatialIndex {
    tree: RTree<TreeEntry>,
    incidents: Vec<StoredIncident>,
    /// Reference date for recency: incident age is measured against the day
    /// the index was built, keeping risk scores stable for its lifetime.
    built_on: NaiveDate,
}

impl SpatialIndex {
    /// Bulk-loads a batch of records. An empty batch yields a valid index
    /// with zero incidents; there is no error path.
    pub fn build(records: Vec<IncidentRecord>) -> Self {
        Self::build_as_of(records, Local::now().date_naive())
    }

    pub(crate) fn build_as_of(records: Vec<IncidentRecord>, built_on: NaiveDate) -> Self {
        let incidents: Vec<StoredIncident> = records
            .into_iter()
            .map(|record| {
                let date = parse_incident_date(&record.date);
                StoredIncident { record, date }
            })
            .collect();

        let entries: Vec<TreeEntry> = incidents
            .iter()
            .enumerate()
            .map(|(i, stored)| {
                TreeEntry::new([stored.record.longitude, stored.record.latitude], i)
            })
            .collect();

        info!("Built spatial index with {} incident records", incidents.len());

        Self {
            tree: RTree::bulk_load(entries),
            incidents,
            built_on,
        }
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// All records whose point falls inside the rectangle (boundary
    /// inclusive).
    pub fn query_bbox(
        &self,
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> Vec<&IncidentRecord> {
        self.stored_in_bbox(&BoundingBox {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
        .map(|stored| &stored.record)
        .collect()
    }

    pub(crate) fn stored_in_bbox<'a>(
        &'a self,
        bbox: &BoundingBox,
    ) -> impl Iterator<Item = &'a StoredIncident> {
        let envelope =
            AABB::from_corners([bbox.min_lon, bbox.min_lat], [bbox.max_lon, bbox.max_lat]);
        self.tree
            .locate_in_envelope(&envelope)
            .map(move |entry| &self.incidents[entry.data])
    }

    /// Days between the index build date and the incident date. Undated or
    /// future-dated incidents are the caller's concern; this just subtracts.
    pub(crate) fn days_old(&self, stored: &StoredIncident) -> Option<i64> {
        stored.date.map(|date| (self.built_on - date).num_days())
    }
}

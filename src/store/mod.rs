//! In-memory sample store.
//!
//! Holds every ingested [`SampleRecord`] keyed by sample id for the lifetime
//! of the process. Records are immutable once inserted; re-ingesting an id
//! replaces the whole record. The query path only ever reads, so concurrent
//! lookups need no coordination beyond the web layer's `RwLock` around
//! ingestion.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::sample::SampleRecord;
use crate::core::types::SampleId;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Sample '{0}' not found")]
    NotFound(SampleId),
}

impl StoreError {
    /// The id the failed lookup was for
    pub fn sample_id(&self) -> &SampleId {
        match self {
            Self::NotFound(id) => id,
        }
    }
}

/// The in-memory collection of sample records
#[derive(Debug, Default)]
pub struct SampleStore {
    /// All records, in first-ingestion order
    records: Vec<SampleRecord>,

    /// Index: sample id -> index in records vec
    id_to_index: HashMap<SampleId, usize>,

    /// When the store last accepted a record
    last_ingest: Option<DateTime<Utc>>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any existing record with the same id.
    /// Returns true if an existing record was replaced.
    pub fn insert(&mut self, record: SampleRecord) -> bool {
        self.last_ingest = Some(Utc::now());

        if let Some(&index) = self.id_to_index.get(&record.id) {
            self.records[index] = record;
            return true;
        }

        self.id_to_index.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        false
    }

    /// Look up a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the id was never ingested.
    pub fn lookup(&self, id: &SampleId) -> Result<&SampleRecord, StoreError> {
        self.id_to_index
            .get(id)
            .map(|&index| &self.records[index])
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// All records in first-ingestion order
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last_ingest(&self) -> Option<DateTime<Utc>> {
        self.last_ingest
    }

    /// Mean sample age, or None when the store is empty
    pub fn average_age(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }

        let total: u64 = self.records.iter().map(|r| u64::from(r.age)).sum();
        #[allow(clippy::cast_precision_loss)]
        Some(total as f64 / self.records.len() as f64)
    }

    /// Number of records per region, sorted by region name
    pub fn region_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.region.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

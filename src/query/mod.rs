//! Query facade: sample id in, sequence or similarity out.
//!
//! Thin coordination layer over the store, the synthesizer, and the
//! comparator. All errors are terminal for the request; nothing here
//! retries, because a second attempt would deterministically produce the
//! identical answer or the identical failure.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::compare::{self, SimilarityResult};
use crate::core::sequence::{DnaSequence, DEFAULT_SEQUENCE_LENGTH};
use crate::core::types::SampleId;
use crate::store::{SampleStore, StoreError};
use crate::synth::{self, SynthError};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error(transparent)]
    NotFound(#[from] StoreError),

    #[error(transparent)]
    Synthesis(#[from] SynthError),
}

/// Concurrency-safe cache of synthesized sequences, keyed by (seed, length).
///
/// Synthesis is pure, so a cached entry is valid forever and needs no
/// invalidation. Two requests may race to populate the same key; both
/// compute the identical value, so last-writer-wins is harmless.
#[derive(Debug, Default)]
pub struct SequenceCache {
    inner: RwLock<HashMap<(u64, usize), DnaSequence>>,
}

impl SequenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_or_generate(&self, seed: u64, length: usize) -> DnaSequence {
        if let Ok(cache) = self.inner.read() {
            if let Some(sequence) = cache.get(&(seed, length)) {
                return sequence.clone();
            }
        }

        let sequence = synth::generate(seed, length);
        if let Ok(mut cache) = self.inner.write() {
            cache.insert((seed, length), sequence.clone());
        }
        sequence
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.read().map(|c| c.len()).unwrap_or(0)
    }
}

/// Coordinates lookups, synthesis, and comparison for one request
pub struct QueryFacade<'a> {
    store: &'a SampleStore,
    cache: &'a SequenceCache,
    length: usize,
}

impl<'a> QueryFacade<'a> {
    pub fn new(store: &'a SampleStore, cache: &'a SequenceCache) -> Self {
        Self {
            store,
            cache,
            length: DEFAULT_SEQUENCE_LENGTH,
        }
    }

    /// Override the synthesis length (sequences of different lengths are
    /// only comparable over their overlapping prefix)
    #[must_use]
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Synthesize the sequence for one sample.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id was never ingested; `InvalidSeed` if the
    /// record's seed tag is empty.
    pub fn sequence_for(&self, id: &SampleId) -> Result<DnaSequence, QueryError> {
        let record = self.store.lookup(id)?;
        let seed = synth::derive_seed(record)?;
        Ok(self.cache.get_or_generate(seed, self.length))
    }

    /// Compare the sequences of two samples.
    ///
    /// Each lookup fails independently with its own `NotFound`.
    pub fn compare(&self, id1: &SampleId, id2: &SampleId) -> Result<SimilarityResult, QueryError> {
        let a = self.sequence_for(id1)?;
        let b = self.sequence_for(id2)?;
        Ok(compare::score_identified(id1.clone(), id2.clone(), &a, &b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::SampleRecord;

    fn fixture_store() -> SampleStore {
        let mut store = SampleStore::new();
        store.insert(SampleRecord::new("S001", "Siberia", 24000, "tag-1"));
        store.insert(SampleRecord::new("S002", "Altai", 40000, "tag-2"));
        store.insert(SampleRecord::new("S003", "Iberia", 6000, ""));
        store
    }

    #[test]
    fn test_sequence_for_is_reproducible() {
        let store = fixture_store();
        let cache = SequenceCache::new();
        let facade = QueryFacade::new(&store, &cache);

        let first = facade.sequence_for(&SampleId::new("S001")).unwrap();
        let second = facade.sequence_for(&SampleId::new("S001")).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), DEFAULT_SEQUENCE_LENGTH);
    }

    #[test]
    fn test_sequence_for_unknown_id() {
        let store = fixture_store();
        let cache = SequenceCache::new();
        let facade = QueryFacade::new(&store, &cache);

        let err = facade.sequence_for(&SampleId::new("nonexistent-id")).unwrap_err();
        assert_eq!(
            err,
            QueryError::NotFound(StoreError::NotFound(SampleId::new("nonexistent-id")))
        );
    }

    #[test]
    fn test_sequence_for_empty_seed_tag() {
        let store = fixture_store();
        let cache = SequenceCache::new();
        let facade = QueryFacade::new(&store, &cache);

        let err = facade.sequence_for(&SampleId::new("S003")).unwrap_err();
        assert!(matches!(err, QueryError::Synthesis(SynthError::InvalidSeed(_))));
    }

    #[test]
    fn test_compare_self_is_100() {
        let store = fixture_store();
        let cache = SequenceCache::new();
        let facade = QueryFacade::new(&store, &cache);

        let result = facade
            .compare(&SampleId::new("S001"), &SampleId::new("S001"))
            .unwrap();
        assert!((result.similarity - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compare_two_samples_in_range() {
        let store = fixture_store();
        let cache = SequenceCache::new();
        let facade = QueryFacade::new(&store, &cache).with_length(10);

        let result = facade
            .compare(&SampleId::new("S001"), &SampleId::new("S002"))
            .unwrap();
        assert!((0.0..=100.0).contains(&result.similarity));
        assert_eq!(result.compared_length, 10);
    }

    #[test]
    fn test_compare_reports_missing_id() {
        let store = fixture_store();
        let cache = SequenceCache::new();
        let facade = QueryFacade::new(&store, &cache);

        let err = facade
            .compare(&SampleId::new("S001"), &SampleId::new("S999"))
            .unwrap_err();
        assert_eq!(
            err,
            QueryError::NotFound(StoreError::NotFound(SampleId::new("S999")))
        );
    }

    #[test]
    fn test_cache_populates_once_per_key() {
        let store = fixture_store();
        let cache = SequenceCache::new();
        let facade = QueryFacade::new(&store, &cache);

        facade.sequence_for(&SampleId::new("S001")).unwrap();
        facade.sequence_for(&SampleId::new("S001")).unwrap();
        assert_eq!(cache.len(), 1);

        facade.sequence_for(&SampleId::new("S002")).unwrap();
        assert_eq!(cache.len(), 2);
    }
}

use serde::{Deserialize, Serialize};

use crate::core::types::SampleId;

/// Metadata for a single ancient-DNA sample.
///
/// Records are created on ingestion (CSV upload or JSON insert) and are
/// immutable afterwards. The synthesis seed is derived from all four fields,
/// so two records that differ in any field yield different sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Stable lookup key, unique within the store
    pub id: SampleId,

    /// Geographic region the sample was excavated in
    pub region: String,

    /// Estimated age of the sample in years
    pub age: u32,

    /// Opaque seed tag from the uploaded metadata.
    /// Must be non-empty for a synthesis seed to be derivable.
    #[serde(rename = "seed")]
    pub seed_tag: String,
}

impl SampleRecord {
    pub fn new(
        id: impl Into<SampleId>,
        region: impl Into<String>,
        age: u32,
        seed_tag: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            region: region.into(),
            age,
            seed_tag: seed_tag.into(),
        }
    }
}

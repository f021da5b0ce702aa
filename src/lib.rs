//! # paleoseq
//!
//! A library and service for deriving deterministic synthetic DNA sequences
//! from ancient-sample metadata, and for scoring pairwise similarity between
//! such sequences.
//!
//! Every ingested sample record maps to a synthesis seed through a pinned
//! digest function, and every seed maps to a fixed-length sequence over
//! `{A, C, G, T}` through a pinned seeded generator. Both mappings are pure,
//! so a sample's sequence can be re-derived bit-for-bit at any time — across
//! requests, restarts, and reimplementations. Similarity is the percentage
//! of position-wise matching bases.
//!
//! ## Example
//!
//! ```rust
//! use paleoseq::{compare, synth};
//!
//! // The same seed always yields the identical sequence
//! let a = synth::generate(101, 10);
//! let b = synth::generate(101, 10);
//! assert_eq!(a, b);
//!
//! // Similarity is a percentage of matching positions
//! let other = synth::generate(102, 10);
//! let similarity = compare::score(&a, &other);
//! assert!((0.0..=100.0).contains(&similarity));
//! assert!((compare::score(&a, &a) - 100.0).abs() < f64::EPSILON);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Sample records, sequences, and identifiers
//! - [`store`]: In-memory sample store
//! - [`synth`]: Pinned seed derivation and sequence generation
//! - [`compare`]: Position-wise similarity scoring
//! - [`query`]: Facade coordinating lookups, synthesis, and comparison
//! - [`parsing`]: CSV ingestion of sample metadata
//! - [`provider`]: Question answering (local aggregates + Gemini)
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server exposing the HTTP API

pub mod cli;
pub mod compare;
pub mod core;
pub mod parsing;
pub mod provider;
pub mod query;
pub mod store;
pub mod synth;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use compare::SimilarityResult;
pub use core::sample::SampleRecord;
pub use core::sequence::{DnaSequence, DEFAULT_SEQUENCE_LENGTH};
pub use core::types::SampleId;
pub use query::{QueryError, QueryFacade, SequenceCache};
pub use store::{SampleStore, StoreError};

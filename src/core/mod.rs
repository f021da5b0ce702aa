//! Core data types for sample records and synthetic sequences.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`SampleRecord`]: Metadata for a single ancient-DNA sample
//! - [`DnaSequence`]: A fixed-alphabet synthetic sequence
//! - [`SampleId`]: The stable key used to look up a sample
//!
//! ## Determinism
//!
//! Sequences are never stored. They are regenerated on demand from a seed
//! that is a pure function of the sample's metadata, so the same sample
//! always yields the byte-identical sequence. See [`crate::synth`] for the
//! pinned seed and generator algorithms.

pub mod sample;
pub mod sequence;
pub mod types;

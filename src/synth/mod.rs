//! Deterministic sequence synthesis.
//!
//! The whole system rests on one property: a sample must yield the
//! byte-identical sequence on every request, across process restarts and
//! across deployments. Both halves of the pipeline are therefore pinned to
//! explicit, versioned algorithms rather than whatever a default RNG or
//! hasher happens to do:
//!
//! 1. **Seed derivation** ([`derive_seed`]): MD5 over the canonical record
//!    string `"{id}:{region}:{age}:{seed_tag}"`, taking the first 8 digest
//!    bytes as a big-endian `u64`.
//! 2. **Generation** ([`generate`]): a `ChaCha8` stream seeded with
//!    `seed_from_u64`, drawing `length` symbols uniformly from
//!    `{A, C, G, T}` in draw order.
//!
//! Changing either algorithm is a breaking change: previously served
//! sequences would no longer be reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::core::sample::SampleRecord;
use crate::core::sequence::{DnaSequence, ALPHABET};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SynthError {
    #[error("Cannot derive seed for sample '{0}': seed tag is empty")]
    InvalidSeed(String),
}

/// Derive the synthesis seed for a sample record.
///
/// Pure function of the record's fields. The digest-based mapping keeps the
/// seed stable under reimplementation: any runtime with MD5 agrees on the
/// value bit-for-bit.
///
/// # Errors
///
/// Returns [`SynthError::InvalidSeed`] if the record's seed tag is empty or
/// whitespace-only.
pub fn derive_seed(record: &SampleRecord) -> Result<u64, SynthError> {
    if record.seed_tag.trim().is_empty() {
        return Err(SynthError::InvalidSeed(record.id.to_string()));
    }

    let canonical = format!(
        "{}:{}:{}:{}",
        record.id, record.region, record.age, record.seed_tag
    );
    let digest = md5::compute(canonical.as_bytes());

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.0[..8]);
    Ok(u64::from_be_bytes(prefix))
}

/// Generate a synthetic sequence of `length` bases from `seed`.
///
/// Pure function: equal inputs always produce the byte-identical sequence.
/// `length == 0` yields an empty sequence.
#[must_use]
pub fn generate(seed: u64, length: usize) -> DnaSequence {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut bases = String::with_capacity(length);
    for _ in 0..length {
        bases.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
    }

    DnaSequence::from_bases(bases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequence::DEFAULT_SEQUENCE_LENGTH;

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate(101, 10);
        let b = generate(101, 10);
        assert_eq!(a, b);

        // Same property at the default length
        assert_eq!(
            generate(101, DEFAULT_SEQUENCE_LENGTH),
            generate(101, DEFAULT_SEQUENCE_LENGTH)
        );
    }

    #[test]
    fn test_generate_length() {
        for len in [0, 1, 10, 200, 1000] {
            assert_eq!(generate(42, len).len(), len);
        }
    }

    #[test]
    fn test_generate_alphabet_closure() {
        let seq = generate(7, 500);
        assert!(seq.as_bytes().iter().all(|b| ALPHABET.contains(b)));
    }

    #[test]
    fn test_distinct_seeds_differ() {
        // Not a mathematical guarantee, but with a fixed generator these two
        // concrete seeds are known to diverge.
        assert_ne!(generate(101, 10), generate(102, 10));
    }

    #[test]
    fn test_derive_seed_is_stable() {
        let record = SampleRecord::new("S001", "Siberia", 24000, "tag-7");
        let a = derive_seed(&record).unwrap();
        let b = derive_seed(&record).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_derive_seed_sensitive_to_fields() {
        let base = SampleRecord::new("S001", "Siberia", 24000, "tag-7");
        let other_region = SampleRecord::new("S001", "Altai", 24000, "tag-7");
        let other_age = SampleRecord::new("S001", "Siberia", 24001, "tag-7");

        let seed = derive_seed(&base).unwrap();
        assert_ne!(seed, derive_seed(&other_region).unwrap());
        assert_ne!(seed, derive_seed(&other_age).unwrap());
    }

    #[test]
    fn test_derive_seed_empty_tag_rejected() {
        let record = SampleRecord::new("S001", "Siberia", 24000, "  ");
        assert_eq!(
            derive_seed(&record),
            Err(SynthError::InvalidSeed("S001".to_string()))
        );
    }
}

use serde::{Deserialize, Serialize};

/// The fixed synthesis alphabet. Uppercase only, no ambiguity codes.
pub const ALPHABET: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Default length of a synthesized sequence.
///
/// Part of the public contract: all samples synthesize at this length unless
/// a caller overrides it, and two sequences are only position-comparable
/// over their overlapping prefix.
pub const DEFAULT_SEQUENCE_LENGTH: usize = 200;

/// A synthetic DNA sequence over the alphabet {A, C, G, T}.
///
/// Always constructed by [`crate::synth::generate`]; never parsed from user
/// input, so the alphabet invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DnaSequence(String);

impl DnaSequence {
    /// Wrap a string of bases. Debug-asserts the alphabet invariant.
    pub(crate) fn from_bases(bases: String) -> Self {
        debug_assert!(bases.bytes().all(|b| ALPHABET.contains(&b)));
        Self(bases)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for DnaSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Transcript records as consumed by the design engine.
use crate::enzyme::is_iupac;
use crate::error::DesignError;

/// A transcript id and its sequence, 5'→3'.
///
/// Sequences are normalized on construction (uppercase, `U` read as `T`) so
/// that every downstream component works on one DNA alphabet. Anything but
/// IUPAC nucleotide letters is rejected, which keeps every sequence ASCII and
/// safe to slice by base position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    pub id: String,
    sequence: String,
}

impl Transcript {
    pub fn new(id: impl Into<String>, sequence: &str) -> Result<Self, DesignError> {
        let id = id.into();
        let sequence = normalize(sequence);
        check_sequence(&id, &sequence)?;
        Ok(Transcript { id, sequence })
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Uppercase and convert RNA `U` to `T`. Whitespace is dropped.
pub fn normalize(seq: &str) -> String {
    seq.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_ascii_uppercase() {
            'U' => 'T',
            other => other,
        })
        .collect()
}

/// Fail with `InvalidSequence` on the first non-IUPAC letter of `seq`.
pub fn check_sequence(id: &str, seq: &str) -> Result<(), DesignError> {
    match seq.char_indices().find(|(_, c)| !is_iupac(*c)) {
        Some((pos, c)) => Err(DesignError::InvalidSequence {
            id: id.to_string(),
            reason: format!("non-IUPAC letter {c:?} at position {pos}"),
        }),
        None => Ok(()),
    }
}

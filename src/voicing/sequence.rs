//! Chord sequences with greedy voice leading
//!
//! Each appended chord takes the candidate voicing closest to the previous
//! chord's chosen voicing. The choice is local: nothing is re-optimized when
//! later chords arrive.

use super::distance::closest_voicing;
use super::types::Voicing;
use serde::Serialize;

/// One chord in a sequence and the voicing chosen for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceEntry {
    pub symbol: String,
    pub voicing: Voicing,
}

/// An ordered chord progression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChordSequence {
    entries: Vec<SequenceEntry>,
}

impl ChordSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `symbol`, choosing among `candidates`.
    ///
    /// The first chord takes the first candidate; later chords take the
    /// candidate closest to the previous voicing. With no candidates nothing
    /// is appended and `None` is returned.
    pub fn push(&mut self, symbol: &str, candidates: &[Voicing]) -> Option<&Voicing> {
        let chosen = match self.entries.last() {
            None => candidates.first()?.clone(),
            Some(previous) => {
                let idx = closest_voicing(&previous.voicing, candidates)?;
                candidates[idx].clone()
            }
        };

        self.entries.push(SequenceEntry {
            symbol: symbol.to_string(),
            voicing: chosen,
        });
        self.entries.last().map(|entry| &entry.voicing)
    }

    pub fn entries(&self) -> &[SequenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The plain chord symbols, in order. Enough to rebuild the sequence.
    pub fn symbols(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.symbol.as_str()).collect()
    }

    /// Total hand movement along the sequence.
    pub fn total_distance(&self) -> u32 {
        self.entries
            .windows(2)
            .map(|pair| super::distance::distance(&pair[0].voicing.frets, &pair[1].voicing.frets))
            .sum()
    }
}

//! Chord formula table and resolution
//!
//! Maps chord qualities to interval sets and applies alterations such as
//! `b5` or `#9`. Resolution turns a [`ChordDescriptor`] into concrete notes.

use super::symbol::{parse_chord_symbol, ChordDescriptor};
use crate::error::FretError;
use crate::pitch::{to_pitch_class, PitchClass};
use log::warn;
use serde::Serialize;
use std::fmt;

/// Quality → intervals in semitones from the root.
///
/// Order matters: prefix fallback and identification both prefer the entry
/// registered first. The aliases at the end never shadow a base quality.
pub const FORMULAS: &[(&str, &[u8])] = &[
    // Triads
    ("", &[0, 4, 7]),
    ("m", &[0, 3, 7]),
    ("dim", &[0, 3, 6]),
    ("aug", &[0, 4, 8]),
    // Seventh chords
    ("7", &[0, 4, 7, 10]),
    ("maj7", &[0, 4, 7, 11]),
    ("m7", &[0, 3, 7, 10]),
    ("mMaj7", &[0, 3, 7, 11]),
    ("dim7", &[0, 3, 6, 9]),
    ("halfDim7", &[0, 3, 6, 10]),
    // Extended chords
    ("9", &[0, 4, 7, 10, 14]),
    ("maj9", &[0, 4, 7, 11, 14]),
    ("m9", &[0, 3, 7, 10, 14]),
    // Sixth chords
    ("6", &[0, 4, 7, 9]),
    ("m6", &[0, 3, 7, 9]),
    // Aliases and suspended chords
    ("m7b5", &[0, 3, 6, 10]),
    ("sus2", &[0, 2, 7]),
    ("sus4", &[0, 5, 7]),
    ("add9", &[0, 4, 7, 14]),
    ("M7", &[0, 4, 7, 11]),
    ("min", &[0, 3, 7]),
    ("-", &[0, 3, 7]),
    ("+", &[0, 4, 8]),
    ("°", &[0, 3, 6]),
    ("°7", &[0, 3, 6, 9]),
];

/// Table keys shown to players under a different, conventional suffix.
const DISPLAY_SUFFIXES: &[(&str, &str)] = &[("halfDim7", "m7b5")];

/// Suffix to print after the root for a table quality.
///
/// ```
/// use fretninja::display_suffix;
///
/// assert_eq!(display_suffix("halfDim7"), "m7b5");
/// assert_eq!(display_suffix("maj7"), "maj7");
/// ```
pub fn display_suffix(quality: &str) -> &str {
    DISPLAY_SUFFIXES
        .iter()
        .find(|(key, _)| *key == quality)
        .map_or(quality, |(_, suffix)| suffix)
}

/// Interval that the fifth-altering transforms look for.
const PERFECT_FIFTH: u8 = 7;

/// A named transform over a copy of the interval list.
#[derive(Debug, Clone, Copy)]
enum Transform {
    /// Replace every interval equal to `from` with `to`.
    Replace { from: u8, to: u8 },
    /// Append `interval` unless it is already present.
    Append { interval: u8 },
}

/// Alteration token → transform.
pub const ALTERATION_NAMES: &[&str] = &["b5", "#5", "b9", "#9", "b13", "#11", "add9"];

fn alteration(token: &str) -> Option<Transform> {
    let transform = match token {
        "b5" => Transform::Replace { from: PERFECT_FIFTH, to: 6 },
        "#5" => Transform::Replace { from: PERFECT_FIFTH, to: 8 },
        "b9" => Transform::Append { interval: 2 },
        "#9" => Transform::Append { interval: 3 },
        "b13" => Transform::Append { interval: 8 },
        "#11" => Transform::Append { interval: 6 },
        "add9" => Transform::Append { interval: 2 },
        _ => return None,
    };
    Some(transform)
}

/// Non-fatal diagnostic produced while resolving a chord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "token", rename_all = "camelCase")]
pub enum Warning {
    /// Alteration token with no known transform; it was skipped.
    UnsupportedAlteration(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnsupportedAlteration(token) => write!(f, "unsupported alteration '{}' ignored", token),
        }
    }
}

/// Look up the base intervals for a quality.
///
/// Exact match first, then the longest non-empty known quality that prefixes
/// the request (first registered wins on equal length).
///
/// # Examples
/// ```
/// use fretninja::chord_intervals;
///
/// assert_eq!(chord_intervals("maj7").unwrap(), vec![0, 4, 7, 11]);
/// // "7sus" degrades to the dominant seventh
/// assert_eq!(chord_intervals("7sus").unwrap(), vec![0, 4, 7, 10]);
/// assert!(chord_intervals("xyz").is_err());
/// ```
pub fn chord_intervals(quality: &str) -> Result<Vec<u8>, FretError> {
    if let Some((_, intervals)) = FORMULAS.iter().find(|(q, _)| *q == quality) {
        return Ok(intervals.to_vec());
    }

    let mut best: Option<(&str, &[u8])> = None;
    for &(known, intervals) in FORMULAS {
        if known.is_empty() || !quality.starts_with(known) {
            continue;
        }
        if best.map_or(true, |(b, _)| known.len() > b.len()) {
            best = Some((known, intervals));
        }
    }

    best.map(|(_, intervals)| intervals.to_vec())
        .ok_or_else(|| FretError::UnsupportedChordType(quality.to_string()))
}

/// Apply alteration tokens in order to a copy of `intervals`.
///
/// Unknown tokens are skipped and reported as warnings. The result is
/// de-duplicated and sorted.
pub fn apply_alterations(intervals: &[u8], alterations: &[String]) -> (Vec<u8>, Vec<Warning>) {
    let mut modified = intervals.to_vec();
    let mut warnings = Vec::new();

    for token in alterations {
        match alteration(token) {
            Some(Transform::Replace { from, to }) => {
                for interval in modified.iter_mut().filter(|i| **i == from) {
                    *interval = to;
                }
            }
            Some(Transform::Append { interval }) => {
                if !modified.contains(&interval) {
                    modified.push(interval);
                }
            }
            None => {
                warn!("Unsupported alteration: {}", token);
                warnings.push(Warning::UnsupportedAlteration(token.clone()));
            }
        }
    }

    modified.sort_unstable();
    modified.dedup();
    (modified, warnings)
}

/// A chord resolved to concrete notes.
///
/// # Fields
/// - `notes`: root + each interval, with the bass (if any) first. Values are
///   pitch classes when normalized, otherwise raw semitones above C (may exceed 11)
/// - `bass`: bass pitch class, if the symbol had a slash bass
/// - `intervals`: resolved intervals after alterations
/// - `warnings`: skipped alteration tokens
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordNotes {
    pub name: String,
    pub root: String,
    pub quality: String,
    pub alterations: Vec<String>,
    pub intervals: Vec<u8>,
    pub notes: Vec<u8>,
    pub bass: Option<PitchClass>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

impl ChordNotes {
    /// Sorted, de-duplicated pitch classes.
    pub fn pitch_class_set(&self) -> Vec<PitchClass> {
        let mut set: Vec<PitchClass> = self.notes.iter().map(|n| n % 12).collect();
        set.sort_unstable();
        set.dedup();
        set
    }
}

/// Resolve an already parsed descriptor to notes.
pub fn resolve(
    name: &str,
    chord: &ChordDescriptor,
    normalized: bool,
) -> Result<ChordNotes, FretError> {
    let root = to_pitch_class(&chord.root)?;
    let base = chord_intervals(&chord.quality)?;
    let (intervals, warnings) = if chord.alterations.is_empty() {
        (base, Vec::new())
    } else {
        apply_alterations(&base, &chord.alterations)
    };

    let mut notes: Vec<u8> = intervals.iter().map(|i| root + i).collect();

    let bass = match &chord.bass {
        Some(bass_name) => {
            let bass = to_pitch_class(bass_name)?;
            if normalized {
                notes.retain(|n| n % 12 != bass);
            } else {
                notes.retain(|n| *n != bass);
            }
            notes.insert(0, bass);
            Some(bass)
        }
        None => None,
    };

    if normalized {
        for note in notes.iter_mut() {
            *note %= 12;
        }
    }

    Ok(ChordNotes {
        name: name.to_string(),
        root: chord.root.clone(),
        quality: chord.quality.clone(),
        alterations: chord.alterations.clone(),
        intervals,
        notes,
        bass,
        warnings,
    })
}

/// Parse and resolve a chord symbol.
///
/// # Examples
/// ```
/// use fretninja::chord_to_notes;
///
/// let g = chord_to_notes("G", true).unwrap();
/// assert_eq!(g.notes, vec![7, 11, 2]);
///
/// let half_dim = chord_to_notes("Gm7(b5)", true).unwrap();
/// assert_eq!(half_dim.intervals, vec![0, 3, 6, 10]);
///
/// // The bass is prepended even when it is not a chord tone
/// let slash = chord_to_notes("Bb/G", true).unwrap();
/// assert_eq!(slash.notes, vec![7, 10, 2, 5]);
/// assert_eq!(slash.bass, Some(7));
/// ```
pub fn chord_to_notes(symbol: &str, normalized: bool) -> Result<ChordNotes, FretError> {
    let chord = parse_chord_symbol(symbol)?;
    resolve(symbol.trim(), &chord, normalized)
}

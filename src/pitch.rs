//! # Pitch Model
//!
//! Note-name ↔ pitch-class canonicalization.
//!
//! A pitch class is an integer in `0..12` (C = 0, B = 11). Sharps, flats and
//! the German note names (`H`, `Fis`, `Es`, ...) are synonyms for the same
//! pitch class, never distinct semitones.
//!
//! Absolute pitches (used for instrument tunings) follow MIDI numbering:
//! C4 = 60, so the low E string of a guitar (E2) is 40.

use crate::error::FretError;
use serde::Serialize;
use std::fmt;

/// Note identity modulo octave, `0..12`.
pub type PitchClass = u8;

/// Spelling table. Several spellings map to the same pitch class.
const NOTE_TO_PITCH_CLASS: &[(&str, PitchClass)] = &[
    ("B#", 0),
    ("C", 0),
    ("C#", 1),
    ("Db", 1),
    ("D", 2),
    ("D#", 3),
    ("Eb", 3),
    ("E", 4),
    ("Fb", 4),
    ("E#", 5),
    ("F", 5),
    ("F#", 6),
    ("Gb", 6),
    ("G", 7),
    ("G#", 8),
    ("Ab", 8),
    ("A", 9),
    ("A#", 10),
    ("Bb", 10),
    ("B", 11),
    ("Cb", 11),
    // German naming
    ("H", 11),
    ("H#", 0),
    ("Cis", 1),
    ("Des", 1),
    ("Dis", 3),
    ("Es", 3),
    ("Fis", 6),
    ("Ges", 6),
    ("Gis", 8),
    ("As", 8),
    ("Ais", 10),
];

/// Canonical display spellings, indexed by pitch class.
const SHARP_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const FLAT_NAMES: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];

/// Display spelling used for chord roots: flats for the black keys, except F#.
const ROOT_NAMES: [&str; 12] = ["C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B"];

/// Convert a note name to its pitch class.
///
/// The first character is case-insensitive, so `"g"` and `"G"` are the same.
///
/// # Examples
/// ```
/// use fretninja::to_pitch_class;
///
/// assert_eq!(to_pitch_class("C").unwrap(), 0);
/// assert_eq!(to_pitch_class("Bb").unwrap(), 10);
/// assert_eq!(to_pitch_class("A#").unwrap(), 10);
/// assert_eq!(to_pitch_class("H").unwrap(), 11);
/// assert!(to_pitch_class("X").is_err());
/// ```
pub fn to_pitch_class(note: &str) -> Result<PitchClass, FretError> {
    let canonical = capitalize_letter(note.trim());
    NOTE_TO_PITCH_CLASS
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, pc)| *pc)
        .ok_or_else(|| FretError::InvalidNote(note.to_string()))
}

fn capitalize_letter(note: &str) -> String {
    let mut chars = note.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Spell a pitch class with sharps or flats.
pub fn pitch_class_name(pc: PitchClass, prefer_flat: bool) -> &'static str {
    let idx = (pc % 12) as usize;
    if prefer_flat {
        FLAT_NAMES[idx]
    } else {
        SHARP_NAMES[idx]
    }
}

/// Spelling used when naming identified chords.
pub fn root_name(pc: PitchClass) -> &'static str {
    ROOT_NAMES[(pc % 12) as usize]
}

/// Every distinct spelling in the table, in table order.
pub fn note_names() -> impl Iterator<Item = &'static str> {
    NOTE_TO_PITCH_CLASS.iter().map(|(name, _)| *name)
}

/// Highest MIDI note number.
pub const MAX_MIDI: u8 = 127;

/// Absolute pitch in MIDI numbering (C4 = 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Pitch(pub u8);

impl Pitch {
    pub fn pitch_class(self) -> PitchClass {
        self.0 % 12
    }

    pub fn octave(self) -> i8 {
        (self.0 / 12) as i8 - 1
    }

    /// Pitch `semitones` above this one, or `None` past G9 (MIDI 127).
    ///
    /// # Examples
    /// ```
    /// use fretninja::Pitch;
    ///
    /// assert_eq!(Pitch(40).transpose(3), Some(Pitch(43)));
    /// assert_eq!(Pitch(120).transpose(7), Some(Pitch(127)));
    /// assert_eq!(Pitch(120).transpose(8), None);
    /// ```
    pub fn transpose(self, semitones: u8) -> Option<Pitch> {
        self.0
            .checked_add(semitones)
            .filter(|midi| *midi <= MAX_MIDI)
            .map(Pitch)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", pitch_class_name(self.pitch_class(), false), self.octave())
    }
}

/// Parse an absolute pitch such as `"E2"`, `"Bb3"` or `"F#-1"`.
///
/// # Examples
/// ```
/// use fretninja::{parse_pitch, Pitch};
///
/// assert_eq!(parse_pitch("E2").unwrap(), Pitch(40));
/// assert_eq!(parse_pitch("C4").unwrap(), Pitch(60));
/// assert_eq!(parse_pitch("Bb3").unwrap(), Pitch(58));
/// ```
pub fn parse_pitch(s: &str) -> Result<Pitch, FretError> {
    let trimmed = s.trim();
    let split = trimmed
        .find(|c: char| c.is_ascii_digit() || c == '-')
        .ok_or_else(|| FretError::InvalidNote(s.to_string()))?;
    let (name, octave) = trimmed.split_at(split);

    let pc = to_pitch_class(name)?;
    let octave: i16 = octave
        .parse()
        .map_err(|_| FretError::InvalidNote(s.to_string()))?;

    // B#4 sounds as C5, Cb4 as B3
    let spelled_letter = capitalize_letter(name);
    let octave_adjust: i16 = if spelled_letter.starts_with('B') && pc == 0 {
        1
    } else if spelled_letter.starts_with('C') && pc == 11 {
        -1
    } else {
        0
    };

    let midi = (octave + 1 + octave_adjust) * 12 + pc as i16;
    if !(0..=MAX_MIDI as i16).contains(&midi) {
        return Err(FretError::InvalidNote(s.to_string()));
    }
    Ok(Pitch(midi as u8))
}

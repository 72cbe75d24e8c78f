//! Voicing type definitions
//!
//! A voicing is a fret per string plus the finger suggested for it.

use super::fingering::assign_fingers;
use crate::instrument::Instrument;
use crate::pitch::{Pitch, PitchClass};
use serde::{Serialize, Serializer};
use std::fmt;

/// What one string does in a chord shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fret {
    /// Not played
    Muted,
    /// Played at this fret; 0 is the open string
    Fretted(u8),
}

impl Fret {
    pub fn fret(self) -> Option<u8> {
        match self {
            Fret::Muted => None,
            Fret::Fretted(f) => Some(f),
        }
    }

    pub fn is_muted(self) -> bool {
        self == Fret::Muted
    }

    pub fn is_open(self) -> bool {
        self == Fret::Fretted(0)
    }

    /// Pressed behind a fret (not open, not muted).
    pub fn is_fretted(self) -> bool {
        matches!(self, Fret::Fretted(f) if f > 0)
    }
}

impl fmt::Display for Fret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fret::Muted => write!(f, "x"),
            Fret::Fretted(n) => write!(f, "{}", n),
        }
    }
}

/// Frets serialize as numbers, muted strings as `"x"`.
impl Serialize for Fret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Fret::Muted => serializer.serialize_str("x"),
            Fret::Fretted(n) => serializer.serialize_u8(*n),
        }
    }
}

/// Parse tab notation such as `"x32010"` or `"x 10 12 12 11 x"`.
///
/// Without whitespace every character is one string, so frets above 9 need
/// the spaced form.
pub fn parse_frets(tab: &str) -> Option<Vec<Fret>> {
    let token = |t: &str| -> Option<Fret> {
        match t {
            "x" | "X" => Some(Fret::Muted),
            _ => t.parse().ok().map(Fret::Fretted),
        }
    };

    let trimmed = tab.trim();
    if trimmed.contains(char::is_whitespace) {
        trimmed.split_whitespace().map(token).collect()
    } else {
        trimmed
            .chars()
            .map(|c| token(c.encode_utf8(&mut [0; 4])))
            .collect()
    }
}

/// A playable chord shape.
///
/// # Fields
/// - `frets`: one entry per string, lowest string first
/// - `fingers`: same length; 0 = not fingered (muted or open), 1-4 = index..pinky
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voicing {
    pub frets: Vec<Fret>,
    pub fingers: Vec<u8>,
}

impl Voicing {
    /// Build a voicing and suggest its fingering.
    pub fn new(frets: Vec<Fret>) -> Self {
        let fingers = assign_fingers(&frets);
        Self { frets, fingers }
    }

    /// Lowest and highest fret above 0, if any string is fretted.
    pub fn fret_range(&self) -> Option<(u8, u8)> {
        fretted_range(&self.frets)
    }

    /// Distance between the lowest and highest non-open fret.
    pub fn span(&self) -> u8 {
        self.fret_range().map_or(0, |(lo, hi)| hi - lo)
    }

    /// Index of the lowest string that is played.
    pub fn lowest_played_string(&self) -> Option<usize> {
        self.frets.iter().position(|f| !f.is_muted())
    }

    /// Sounding pitches, lowest string first; muted strings are skipped.
    pub fn sounding_pitches(&self, instrument: &Instrument) -> Vec<Pitch> {
        self.frets
            .iter()
            .zip(&instrument.strings)
            .filter_map(|(fret, open)| fret.fret().and_then(|f| open.transpose(f)))
            .collect()
    }

    /// Pitch classes produced, in string order (duplicates kept).
    pub fn pitch_classes(&self, instrument: &Instrument) -> Vec<PitchClass> {
        self.sounding_pitches(instrument)
            .into_iter()
            .map(Pitch::pitch_class)
            .collect()
    }

    /// Tab notation, e.g. `x32010`; space-separated when a fret exceeds 9.
    pub fn tab(&self) -> String {
        let wide = self.frets.iter().any(|f| matches!(f, Fret::Fretted(n) if *n > 9));
        let parts: Vec<String> = self.frets.iter().map(Fret::to_string).collect();
        if wide {
            parts.join(" ")
        } else {
            parts.concat()
        }
    }
}

pub(crate) fn fretted_range(frets: &[Fret]) -> Option<(u8, u8)> {
    frets
        .iter()
        .filter_map(|f| f.fret())
        .filter(|f| *f > 0)
        .fold(None, |range, f| match range {
            None => Some((f, f)),
            Some((lo, hi)) => Some((lo.min(f), hi.max(f))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frets() {
        assert_eq!(
            parse_frets("x32010").unwrap(),
            vec![
                Fret::Muted,
                Fret::Fretted(3),
                Fret::Fretted(2),
                Fret::Fretted(0),
                Fret::Fretted(1),
                Fret::Fretted(0)
            ]
        );
        assert_eq!(parse_frets("x 10 12 12 11 x").unwrap()[1], Fret::Fretted(10));
        assert!(parse_frets("x3201?").is_none());
    }

    #[test]
    fn test_tab_round_trip() {
        let voicing = Voicing::new(parse_frets("x32010").unwrap());
        assert_eq!(voicing.tab(), "x32010");
        let high = Voicing::new(parse_frets("x 10 12 12 11 x").unwrap());
        assert_eq!(high.tab(), "x 10 12 12 11 x");
    }

    #[test]
    fn test_span_ignores_open_and_muted() {
        let voicing = Voicing::new(parse_frets("x02210").unwrap());
        assert_eq!(voicing.fret_range(), Some((1, 2)));
        assert_eq!(voicing.span(), 1);
        assert_eq!(Voicing::new(parse_frets("000000").unwrap()).span(), 0);
    }

    #[test]
    fn test_sounding_pitches() {
        let guitar = Instrument::standard_guitar();
        let c = Voicing::new(parse_frets("x32010").unwrap());
        let pitches: Vec<String> = c.sounding_pitches(&guitar).iter().map(|p| p.to_string()).collect();
        assert_eq!(pitches, vec!["C3", "E3", "G3", "C4", "E4"]);
        assert_eq!(c.lowest_played_string(), Some(1));
        assert_eq!(c.pitch_classes(&guitar), vec![0, 4, 7, 0, 4]);
    }

    #[test]
    fn test_serialize_frets() {
        let voicing = Voicing::new(parse_frets("x02210").unwrap());
        let value = serde_yaml::to_value(&voicing.frets).unwrap();
        assert_eq!(value[0].as_str(), Some("x"));
        assert_eq!(value[1].as_u64(), Some(0));
        assert_eq!(value[2].as_u64(), Some(2));
    }
}

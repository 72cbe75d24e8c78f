//! # Public API
//!
//! Entry points consumed by diagram rendering, audio playback and
//! progression storage.
//!
//! ## Functions
//!
//! - [`find_voicings()`] - Voicings with fingerings for one chord symbol
//! - [`chord_shapes()`] - Voicings grouped by display name, including enharmonic readings
//! - [`build_sequence()`] - Chain chord symbols into a voice-led progression
//!
//! ## Typical Usage
//!
//! ```rust
//! use fretninja::{find_voicings, Instrument, SearchOptions};
//!
//! let guitar = Instrument::standard_guitar();
//! for voicing in find_voicings("Am7", &guitar, &SearchOptions::default())? {
//!     println!("{}  fingers {:?}", voicing.tab(), voicing.fingers);
//! }
//! # Ok::<(), fretninja::FretError>(())
//! ```

use crate::chord::{alternate_names, chord_to_notes, parse_chord_symbol};
use crate::error::FretError;
use crate::instrument::{Instrument, SearchOptions};
use crate::pitch::to_pitch_class;
use crate::voicing::{find_fret_assignments, ChordSequence, Voicing};
use log::debug;
use serde::Serialize;

/// Find voicings for a chord symbol, each with a suggested fingering.
///
/// # Pipeline
/// 1. Parse the symbol
/// 2. Resolve the quality and alterations to pitch classes
/// 3. Search fret assignments on `instrument`
/// 4. Suggest fingers for each assignment
///
/// An empty list means no shape fits the constraints; that is not an error.
///
/// # Example
/// ```rust
/// use fretninja::{find_voicings, Instrument, SearchOptions};
///
/// let guitar = Instrument::standard_guitar();
/// let voicings = find_voicings("Bb/G", &guitar, &SearchOptions::default())?;
/// assert!(!voicings.is_empty());
/// for v in &voicings {
///     assert_eq!(v.pitch_classes(&guitar)[0], 7); // G in the bass
/// }
/// # Ok::<(), fretninja::FretError>(())
/// ```
///
/// # Errors
/// [`FretError::InvalidChordSymbol`], [`FretError::InvalidNote`] or
/// [`FretError::UnsupportedChordType`] when the symbol can't be resolved.
pub fn find_voicings(
    symbol: &str,
    instrument: &Instrument,
    options: &SearchOptions,
) -> Result<Vec<Voicing>, FretError> {
    let notes = chord_to_notes(symbol, true)?;
    let voicings: Vec<Voicing> = find_fret_assignments(&notes.notes, notes.bass, instrument, options)
        .into_iter()
        .map(Voicing::new)
        .collect();
    debug!("{}: {} voicings on {}", symbol, voicings.len(), instrument.name);
    Ok(voicings)
}

/// Voicings listed under one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeGroup {
    pub display_name: String,
    pub voicings: Vec<Voicing>,
}

/// Voicings for `symbol`, then for each other name its notes go by.
///
/// The first group is always the requested symbol (possibly with no
/// voicings). Each alternate reading (e.g. `Am7` for `C6`) gets a group of
/// shapes with its own root in the bass; alternates with no such shape are
/// left out.
///
/// # Example
/// ```rust
/// use fretninja::{chord_shapes, Instrument, SearchOptions};
///
/// let groups = chord_shapes("C6", &Instrument::standard_guitar(), &SearchOptions::default())?;
/// assert_eq!(groups[0].display_name, "C6");
/// assert_eq!(groups[1].display_name, "Am7");
/// # Ok::<(), fretninja::FretError>(())
/// ```
pub fn chord_shapes(
    symbol: &str,
    instrument: &Instrument,
    options: &SearchOptions,
) -> Result<Vec<ShapeGroup>, FretError> {
    let requested = symbol.trim();
    let notes = chord_to_notes(requested, true)?;

    let mut groups = vec![ShapeGroup {
        display_name: requested.to_string(),
        voicings: find_fret_assignments(&notes.notes, notes.bass, instrument, options)
            .into_iter()
            .map(Voicing::new)
            .collect(),
    }];

    for name in alternate_names(&notes.notes, requested) {
        let root = parse_chord_symbol(&name).and_then(|chord| to_pitch_class(&chord.root))?;
        let voicings: Vec<Voicing> = find_fret_assignments(&notes.notes, Some(root), instrument, options)
            .into_iter()
            .map(Voicing::new)
            .collect();
        if !voicings.is_empty() {
            groups.push(ShapeGroup {
                display_name: name,
                voicings,
            });
        }
    }

    Ok(groups)
}

/// A chord left out of a sequence, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedChord {
    pub symbol: String,
    pub reason: String,
}

/// Build a voice-led progression from plain chord symbols.
///
/// Symbols that don't resolve, or have no voicing, are skipped and reported;
/// the rest of the progression is still built.
///
/// # Example
/// ```rust
/// use fretninja::{build_sequence, Instrument, SearchOptions};
///
/// let (sequence, skipped) = build_sequence(
///     ["C", "Am", "Xyz", "F", "G"],
///     &Instrument::standard_guitar(),
///     &SearchOptions::default(),
/// );
/// assert_eq!(sequence.symbols(), vec!["C", "Am", "F", "G"]);
/// assert_eq!(skipped[0].symbol, "Xyz");
/// ```
pub fn build_sequence<I, S>(
    symbols: I,
    instrument: &Instrument,
    options: &SearchOptions,
) -> (ChordSequence, Vec<SkippedChord>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sequence = ChordSequence::new();
    let mut skipped = Vec::new();

    for symbol in symbols {
        let symbol = symbol.as_ref().trim();
        match find_voicings(symbol, instrument, options) {
            Ok(candidates) => {
                if sequence.push(symbol, &candidates).is_none() {
                    skipped.push(SkippedChord {
                        symbol: symbol.to_string(),
                        reason: "no playable voicing".to_string(),
                    });
                }
            }
            Err(e) => skipped.push(SkippedChord {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    (sequence, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_symbol_is_an_error() {
        let guitar = Instrument::standard_guitar();
        let options = SearchOptions::default();
        assert!(matches!(
            find_voicings("", &guitar, &options),
            Err(FretError::InvalidChordSymbol(_))
        ));
        assert!(matches!(
            find_voicings("1maj7", &guitar, &options),
            Err(FretError::InvalidChordSymbol(_))
        ));
        assert!(matches!(
            find_voicings("Cxyz", &guitar, &options),
            Err(FretError::UnsupportedChordType(_))
        ));
    }

    #[test]
    fn test_alternate_groups_use_their_root_as_bass() {
        let guitar = Instrument::standard_guitar();
        let groups = chord_shapes("C6", &guitar, &SearchOptions::default()).unwrap();
        let am7 = groups.iter().find(|g| g.display_name == "Am7").unwrap();
        for v in &am7.voicings {
            assert_eq!(v.pitch_classes(&guitar)[0], 9);
        }
    }

    #[test]
    fn test_sequence_skips_unplayable() {
        let uke = Instrument::preset("ukulele").unwrap();
        // Five pitch classes cannot fit on four strings
        let (sequence, skipped) = build_sequence(["C", "C9"], &uke, &SearchOptions::default());
        assert_eq!(sequence.symbols(), vec!["C"]);
        assert_eq!(skipped[0].reason, "no playable voicing");
    }
}

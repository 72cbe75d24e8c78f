//! Enharmonic and interchangeable chord identification
//!
//! Given a collection of pitch classes, find every chord name from the
//! formula table that spells the same collection. `C6` and `Am7` are the same
//! four notes; so are `Csus2` and `Gsus4`.

use super::formula::{
    apply_alterations, chord_to_notes, display_suffix, resolve, ChordNotes, ALTERATION_NAMES, FORMULAS,
};
use super::symbol::parse_chord_symbol;
use crate::error::FretError;
use crate::pitch::{note_names, pitch_class_name, root_name, to_pitch_class, PitchClass};
use serde::Serialize;

/// Formula intervals reduced to one octave, sorted and de-duplicated.
fn reduced(intervals: &[u8]) -> Vec<u8> {
    let mut out: Vec<u8> = intervals.iter().map(|i| i % 12).collect();
    out.sort_unstable();
    out.dedup();
    out
}

fn dedup_in_order(notes: &[PitchClass]) -> Vec<PitchClass> {
    let mut unique = Vec::with_capacity(notes.len());
    for note in notes.iter().map(|n| n % 12) {
        if !unique.contains(&note) {
            unique.push(note);
        }
    }
    unique
}

/// How to spell the roots of identified chords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spelling {
    /// Flats for the black keys, except F#
    Default,
    Sharps,
    Flats,
}

impl Spelling {
    /// Follow the accidental of a written root: `Db` → flats, `C#` → sharps.
    fn of_root(root: &str) -> Self {
        if root.ends_with('b') {
            Spelling::Flats
        } else if root.ends_with('#') {
            Spelling::Sharps
        } else {
            Spelling::Default
        }
    }

    fn name(self, pc: PitchClass) -> &'static str {
        match self {
            Spelling::Default => root_name(pc),
            Spelling::Sharps => pitch_class_name(pc, false),
            Spelling::Flats => pitch_class_name(pc, true),
        }
    }
}

fn name_rotations(notes: &[PitchClass], spelling: Spelling) -> Vec<String> {
    let unique = dedup_in_order(notes);
    let mut names: Vec<String> = Vec::new();

    for &root in &unique {
        let mut intervals: Vec<u8> = unique.iter().map(|n| (n + 12 - root) % 12).collect();
        intervals.sort_unstable();

        let matched = FORMULAS
            .iter()
            .find(|(_, formula)| reduced(formula) == intervals);

        if let Some((quality, _)) = matched {
            let name = format!("{}{}", spelling.name(root), display_suffix(quality));
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    names
}

/// Name every chord that spells `notes`, trying each distinct note as the root.
///
/// Rotations are tried in the order the notes are given; for each rotation the
/// first matching formula names the chord. An empty quality yields the bare
/// root (a major triad). Roots use the default spelling (`Eb`, `F#`, `Ab`);
/// see [`chord_names`] to follow the spelling of a written chord.
///
/// # Examples
/// ```
/// use fretninja::identify_notes;
///
/// // C E G A: C6 from C, Am7 from A
/// assert_eq!(identify_notes(&[0, 4, 7, 9]), vec!["C6", "Am7"]);
/// ```
pub fn identify_notes(notes: &[PitchClass]) -> Vec<String> {
    name_rotations(notes, Spelling::Default)
}

/// Root pitch class and reduced interval set: two names with the same key
/// spell the same chord from the same root.
fn chord_key(symbol: &str) -> Option<(PitchClass, Vec<u8>)> {
    let chord = parse_chord_symbol(symbol).ok()?;
    let root = to_pitch_class(&chord.root).ok()?;
    let notes = resolve(symbol, &chord, true).ok()?;
    Some((root, reduced(&notes.intervals)))
}

/// Every name for `notes`, spelled the way `requested` is written.
///
/// Roots follow the accidental of the requested root (`Dbm7` reads as `E6`,
/// `D#m7` as `F#6`). The reading built on the requested root and intervals is
/// reported as `requested` itself, so respellings such as `C#m7` for `Dbm7`
/// never appear.
///
/// # Examples
/// ```
/// use fretninja::{chord_names, chord_to_notes};
///
/// let notes = chord_to_notes("Dbm7", true).unwrap().notes;
/// assert_eq!(chord_names(&notes, "Dbm7"), vec!["Dbm7", "E6"]);
///
/// let notes = chord_to_notes("Cm7b5", true).unwrap().notes;
/// assert_eq!(chord_names(&notes, "Cm7b5"), vec!["Cm7b5", "Ebm6"]);
/// ```
pub fn chord_names(notes: &[PitchClass], requested: &str) -> Vec<String> {
    let requested = requested.trim();
    let spelling = parse_chord_symbol(requested)
        .map(|chord| Spelling::of_root(&chord.root))
        .unwrap_or(Spelling::Default);
    let requested_key = chord_key(requested);

    let mut names: Vec<String> = Vec::new();
    for name in name_rotations(notes, spelling) {
        let name = if requested_key.is_some() && chord_key(&name) == requested_key {
            requested.to_string()
        } else {
            name
        };
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Alternative names for the notes of `requested`.
///
/// The requested name itself, and respellings of it (`Db` for `C#`,
/// `halfDim7` for `m7b5`), are left out.
pub fn alternate_names(notes: &[PitchClass], requested: &str) -> Vec<String> {
    let requested = requested.trim();
    chord_names(notes, requested)
        .into_iter()
        .filter(|name| name != requested)
        .collect()
}

/// Result of identifying a chord symbol.
///
/// # Fields
/// - `names`: every reading of the notes, the requested one as written
/// - `alternates`: `names` without the requested one
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identification {
    pub requested: String,
    pub notes: Vec<PitchClass>,
    pub names: Vec<String>,
    pub alternates: Vec<String>,
}

/// Resolve `symbol` and list the other names its notes go by.
///
/// When the symbol has a slash bass, the bass is part of the note collection,
/// so `C6/D` can read as other chords containing D.
///
/// # Examples
/// ```
/// use fretninja::identify_chord;
///
/// let id = identify_chord("C6").unwrap();
/// assert_eq!(id.alternates, vec!["Am7"]);
///
/// let id = identify_chord("Gb").unwrap();
/// assert_eq!(id.names, vec!["Gb"]);
/// ```
pub fn identify_chord(symbol: &str) -> Result<Identification, FretError> {
    let notes = chord_to_notes(symbol, true)?;
    let requested = symbol.trim().to_string();
    let names = chord_names(&notes.notes, &requested);
    let alternates = names.iter().filter(|name| **name != requested).cloned().collect();
    Ok(Identification {
        requested,
        notes: notes.notes,
        names,
        alternates,
    })
}

/// One generated chord: a root spelling, a quality and at most one alteration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordDatabaseEntry {
    pub name: String,
    pub root: String,
    pub quality: String,
    pub alterations: Vec<String>,
    pub normalized_notes: Vec<PitchClass>,
}

/// Every root spelling × every formula × (no alteration + each single alteration).
#[derive(Debug, Clone, Default)]
pub struct ChordDatabase {
    entries: Vec<ChordDatabaseEntry>,
}

impl ChordDatabase {
    pub fn generate() -> Self {
        let roots = note_names().filter(|name| is_symbol_root(name));

        let mut entries = Vec::new();
        for root in roots {
            let Ok(root_pc) = to_pitch_class(root) else {
                continue;
            };
            for (quality, intervals) in FORMULAS {
                entries.push(ChordDatabaseEntry {
                    name: format!("{}{}", root, quality),
                    root: root.to_string(),
                    quality: quality.to_string(),
                    alterations: Vec::new(),
                    normalized_notes: normalize(root_pc, intervals),
                });

                for alter in ALTERATION_NAMES {
                    let alterations = vec![alter.to_string()];
                    let (altered, _) = apply_alterations(intervals, &alterations);
                    entries.push(ChordDatabaseEntry {
                        name: format!("{}{}({})", root, quality, alter),
                        root: root.to_string(),
                        quality: quality.to_string(),
                        alterations,
                        normalized_notes: normalize(root_pc, &altered),
                    });
                }
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[ChordDatabaseEntry] {
        &self.entries
    }

    /// Entries whose pitch-class set equals `set` (sorted, de-duplicated).
    pub fn matching<'a>(&'a self, set: &'a [PitchClass]) -> impl Iterator<Item = &'a ChordDatabaseEntry> {
        self.entries.iter().filter(move |entry| entry.normalized_notes == set)
    }

    /// Every database chord sharing the notes of `symbol`.
    ///
    /// With a slash bass the results carry the same bass, sounded first.
    pub fn find_interchangeable(&self, symbol: &str) -> Result<Vec<ChordNotes>, FretError> {
        let target = chord_to_notes(symbol, true)?;
        let set = target.pitch_class_set();

        let mut found = Vec::new();
        for entry in self.matching(&set) {
            let mut chord = chord_to_notes(&entry.name, true)?;
            if let Some(bass) = target.bass {
                chord.notes.retain(|n| *n != bass);
                chord.notes.insert(0, bass);
                chord.bass = Some(bass);
            }
            found.push(chord);
        }
        Ok(found)
    }
}

/// Only spellings the symbol parser reads as a root: a letter and at most one `#`/`b`.
fn is_symbol_root(name: &str) -> bool {
    let mut chars = name.chars();
    let letter_ok = matches!(chars.next(), Some('A'..='G'));
    let rest: String = chars.collect();
    letter_ok && matches!(rest.as_str(), "" | "#" | "b")
}

fn normalize(root: PitchClass, intervals: &[u8]) -> Vec<PitchClass> {
    let mut notes: Vec<PitchClass> = intervals.iter().map(|i| (root + i) % 12).collect();
    notes.sort_unstable();
    notes.dedup();
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every root spelling the symbol parser reads as a whole (so not `Cis`)
    /// with every table quality.
    fn every_formula_symbol() -> Vec<String> {
        note_names()
            .filter(|root| parse_chord_symbol(root).map_or(false, |chord| chord.root == *root))
            .flat_map(|root| FORMULAS.iter().map(move |(quality, _)| format!("{}{}", root, quality)))
            .collect()
    }

    #[test]
    fn test_identify_round_trip() {
        let symbols = every_formula_symbol();
        assert_eq!(symbols.len(), 21 * FORMULAS.len());
        for symbol in &symbols {
            let id = identify_chord(symbol).unwrap();
            assert!(
                id.names.contains(symbol),
                "{} not found in {:?}",
                symbol,
                id.names
            );
            assert!(!id.alternates.contains(symbol));
        }
    }

    #[test]
    fn test_alternates_follow_requested_spelling() {
        assert_eq!(identify_chord("Dbm7").unwrap().alternates, vec!["E6"]);
        assert_eq!(identify_chord("D#m7").unwrap().alternates, vec!["F#6"]);
        assert_eq!(identify_chord("Db6").unwrap().alternates, vec!["Bbm7"]);
        assert_eq!(identify_chord("G#m").unwrap().names, vec!["G#m"]);
        assert_eq!(identify_chord("Cmin").unwrap().names, vec!["Cmin"]);
        assert_eq!(identify_chord("C+").unwrap().names, vec!["C+", "Eaug", "Abaug"]);
    }

    #[test]
    fn test_half_diminished_display_name() {
        assert_eq!(identify_notes(&[0, 3, 6, 10]), vec!["Cm7b5", "Ebm6"]);
        assert_eq!(identify_chord("Ebm6").unwrap().alternates, vec!["Cm7b5"]);
    }

    #[test]
    fn test_suspended_pairs() {
        let id = identify_chord("Csus2").unwrap();
        assert_eq!(id.alternates, vec!["Gsus4"]);
    }

    #[test]
    fn test_diminished_seventh_is_symmetric() {
        let id = identify_chord("Cdim7").unwrap();
        assert_eq!(id.alternates, vec!["Ebdim7", "F#dim7", "Adim7"]);
    }

    #[test]
    fn test_augmented_is_symmetric() {
        let names = identify_notes(&chord_to_notes("Caug", true).unwrap().notes);
        assert_eq!(names, vec!["Caug", "Eaug", "Abaug"]);
    }

    #[test]
    fn test_respellings_are_not_alternates() {
        let id = identify_chord("Db").unwrap();
        assert!(id.alternates.is_empty());

        let id = identify_chord("Cm7b5").unwrap();
        assert_eq!(id.alternates, vec!["Ebm6"]);
    }

    #[test]
    fn test_slash_bass_changes_reading() {
        // G A C E: the bass is part of the collection
        let id = identify_chord("Am7/G").unwrap();
        assert_eq!(id.notes, vec![7, 9, 0, 4]);
        assert_eq!(id.alternates, vec!["C6"]);
    }

    #[test]
    fn test_unmatched_notes() {
        assert!(identify_notes(&[0, 1, 2]).is_empty());
        assert!(identify_notes(&[]).is_empty());
    }

    #[test]
    fn test_database_covers_roots_and_alterations() {
        let db = ChordDatabase::generate();
        let roots = 21;
        let per_formula = 1 + ALTERATION_NAMES.len();
        assert_eq!(db.entries().len(), roots * FORMULAS.len() * per_formula);
        assert!(db.entries().iter().any(|e| e.name == "Gm7(b5)"));
        assert!(!db.entries().iter().any(|e| e.root == "H"));
    }

    #[test]
    fn test_find_interchangeable() {
        let db = ChordDatabase::generate();
        let found = db.find_interchangeable("C6").unwrap();
        let names: Vec<&str> = found.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&"C6"));
        assert!(names.contains(&"Am7"));
        assert!(names.contains(&"B#6"));
    }

    #[test]
    fn test_find_interchangeable_keeps_bass() {
        let db = ChordDatabase::generate();
        let found = db.find_interchangeable("C/E").unwrap();
        assert!(!found.is_empty());
        for chord in &found {
            assert_eq!(chord.bass, Some(4));
            assert_eq!(chord.notes[0], 4);
        }
    }
}

//! # Chord Module
//!
//! Turns chord symbols into pitch-class sets, and pitch-class sets back into
//! chord names.
//!
//! ## Sub-modules
//! - `symbol` - Chord symbol parsing (`Gm7(b5)/Bb` → root, quality, alterations, bass)
//! - `formula` - Quality → interval table, alteration transforms, resolution to notes
//! - `identify` - Reverse lookup: which chord names spell a given note collection
//!
//! ## Pipeline
//! ```text
//! "Gm7(b5)/Bb"
//!   → ChordDescriptor { root: "G", quality: "m7", alterations: ["b5"], bass: Some("Bb") }
//!   → intervals [0, 3, 6, 10]
//!   → ChordNotes { notes: [10, 7, 1, 5], bass: Some(10), .. }
//! ```
//!
//! ## Example
//! ```rust
//! use fretninja::chord_to_notes;
//!
//! let chord = chord_to_notes("Gm7(b5)/Bb", true).unwrap();
//! assert_eq!(chord.notes, vec![10, 7, 1, 5]);
//! assert_eq!(chord.bass, Some(10));
//! ```

mod formula;
mod identify;
mod symbol;

pub use formula::{
    apply_alterations, chord_intervals, chord_to_notes, display_suffix, resolve, ChordNotes, Warning,
    ALTERATION_NAMES, FORMULAS,
};
pub use identify::{
    alternate_names, chord_names, identify_chord, identify_notes, ChordDatabase, ChordDatabaseEntry,
    Identification,
};
pub use symbol::{parse_chord_symbol, ChordDescriptor};

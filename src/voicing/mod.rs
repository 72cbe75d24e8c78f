//! # Voicing Module
//!
//! Finds playable shapes for a set of pitch classes on a fretted instrument,
//! suggests fingerings, and chains shapes into progressions.
//!
//! ## Sub-modules
//! - `types` - `Fret` and `Voicing` definitions, tab notation
//! - `search` - Backtracking fret-assignment search
//! - `fingering` - Finger assignment heuristic and first-position barre fix-up
//! - `distance` - Shape distance used for voice leading
//! - `sequence` - Greedy chord progression builder
//!
//! ## Invariants
//! Every voicing returned by the search:
//! 1. **Covers** each required pitch class on at least one played string
//! 2. **Keeps the bass** on the lowest played string when a bass is requested
//! 3. **Fits the hand**: non-open frets span at most `max_span` (4 by default)
//!
//! ## Example
//! ```rust
//! use fretninja::{find_voicings, Instrument, SearchOptions};
//!
//! let guitar = Instrument::standard_guitar();
//! let voicings = find_voicings("G", &guitar, &SearchOptions::default()).unwrap();
//!
//! assert_eq!(voicings[0].tab(), "320003");
//! assert_eq!(voicings[0].fingers, vec![2, 1, 0, 0, 0, 3]);
//! ```

mod distance;
mod fingering;
mod search;
mod sequence;
mod types;


pub use distance::{closest_voicing, distance, MUTE_CHANGE_PENALTY};
pub use fingering::{apply_barre_correction, assign_fingers};
pub use search::find_fret_assignments;
pub use sequence::{ChordSequence, SequenceEntry};
pub use types::{parse_frets, Fret, Voicing};

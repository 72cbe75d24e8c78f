pub mod api;
pub mod chord;
pub mod error;
pub mod instrument;
pub mod pitch;
pub mod sheet;
pub mod voicing;

pub use api::{build_sequence, chord_shapes, find_voicings, ShapeGroup, SkippedChord};
pub use chord::*;
pub use error::*;
pub use instrument::{
    Instrument, InstrumentConfig, RawInstrument, SearchOptions, DEFAULT_COVERAGE_PER_STRING,
    DEFAULT_LIMIT, DEFAULT_MAX_FRET, DEFAULT_MAX_SPAN,
};
pub use pitch::{note_names, parse_pitch, pitch_class_name, root_name, to_pitch_class, Pitch, PitchClass};
pub use sheet::{parse_sheet, ChordSheet, SheetChord, SheetIssue, SheetMetadata};
pub use voicing::*;

/// Voicings for a chord symbol on a standard-tuned guitar with default search options.
/// This is the main entry point for the library.
pub fn guitar_voicings(symbol: &str) -> Result<Vec<Voicing>, FretError> {
    find_voicings(symbol, &Instrument::standard_guitar(), &SearchOptions::default())
}

/// Voicings with at most `limit` results (useful for quick previews)
pub fn guitar_voicings_limited(symbol: &str, limit: usize) -> Result<Vec<Voicing>, FretError> {
    find_voicings(
        symbol,
        &Instrument::standard_guitar(),
        &SearchOptions::default().with_limit(limit),
    )
}

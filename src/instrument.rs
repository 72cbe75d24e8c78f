//! # Instruments and Search Options
//!
//! An [`Instrument`] is an ordered list of strings, lowest first, each with an
//! absolute open pitch. [`SearchOptions`] bounds the voicing search.
//!
//! Both can be loaded from YAML:
//!
//! ```yaml
//! name: Ukulele
//! tuning: [G4, C4, E4, A4]
//! max-fret: 12
//! max-span: 4
//! limit: 5
//! ```
//!
//! Every key except `tuning` is optional; missing search keys fall back to
//! [`SearchOptions::default`].

use crate::error::FretError;
use crate::pitch::{parse_pitch, Pitch};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Highest fret the search considers by default.
pub const DEFAULT_MAX_FRET: u8 = 12;
/// Largest distance between the lowest and highest non-open fret.
pub const DEFAULT_MAX_SPAN: u8 = 4;
/// Number of voicings returned per chord.
pub const DEFAULT_LIMIT: usize = 5;
/// Assumed number of distinct required pitch classes one unassigned string
/// can still contribute. Used only to prune the search; it is not a strict
/// bound for every tuning.
pub const DEFAULT_COVERAGE_PER_STRING: usize = 2;

/// A fretted instrument. String 0 is the lowest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instrument {
    pub name: String,
    pub strings: Vec<Pitch>,
}

impl Instrument {
    pub fn new(name: impl Into<String>, strings: Vec<Pitch>) -> Self {
        Self {
            name: name.into(),
            strings,
        }
    }

    /// Build from note names such as `["E2", "A2", ...]`.
    pub fn from_tuning(name: impl Into<String>, tuning: &[&str]) -> Result<Self, FretError> {
        let strings = tuning
            .iter()
            .map(|s| parse_pitch(s))
            .collect::<Result<Vec<_>, _>>()?;
        validate_strings(&strings)?;
        Ok(Self::new(name, strings))
    }

    /// Six-string guitar in standard tuning: E2 A2 D3 G3 B3 E4.
    pub fn standard_guitar() -> Self {
        Self::new(
            "Guitar",
            vec![Pitch(40), Pitch(45), Pitch(50), Pitch(55), Pitch(59), Pitch(64)],
        )
    }

    /// Built-in tunings: `guitar`, `drop-d`, `ukulele`, `bass`.
    pub fn preset(name: &str) -> Option<Self> {
        let instrument = match name.trim().to_lowercase().as_str() {
            "guitar" | "standard" => Self::standard_guitar(),
            "drop-d" | "dropd" => Self::new(
                "Guitar (Drop D)",
                vec![Pitch(38), Pitch(45), Pitch(50), Pitch(55), Pitch(59), Pitch(64)],
            ),
            "ukulele" | "uke" => Self::new(
                "Ukulele",
                vec![Pitch(67), Pitch(60), Pitch(64), Pitch(69)],
            ),
            "bass" => Self::new(
                "Bass",
                vec![Pitch(28), Pitch(33), Pitch(38), Pitch(43)],
            ),
            _ => return None,
        };
        Some(instrument)
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }
}

impl Default for Instrument {
    fn default() -> Self {
        Self::standard_guitar()
    }
}

/// Bounds for the voicing search.
///
/// # Fields
/// - `limit`: stop after this many accepted voicings
/// - `max_span`: largest allowed distance between non-open frets
/// - `max_fret`: highest fret considered on any string
/// - `coverage_per_string`: pruning assumption, see [`DEFAULT_COVERAGE_PER_STRING`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    pub limit: usize,
    pub max_span: u8,
    pub max_fret: u8,
    pub coverage_per_string: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            max_span: DEFAULT_MAX_SPAN,
            max_fret: DEFAULT_MAX_FRET,
            coverage_per_string: DEFAULT_COVERAGE_PER_STRING,
        }
    }
}

impl SearchOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Raw instrument file, before pitch parsing and validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawInstrument {
    pub name: Option<String>,
    pub tuning: Vec<String>,
    pub max_fret: Option<u8>,
    pub max_span: Option<u8>,
    pub limit: Option<usize>,
    pub coverage_per_string: Option<usize>,
}

/// An instrument together with the search bounds configured for it.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentConfig {
    pub instrument: Instrument,
    pub options: SearchOptions,
}

impl InstrumentConfig {
    /// Parse a YAML instrument definition.
    ///
    /// # Example
    /// ```
    /// use fretninja::InstrumentConfig;
    ///
    /// let config = InstrumentConfig::from_yaml("name: Uke\ntuning: [G4, C4, E4, A4]\nlimit: 3\n").unwrap();
    /// assert_eq!(config.instrument.string_count(), 4);
    /// assert_eq!(config.options.limit, 3);
    /// assert_eq!(config.options.max_span, 4);
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, FretError> {
        let raw: RawInstrument =
            serde_yaml::from_str(content).map_err(|e| FretError::ConfigError(e.to_string()))?;
        Self::from_raw(raw)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FretError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| FretError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_raw(raw: RawInstrument) -> Result<Self, FretError> {
        let strings = raw
            .tuning
            .iter()
            .map(|s| {
                parse_pitch(s)
                    .map_err(|_| FretError::ConfigError(format!("Invalid tuning pitch: {}", s)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        validate_strings(&strings)?;

        let defaults = SearchOptions::default();
        let options = SearchOptions {
            limit: raw.limit.unwrap_or(defaults.limit),
            max_span: raw.max_span.unwrap_or(defaults.max_span),
            max_fret: raw.max_fret.unwrap_or(defaults.max_fret),
            coverage_per_string: raw
                .coverage_per_string
                .unwrap_or(defaults.coverage_per_string),
        };
        if options.limit == 0 {
            return Err(FretError::ConfigError("limit must be at least 1".to_string()));
        }

        Ok(Self {
            instrument: Instrument::new(raw.name.unwrap_or_else(|| "Custom".to_string()), strings),
            options,
        })
    }
}

fn validate_strings(strings: &[Pitch]) -> Result<(), FretError> {
    if strings.is_empty() {
        return Err(FretError::ConfigError(
            "tuning must list at least one string".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_guitar() {
        let guitar = Instrument::standard_guitar();
        assert_eq!(guitar.string_count(), 6);
        let pcs: Vec<u8> = guitar.strings.iter().map(|p| p.pitch_class()).collect();
        assert_eq!(pcs, vec![4, 9, 2, 7, 11, 4]);
        assert_eq!(Instrument::from_tuning("Guitar", &["E2", "A2", "D3", "G3", "B3", "E4"]).unwrap(), guitar);
    }

    #[test]
    fn test_presets() {
        assert_eq!(Instrument::preset("Guitar"), Some(Instrument::standard_guitar()));
        assert_eq!(Instrument::preset("drop-d").unwrap().strings[0], Pitch(38));
        assert_eq!(Instrument::preset("ukulele").unwrap().string_count(), 4);
        assert!(Instrument::preset("banjo").is_none());
    }

    #[test]
    fn test_yaml_defaults() {
        let config = InstrumentConfig::from_yaml("tuning: [D2, A2, D3, G3, B3, E4]").unwrap();
        assert_eq!(config.instrument.name, "Custom");
        assert_eq!(config.options, SearchOptions::default());
        assert_eq!(config.instrument.strings[0], Pitch(38));
    }

    #[test]
    fn test_yaml_options() {
        let yaml = "name: Baritone\ntuning: [B1, E2, A2, D3, F#3, B3]\nmax-fret: 15\nmax-span: 3\nlimit: 8\ncoverage-per-string: 3\n";
        let config = InstrumentConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.instrument.name, "Baritone");
        assert_eq!(config.options.max_fret, 15);
        assert_eq!(config.options.max_span, 3);
        assert_eq!(config.options.limit, 8);
        assert_eq!(config.options.coverage_per_string, 3);
    }

    #[test]
    fn test_yaml_errors() {
        assert!(matches!(
            InstrumentConfig::from_yaml("tuning: [E2, X9]"),
            Err(FretError::ConfigError(_))
        ));
        assert!(matches!(
            InstrumentConfig::from_yaml("tuning: []"),
            Err(FretError::ConfigError(_))
        ));
        assert!(matches!(
            InstrumentConfig::from_yaml("name: NoTuning"),
            Err(FretError::ConfigError(_))
        ));
        assert!(matches!(
            InstrumentConfig::from_yaml("tuning: [E2]\nlimit: 0"),
            Err(FretError::ConfigError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = InstrumentConfig::from_file("/nonexistent/instrument.yaml").unwrap_err();
        assert!(matches!(err, FretError::Io { .. }));
    }
}

//! # Chord Sheets
//!
//! A chord sheet is a plain-text progression with optional YAML frontmatter:
//!
//! ```text
//! ---
//! title: Autumn Leaves (A section)
//! instrument: guitar
//! limit: 8
//! ---
//! | Cm7 F7 | Bbmaj7 Ebmaj7 |
//! | Am7(b5) D7 | Gm |
//! ```
//!
//! Chord symbols are separated by whitespace or `|` bar lines. The
//! frontmatter may name a built-in instrument (`guitar`, `drop-d`, `ukulele`,
//! `bass`) or give an explicit `tuning`, which wins over `instrument`.

use crate::api::find_voicings;
use crate::error::FretError;
use crate::instrument::{Instrument, InstrumentConfig, RawInstrument, SearchOptions};
use crate::voicing::ChordSequence;
use serde::{Deserialize, Serialize};

/// Frontmatter keys as written.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawSheetMetadata {
    pub title: Option<String>,
    pub instrument: Option<String>,
    pub tuning: Option<Vec<String>>,
    pub limit: Option<usize>,
    pub max_fret: Option<u8>,
    pub max_span: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetMetadata {
    pub title: Option<String>,
    pub instrument: Instrument,
    pub options: SearchOptions,
}

impl Default for SheetMetadata {
    fn default() -> Self {
        Self {
            title: None,
            instrument: Instrument::standard_guitar(),
            options: SearchOptions::default(),
        }
    }
}

/// A chord symbol and where it appears (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetChord {
    pub symbol: String,
    pub line: usize,
    pub column: usize,
}

/// A chord that could not be placed in the sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetIssue {
    pub symbol: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChordSheet {
    pub metadata: SheetMetadata,
    pub chords: Vec<SheetChord>,
}

impl ChordSheet {
    pub fn symbols(&self) -> Vec<&str> {
        self.chords.iter().map(|c| c.symbol.as_str()).collect()
    }

    /// Replace the frontmatter's instrument and search options.
    pub fn set_instrument(&mut self, instrument: Instrument, options: SearchOptions) {
        self.metadata.instrument = instrument;
        self.metadata.options = options;
    }

    /// Voice-lead the sheet's chords in order. Chords that fail to resolve or
    /// have no voicing are reported and skipped.
    pub fn build_sequence(&self) -> (ChordSequence, Vec<SheetIssue>) {
        let mut sequence = ChordSequence::new();
        let mut issues = Vec::new();

        for chord in &self.chords {
            let message = match find_voicings(&chord.symbol, &self.metadata.instrument, &self.metadata.options) {
                Ok(candidates) => match sequence.push(&chord.symbol, &candidates) {
                    Some(_) => continue,
                    None => "no playable voicing".to_string(),
                },
                Err(e) => e.to_string(),
            };
            issues.push(SheetIssue {
                symbol: chord.symbol.clone(),
                line: chord.line,
                column: chord.column,
                message,
            });
        }

        (sequence, issues)
    }
}

/// Split the frontmatter block (between `---` lines) from the body.
/// Body lines keep their 1-indexed line numbers.
fn extract_frontmatter(source: &str) -> (Option<String>, Vec<(usize, &str)>) {
    let lines: Vec<&str> = source.lines().collect();

    let mut start_idx = None;
    let mut end_idx = None;
    for (i, line) in lines.iter().enumerate() {
        if line.trim() == "---" {
            if start_idx.is_none() {
                start_idx = Some(i);
            } else {
                end_idx = Some(i);
                break;
            }
        }
    }

    match (start_idx, end_idx) {
        (Some(start), Some(end)) => {
            let frontmatter = lines[start + 1..end].join("\n");
            let body = lines
                .iter()
                .enumerate()
                .filter(|(i, _)| *i < start || *i > end)
                .map(|(i, line)| (i + 1, *line))
                .collect();
            (Some(frontmatter), body)
        }
        _ => (
            None,
            lines.iter().enumerate().map(|(i, line)| (i + 1, *line)).collect(),
        ),
    }
}

fn parse_metadata(content: &str) -> Result<SheetMetadata, FretError> {
    let raw: RawSheetMetadata = if content.trim().is_empty() {
        RawSheetMetadata::default()
    } else {
        serde_yaml::from_str(content).map_err(|e| FretError::ConfigError(e.to_string()))?
    };

    let base = match &raw.instrument {
        Some(name) => Instrument::preset(name)
            .ok_or_else(|| FretError::ConfigError(format!("Unknown instrument: {}", name)))?,
        None => Instrument::standard_guitar(),
    };

    let config = match raw.tuning {
        Some(tuning) => InstrumentConfig::from_raw(RawInstrument {
            name: raw.instrument.clone(),
            tuning,
            max_fret: raw.max_fret,
            max_span: raw.max_span,
            limit: raw.limit,
            coverage_per_string: None,
        })?,
        None => {
            let defaults = SearchOptions::default();
            InstrumentConfig {
                instrument: base,
                options: SearchOptions {
                    limit: raw.limit.unwrap_or(defaults.limit),
                    max_fret: raw.max_fret.unwrap_or(defaults.max_fret),
                    max_span: raw.max_span.unwrap_or(defaults.max_span),
                    ..defaults
                },
            }
        }
    };

    if config.options.limit == 0 {
        return Err(FretError::ConfigError("limit must be at least 1".to_string()));
    }

    Ok(SheetMetadata {
        title: raw.title,
        instrument: config.instrument,
        options: config.options,
    })
}

/// Byte offset → 1-indexed character column.
fn column_of(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count() + 1
}

/// Parse a chord sheet.
///
/// # Example
/// ```
/// use fretninja::parse_sheet;
///
/// let sheet = parse_sheet("---\ntitle: Blues\n---\n| C7 | F7 | C7 | G7 |\n").unwrap();
/// assert_eq!(sheet.metadata.title.as_deref(), Some("Blues"));
/// assert_eq!(sheet.symbols(), vec!["C7", "F7", "C7", "G7"]);
/// assert_eq!(sheet.chords[0].line, 4);
/// ```
///
/// # Errors
/// [`FretError::ConfigError`] for invalid frontmatter. Chord symbols are not
/// validated here; bad ones surface from [`ChordSheet::build_sequence`].
pub fn parse_sheet(source: &str) -> Result<ChordSheet, FretError> {
    let (frontmatter, body) = extract_frontmatter(source);

    let metadata = match frontmatter {
        Some(content) => parse_metadata(&content)?,
        None => SheetMetadata::default(),
    };

    let mut chords = Vec::new();
    for (line_num, line) in body {
        let mut token_start: Option<usize> = None;
        for (idx, c) in line.char_indices().chain(std::iter::once((line.len(), ' '))) {
            let separator = c.is_whitespace() || c == '|';
            match (separator, token_start) {
                (true, Some(start)) => {
                    chords.push(SheetChord {
                        symbol: line[start..idx].to_string(),
                        line: line_num,
                        column: column_of(line, start),
                    });
                    token_start = None;
                }
                (false, None) => token_start = Some(idx),
                _ => {}
            }
        }
    }

    Ok(ChordSheet { metadata, chords })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::Pitch;

    #[test]
    fn test_no_frontmatter() {
        let sheet = parse_sheet("C Am F G").unwrap();
        assert_eq!(sheet.metadata, SheetMetadata::default());
        assert_eq!(sheet.symbols(), vec!["C", "Am", "F", "G"]);
    }

    #[test]
    fn test_positions() {
        let sheet = parse_sheet("| Cm7  F7 |\n|Bbmaj7|").unwrap();
        assert_eq!(sheet.chords[0], SheetChord { symbol: "Cm7".to_string(), line: 1, column: 3 });
        assert_eq!(sheet.chords[1].column, 8);
        assert_eq!(sheet.chords[2], SheetChord { symbol: "Bbmaj7".to_string(), line: 2, column: 2 });
    }

    #[test]
    fn test_frontmatter_at_bottom() {
        let sheet = parse_sheet("C G\n---\ninstrument: ukulele\nlimit: 2\n---\n").unwrap();
        assert_eq!(sheet.metadata.instrument.name, "Ukulele");
        assert_eq!(sheet.metadata.options.limit, 2);
        assert_eq!(sheet.symbols(), vec!["C", "G"]);
    }

    #[test]
    fn test_tuning_overrides_instrument() {
        let sheet = parse_sheet("---\ninstrument: guitar\ntuning: [D2, A2, D3, G3, B3, E4]\n---\nD").unwrap();
        assert_eq!(sheet.metadata.instrument.strings[0], Pitch(38));
    }

    #[test]
    fn test_bad_frontmatter() {
        assert!(matches!(
            parse_sheet("---\ninstrument: banjo\n---\nC"),
            Err(FretError::ConfigError(_))
        ));
        assert!(matches!(
            parse_sheet("---\ncolour: red\n---\nC"),
            Err(FretError::ConfigError(_))
        ));
        assert!(matches!(
            parse_sheet("---\nlimit: 0\n---\nC"),
            Err(FretError::ConfigError(_))
        ));
    }

    #[test]
    fn test_set_instrument_replaces_frontmatter() {
        let mut sheet = parse_sheet("---\ninstrument: guitar\nlimit: 8\n---\nC G Am F").unwrap();
        let uke = Instrument::preset("ukulele").unwrap();
        sheet.set_instrument(uke.clone(), SearchOptions::default().with_limit(2));
        assert_eq!(sheet.metadata.instrument, uke);
        assert_eq!(sheet.metadata.options.limit, 2);

        let (sequence, issues) = sheet.build_sequence();
        assert!(issues.is_empty());
        assert_eq!(sequence.len(), 4);
        for entry in sequence.entries() {
            assert_eq!(entry.voicing.frets.len(), 4);
        }
    }

    #[test]
    fn test_build_sequence_reports_issues() {
        let sheet = parse_sheet("C Xyz\nH7 G").unwrap();
        let (sequence, issues) = sheet.build_sequence();
        assert_eq!(sequence.symbols(), vec!["C", "G"]);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].symbol, "Xyz");
        assert_eq!(issues[0].line, 1);
        assert_eq!(issues[1].symbol, "H7");
        assert_eq!(issues[1].message, "Invalid chord symbol: H7");
    }
}

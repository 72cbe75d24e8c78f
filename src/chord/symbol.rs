//! Chord symbol parsing
//!
//! Parses chord symbols (`C`, `Am`, `G7`, `Fmaj7(b5)`, `Bb/G`, ...) into a
//! [`ChordDescriptor`]. The quality is not validated here; that happens when
//! the descriptor is resolved against the formula table.

use crate::error::FretError;
use serde::Serialize;

/// Half-diminished sign and the quality text it stands for.
const HALF_DIMINISHED_SIGNS: [char; 2] = ['ø', 'Ø'];
const HALF_DIMINISHED_QUALITY: &str = "m7b5";

/// A parsed chord symbol.
///
/// # Fields
/// - `root`: root note as written (`"G"`, `"Bb"`, `"F#"`)
/// - `quality`: everything between the root and the alteration list / slash bass
/// - `alterations`: tokens from the parenthesized list, in order
/// - `bass`: slash bass note as written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordDescriptor {
    pub root: String,
    pub quality: String,
    pub alterations: Vec<String>,
    pub bass: Option<String>,
}

/// Parse a chord symbol into its components.
///
/// # Grammar
/// `<root><accidental?><quality>('(' alteration (sep alteration)* ')')?('/' <bass>)?`
///
/// The root letter is case-insensitive and may carry `#` or `b`. Alterations
/// are separated by whitespace or commas.
///
/// # Examples
/// ```
/// use fretninja::parse_chord_symbol;
///
/// let chord = parse_chord_symbol("Gm7(b5)/Bb").unwrap();
/// assert_eq!(chord.root, "G");
/// assert_eq!(chord.quality, "m7");
/// assert_eq!(chord.alterations, vec!["b5"]);
/// assert_eq!(chord.bass.as_deref(), Some("Bb"));
///
/// assert!(parse_chord_symbol("").is_err());
/// ```
///
/// # Errors
/// [`FretError::InvalidChordSymbol`] when the root or the slash bass can't be read.
pub fn parse_chord_symbol(symbol: &str) -> Result<ChordDescriptor, FretError> {
    let substituted = symbol
        .trim()
        .replace(HALF_DIMINISHED_SIGNS, HALF_DIMINISHED_QUALITY);

    let (root, rest) = split_note(&substituted)
        .ok_or_else(|| FretError::InvalidChordSymbol(symbol.to_string()))?;

    // Slash bass
    let (descriptor, bass) = match rest.rfind('/') {
        Some(slash) => {
            let bass_text = rest[slash + 1..].trim();
            match split_note(bass_text) {
                Some((bass, "")) => (&rest[..slash], Some(bass)),
                _ => return Err(FretError::InvalidChordSymbol(symbol.to_string())),
            }
        }
        None => (rest, None),
    };

    // Parenthesized alterations, e.g. Fmaj7(b5) or G7(b9, #5)
    let (quality, alterations) = match (descriptor.find('('), descriptor.rfind(')')) {
        (Some(open), Some(close)) if open < close => {
            let alterations = descriptor[open + 1..close]
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect();
            let quality = format!("{}{}", &descriptor[..open], &descriptor[close + 1..]);
            (quality.trim().to_string(), alterations)
        }
        _ => (descriptor.trim().to_string(), Vec::new()),
    };

    Ok(ChordDescriptor {
        root,
        quality,
        alterations,
        bass,
    })
}

/// Split a leading `A`-`G` letter and optional accidental off `s`.
/// Returns the normalized note name and the remainder.
fn split_note(s: &str) -> Option<(String, &str)> {
    let mut chars = s.char_indices();
    let (_, letter) = chars.next()?;
    let letter = letter.to_ascii_uppercase();
    if !('A'..='G').contains(&letter) {
        return None;
    }

    let mut end = letter.len_utf8();
    let mut name = letter.to_string();
    if let Some((idx, accidental)) = chars.next() {
        if accidental == '#' || accidental == 'b' {
            name.push(accidental);
            end = idx + accidental.len_utf8();
        }
    }
    Some((name, &s[end..]))
}

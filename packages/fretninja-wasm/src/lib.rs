use fretninja::{FretError, Instrument, SearchOptions};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct ErrorMessage {
    message: String,
}

#[derive(Serialize)]
struct Diagnostic {
    message: String,
    line: usize,
    column: usize,
    end_line: usize,
    end_column: usize,
    severity: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SequenceResult<'a> {
    entries: &'a [fretninja::SequenceEntry],
    skipped: Vec<fretninja::SkippedChord>,
    total_distance: u32,
}

fn to_js_error(e: FretError) -> JsValue {
    let error = ErrorMessage { message: e.to_string() };
    JsValue::from_str(&serde_json::to_string(&error).unwrap_or_else(|_| "{}".to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn setup(instrument: Option<String>, limit: Option<u32>) -> Result<(Instrument, SearchOptions), JsValue> {
    let instrument = match instrument.as_deref() {
        Some(name) => Instrument::preset(name)
            .ok_or_else(|| to_js_error(FretError::ConfigError(format!("Unknown instrument: {}", name))))?,
        None => Instrument::standard_guitar(),
    };
    let mut options = SearchOptions::default();
    if let Some(limit) = limit {
        options.limit = limit as usize;
    }
    Ok((instrument, options))
}

/// Voicings for a chord, grouped by display name, as JSON
#[wasm_bindgen]
pub fn chord_shapes(symbol: &str, instrument: Option<String>, limit: Option<u32>) -> Result<String, JsValue> {
    let (instrument, options) = setup(instrument, limit)?;
    let groups = fretninja::chord_shapes(symbol, &instrument, &options).map_err(to_js_error)?;
    to_json(&groups)
}

/// Resolved notes (pitch classes, bass first) and warnings for a chord
#[wasm_bindgen]
pub fn chord_notes(symbol: &str) -> Result<String, JsValue> {
    let notes = fretninja::chord_to_notes(symbol, true).map_err(to_js_error)?;
    to_json(&notes)
}

/// Other names for the notes of a chord
#[wasm_bindgen]
pub fn identify(symbol: &str) -> Result<String, JsValue> {
    let identification = fretninja::identify_chord(symbol).map_err(to_js_error)?;
    to_json(&identification)
}

/// Build a voice-led progression from whitespace-separated chord symbols
#[wasm_bindgen]
pub fn build_sequence(symbols: &str, instrument: Option<String>, limit: Option<u32>) -> Result<String, JsValue> {
    let (instrument, options) = setup(instrument, limit)?;
    let (sequence, skipped) = fretninja::build_sequence(symbols.split_whitespace(), &instrument, &options);
    to_json(&SequenceResult {
        entries: sequence.entries(),
        skipped,
        total_distance: sequence.total_distance(),
    })
}

/// Lint a chord sheet and return diagnostics as JSON array
/// Returns diagnostics with line/column info for inline editor display
#[wasm_bindgen]
pub fn lint_sheet(source: &str) -> String {
    let diagnostics: Vec<Diagnostic> = match fretninja::parse_sheet(source) {
        Ok(sheet) => {
            let (_, issues) = sheet.build_sequence();
            issues
                .into_iter()
                .map(|issue| Diagnostic {
                    end_line: issue.line,
                    end_column: issue.column + issue.symbol.chars().count(),
                    message: issue.message,
                    line: issue.line,
                    column: issue.column,
                    severity: "error".to_string(),
                })
                .collect()
        }
        Err(e) => vec![Diagnostic {
            message: e.to_string(),
            line: 1,
            column: 1,
            end_line: 1,
            end_column: 1,
            severity: "error".to_string(),
        }],
    };

    serde_json::to_string(&diagnostics).unwrap_or_else(|_| "[]".to_string())
}

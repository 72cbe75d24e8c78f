//! # Error Types
//!
//! This module defines all error types for the fretninja engine.
//!
//! Every error is local and recoverable: a caller can re-prompt for a
//! different chord symbol or fix a configuration file and try again.
//! The absence of a playable voicing is *not* an error; the search returns
//! an empty list instead.
//!
//! ## Error Types
//! - `InvalidNote` - A note spelling that does not map to a pitch class
//! - `InvalidChordSymbol` - The chord root (or slash bass) could not be read
//! - `UnsupportedChordType` - No chord formula matches the quality, even by prefix
//! - `ConfigError` - Invalid instrument definition or sheet frontmatter
//! - `Io` - A file could not be read
//!
//! ## Usage
//! ```rust
//! use fretninja::{find_voicings, FretError, Instrument, SearchOptions};
//!
//! let guitar = Instrument::standard_guitar();
//! match find_voicings("Hm7", &guitar, &SearchOptions::default()) {
//!     Ok(voicings) => println!("{} voicings", voicings.len()),
//!     Err(FretError::InvalidChordSymbol(symbol)) => eprintln!("Cannot read {}", symbol),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FretError {
    /// A note name that is not in the spelling table.
    ///
    /// # Example
    /// ```
    /// # use fretninja::FretError;
    /// let err = FretError::InvalidNote("X#".to_string());
    /// assert_eq!(err.to_string(), "Invalid note: X#");
    /// ```
    #[error("Invalid note: {0}")]
    InvalidNote(String),

    /// The chord symbol does not start with a readable root, or its slash
    /// bass is not a note.
    ///
    /// # Example
    /// ```
    /// # use fretninja::FretError;
    /// let err = FretError::InvalidChordSymbol("7sus4".to_string());
    /// assert_eq!(err.to_string(), "Invalid chord symbol: 7sus4");
    /// ```
    #[error("Invalid chord symbol: {0}")]
    InvalidChordSymbol(String),

    /// Neither an exact nor a prefix match exists in the formula table.
    ///
    /// # Example
    /// ```
    /// # use fretninja::FretError;
    /// let err = FretError::UnsupportedChordType("xyz".to_string());
    /// assert_eq!(err.to_string(), "Unsupported chord type: xyz");
    /// ```
    #[error("Unsupported chord type: {0}")]
    UnsupportedChordType(String),

    /// Invalid instrument definition or chord sheet frontmatter.
    ///
    /// # Example
    /// ```
    /// # use fretninja::FretError;
    /// let err = FretError::ConfigError("tuning must list at least one string".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: tuning must list at least one string");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Cannot read '{path}': {message}")]
    Io { path: String, message: String },
}

use std::ffi::OsString;

use thiserror::Error;

/// Everything that can abort a parse call.
///
/// Every variant is fatal to the call that produced it. Effects applied
/// before the failing token (or earlier characters of a failing cluster)
/// are left in place.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Unknown `--name` (holds the name) or an unknown character inside a
    /// short cluster (holds the character).
    #[error("unrecognized option: {0}")]
    UnrecognizedOption(String),

    /// The token stream ended while an option was waiting for its value.
    #[error("expecting argument for option: -{short}/--{long}")]
    MissingArgument { short: char, long: String },

    #[error("unable to parse '{0}' as a boolean (expected t, f, true or false)")]
    BooleanParseError(String),

    #[error("unable to parse '{literal}' as a number for --{option}")]
    NumberParseError { literal: String, option: String },

    /// Whatever the stdin handler returned, unchanged.
    #[error(transparent)]
    Stdin(anyhow::Error),

    #[error("argument is not valid UTF-8: {0:?}")]
    NonUtf8Argument(OsString),
}

impl ParseError {
    pub(crate) fn unrecognized_short(c: char) -> Self {
        Self::UnrecognizedOption(c.to_string())
    }

    pub(crate) fn unrecognized_long(name: &str) -> Self {
        Self::UnrecognizedOption(name.to_string())
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

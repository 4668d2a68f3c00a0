//! Parsing of the human-readable text form.

use crate::error::{ErrorKind, Result};

fn is_separator(character: char) -> bool {
    matches!(character, ' ' | '\t' | '\n' | '\r')
}

/// Returns the single whitespace-delimited token of the given text.
/// Leading and trailing whitespace is skipped, anything after the first token is an error.
pub(crate) fn single_token<'a>(text: &'a str, type_name: &'static str) -> Result<&'a str> {
    let trimmed = text.trim_matches(is_separator);
    if trimmed.is_empty() {
        return Err(ErrorKind::EmptyInput(type_name).into());
    }
    if trimmed.contains(is_separator) {
        return Err(ErrorKind::TrailingInput(type_name).into());
    }
    Ok(trimmed)
}

//! Syntactic rules for a proposed extension name.
//!
//! Rules are checked in a fixed order and the first failure wins, so a
//! candidate that breaks several rules always reports the earliest one.

use thiserror::Error;

/// Longest accepted extension, in characters.
pub const MAX_LENGTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter an extension.")]
    EmptyInput,
    #[error("Extensions may be at most 20 characters long.")]
    TooLong,
    #[error("Extensions may not contain digits.")]
    ContainsDigit,
    #[error("Extensions may not contain Korean characters.")]
    ContainsKorean,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput => "EXT_001",
            ValidationError::TooLong => "EXT_002",
            ValidationError::ContainsDigit => "EXT_003",
            ValidationError::ContainsKorean => "EXT_004",
        }
    }
}

/// Validate `candidate`. `None` stands for a missing value.
///
/// Case is left alone; callers normalise before or after as they need.
pub fn validate(candidate: Option<&str>) -> Result<(), ValidationError> {
    let candidate = match candidate {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Err(ValidationError::EmptyInput),
    };

    if candidate.chars().count() > MAX_LENGTH {
        return Err(ValidationError::TooLong);
    }

    if candidate.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::ContainsDigit);
    }

    if candidate.chars().any(is_hangul) {
        return Err(ValidationError::ContainsKorean);
    }

    Ok(())
}

/// Hangul syllables and Hangul compatibility jamo.
fn is_hangul(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7A3}' | '\u{3131}'..='\u{318E}')
}

//! Name validation
//!
//! A name is accepted when it has at least [`MIN_NAME_LENGTH`] characters and
//! consists only of ASCII letters and spaces. Validation never touches the
//! network: a rejected name is reported inline and the lookup stops there.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum number of characters in a name
pub const MIN_NAME_LENGTH: usize = 2;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z ]+$").expect("name pattern is a valid regex"));

/// Why a raw name was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Fewer than two characters
    #[error("invalid name: enter at least {} letters (got {length})", MIN_NAME_LENGTH)]
    TooShort { length: usize },

    /// Something other than a letter or a space
    #[error("invalid name: {character:?} is not a letter or a space")]
    InvalidCharacter { character: char },
}

/// A name that passed [`validate_name`]
///
/// The original spelling is kept verbatim; it is what the card shows and what
/// the remote service receives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ValidatedName(String);

impl ValidatedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ValidatedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ValidatedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check a raw name and wrap it as a [`ValidatedName`]
///
/// # Arguments
///
/// * `raw` - The text exactly as the user typed it
///
/// # Returns
///
/// * `Ok(ValidatedName)` - The name, unchanged
/// * `Err(ValidationError)` - The first reason the name was rejected
///
/// # Example
///
/// ```
/// use oruko::validate::validate_name;
///
/// assert!(validate_name("Chioma").is_ok());
/// assert!(validate_name("A").is_err());
/// assert!(validate_name("Ade-Dayo").is_err());
/// ```
pub fn validate_name(raw: &str) -> Result<ValidatedName, ValidationError> {
    let length = raw.chars().count();
    if length < MIN_NAME_LENGTH {
        return Err(ValidationError::TooShort { length });
    }

    if !NAME_PATTERN.is_match(raw) {
        // The pattern failed, so at least one character is outside [A-Za-z ]
        let character = raw
            .chars()
            .find(|c| !(c.is_ascii_alphabetic() || *c == ' '))
            .unwrap_or_default();
        return Err(ValidationError::InvalidCharacter { character });
    }

    Ok(ValidatedName(raw.to_string()))
}

/// Predicate form of [`validate_name`]
pub fn is_valid_name(raw: &str) -> bool {
    validate_name(raw).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accepts_simple_names() {
        assert!(is_valid_name("Chioma"));
        assert!(is_valid_name("Ade"));
        assert!(is_valid_name("Jo"));
        assert!(is_valid_name("Oluwaseun Adebayo"));
    }

    #[test]
    fn test_keeps_original_spelling() {
        let name = validate_name("oLuWaSeUn").unwrap();
        assert_eq!(name.as_str(), "oLuWaSeUn");
        assert_eq!(name.to_string(), "oLuWaSeUn");
    }

    #[test]
    fn test_rejects_short_input() {
        assert_eq!(
            validate_name(""),
            Err(ValidationError::TooShort { length: 0 })
        );
        assert_eq!(
            validate_name("A"),
            Err(ValidationError::TooShort { length: 1 })
        );
    }

    #[test]
    fn test_rejects_digits_and_punctuation() {
        assert_eq!(
            validate_name("Ade1"),
            Err(ValidationError::InvalidCharacter { character: '1' })
        );
        assert_eq!(
            validate_name("Ade-Dayo"),
            Err(ValidationError::InvalidCharacter { character: '-' })
        );
    }

    #[test]
    fn test_rejects_tabs_and_non_ascii_letters() {
        assert!(!is_valid_name("Ade\tDayo"));
        assert!(!is_valid_name("Orukọ"));
    }

    #[test]
    fn test_error_message_mentions_invalid_name() {
        let err = validate_name("x").unwrap_err();
        assert!(err.to_string().starts_with("invalid name"));
    }

    proptest! {
        #[test]
        fn prop_letters_and_spaces_accepted(raw in "[A-Za-z ]{2,40}") {
            prop_assert!(is_valid_name(&raw));
        }

        #[test]
        fn prop_short_input_rejected(raw in "\\PC{0,1}") {
            prop_assert!(!is_valid_name(&raw));
        }

        #[test]
        fn prop_foreign_character_rejected(
            prefix in "[A-Za-z ]{0,10}",
            bad in "[^A-Za-z ]",
            suffix in "[A-Za-z ]{0,10}",
        ) {
            let raw = format!("{prefix}{bad}{suffix}");
            prop_assert!(!is_valid_name(&raw));
        }
    }
}

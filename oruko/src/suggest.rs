//! Local autocomplete for partially typed names
//!
//! Suggestions come from a fixed list held in memory; nothing here touches the
//! network, so it is safe to call on every keystroke.

/// Common Nigerian names offered as completions
pub const COMMON_NAMES: &[&str] = &[
    "Oluwaseun",
    "Chioma",
    "Adebayo",
    "Ngozi",
    "Olayinka",
    "Chidi",
    "Folake",
    "Babajide",
    "Chinua",
    "Aisha",
];

/// Shortest input that produces suggestions
pub const MIN_QUERY_LENGTH: usize = 2;

/// Prefix index over a list of known names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionIndex {
    names: Vec<String>,
}

impl Default for SuggestionIndex {
    fn default() -> Self {
        Self::new(COMMON_NAMES.iter().copied())
    }
}

impl SuggestionIndex {
    /// Build an index over `names`, keeping their order
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Names starting with `partial`, ignoring case
    ///
    /// Returns an empty list until the input reaches [`MIN_QUERY_LENGTH`]
    /// characters. Matches keep the index order.
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        if partial.chars().count() < MIN_QUERY_LENGTH {
            return Vec::new();
        }

        let needle = partial.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_lowercase().starts_with(&needle))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_suggestions_for_short_input() {
        let index = SuggestionIndex::default();
        assert!(index.suggest("").is_empty());
        assert!(index.suggest("C").is_empty());
    }

    #[test]
    fn test_prefix_match_is_case_insensitive() {
        let index = SuggestionIndex::default();
        assert_eq!(index.suggest("ch"), vec!["Chioma", "Chidi", "Chinua"]);
        assert_eq!(index.suggest("CHI"), vec!["Chioma", "Chidi", "Chinua"]);
        assert_eq!(index.suggest("chio"), vec!["Chioma"]);
    }

    #[test]
    fn test_no_match() {
        let index = SuggestionIndex::default();
        assert!(index.suggest("Zz").is_empty());
    }

    #[test]
    fn test_full_name_matches_itself() {
        let index = SuggestionIndex::default();
        assert_eq!(index.suggest("aisha"), vec!["Aisha"]);
    }

    #[test]
    fn test_custom_index() {
        let index = SuggestionIndex::new(["Amaka", "Amara", "Bola"]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.suggest("am"), vec!["Amaka", "Amara"]);
    }
}

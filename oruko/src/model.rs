//! Data returned by the name meaning service
//!
//! These types mirror the JSON the service speaks. They are immutable once
//! decoded: a lookup produces exactly one [`TranslationResult`] and nothing
//! edits it afterwards.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A heritage label suggested for a name, e.g. `"Igbo"` or `"Yoruba (Oyo)"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeritageCandidate(String);

impl HeritageCandidate {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HeritageCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HeritageCandidate {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// Heritage attached to a translation
///
/// The service answers either with a bare label or with a tribe and the
/// region it is rooted in. On the wire the two cases are told apart by shape
/// (string vs. object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Heritage {
    /// `"yoruba"`
    Label(String),
    /// `{"tribe": "igbo", "region": "south east"}`
    Regional { tribe: String, region: String },
}

/// Meaning of a name within one heritage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub meaning: String,
    pub heritage: Heritage,
    pub pronunciation: String,
    pub significance: String,
    /// Alternative spellings, in the order the service gave them
    #[serde(default, deserialize_with = "null_as_empty")]
    pub variations: Vec<String>,
    /// Not shown on the card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

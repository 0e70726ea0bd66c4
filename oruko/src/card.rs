//! Name card rendering
//!
//! [`render_card`] turns a finished lookup and the chosen [`CardStyle`] into a
//! [`CardView`]: the exact strings and colors a card displays. It is a pure
//! function, so the same inputs always give the same card and it can be
//! tested without any graphics stack. Rasterizing a view is the exporter's
//! job.

use crate::model::{Heritage, TranslationResult};
use crate::validate::ValidatedName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Handle printed in the card footer and stamped as the export watermark
pub const SERVICE_HANDLE: &str = "@oruko.mi";

/// Text color used on the two dark backgrounds
pub const LIGHT_TEXT: &str = "#E4DED0";

/// Text color used on every other background
pub const DARK_TEXT: &str = "#5F554B";

/// Backgrounds that switch the text to [`LIGHT_TEXT`]
pub const DARK_BACKGROUNDS: [&str; 2] = ["#000000", "#5F554B"];

/// Backgrounds offered to the user
pub const PALETTE: [&str; 4] = ["#FFFFFF", "#E4DED0", "#5F554B", "#000000"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}: expected #RRGGBB")]
pub struct ColorError(String);

/// A `#RRGGBB` color, stored upper-case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| ColorError(s.to_string()))?;
        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text color that reads well on `background`
pub fn text_color_for(background: &HexColor) -> HexColor {
    let text = if DARK_BACKGROUNDS.contains(&background.as_str()) {
        LIGHT_TEXT
    } else {
        DARK_TEXT
    };
    HexColor(text.to_string())
}

/// User-chosen look of the card
///
/// Only the background is stored; the text color is always derived from it.
/// A style outlives individual lookups and changes only when the user picks
/// another color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStyle {
    background: HexColor,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            background: HexColor(PALETTE[0].to_string()),
        }
    }
}

impl CardStyle {
    pub fn new(background: HexColor) -> Self {
        Self { background }
    }

    pub fn background(&self) -> &HexColor {
        &self.background
    }

    pub fn text_color(&self) -> HexColor {
        text_color_for(&self.background)
    }

    pub fn set_background(&mut self, background: HexColor) {
        self.background = background;
    }
}

/// Everything a card shows, already formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub heritage: String,
    pub name: String,
    /// Meaning wrapped in curly quotes
    pub meaning: String,
    pub pronunciation: String,
    pub significance: String,
    /// `None` when the service listed no variations
    pub variations: Option<String>,
    pub handle: String,
    pub background: HexColor,
    pub text_color: HexColor,
}

/// First character upper-case, the rest lower-case
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// Display form of a heritage
///
/// Tribe and region are capitalized independently and joined with `", "`.
///
/// ```
/// use oruko::card::heritage_label;
/// use oruko::model::Heritage;
///
/// assert_eq!(heritage_label(&Heritage::Label("yoruba".into())), "Yoruba");
/// let pair = Heritage::Regional { tribe: "igbo".into(), region: "south east".into() };
/// assert_eq!(heritage_label(&pair), "Igbo, South east");
/// ```
pub fn heritage_label(heritage: &Heritage) -> String {
    match heritage {
        Heritage::Label(label) => capitalize(label),
        Heritage::Regional { tribe, region } => {
            format!("{}, {}", capitalize(tribe), capitalize(region))
        }
    }
}

/// Render the card for `name` from a finished lookup
///
/// # Arguments
///
/// * `name` - The name as the user typed it; shown verbatim
/// * `result` - The translation returned for the chosen heritage
/// * `style` - The current card style
///
/// # Returns
///
/// The card's visible fields. Calling it again with the same arguments
/// returns an identical view.
pub fn render_card(name: &ValidatedName, result: &TranslationResult, style: &CardStyle) -> CardView {
    let variations = if result.variations.is_empty() {
        None
    } else {
        Some(result.variations.join(", "))
    };

    CardView {
        heritage: heritage_label(&result.heritage),
        name: name.as_str().to_string(),
        meaning: format!("\u{201c}{}\u{201d}", result.meaning),
        pronunciation: result.pronunciation.clone(),
        significance: result.significance.clone(),
        variations,
        handle: SERVICE_HANDLE.to_string(),
        background: style.background().clone(),
        text_color: style.text_color(),
    }
}

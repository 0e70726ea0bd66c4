//! Core types for the Oruko name meaning service
//!
//! This crate holds the pieces of a lookup that need no network and no
//! graphics:
//!
//! 1. **Validation** - decides whether typed text is a usable name
//! 2. **Suggestions** - local autocomplete over common names
//! 3. **Model** - heritage candidates and translation results as the service sends them
//! 4. **Card** - card style and the pure card renderer
//!
//! # Example
//!
//! ```
//! use oruko::{CardStyle, Heritage, TranslationResult, render_card, validate_name};
//!
//! let name = validate_name("Chioma").unwrap();
//! let result = TranslationResult {
//!     meaning: "God's own gift".to_string(),
//!     heritage: Heritage::Label("igbo".to_string()),
//!     pronunciation: "chee-OH-mah".to_string(),
//!     significance: "A child received as a blessing".to_string(),
//!     variations: vec![],
//!     gender: None,
//! };
//!
//! let card = render_card(&name, &result, &CardStyle::default());
//! assert_eq!(card.heritage, "Igbo");
//! assert!(card.variations.is_none());
//! ```

pub mod card;
pub mod model;
pub mod suggest;
pub mod validate;

pub use card::{
    CardStyle, CardView, ColorError, HexColor, PALETTE, SERVICE_HANDLE, heritage_label,
    render_card, text_color_for,
};
pub use model::{Heritage, HeritageCandidate, TranslationResult};
pub use suggest::SuggestionIndex;
pub use validate::{ValidatedName, ValidationError, is_valid_name, validate_name};

//! Two-stage name lookup for Oruko
//!
//! A lookup first asks the service which heritages a name belongs to, lets
//! the user pick one, then asks for the name's meaning within that heritage.
//!
//! # Workflow Example
//!
//! ```ignore
//! use oruko::CardStyle;
//! use oruko_lookup::{HttpTranslationClient, Lookup};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Connect to the service named by ORUKO_API_BASE_URL
//!     let lookup = Lookup::new(HttpTranslationClient::from_env()?);
//!
//!     // 2. Submit a name and get heritage candidates
//!     let snapshot = lookup.submit("Chioma").await;
//!     println!("Candidates: {:?}", snapshot.heritage_candidates);
//!
//!     // 3. Choose a heritage and get the translation
//!     let snapshot = lookup.choose("Igbo").await?;
//!     if let Some(error) = snapshot.error {
//!         eprintln!("{}", error.message);
//!         return Ok(());
//!     }
//!
//!     // 4. Render the card
//!     let card = lookup.card(&CardStyle::default())?;
//!     println!("{} - {}", card.name, card.meaning);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod mock;
pub mod session;
pub mod workflow;


// Re-export main types for convenient access
pub use client::TranslationClient;
pub use error::{ConfigError, LookupError, LookupResult, TransitionError};
pub use http::{BASE_URL_ENV, ClientConfig, HttpTranslationClient};
pub use mock::MockTranslationClient;
pub use oruko::HeritageCandidate;
pub use session::{
    Completion, ErrorView, HeritageRequest, LookupSession, Phase, PhaseKind, SessionId,
    SessionSnapshot, SubmitOutcome, TranslationRequest,
};
pub use workflow::Lookup;

//! Translation client trait
//!
//! The `TranslationClient` trait abstracts the remote name meaning service so
//! the lookup workflow can run against the real HTTP API or against a
//! deterministic mock.
//!
//! # Example
//!
//! ```ignore
//! use oruko::validate_name;
//! use oruko_lookup::{HttpTranslationClient, TranslationClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpTranslationClient::from_env()?;
//!     let name = validate_name("Chioma")?;
//!
//!     let candidates = client.fetch_heritage_candidates(&name).await?;
//!     if let Some(heritage) = candidates.first() {
//!         let result = client.fetch_translation(&name, heritage).await?;
//!         println!("{}: {}", name, result.meaning);
//!     }
//!     Ok(())
//! }
//! ```

use crate::error::LookupResult;
use async_trait::async_trait;
use oruko::{HeritageCandidate, TranslationResult, ValidatedName};
use std::sync::Arc;

/// Remote operations a lookup needs
///
/// Implementations make exactly one attempt per call. Retrying, if wanted,
/// belongs to the transport underneath. Failures must already be mapped onto
/// [`LookupError`](crate::error::LookupError), with HTTP 429 always reported
/// as `RateLimited`.
#[async_trait]
pub trait TranslationClient: Send + Sync {
    /// Heritages the service associates with `name`, most likely first
    ///
    /// An empty list is a valid answer.
    async fn fetch_heritage_candidates(
        &self,
        name: &ValidatedName,
    ) -> LookupResult<Vec<HeritageCandidate>>;

    /// Meaning of `name` within `heritage`
    async fn fetch_translation(
        &self,
        name: &ValidatedName,
        heritage: &HeritageCandidate,
    ) -> LookupResult<TranslationResult>;

    /// Name of this client, for logging
    fn client_name(&self) -> &str;
}

#[async_trait]
impl<T: TranslationClient + ?Sized> TranslationClient for Arc<T> {
    async fn fetch_heritage_candidates(
        &self,
        name: &ValidatedName,
    ) -> LookupResult<Vec<HeritageCandidate>> {
        (**self).fetch_heritage_candidates(name).await
    }

    async fn fetch_translation(
        &self,
        name: &ValidatedName,
        heritage: &HeritageCandidate,
    ) -> LookupResult<TranslationResult> {
        (**self).fetch_translation(name, heritage).await
    }

    fn client_name(&self) -> &str {
        (**self).client_name()
    }
}

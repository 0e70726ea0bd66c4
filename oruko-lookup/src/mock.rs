//! Mock translation client for testing
//!
//! A deterministic, network-free [`TranslationClient`] for exercising the
//! lookup workflow. Answers come from tables filled through the builder
//! methods; failures and per-name delays can be injected to simulate rate
//! limiting, outages and slow responses.
//!
//! # Example
//!
//! ```ignore
//! use oruko_lookup::{MockTranslationClient, TranslationClient};
//!
//! #[tokio::test]
//! async fn test_lookup() {
//!     let mock = MockTranslationClient::new().with_heritages("Chioma", ["Igbo", "Yoruba"]);
//!     let name = oruko::validate_name("Chioma").unwrap();
//!     let candidates = mock.fetch_heritage_candidates(&name).await.unwrap();
//!     assert_eq!(candidates.len(), 2);
//! }
//! ```

use crate::client::TranslationClient;
use crate::error::{LookupError, LookupResult};
use async_trait::async_trait;
use oruko::{Heritage, HeritageCandidate, TranslationResult, ValidatedName};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock client with canned answers
///
/// Names are matched case-insensitively. Clones share their call counters.
#[derive(Debug, Clone, Default)]
pub struct MockTranslationClient {
    heritages: HashMap<String, Vec<HeritageCandidate>>,
    translations: HashMap<(String, String), TranslationResult>,
    heritage_failure: Option<LookupError>,
    translation_failure: Option<LookupError>,
    /// Simulated latency per name (in milliseconds)
    delays: HashMap<String, u64>,
    heritage_calls: Arc<AtomicUsize>,
    translation_calls: Arc<AtomicUsize>,
}

fn key(name: &str) -> String {
    name.to_lowercase()
}

impl MockTranslationClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client that knows a few names, for local demos
    pub fn demo() -> Self {
        Self::new()
            .with_heritages("Chioma", ["Igbo", "Yoruba"])
            .with_translation(
                "Chioma",
                "Igbo",
                TranslationResult {
                    meaning: "God's own gift".to_string(),
                    heritage: Heritage::Label("igbo".to_string()),
                    pronunciation: "chee-OH-mah".to_string(),
                    significance: "Names a child as a blessing from Chi, the personal god"
                        .to_string(),
                    variations: vec!["Chi".to_string(), "Chichi".to_string()],
                    gender: Some("female".to_string()),
                },
            )
            .with_heritages("Adebayo", ["Yoruba"])
            .with_translation(
                "Adebayo",
                "Yoruba",
                TranslationResult {
                    meaning: "The crown meets joy".to_string(),
                    heritage: Heritage::Regional {
                        tribe: "yoruba".to_string(),
                        region: "south west".to_string(),
                    },
                    pronunciation: "ah-DEH-bah-yoh".to_string(),
                    significance: "Given to children of royal families born in happy times"
                        .to_string(),
                    variations: vec!["Bayo".to_string(), "Debayo".to_string()],
                    gender: Some("male".to_string()),
                },
            )
    }

    /// Answer heritage requests for `name` with `candidates`
    pub fn with_heritages<I, S>(mut self, name: &str, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates = candidates.into_iter().map(HeritageCandidate::new).collect();
        self.heritages.insert(key(name), candidates);
        self
    }

    /// Answer translation requests for (`name`, `heritage`) with `result`
    pub fn with_translation(mut self, name: &str, heritage: &str, result: TranslationResult) -> Self {
        self.translations
            .insert((key(name), heritage.to_string()), result);
        self
    }

    /// Fail every heritage request with `error`
    pub fn failing_heritage(mut self, error: LookupError) -> Self {
        self.heritage_failure = Some(error);
        self
    }

    /// Fail every translation request with `error`
    pub fn failing_translation(mut self, error: LookupError) -> Self {
        self.translation_failure = Some(error);
        self
    }

    /// Delay every response about `name` by `delay_ms`
    pub fn with_delay(mut self, name: &str, delay_ms: u64) -> Self {
        self.delays.insert(key(name), delay_ms);
        self
    }

    /// Number of heritage requests received so far
    pub fn heritage_calls(&self) -> usize {
        self.heritage_calls.load(Ordering::SeqCst)
    }

    /// Number of translation requests received so far
    pub fn translation_calls(&self) -> usize {
        self.translation_calls.load(Ordering::SeqCst)
    }

    async fn apply_delay(&self, name: &ValidatedName) {
        if let Some(&delay_ms) = self.delays.get(&key(name.as_str())) {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }
}

#[async_trait]
impl TranslationClient for MockTranslationClient {
    async fn fetch_heritage_candidates(
        &self,
        name: &ValidatedName,
    ) -> LookupResult<Vec<HeritageCandidate>> {
        self.heritage_calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay(name).await;

        if let Some(error) = &self.heritage_failure {
            return Err(error.clone());
        }
        Ok(self
            .heritages
            .get(&key(name.as_str()))
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_translation(
        &self,
        name: &ValidatedName,
        heritage: &HeritageCandidate,
    ) -> LookupResult<TranslationResult> {
        self.translation_calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay(name).await;

        if let Some(error) = &self.translation_failure {
            return Err(error.clone());
        }
        self.translations
            .get(&(key(name.as_str()), heritage.as_str().to_string()))
            .cloned()
            .ok_or_else(|| {
                LookupError::service(format!("No translation for {} ({})", name, heritage))
            })
    }

    fn client_name(&self) -> &str {
        "Mock Translation Client"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oruko::validate_name;

    fn name(raw: &str) -> ValidatedName {
        validate_name(raw).unwrap()
    }

    #[tokio::test]
    async fn test_known_name_returns_candidates() {
        let mock = MockTranslationClient::demo();
        let candidates = mock.fetch_heritage_candidates(&name("chioma")).await.unwrap();
        assert_eq!(candidates, vec![HeritageCandidate::from("Igbo"), "Yoruba".into()]);
    }

    #[tokio::test]
    async fn test_unknown_name_returns_no_candidates() {
        let mock = MockTranslationClient::demo();
        let candidates = mock.fetch_heritage_candidates(&name("Zainab")).await.unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_translation_lookup() {
        let mock = MockTranslationClient::demo();
        let result = mock
            .fetch_translation(&name("Chioma"), &"Igbo".into())
            .await
            .unwrap();
        assert_eq!(result.meaning, "God's own gift");
    }

    #[tokio::test]
    async fn test_missing_translation_is_service_error() {
        let mock = MockTranslationClient::demo();
        let result = mock.fetch_translation(&name("Chioma"), &"Hausa".into()).await;
        assert!(matches!(result, Err(LookupError::TranslationService { .. })));
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let mock = MockTranslationClient::demo()
            .failing_heritage(LookupError::RateLimited)
            .failing_translation(LookupError::service("down"));

        assert_eq!(
            mock.fetch_heritage_candidates(&name("Chioma")).await,
            Err(LookupError::RateLimited)
        );
        assert_eq!(
            mock.fetch_translation(&name("Chioma"), &"Igbo".into()).await,
            Err(LookupError::service("down"))
        );
    }

    #[tokio::test]
    async fn test_call_counters_are_shared_between_clones() {
        let mock = MockTranslationClient::demo();
        let clone = mock.clone();

        clone.fetch_heritage_candidates(&name("Chioma")).await.unwrap();
        clone
            .fetch_translation(&name("Chioma"), &"Igbo".into())
            .await
            .unwrap();

        assert_eq!(mock.heritage_calls(), 1);
        assert_eq!(mock.translation_calls(), 1);
    }

    #[tokio::test]
    async fn test_delay_applies_per_name() {
        let mock = MockTranslationClient::demo().with_delay("Chioma", 50);
        let start = std::time::Instant::now();
        mock.fetch_heritage_candidates(&name("Chioma")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_client_name() {
        assert_eq!(MockTranslationClient::new().client_name(), "Mock Translation Client");
    }
}

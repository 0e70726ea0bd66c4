//! Lookup session state machine
//!
//! [`LookupSession`] owns every piece of transient lookup state: what the user
//! typed, local suggestions, heritage candidates, the chosen heritage, the
//! result or error, and the current [`Phase`]. It performs no I/O. Each step
//! that needs the network hands back a request ticket; the caller runs the
//! request and reports the outcome with the same ticket:
//!
//! ```text
//! Idle --submit--> FetchingHeritage --ok--> AwaitingHeritageChoice --choose--> Translating --ok--> Result
//!          |                 |                                                     |
//!          +-- invalid ------+-------------------- fails --------------------------+--> Error
//! ```
//!
//! Validation runs synchronously inside [`LookupSession::submit`], so the
//! session is never observed in a validating state.
//!
//! Every accepted submit opens a new [`SessionId`]. A ticket whose id is no
//! longer current belongs to a lookup the user has moved on from, and its
//! outcome is discarded.

use crate::error::{LookupError, LookupResult, TransitionError};
use oruko::{
    CardStyle, CardView, HeritageCandidate, SuggestionIndex, TranslationResult, ValidatedName,
    ValidationError, render_card, validate_name,
};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Identity of one lookup attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Phase without its data, for logging and API payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Idle,
    FetchingHeritage,
    AwaitingHeritageChoice,
    Translating,
    Result,
    Error,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PhaseKind::Idle => "idle",
            PhaseKind::FetchingHeritage => "fetching heritage suggestions",
            PhaseKind::AwaitingHeritageChoice => "waiting for a heritage choice",
            PhaseKind::Translating => "translating",
            PhaseKind::Result => "showing a result",
            PhaseKind::Error => "showing an error",
        };
        f.write_str(text)
    }
}

/// Where a lookup stands, with exactly the data that phase needs
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    FetchingHeritage {
        name: ValidatedName,
    },
    /// `candidates` may be empty; the user then names a heritage freely
    AwaitingHeritageChoice {
        name: ValidatedName,
        candidates: Vec<HeritageCandidate>,
    },
    Translating {
        name: ValidatedName,
        candidates: Vec<HeritageCandidate>,
        heritage: HeritageCandidate,
    },
    Result {
        name: ValidatedName,
        heritage: HeritageCandidate,
        result: TranslationResult,
    },
    Error {
        error: LookupError,
    },
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Idle => PhaseKind::Idle,
            Phase::FetchingHeritage { .. } => PhaseKind::FetchingHeritage,
            Phase::AwaitingHeritageChoice { .. } => PhaseKind::AwaitingHeritageChoice,
            Phase::Translating { .. } => PhaseKind::Translating,
            Phase::Result { .. } => PhaseKind::Result,
            Phase::Error { .. } => PhaseKind::Error,
        }
    }

    /// Name of the request currently outstanding, if any
    fn in_flight(&self) -> Option<&ValidatedName> {
        match self {
            Phase::FetchingHeritage { name } | Phase::Translating { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Ticket for a heritage request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeritageRequest {
    pub session: SessionId,
    pub name: ValidatedName,
}

/// Ticket for a translation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub session: SessionId,
    pub name: ValidatedName,
    pub heritage: HeritageCandidate,
}

/// What a submit asks the caller to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Run this heritage request and report back
    Fetch(HeritageRequest),
    /// Candidates for this name were already known; no request needed
    Reused,
    /// The same name is already being looked up
    Ignored,
    /// The name failed validation; the session now shows the error
    Rejected(ValidationError),
}

/// Whether a reported outcome changed the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The ticket belonged to an older lookup
    Discarded,
}

/// Error as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub kind: &'static str,
    pub message: String,
}

/// Read-only copy of a session, for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session: SessionId,
    pub phase: PhaseKind,
    pub loading: bool,
    pub input: String,
    pub suggestions: Vec<String>,
    pub heritage_candidates: Vec<HeritageCandidate>,
    pub selected_heritage: Option<HeritageCandidate>,
    pub result: Option<TranslationResult>,
    pub error: Option<ErrorView>,
}

/// Transient state of one user's lookups
#[derive(Debug, Clone)]
pub struct LookupSession {
    id: SessionId,
    input: String,
    suggestions: Vec<String>,
    phase: Phase,
    /// Candidates of the last fetched name, kept while the input still matches it
    cached: Option<(ValidatedName, Vec<HeritageCandidate>)>,
    index: SuggestionIndex,
}

impl Default for LookupSession {
    fn default() -> Self {
        Self::new(SuggestionIndex::default())
    }
}

impl LookupSession {
    pub fn new(index: SuggestionIndex) -> Self {
        Self {
            id: SessionId::default(),
            input: String::new(),
            suggestions: Vec::new(),
            phase: Phase::Idle,
            cached: None,
            index,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// True while a request is outstanding
    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            Phase::FetchingHeritage { .. } | Phase::Translating { .. }
        )
    }

    pub fn heritage_candidates(&self) -> &[HeritageCandidate] {
        match &self.phase {
            Phase::AwaitingHeritageChoice { candidates, .. }
            | Phase::Translating { candidates, .. } => candidates,
            _ => &[],
        }
    }

    pub fn selected_heritage(&self) -> Option<&HeritageCandidate> {
        match &self.phase {
            Phase::Translating { heritage, .. } | Phase::Result { heritage, .. } => Some(heritage),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&TranslationResult> {
        match &self.phase {
            Phase::Result { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LookupError> {
        match &self.phase {
            Phase::Error { error } => Some(error),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    /// Record typed text and refresh local suggestions
    ///
    /// Cached heritage candidates are dropped once the text no longer matches
    /// the name they were fetched for.
    pub fn set_input(&mut self, raw: &str) {
        self.input = raw.to_string();
        self.suggestions = self.index.suggest(raw);

        if self
            .cached
            .as_ref()
            .is_some_and(|(name, _)| name.as_str() != raw)
        {
            debug!(session = %self.id, "input changed, dropping cached heritage candidates");
            self.cached = None;
        }
    }

    /// Take a suggestion as the input and close the suggestion list
    pub fn select_suggestion(&mut self, suggestion: &str) {
        self.set_input(suggestion);
        self.suggestions.clear();
    }

    /// Start a lookup for `raw`
    ///
    /// # Returns
    ///
    /// * `SubmitOutcome::Fetch` - A heritage request the caller must run
    /// * `SubmitOutcome::Reused` - Cached candidates were used; the session awaits a choice
    /// * `SubmitOutcome::Ignored` - A request for this name is still outstanding
    /// * `SubmitOutcome::Rejected` - Validation failed; the session shows the error
    pub fn submit(&mut self, raw: &str) -> SubmitOutcome {
        if self.phase.in_flight().is_some_and(|name| name.as_str() == raw) {
            debug!(session = %self.id, "lookup already in flight, ignoring submit");
            return SubmitOutcome::Ignored;
        }

        self.set_input(raw);
        self.id = self.id.next();
        debug!(session = %self.id, "validating name");

        let name = match validate_name(raw) {
            Ok(name) => name,
            Err(e) => {
                debug!(session = %self.id, error = %e, "name rejected");
                self.phase = Phase::Error {
                    error: e.clone().into(),
                };
                return SubmitOutcome::Rejected(e);
            }
        };

        if let Some((_, candidates)) = self.cached.as_ref().filter(|(cached, _)| *cached == name) {
            debug!(session = %self.id, %name, "reusing heritage candidates");
            self.phase = Phase::AwaitingHeritageChoice {
                name,
                candidates: candidates.clone(),
            };
            return SubmitOutcome::Reused;
        }

        debug!(session = %self.id, %name, "fetching heritage candidates");
        self.phase = Phase::FetchingHeritage { name: name.clone() };
        SubmitOutcome::Fetch(HeritageRequest {
            session: self.id,
            name,
        })
    }

    /// Report the outcome of a heritage request
    pub fn complete_heritage(
        &mut self,
        request: &HeritageRequest,
        outcome: LookupResult<Vec<HeritageCandidate>>,
    ) -> Completion {
        let awaited = matches!(&self.phase, Phase::FetchingHeritage { name } if *name == request.name);
        if request.session != self.id || !awaited {
            warn!(
                ticket = %request.session,
                session = %self.id,
                "discarding stale heritage response"
            );
            return Completion::Discarded;
        }

        match outcome {
            Ok(candidates) => {
                debug!(session = %self.id, count = candidates.len(), "heritage candidates received");
                if self.input == request.name.as_str() {
                    self.cached = Some((request.name.clone(), candidates.clone()));
                }
                self.phase = Phase::AwaitingHeritageChoice {
                    name: request.name.clone(),
                    candidates,
                };
            }
            Err(error) => {
                warn!(session = %self.id, kind = error.kind(), %error, "heritage request failed");
                self.phase = Phase::Error { error };
            }
        }
        Completion::Applied
    }

    /// Pick the heritage to translate with
    ///
    /// Only allowed while awaiting a choice. The heritage must be one of the
    /// candidates; when the service suggested none, any non-blank label is
    /// accepted.
    pub fn choose(&mut self, heritage: &str) -> Result<TranslationRequest, TransitionError> {
        let Phase::AwaitingHeritageChoice { name, candidates } = &self.phase else {
            return Err(TransitionError::NotAllowed {
                action: "choose a heritage",
                phase: self.phase.kind(),
            });
        };

        let label = heritage.trim();
        if label.is_empty() {
            return Err(TransitionError::NoHeritageSelected);
        }

        let chosen = if candidates.is_empty() {
            HeritageCandidate::new(label)
        } else {
            candidates
                .iter()
                .find(|c| c.as_str() == label)
                .cloned()
                .ok_or_else(|| TransitionError::UnknownCandidate(label.to_string()))?
        };

        let name = name.clone();
        let candidates = candidates.clone();
        debug!(session = %self.id, %name, heritage = %chosen, "translating");
        self.phase = Phase::Translating {
            name: name.clone(),
            candidates,
            heritage: chosen.clone(),
        };

        Ok(TranslationRequest {
            session: self.id,
            name,
            heritage: chosen,
        })
    }

    /// Report the outcome of a translation request
    pub fn complete_translation(
        &mut self,
        request: &TranslationRequest,
        outcome: LookupResult<TranslationResult>,
    ) -> Completion {
        let awaited = matches!(
            &self.phase,
            Phase::Translating { name, heritage, .. }
                if *name == request.name && *heritage == request.heritage
        );
        if request.session != self.id || !awaited {
            warn!(
                ticket = %request.session,
                session = %self.id,
                "discarding stale translation response"
            );
            return Completion::Discarded;
        }

        match outcome {
            Ok(result) => {
                info!(session = %self.id, name = %request.name, heritage = %request.heritage, "lookup finished");
                self.phase = Phase::Result {
                    name: request.name.clone(),
                    heritage: request.heritage.clone(),
                    result,
                };
            }
            Err(error) => {
                warn!(session = %self.id, kind = error.kind(), %error, "translation request failed");
                self.phase = Phase::Error { error };
            }
        }
        Completion::Applied
    }

    /// Forget everything and start over
    pub fn reset(&mut self) {
        self.id = self.id.next();
        self.input.clear();
        self.suggestions.clear();
        self.cached = None;
        self.phase = Phase::Idle;
    }

    /// Card for the finished lookup in the given style
    pub fn card(&self, style: &CardStyle) -> Result<CardView, TransitionError> {
        match &self.phase {
            Phase::Result { name, result, .. } => Ok(render_card(name, result, style)),
            _ => Err(TransitionError::NoResult),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let loading = self.is_loading();
        SessionSnapshot {
            session: self.id,
            phase: self.kind(),
            loading,
            input: self.input.clone(),
            // Suggestions stay hidden while a request is outstanding
            suggestions: if loading {
                Vec::new()
            } else {
                self.suggestions.clone()
            },
            heritage_candidates: self.heritage_candidates().to_vec(),
            selected_heritage: self.selected_heritage().cloned(),
            result: self.result().cloned(),
            error: self.error().map(|e| ErrorView {
                kind: e.kind(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oruko::Heritage;

    fn translation(meaning: &str) -> TranslationResult {
        TranslationResult {
            meaning: meaning.to_string(),
            heritage: Heritage::Label("igbo".to_string()),
            pronunciation: "chee-OH-mah".to_string(),
            significance: "...".to_string(),
            variations: vec![],
            gender: None,
        }
    }

    fn candidates(labels: &[&str]) -> Vec<HeritageCandidate> {
        labels.iter().map(|l| HeritageCandidate::from(*l)).collect()
    }

    fn fetch(session: &mut LookupSession, raw: &str) -> HeritageRequest {
        match session.submit(raw) {
            SubmitOutcome::Fetch(request) => request,
            other => panic!("Expected Fetch, got {:?}", other),
        }
    }

    // ========== Submit Tests ==========

    #[test]
    fn test_new_session_is_idle() {
        let session = LookupSession::default();
        assert_eq!(session.kind(), PhaseKind::Idle);
        assert!(!session.is_loading());
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_valid_submit_starts_heritage_fetch() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Chioma");

        assert_eq!(request.name.as_str(), "Chioma");
        assert_eq!(request.session, session.id());
        assert_eq!(session.kind(), PhaseKind::FetchingHeritage);
        assert!(session.is_loading());
    }

    #[test]
    fn test_invalid_submit_shows_validation_error() {
        let mut session = LookupSession::default();
        let outcome = session.submit("A1");

        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert_eq!(session.kind(), PhaseKind::Error);
        assert!(matches!(session.error(), Some(LookupError::Validation(_))));
        assert!(session.error_message().unwrap().starts_with("invalid name"));
    }

    #[test]
    fn test_duplicate_submit_while_fetching_is_ignored() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Chioma");

        assert_eq!(session.submit("Chioma"), SubmitOutcome::Ignored);
        assert_eq!(session.id(), request.session);
    }

    #[test]
    fn test_duplicate_submit_while_translating_is_ignored() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Chioma");
        session.complete_heritage(&request, Ok(candidates(&["Igbo"])));
        session.choose("Igbo").unwrap();

        assert_eq!(session.submit("Chioma"), SubmitOutcome::Ignored);
        assert_eq!(session.kind(), PhaseKind::Translating);
    }

    // ========== Heritage Tests ==========

    #[test]
    fn test_heritage_success_awaits_choice() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Chioma");

        let completion = session.complete_heritage(&request, Ok(candidates(&["Igbo", "Yoruba"])));
        assert_eq!(completion, Completion::Applied);
        assert_eq!(session.kind(), PhaseKind::AwaitingHeritageChoice);
        assert_eq!(session.heritage_candidates(), candidates(&["Igbo", "Yoruba"]).as_slice());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_heritage_rate_limited_returns_to_resubmittable_state() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Chioma");

        session.complete_heritage(&request, Err(LookupError::RateLimited));
        assert_eq!(session.kind(), PhaseKind::Error);
        assert_eq!(
            session.error_message().as_deref(),
            Some("Rate limit exceeded. Please try again later.")
        );

        // A new submit is accepted and fetches again
        fetch(&mut session, "Chioma");
    }

    #[test]
    fn test_stale_heritage_response_is_discarded() {
        let mut session = LookupSession::default();
        let first = fetch(&mut session, "Chioma");
        let second = fetch(&mut session, "Adebayo");

        let completion = session.complete_heritage(&first, Ok(candidates(&["Igbo"])));
        assert_eq!(completion, Completion::Discarded);
        assert_eq!(session.kind(), PhaseKind::FetchingHeritage);
        assert_eq!(session.input(), "Adebayo");

        session.complete_heritage(&second, Ok(candidates(&["Yoruba"])));
        assert_eq!(session.heritage_candidates(), candidates(&["Yoruba"]).as_slice());
    }

    #[test]
    fn test_candidates_reused_for_same_name() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Chioma");
        session.complete_heritage(&request, Ok(candidates(&["Igbo", "Yoruba"])));

        assert_eq!(session.submit("Chioma"), SubmitOutcome::Reused);
        assert_eq!(session.kind(), PhaseKind::AwaitingHeritageChoice);
        assert_eq!(session.heritage_candidates().len(), 2);
    }

    #[test]
    fn test_cache_dropped_when_input_changes() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Chioma");
        session.complete_heritage(&request, Ok(candidates(&["Igbo"])));

        session.set_input("Chiom");
        session.set_input("Chioma");
        assert!(matches!(session.submit("Chioma"), SubmitOutcome::Fetch(_)));
    }

    // ========== Choice Tests ==========

    #[test]
    fn test_choose_outside_awaiting_is_rejected() {
        let mut session = LookupSession::default();
        assert_eq!(
            session.choose("Igbo"),
            Err(TransitionError::NotAllowed {
                action: "choose a heritage",
                phase: PhaseKind::Idle
            })
        );

        fetch(&mut session, "Chioma");
        assert!(matches!(
            session.choose("Igbo"),
            Err(TransitionError::NotAllowed {
                phase: PhaseKind::FetchingHeritage,
                ..
            })
        ));
        assert_eq!(session.kind(), PhaseKind::FetchingHeritage);
    }

    #[test]
    fn test_choose_blank_heritage() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Chioma");
        session.complete_heritage(&request, Ok(candidates(&["Igbo"])));

        assert_eq!(session.choose("  "), Err(TransitionError::NoHeritageSelected));
        assert_eq!(session.kind(), PhaseKind::AwaitingHeritageChoice);
    }

    #[test]
    fn test_choose_unknown_candidate() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Chioma");
        session.complete_heritage(&request, Ok(candidates(&["Igbo"])));

        assert_eq!(
            session.choose("Hausa"),
            Err(TransitionError::UnknownCandidate("Hausa".to_string()))
        );
    }

    #[test]
    fn test_empty_candidates_accept_free_form_heritage() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Zainab");
        session.complete_heritage(&request, Ok(vec![]));
        assert_eq!(session.kind(), PhaseKind::AwaitingHeritageChoice);

        let translation = session.choose(" Hausa ").unwrap();
        assert_eq!(translation.heritage.as_str(), "Hausa");
        assert_eq!(session.kind(), PhaseKind::Translating);
    }

    #[test]
    fn test_second_choice_while_translating_is_rejected() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Chioma");
        session.complete_heritage(&request, Ok(candidates(&["Igbo", "Yoruba"])));
        session.choose("Igbo").unwrap();

        assert!(matches!(
            session.choose("Yoruba"),
            Err(TransitionError::NotAllowed {
                phase: PhaseKind::Translating,
                ..
            })
        ));
    }

    // ========== Translation Tests ==========

    #[test]
    fn test_translation_success_shows_result() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Chioma");
        session.complete_heritage(&request, Ok(candidates(&["Igbo"])));
        let translation_request = session.choose("Igbo").unwrap();

        session.complete_translation(&translation_request, Ok(translation("God's own gift")));
        assert_eq!(session.kind(), PhaseKind::Result);
        assert_eq!(session.result().unwrap().meaning, "God's own gift");
        assert_eq!(session.selected_heritage().unwrap().as_str(), "Igbo");

        let card = session.card(&CardStyle::default()).unwrap();
        assert_eq!(card.name, "Chioma");
    }

    #[test]
    fn test_translation_failure_keeps_candidates_cached() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Chioma");
        session.complete_heritage(&request, Ok(candidates(&["Igbo"])));
        let translation_request = session.choose("Igbo").unwrap();

        session.complete_translation(&translation_request, Err(LookupError::service("down")));
        assert_eq!(session.error_message().as_deref(), Some("down"));
        assert_eq!(session.submit("Chioma"), SubmitOutcome::Reused);
    }

    #[test]
    fn test_stale_translation_response_is_discarded() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Chioma");
        session.complete_heritage(&request, Ok(candidates(&["Igbo"])));
        let translation_request = session.choose("Igbo").unwrap();

        fetch(&mut session, "Adebayo");
        let completion =
            session.complete_translation(&translation_request, Ok(translation("God's own gift")));
        assert_eq!(completion, Completion::Discarded);
        assert_eq!(session.kind(), PhaseKind::FetchingHeritage);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_card_requires_result() {
        let session = LookupSession::default();
        assert_eq!(
            session.card(&CardStyle::default()),
            Err(TransitionError::NoResult)
        );
    }

    // ========== Snapshot Tests ==========

    #[test]
    fn test_snapshot_hides_suggestions_while_loading() {
        let mut session = LookupSession::default();
        session.set_input("Ch");
        assert_eq!(session.snapshot().suggestions.len(), 3);

        fetch(&mut session, "Chioma");
        let snapshot = session.snapshot();
        assert!(snapshot.loading);
        assert!(snapshot.suggestions.is_empty());
    }

    #[test]
    fn test_select_suggestion_closes_list() {
        let mut session = LookupSession::default();
        session.set_input("Ch");
        session.select_suggestion("Chioma");
        assert_eq!(session.input(), "Chioma");
        assert!(session.suggestions().is_empty());
    }

    #[test]
    fn test_reset_discards_outstanding_request() {
        let mut session = LookupSession::default();
        let request = fetch(&mut session, "Chioma");
        session.reset();

        assert_eq!(
            session.complete_heritage(&request, Ok(candidates(&["Igbo"]))),
            Completion::Discarded
        );
        assert_eq!(session.kind(), PhaseKind::Idle);
        assert_eq!(session.input(), "");
    }
}

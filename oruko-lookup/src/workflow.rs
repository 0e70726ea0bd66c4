//! Async driver for a lookup session
//!
//! [`Lookup`] pairs a [`LookupSession`] with a [`TranslationClient`]. Each
//! network step is one awaited request whose outcome is fed back into the
//! session. The session lock is never held across an `.await`, so a second
//! submit can arrive while a request is outstanding; the session decides
//! whether the late response still applies.

use crate::client::TranslationClient;
use crate::error::TransitionError;
use crate::session::{Completion, LookupSession, SessionSnapshot, SubmitOutcome};
use oruko::{CardStyle, CardView, SuggestionIndex};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// One user's lookups against a translation client
pub struct Lookup<C> {
    client: C,
    session: Mutex<LookupSession>,
}

impl<C: TranslationClient> Lookup<C> {
    pub fn new(client: C) -> Self {
        Self::with_index(client, SuggestionIndex::default())
    }

    pub fn with_index(client: C, index: SuggestionIndex) -> Self {
        Self {
            client,
            session: Mutex::new(LookupSession::new(index)),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn session(&self) -> MutexGuard<'_, LookupSession> {
        // Transitions never panic halfway, so a poisoned lock still holds a consistent session
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session().snapshot()
    }

    /// Record typed text; returns the refreshed suggestions
    pub fn type_input(&self, raw: &str) -> Vec<String> {
        let mut session = self.session();
        session.set_input(raw);
        session.suggestions().to_vec()
    }

    pub fn select_suggestion(&self, suggestion: &str) -> SessionSnapshot {
        let mut session = self.session();
        session.select_suggestion(suggestion);
        session.snapshot()
    }

    /// Validate `raw` and fetch its heritage candidates
    ///
    /// Returns the session as it stands once the request settled. If the user
    /// submitted another name meanwhile, that newer lookup is what the
    /// snapshot shows.
    pub async fn submit(&self, raw: &str) -> SessionSnapshot {
        let outcome = self.session().submit(raw);
        let request = match outcome {
            SubmitOutcome::Fetch(request) => request,
            SubmitOutcome::Reused | SubmitOutcome::Ignored | SubmitOutcome::Rejected(_) => {
                return self.snapshot();
            }
        };

        debug!(
            client = self.client.client_name(),
            session = %request.session,
            "requesting heritage candidates"
        );
        let response = self.client.fetch_heritage_candidates(&request.name).await;

        let mut session = self.session();
        if session.complete_heritage(&request, response) == Completion::Discarded {
            debug!(ticket = %request.session, "heritage response arrived after the lookup moved on");
        }
        session.snapshot()
    }

    /// Translate the current name with the chosen heritage
    ///
    /// # Returns
    ///
    /// * `Ok(SessionSnapshot)` - The session once the request settled
    /// * `Err(TransitionError)` - No heritage choice was pending, or the choice was invalid
    pub async fn choose(&self, heritage: &str) -> Result<SessionSnapshot, TransitionError> {
        let request = self.session().choose(heritage)?;

        debug!(
            client = self.client.client_name(),
            session = %request.session,
            "requesting translation"
        );
        let response = self
            .client
            .fetch_translation(&request.name, &request.heritage)
            .await;

        let mut session = self.session();
        if session.complete_translation(&request, response) == Completion::Discarded {
            debug!(ticket = %request.session, "translation response arrived after the lookup moved on");
        }
        Ok(session.snapshot())
    }

    pub fn reset(&self) -> SessionSnapshot {
        let mut session = self.session();
        session.reset();
        session.snapshot()
    }

    /// Card for the finished lookup
    ///
    /// `style` is read here, before any rendering starts, so a later color
    /// change cannot leak into this card.
    pub fn card(&self, style: &CardStyle) -> Result<CardView, TransitionError> {
        self.session().card(style)
    }
}

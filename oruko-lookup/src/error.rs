//! Error types for name lookups

use crate::session::PhaseKind;
use oruko::ValidationError;
use thiserror::Error;

/// Message shown when the service answers 429
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

/// Why a lookup ended without a result
///
/// Every variant is recoverable: the session goes back to accepting a new
/// submit and nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The typed name was rejected before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service answered 429
    #[error("{}", RATE_LIMIT_MESSAGE)]
    RateLimited,

    /// Any other failure, including an unreachable service
    #[error("{message}")]
    TranslationService { message: String },
}

impl LookupError {
    pub fn service(message: impl Into<String>) -> Self {
        Self::TranslationService {
            message: message.into(),
        }
    }

    /// Stable name of the error kind, for logs and API payloads
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::RateLimited => "rate_limited",
            Self::TranslationService { .. } => "translation_service",
        }
    }
}

/// Result type for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;

/// A workflow step requested at the wrong time
///
/// These leave the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {action} while the lookup is {phase}")]
    NotAllowed {
        action: &'static str,
        phase: PhaseKind,
    },

    #[error("Please select a heritage.")]
    NoHeritageSelected,

    #[error("{0:?} is not one of the suggested heritages")]
    UnknownCandidate(String),

    #[error("no card to show until a lookup has finished")]
    NoResult,
}

/// Problems building an HTTP client
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingEnv(&'static str),

    #[error("service base URL cannot be empty")]
    EmptyBaseUrl,

    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

//! HTTP routes
//!
//! Every visitor gets a session id; the lookup for that visitor lives in the
//! server under that id. Workflow calls return the session as it stands once
//! the call settled, including any lookup error, so the client always has
//! one consistent view to render.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use oruko::{CardStyle, CardView, HexColor, PALETTE, SuggestionIndex, text_color_for};
use oruko_export::{
    CaptureRegion, CardExporter, Delivery, DeliveryMode, ExportOptions, ExportedImage, deliver,
};
use oruko_lookup::{Lookup, SessionSnapshot, TransitionError, TranslationClient};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

pub type SharedClient = Arc<dyn TranslationClient>;

const SHARE_TITLE_HEADER: &str = "x-share-title";
const SHARE_TEXT_HEADER: &str = "x-share-text";

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// One visitor's lookup and card style
pub struct Visitor {
    lookup: Lookup<SharedClient>,
    style: Mutex<CardStyle>,
    last_seen: Mutex<Instant>,
}

impl Visitor {
    fn new(client: SharedClient, index: SuggestionIndex) -> Self {
        Self {
            lookup: Lookup::with_index(client, index),
            style: Mutex::new(CardStyle::default()),
            last_seen: Mutex::new(Instant::now()),
        }
    }

    fn last_seen(&self) -> Instant {
        *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn touch(&self) {
        *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    fn is_idle(&self, ttl: Duration) -> bool {
        self.last_seen().elapsed() >= ttl
    }

    fn style(&self) -> CardStyle {
        self.style
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_background(&self, background: HexColor) {
        self.style
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_background(background);
    }
}

#[derive(Clone)]
pub struct AppState {
    pub client: SharedClient,
    pub exporter: Arc<CardExporter>,
    pub index: SuggestionIndex,
    pub region: CaptureRegion,
    pub export_options: ExportOptions,
    /// Sessions untouched for this long are dropped
    pub session_ttl: Duration,
    pub max_sessions: usize,
    visitors: Arc<RwLock<HashMap<Uuid, Arc<Visitor>>>>,
}

impl AppState {
    pub fn new(client: SharedClient, exporter: CardExporter) -> Self {
        Self {
            client,
            exporter: Arc::new(exporter),
            index: SuggestionIndex::default(),
            region: CaptureRegion::default(),
            export_options: ExportOptions::default(),
            session_ttl: DEFAULT_SESSION_TTL,
            max_sessions: DEFAULT_MAX_SESSIONS,
            visitors: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.export_options.pixel_ratio = pixel_ratio;
        self
    }

    pub fn with_session_limits(mut self, ttl: Duration, max_sessions: usize) -> Self {
        self.session_ttl = ttl;
        self.max_sessions = max_sessions.max(1);
        self
    }

    async fn visitor(&self, id: Uuid) -> Result<Arc<Visitor>, ApiError> {
        let not_found = || api_error(StatusCode::NOT_FOUND, format!("no session with id {}", id));

        let visitor = self
            .visitors
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(not_found)?;

        if visitor.is_idle(self.session_ttl) {
            self.visitors.write().await.remove(&id);
            info!(%id, "session expired");
            return Err(not_found());
        }
        visitor.touch();
        Ok(visitor)
    }

    /// Drop every idle session, returning how many went
    pub async fn evict_idle(&self) -> usize {
        let mut visitors = self.visitors.write().await;
        let before = visitors.len();
        visitors.retain(|_, visitor| !visitor.is_idle(self.session_ttl));
        before - visitors.len()
    }

    pub async fn session_count(&self) -> usize {
        self.visitors.read().await.len()
    }

    /// Sweep idle sessions every `session_ttl` until the runtime shuts down
    pub fn spawn_sweeper(&self) -> tokio::task::JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(state.session_ttl.max(Duration::from_secs(1)));
            loop {
                interval.tick().await;
                let evicted = state.evict_idle().await;
                if evicted > 0 {
                    info!(evicted, "expired idle sessions");
                }
            }
        })
    }
}

// ========== Payloads ==========

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn transition_error(error: TransitionError) -> ApiError {
    let status = match error {
        TransitionError::NotAllowed { .. } | TransitionError::NoResult => StatusCode::CONFLICT,
        TransitionError::NoHeritageSelected | TransitionError::UnknownCandidate(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };
    api_error(status, error.to_string())
}

#[derive(Serialize)]
pub struct StyleView {
    pub background: HexColor,
    pub text_color: HexColor,
}

impl From<&CardStyle> for StyleView {
    fn from(style: &CardStyle) -> Self {
        Self {
            background: style.background().clone(),
            text_color: style.text_color(),
        }
    }
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub style: StyleView,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
}

impl SessionResponse {
    fn json(id: Uuid, visitor: &Visitor, snapshot: SessionSnapshot) -> Json<Self> {
        Json(Self {
            id,
            style: StyleView::from(&visitor.style()),
            snapshot,
        })
    }
}

#[derive(Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

#[derive(Serialize)]
pub struct PaletteResponse {
    pub colors: Vec<StyleView>,
}

#[derive(Deserialize)]
pub struct InputRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct HeritageChoice {
    pub heritage: String,
}

#[derive(Deserialize)]
pub struct StyleRequest {
    pub background: String,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub watermark: Option<bool>,
    /// Set by clients that can hand files to a share facility
    pub share: Option<bool>,
}

// ========== Router ==========

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/suggestions", get(suggestions))
        .route("/api/palette", get(palette))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session).delete(delete_session))
        .route("/api/sessions/{id}/input", put(update_input))
        .route("/api/sessions/{id}/suggestion", post(select_suggestion))
        .route("/api/sessions/{id}/submit", post(submit_name))
        .route("/api/sessions/{id}/heritage", post(choose_heritage))
        .route("/api/sessions/{id}/reset", post(reset_session))
        .route("/api/sessions/{id}/style", put(update_style))
        .route("/api/sessions/{id}/card", get(get_card))
        .route("/api/sessions/{id}/card.png", get(export_card))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ========== Handlers ==========

async fn suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: state.index.suggest(&query.q),
    })
}

async fn palette() -> Json<PaletteResponse> {
    let colors = PALETTE
        .iter()
        .filter_map(|hex| hex.parse::<HexColor>().ok())
        .map(|background| StyleView {
            text_color: text_color_for(&background),
            background,
        })
        .collect();
    Json(PaletteResponse { colors })
}

async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionResponse>) {
    let id = Uuid::new_v4();
    let visitor = Arc::new(Visitor::new(Arc::clone(&state.client), state.index.clone()));
    let response = SessionResponse::json(id, &visitor, visitor.lookup.snapshot());

    let mut visitors = state.visitors.write().await;
    visitors.retain(|_, visitor| !visitor.is_idle(state.session_ttl));
    while visitors.len() >= state.max_sessions {
        let oldest = visitors
            .iter()
            .min_by_key(|(_, visitor)| visitor.last_seen())
            .map(|(id, _)| *id);
        match oldest {
            Some(oldest) => {
                visitors.remove(&oldest);
                warn!(id = %oldest, "session limit reached, dropped least recently used session");
            }
            None => break,
        }
    }
    visitors.insert(id, visitor);
    info!(%id, sessions = visitors.len(), "session created");

    (StatusCode::CREATED, response)
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let visitor = state.visitor(id).await?;
    Ok(SessionResponse::json(id, &visitor, visitor.lookup.snapshot()))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    match state.visitors.write().await.remove(&id) {
        Some(_) => {
            info!(%id, "session closed");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("no session with id {}", id),
        )),
    }
}

async fn update_input(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<InputRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let visitor = state.visitor(id).await?;
    visitor.lookup.type_input(&request.text);
    Ok(SessionResponse::json(id, &visitor, visitor.lookup.snapshot()))
}

async fn select_suggestion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<NameRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let visitor = state.visitor(id).await?;
    let snapshot = visitor.lookup.select_suggestion(&request.name);
    Ok(SessionResponse::json(id, &visitor, snapshot))
}

async fn submit_name(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<NameRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let visitor = state.visitor(id).await?;
    info!(%id, name = %request.name, "submitting name");
    let snapshot = visitor.lookup.submit(&request.name).await;
    Ok(SessionResponse::json(id, &visitor, snapshot))
}

async fn choose_heritage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<HeritageChoice>,
) -> Result<Json<SessionResponse>, ApiError> {
    let visitor = state.visitor(id).await?;
    info!(%id, heritage = %request.heritage, "heritage chosen");
    let snapshot = visitor
        .lookup
        .choose(&request.heritage)
        .await
        .map_err(transition_error)?;
    Ok(SessionResponse::json(id, &visitor, snapshot))
}

async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let visitor = state.visitor(id).await?;
    let snapshot = visitor.lookup.reset();
    Ok(SessionResponse::json(id, &visitor, snapshot))
}

async fn update_style(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<StyleRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let visitor = state.visitor(id).await?;
    let background = request
        .background
        .parse::<HexColor>()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
    visitor.set_background(background);
    Ok(SessionResponse::json(id, &visitor, visitor.lookup.snapshot()))
}

async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CardView>, ApiError> {
    let visitor = state.visitor(id).await?;
    let card = visitor
        .lookup
        .card(&visitor.style())
        .map_err(transition_error)?;
    Ok(Json(card))
}

async fn export_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let visitor = state.visitor(id).await?;
    // Style is fixed here; a color change during rendering applies to the next export
    let card = visitor
        .lookup
        .card(&visitor.style())
        .map_err(transition_error)?;

    let mut options = state.export_options;
    if let Some(watermark) = query.watermark {
        options.watermark = watermark;
    }

    let image = state
        .exporter
        .export(card, state.region, options)
        .await
        .map_err(|e| {
            warn!(%id, error = %e, "export failed");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to export card: {}", e),
            )
        })?;

    let mode = DeliveryMode::for_capability(query.share.unwrap_or(false));
    png_response(deliver(image, mode))
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|e| {
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("invalid header value: {}", e),
        )
    })
}

fn png_response(delivery: Delivery) -> Result<Response, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(ExportedImage::MIME_TYPE),
    );

    let image = match delivery {
        Delivery::Share(payload) => {
            headers.insert(
                header::CONTENT_DISPOSITION,
                header_value(&format!("inline; filename=\"{}\"", payload.image.filename))?,
            );
            headers.insert(
                HeaderName::from_static(SHARE_TITLE_HEADER),
                header_value(&payload.title)?,
            );
            headers.insert(
                HeaderName::from_static(SHARE_TEXT_HEADER),
                header_value(&payload.text)?,
            );
            payload.image
        }
        Delivery::Download(download) => {
            headers.insert(
                header::CONTENT_DISPOSITION,
                header_value(&format!("attachment; filename=\"{}\"", download.filename))?,
            );
            download.image
        }
    };

    Ok((headers, image.bytes).into_response())
}

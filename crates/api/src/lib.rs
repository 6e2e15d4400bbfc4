mod error;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Extension, Json, Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{body::Body, Router};
use chrono::NaiveDate;
use hotelease_core::forms::{ContactMessage, LandingSearch, NewsletterSignup, ReviewSubmission};
use hotelease_core::navigation::deal_notice;
use hotelease_core::{
    Amenity, AmenityIcon, GuestCounts, GuestDetails, HotelDetail, ListingFilter, PaymentDetails,
    Route, SortKey, ValidationError,
};
use hotelease_frontdesk::{
    Clock, FrontDesk, ListingPage, SimulatedLatency, DEFAULT_IDLE_TTL_MINUTES,
};
use hotelease_observability::AppMetrics;
use hotelease_storage::MemoryStore;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{desk_error_response, not_found, validation_response};

const DEFAULT_COOKIE_NAME: &str = "hotelease_client";
const CLIENT_COOKIE_MAX_AGE_SECONDS: u64 = 60 * 60 * 24 * 30;

/// Runtime settings, normally read from `HOTELEASE_*` environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub allowed_origins: Vec<String>,
    pub latency: SimulatedLatency,
    pub clock: Clock,
    /// Untouched drafts and chats older than this are dropped.
    pub idle_ttl: chrono::Duration,
    pub purge_interval: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_secure: true,
            allowed_origins: default_allowed_origins(),
            latency: SimulatedLatency::default(),
            clock: Clock::System,
            idle_ttl: chrono::Duration::minutes(DEFAULT_IDLE_TTL_MINUTES),
            purge_interval: Duration::from_secs(60),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let latency = SimulatedLatency {
            hotel_load: env_millis("HOTELEASE_HOTEL_LOAD_DELAY_MS", defaults.latency.hotel_load)?,
            chat_reply: env_millis("HOTELEASE_CHAT_REPLY_DELAY_MS", defaults.latency.chat_reply)?,
            contact_submit: env_millis(
                "HOTELEASE_CONTACT_DELAY_MS",
                defaults.latency.contact_submit,
            )?,
        };
        let cookie_secure = match env::var("HOTELEASE_COOKIE_SECURE") {
            Ok(value) => value
                .trim()
                .parse::<bool>()
                .with_context(|| format!("HOTELEASE_COOKIE_SECURE must be true or false, got {value:?}"))?,
            Err(_) => defaults.cookie_secure,
        };
        let idle_ttl = match env::var("HOTELEASE_IDLE_TTL_MINUTES") {
            Ok(value) => value
                .trim()
                .parse::<i64>()
                .map(chrono::Duration::minutes)
                .context("HOTELEASE_IDLE_TTL_MINUTES must be a whole number of minutes")?,
            Err(_) => defaults.idle_ttl,
        };

        Ok(Self {
            cookie_name: env::var("HOTELEASE_COOKIE_NAME")
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.cookie_name),
            cookie_secure,
            allowed_origins: parse_allowed_origins(env::var("HOTELEASE_ALLOWED_ORIGINS").ok()),
            latency,
            clock: Clock::System,
            idle_ttl,
            purge_interval: env_millis("HOTELEASE_PURGE_INTERVAL_MS", defaults.purge_interval)?,
        })
    }
}

fn env_millis(key: &str, default: Duration) -> Result<Duration> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .with_context(|| format!("{key} must be a whole number of milliseconds")),
        Err(_) => Ok(default),
    }
}

fn default_allowed_origins() -> Vec<String> {
    ["http://localhost:3000", "http://127.0.0.1:3000"]
        .iter()
        .map(|origin| origin.to_string())
        .collect()
}

fn parse_allowed_origins(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect::<Vec<_>>()
    })
    .filter(|origins| !origins.is_empty())
    .unwrap_or_else(default_allowed_origins)
}

#[derive(Clone)]
pub struct ApiState {
    pub desk: Arc<FrontDesk<MemoryStore>>,
    pub metrics: Arc<AppMetrics>,
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub allowed_origins: Arc<Vec<String>>,
}

/// Identifies the browser whose client-local flags, drafts and chats are in play.
#[derive(Debug, Clone)]
struct ClientId(String);

pub async fn build_app() -> Result<Router> {
    let config = ApiConfig::from_env().context("invalid HOTELEASE_* configuration")?;
    Ok(build_app_with(config))
}

pub fn build_app_with(config: ApiConfig) -> Router {
    let metrics = AppMetrics::shared();
    let store = Arc::new(MemoryStore::new());
    let desk = Arc::new(
        FrontDesk::new(store, config.latency, metrics.clone())
            .with_clock(config.clock)
            .with_idle_ttl(config.idle_ttl),
    );
    spawn_purge_task(Arc::clone(&desk), config.purge_interval);

    build_router(ApiState {
        desk,
        metrics,
        cookie_name: config.cookie_name,
        cookie_secure: config.cookie_secure,
        allowed_origins: Arc::new(config.allowed_origins),
    })
}

/// Sweeps idle drafts, chats and client sessions on a fixed interval. Without a
/// running tokio runtime the sweep is skipped and purging happens only when new
/// drafts or chats are opened.
fn spawn_purge_task(desk: Arc<FrontDesk<MemoryStore>>, every: Duration) {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        return;
    };
    if every.is_zero() {
        return;
    }

    runtime.spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(error) = desk.purge_expired(chrono::Utc::now()).await {
                warn!(error = %error, "idle state purge failed");
            }
        }
    });
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/landing", get(landing))
        .route("/v1/search", post(landing_search))
        .route("/v1/newsletter", post(newsletter_subscribe))
        .route("/v1/pages/about", get(about_page))
        .route("/v1/pages/contact", get(contact_page))
        .route("/v1/contact", post(contact_submit))
        .route("/v1/routes/resolve", get(route_resolve))
        .route("/v1/hotels", get(hotels_list))
        .route("/v1/hotels/:id", get(hotel_detail))
        .route("/v1/hotels/:id/reviews", post(hotel_review))
        .route("/v1/auth/login", post(auth_login))
        .route("/v1/auth/register", post(auth_login))
        .route("/v1/auth/logout", post(auth_logout))
        .route("/v1/auth/me", get(auth_me))
        .route("/v1/bookings", post(booking_open))
        .route("/v1/bookings/:id", get(booking_get).delete(booking_discard))
        .route("/v1/bookings/:id/dates", post(booking_dates))
        .route("/v1/bookings/:id/room", post(booking_room))
        .route("/v1/bookings/:id/guests", post(booking_guests))
        .route("/v1/bookings/:id/start", post(booking_start))
        .route("/v1/bookings/:id/guest-details", post(booking_guest_details))
        .route("/v1/bookings/:id/payment", post(booking_payment))
        .route("/v1/bookings/:id/back", post(booking_back))
        .route("/v1/bookings/:id/confirm", post(booking_confirm))
        .route("/v1/chat", post(chat_open))
        .route("/v1/chat/:id", get(chat_get).delete(chat_close))
        .route("/v1/chat/:id/messages", post(chat_send))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            client_cookie_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: hotelease_observability::MetricsSnapshot,
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

// Pages and small forms

async fn landing(State(state): State<ApiState>) -> Response {
    match state.desk.landing().await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(error) => desk_error_response(error),
    }
}

async fn landing_search(Json(search): Json<LandingSearch>) -> Response {
    match search.listing_path() {
        Ok(path) => (StatusCode::OK, Json(json!({ "redirect_to": path }))).into_response(),
        Err(error) => validation_response(&error),
    }
}

async fn newsletter_subscribe(
    State(state): State<ApiState>,
    Json(signup): Json<NewsletterSignup>,
) -> Response {
    match signup.submit() {
        Ok(notice) => (StatusCode::OK, Json(notice)).into_response(),
        Err(error) => {
            state.metrics.inc_validation_failure(error.code());
            validation_response(&error)
        }
    }
}

async fn about_page(State(state): State<ApiState>) -> impl IntoResponse {
    Json(state.desk.about())
}

async fn contact_page(State(state): State<ApiState>) -> impl IntoResponse {
    Json(state.desk.contact())
}

async fn contact_submit(
    State(state): State<ApiState>,
    Json(message): Json<ContactMessage>,
) -> Response {
    match state.desk.submit_contact(message).await {
        Ok(notice) => (StatusCode::OK, Json(notice)).into_response(),
        Err(error) => desk_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
struct ResolveQuery {
    path: String,
}

#[derive(Debug, Serialize)]
struct ResolveResponse {
    route: Route,
    notice: Option<String>,
}

async fn route_resolve(
    State(state): State<ApiState>,
    Query(query): Query<ResolveQuery>,
) -> Response {
    match state.desk.resolve(&query.path).await {
        Ok(route) => {
            let notice = match &route {
                Route::Hotels { query } => query.deal_notice(),
                _ => None,
            };
            let status = if route.is_found() {
                StatusCode::OK
            } else {
                StatusCode::NOT_FOUND
            };
            (status, Json(ResolveResponse { route, notice })).into_response()
        }
        Err(error) => desk_error_response(error),
    }
}

// Listing and detail

#[derive(Debug, Default, Deserialize)]
struct ListingParams {
    q: Option<String>,
    destination: Option<String>,
    min_price: Option<String>,
    max_price: Option<String>,
    stars: Option<String>,
    amenities: Option<String>,
    sort: Option<String>,
    deal: Option<String>,
    #[serde(default)]
    reset: bool,
}

impl ListingParams {
    fn to_filter(&self) -> Result<ListingFilter, ValidationError> {
        let defaults = ListingFilter::default();
        let amenities = self
            .amenities
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(|label| {
                Amenity::parse(label).ok_or_else(|| ValidationError::UnknownAmenity {
                    label: label.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ListingFilter {
            query: self
                .q
                .clone()
                .or_else(|| self.destination.clone())
                .unwrap_or_default(),
            min_price: parse_number(self.min_price.as_deref(), "min_price")?
                .unwrap_or(defaults.min_price),
            max_price: parse_number(self.max_price.as_deref(), "max_price")?
                .unwrap_or(defaults.max_price),
            stars: parse_number(self.stars.as_deref(), "stars")?,
            amenities,
            sort: self.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
        })
    }
}

/// Blank means "not set"; anything else must parse.
fn parse_number<T: std::str::FromStr>(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Option<T>, ValidationError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::InvalidFilterValue { field }),
        None => Ok(None),
    }
}

#[derive(Debug, Serialize)]
struct ListingResponse {
    #[serde(flatten)]
    page: ListingPage,
    deal_notice: Option<String>,
}

async fn hotels_list(
    State(state): State<ApiState>,
    Query(params): Query<ListingParams>,
) -> Response {
    let result = if params.reset {
        state.desk.reset_listing().await
    } else {
        let filter = match params.to_filter() {
            Ok(filter) => filter,
            Err(error) => {
                state.metrics.inc_validation_failure(error.code());
                return validation_response(&error);
            }
        };
        state.desk.list_hotels(filter).await
    };

    match result {
        Ok(page) => (
            StatusCode::OK,
            Json(ListingResponse {
                page,
                deal_notice: params.deal.as_deref().map(deal_notice),
            }),
        )
            .into_response(),
        Err(error) => desk_error_response(error),
    }
}

#[derive(Debug, Serialize)]
struct AmenityBadge {
    label: &'static str,
    icon: AmenityIcon,
}

#[derive(Debug, Serialize)]
struct HotelDetailResponse {
    #[serde(flatten)]
    detail: HotelDetail,
    amenity_badges: Vec<AmenityBadge>,
}

fn parse_hotel_id(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

fn hotel_not_found() -> Response {
    not_found("hotel_not_found", "Hotel not found. Please try another hotel.")
}

async fn hotel_detail(State(state): State<ApiState>, Path(raw_id): Path<String>) -> Response {
    let Some(hotel_id) = parse_hotel_id(&raw_id) else {
        return hotel_not_found();
    };

    match state.desk.hotel_detail(hotel_id).await {
        Ok(detail) => {
            let amenity_badges = detail
                .amenities
                .iter()
                .map(|amenity| AmenityBadge {
                    label: amenity.label(),
                    icon: amenity.icon(),
                })
                .collect();
            (
                StatusCode::OK,
                Json(HotelDetailResponse {
                    detail,
                    amenity_badges,
                }),
            )
                .into_response()
        }
        Err(error) => desk_error_response(error),
    }
}

async fn hotel_review(
    State(state): State<ApiState>,
    Path(raw_id): Path<String>,
    Json(review): Json<ReviewSubmission>,
) -> Response {
    let Some(hotel_id) = parse_hotel_id(&raw_id) else {
        return hotel_not_found();
    };

    match state.desk.submit_review(hotel_id, review).await {
        Ok(notice) => (StatusCode::OK, Json(notice)).into_response(),
        Err(error) => desk_error_response(error),
    }
}

// Client session

async fn auth_login(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
) -> Response {
    match state.desk.log_in(&client_id).await {
        Ok(landing) => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "redirect_to": landing,
                "title": "Logged in successfully",
                "message": "You can now proceed with your booking.",
            })),
        )
            .into_response(),
        Err(error) => desk_error_response(error),
    }
}

async fn auth_logout(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
) -> Response {
    match state.desk.log_out(&client_id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "ok": true }))).into_response(),
        Err(error) => desk_error_response(error),
    }
}

async fn auth_me(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
) -> Response {
    match state.desk.client_session(&client_id).await {
        Ok(session) => (
            StatusCode::OK,
            Json(json!({
                "logged_in": session.is_logged_in(),
                "pending_redirect": session.pending_redirect(),
            })),
        )
            .into_response(),
        Err(error) => desk_error_response(error),
    }
}

// Booking wizard

#[derive(Debug, Deserialize)]
struct OpenBookingRequest {
    hotel_id: u32,
}

#[derive(Debug, Deserialize)]
struct DatesRequest {
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct RoomRequest {
    room_id: u32,
}

#[derive(Debug, Deserialize)]
struct ConfirmRequest {
    #[serde(default)]
    terms_accepted: bool,
}

fn booking_response<T: Serialize>(
    result: Result<T, hotelease_frontdesk::DeskError>,
    status: StatusCode,
) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(error) => desk_error_response(error),
    }
}

async fn booking_open(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
    Json(request): Json<OpenBookingRequest>,
) -> Response {
    booking_response(
        state.desk.open_booking(&client_id, request.hotel_id).await,
        StatusCode::CREATED,
    )
}

async fn booking_get(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
    Path(booking_id): Path<Uuid>,
) -> Response {
    booking_response(state.desk.booking(&client_id, booking_id), StatusCode::OK)
}

async fn booking_discard(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
    Path(booking_id): Path<Uuid>,
) -> Response {
    match state.desk.discard_booking(&client_id, booking_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => desk_error_response(error),
    }
}

async fn booking_dates(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<DatesRequest>,
) -> Response {
    booking_response(
        state
            .desk
            .select_dates(&client_id, booking_id, request.check_in, request.check_out),
        StatusCode::OK,
    )
}

async fn booking_room(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<RoomRequest>,
) -> Response {
    booking_response(
        state.desk.select_room(&client_id, booking_id, request.room_id),
        StatusCode::OK,
    )
}

async fn booking_guests(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
    Path(booking_id): Path<Uuid>,
    Json(guests): Json<GuestCounts>,
) -> Response {
    booking_response(
        state.desk.set_guests(&client_id, booking_id, guests),
        StatusCode::OK,
    )
}

async fn booking_start(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
    Path(booking_id): Path<Uuid>,
) -> Response {
    booking_response(
        state.desk.start_booking(&client_id, booking_id).await,
        StatusCode::OK,
    )
}

async fn booking_guest_details(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
    Path(booking_id): Path<Uuid>,
    Json(details): Json<GuestDetails>,
) -> Response {
    booking_response(
        state
            .desk
            .submit_guest_details(&client_id, booking_id, details),
        StatusCode::OK,
    )
}

async fn booking_payment(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
    Path(booking_id): Path<Uuid>,
    Json(details): Json<PaymentDetails>,
) -> Response {
    booking_response(
        state.desk.submit_payment(&client_id, booking_id, details),
        StatusCode::OK,
    )
}

async fn booking_back(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
    Path(booking_id): Path<Uuid>,
) -> Response {
    booking_response(state.desk.back(&client_id, booking_id), StatusCode::OK)
}

async fn booking_confirm(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<ConfirmRequest>,
) -> Response {
    match state
        .desk
        .confirm(&client_id, booking_id, request.terms_accepted)
    {
        Ok(confirmation) => (
            StatusCode::OK,
            Json(json!({
                "title": "Booking successful!",
                "message": "Your reservation has been confirmed. Check your email for details.",
                "confirmation": confirmation,
            })),
        )
            .into_response(),
        Err(error) => desk_error_response(error),
    }
}

// Live chat

#[derive(Debug, Deserialize)]
struct ChatMessageRequest {
    #[serde(default)]
    text: String,
}

async fn chat_open(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
) -> Response {
    (StatusCode::CREATED, Json(state.desk.open_chat(&client_id))).into_response()
}

async fn chat_get(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
    Path(chat_id): Path<Uuid>,
) -> Response {
    booking_response(state.desk.chat(&client_id, chat_id), StatusCode::OK)
}

async fn chat_close(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
    Path(chat_id): Path<Uuid>,
) -> Response {
    match state.desk.close_chat(&client_id, chat_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => desk_error_response(error),
    }
}

/// Accepted now; the agent entry shows up on a later read.
async fn chat_send(
    State(state): State<ApiState>,
    Extension(ClientId(client_id)): Extension<ClientId>,
    Path(chat_id): Path<Uuid>,
    Json(request): Json<ChatMessageRequest>,
) -> Response {
    if let Err(error) = state.desk.send_chat(&client_id, chat_id, &request.text) {
        return desk_error_response(error);
    }
    booking_response(state.desk.chat(&client_id, chat_id), StatusCode::ACCEPTED)
}

// Cookies and middleware

fn read_cookie_value(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let raw_cookie = headers.get(header::COOKIE)?.to_str().ok()?;
    raw_cookie.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        (key.trim() == cookie_name).then(|| value.trim().to_string())
    })
}

fn build_client_cookie(cookie_name: &str, client_id: &str, secure: bool) -> String {
    let mut segments = vec![
        format!("{cookie_name}={client_id}"),
        "Path=/".to_string(),
        "HttpOnly".to_string(),
        "SameSite=Lax".to_string(),
        format!("Max-Age={CLIENT_COOKIE_MAX_AGE_SECONDS}"),
    ];
    if secure {
        segments.push("Secure".to_string());
    }
    segments.join("; ")
}

/// Reuses the client cookie when it holds a valid id, otherwise issues a new one.
async fn client_cookie_middleware(
    State(state): State<ApiState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let existing = read_cookie_value(request.headers(), &state.cookie_name)
        .filter(|value| Uuid::parse_str(value).is_ok());
    let client_id = existing
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    request.extensions_mut().insert(ClientId(client_id.clone()));

    let mut response = next.run(request).await;
    if existing.is_none() {
        let cookie = build_client_cookie(&state.cookie_name, &client_id, state.cookie_secure);
        if let Ok(header_value) = HeaderValue::from_str(&cookie) {
            response
                .headers_mut()
                .append(header::SET_COOKIE, header_value);
        }
        info!(client_id = %client_id, "issued client cookie");
    }
    response
}

fn build_cors_layer(allowed_origins: &Arc<Vec<String>>) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();
    let origins = if origins.is_empty() {
        vec![HeaderValue::from_static("http://localhost:3000")]
    } else {
        origins
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn security_headers_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'; base-uri 'none'"),
    );
    if state.cookie_secure {
        response.headers_mut().insert(
            header::HeaderName::from_static("strict-transport-security"),
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::{
        build_client_cookie, parse_allowed_origins, read_cookie_value, ListingParams,
    };
    use axum::http::{header, HeaderMap, HeaderValue};
    use hotelease_core::{Amenity, SortKey, ValidationError};

    #[test]
    fn client_cookie_is_http_only_and_optionally_secure() {
        let cookie = build_client_cookie("hotelease_client", "abc", true);
        assert!(cookie.starts_with("hotelease_client=abc"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Secure"));

        let cookie = build_client_cookie("hotelease_client", "abc", false);
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn cookie_value_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; hotelease_client=1234 ; other=x"),
        );
        assert_eq!(
            read_cookie_value(&headers, "hotelease_client").as_deref(),
            Some("1234")
        );
        assert_eq!(read_cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn allowed_origins_fall_back_to_localhost() {
        assert_eq!(
            parse_allowed_origins(Some("https://hotelease.com/, ,http://a.test".to_string())),
            vec!["https://hotelease.com", "http://a.test"]
        );
        assert_eq!(
            parse_allowed_origins(Some(" , ".to_string())),
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
    }

    #[test]
    fn listing_params_map_onto_filter() {
        let params = ListingParams {
            destination: Some("Queens".to_string()),
            amenities: Some("free wifi, Pool".to_string()),
            sort: Some("price-high".to_string()),
            stars: Some("4".to_string()),
            ..ListingParams::default()
        };
        let filter = params.to_filter().unwrap();
        assert_eq!(filter.query, "Queens");
        assert_eq!(filter.amenities, vec![Amenity::FreeWifi, Amenity::Pool]);
        assert_eq!(filter.sort, SortKey::PriceHigh);
        assert_eq!((filter.min_price, filter.max_price), (50, 300));
    }

    #[test]
    fn malformed_numbers_are_validation_errors() {
        let params = ListingParams {
            stars: Some("abc".to_string()),
            ..ListingParams::default()
        };
        assert_eq!(
            params.to_filter().unwrap_err(),
            ValidationError::InvalidFilterValue { field: "stars" }
        );

        let params = ListingParams {
            min_price: Some("x".to_string()),
            max_price: Some(" ".to_string()),
            ..ListingParams::default()
        };
        assert_eq!(
            params.to_filter().unwrap_err(),
            ValidationError::InvalidFilterValue { field: "min_price" }
        );
    }

    #[test]
    fn unknown_amenity_is_a_validation_error() {
        let params = ListingParams {
            amenities: Some("Helipad".to_string()),
            ..ListingParams::default()
        };
        assert_eq!(
            params.to_filter().unwrap_err(),
            ValidationError::UnknownAmenity {
                label: "Helipad".to_string()
            }
        );
    }
}

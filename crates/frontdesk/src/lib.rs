use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use hotelease_core::content::{self, AboutPage, ContactPage, LandingPage};
use hotelease_core::forms::{ContactMessage, ReviewSubmission};
use hotelease_core::{
    apply_filters, reset_listing, resolve_route, results_notice, BookingConfirmation,
    BookingDraft, BookingError, BookingStep, BookingWizard, ChatEntry, ChatTranscript,
    ClientSession, GuestCounts, GuestDetails, Hotel, HotelDetail, ListingFilter, Notice,
    PaymentDetails, PriceQuote, Route, ValidationError,
};
use hotelease_observability::AppMetrics;
use hotelease_storage::{CatalogRepository, ClientSessionRepository};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};
use uuid::Uuid;

mod error;
mod latency;

pub use error::{DeskError, BOOKING_UNAVAILABLE, DETAIL_UNAVAILABLE, LISTING_UNAVAILABLE};
pub use latency::{Clock, SimulatedLatency};

#[derive(Debug, Clone, Serialize)]
pub struct ListingPage {
    pub filter: ListingFilter,
    pub count: usize,
    pub notice: String,
    pub hotels: Vec<Hotel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    pub booking_id: Uuid,
    pub step: BookingStep,
    pub draft: BookingDraft,
    pub quote: PriceQuote,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatView {
    pub chat_id: Uuid,
    pub entries: Vec<ChatEntry>,
}

/// What one purge pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PurgeReport {
    pub drafts: u64,
    pub chats: u64,
    pub clients: u64,
}

/// Idle time after which an untouched draft or transcript is dropped.
pub const DEFAULT_IDLE_TTL_MINUTES: i64 = 30;

#[derive(Debug, Clone)]
struct DraftRecord {
    client_id: String,
    wizard: BookingWizard,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct ChatRecord {
    client_id: String,
    transcript: ChatTranscript,
    expires_at: DateTime<Utc>,
}

impl DraftRecord {
    fn is_live_for(&self, client_id: &str, now: DateTime<Utc>) -> bool {
        self.client_id == client_id && self.expires_at > now
    }
}

impl ChatRecord {
    fn is_live_for(&self, client_id: &str, now: DateTime<Utc>) -> bool {
        self.client_id == client_id && self.expires_at > now
    }
}

type ChatMap = Arc<RwLock<HashMap<Uuid, ChatRecord>>>;

/// Handle on an agent reply that has been scheduled but not yet delivered.
#[derive(Debug)]
pub struct PendingReply {
    chat_id: Uuid,
    handle: JoinHandle<bool>,
}

impl PendingReply {
    pub fn chat_id(&self) -> Uuid {
        self.chat_id
    }

    /// Resolves once the timer fires; `false` when the transcript was closed first.
    pub async fn delivered(self) -> bool {
        self.handle.await.unwrap_or(false)
    }
}

/// Owns every client's in-flight page state: booking drafts, chat transcripts
/// and the client-local session flags kept in the store.
#[derive(Clone)]
pub struct FrontDesk<S>
where
    S: CatalogRepository + ClientSessionRepository,
{
    store: Arc<S>,
    latency: SimulatedLatency,
    clock: Clock,
    idle_ttl: Duration,
    drafts: Arc<RwLock<HashMap<Uuid, DraftRecord>>>,
    chats: ChatMap,
    metrics: Arc<AppMetrics>,
}

impl<S> FrontDesk<S>
where
    S: CatalogRepository + ClientSessionRepository,
{
    pub fn new(store: Arc<S>, latency: SimulatedLatency, metrics: Arc<AppMetrics>) -> Self {
        Self {
            store,
            latency,
            clock: Clock::System,
            idle_ttl: Duration::minutes(DEFAULT_IDLE_TTL_MINUTES),
            drafts: Arc::new(RwLock::new(HashMap::new())),
            chats: Arc::new(RwLock::new(HashMap::new())),
            metrics,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_idle_ttl(mut self, ttl: Duration) -> Self {
        self.idle_ttl = ttl;
        self
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // Listing and pages

    #[instrument(skip(self, filter), fields(query = %filter.query, sort = filter.sort.as_str()))]
    pub async fn list_hotels(&self, filter: ListingFilter) -> Result<ListingPage, DeskError> {
        let started = Instant::now();
        self.metrics.inc_request();
        latency::pause(self.latency.hotel_load).await;

        let catalog = self
            .store
            .list_hotels()
            .await
            .map_err(DeskError::unavailable(LISTING_UNAVAILABLE))?;
        let hotels = apply_filters(&catalog, &filter);
        self.metrics.inc_filter_run();
        self.metrics.observe_latency(started.elapsed());

        info!(matched = hotels.len(), total = catalog.len(), "listing filtered");
        Ok(ListingPage {
            count: hotels.len(),
            notice: results_notice(hotels.len()),
            filter,
            hotels,
        })
    }

    pub async fn reset_listing(&self) -> Result<ListingPage, DeskError> {
        self.metrics.inc_request();
        let catalog = self
            .store
            .list_hotels()
            .await
            .map_err(DeskError::unavailable(LISTING_UNAVAILABLE))?;
        let (filter, hotels) = reset_listing(&catalog);
        Ok(ListingPage {
            count: hotels.len(),
            notice: "All filters have been reset to default values.".to_string(),
            filter,
            hotels,
        })
    }

    #[instrument(skip(self))]
    pub async fn hotel_detail(&self, hotel_id: u32) -> Result<HotelDetail, DeskError> {
        self.metrics.inc_request();
        latency::pause(self.latency.hotel_load).await;
        self.load_detail(hotel_id).await
    }

    pub async fn landing(&self) -> Result<LandingPage, DeskError> {
        self.metrics.inc_request();
        let catalog = self
            .store
            .list_hotels()
            .await
            .map_err(DeskError::unavailable(LISTING_UNAVAILABLE))?;
        Ok(content::landing_page(&catalog))
    }

    pub fn about(&self) -> AboutPage {
        content::about_page()
    }

    pub fn contact(&self) -> ContactPage {
        content::contact_page()
    }

    pub async fn resolve(&self, path: &str) -> Result<Route, DeskError> {
        let ids = self
            .store
            .hotel_ids()
            .await
            .map_err(DeskError::unavailable(LISTING_UNAVAILABLE))?;
        Ok(resolve_route(path, &ids))
    }

    /// Validates, waits out the simulated send, and keeps nothing.
    #[instrument(skip(self, message))]
    pub async fn submit_contact(&self, message: ContactMessage) -> Result<Notice, DeskError> {
        self.metrics.inc_request();
        message.validate().map_err(|error| self.rejected(error))?;
        latency::pause(self.latency.contact_submit).await;
        info!("contact message accepted");
        Ok(ContactMessage::sent_notice())
    }

    pub async fn submit_review(
        &self,
        hotel_id: u32,
        review: ReviewSubmission,
    ) -> Result<Notice, DeskError> {
        self.metrics.inc_request();
        self.load_detail(hotel_id).await?;
        review.submit().map_err(|error| self.rejected(error).into())
    }

    // Client session

    pub async fn client_session(&self, client_id: &str) -> Result<ClientSession, DeskError> {
        self.store
            .load_client(client_id)
            .await
            .map_err(DeskError::unavailable(BOOKING_UNAVAILABLE))
    }

    /// Marks the client signed in and returns where they should land next.
    #[instrument(skip(self))]
    pub async fn log_in(&self, client_id: &str) -> Result<String, DeskError> {
        let mut session = self.client_session(client_id).await?;
        let landing = session.log_in();
        self.save_session(client_id, session).await?;
        info!(landing = %landing, "client signed in");
        Ok(landing)
    }

    pub async fn log_out(&self, client_id: &str) -> Result<(), DeskError> {
        let mut session = self.client_session(client_id).await?;
        session.log_out();
        self.save_session(client_id, session).await
    }

    // Booking wizard

    #[instrument(skip(self))]
    pub async fn open_booking(&self, client_id: &str, hotel_id: u32) -> Result<BookingView, DeskError> {
        self.metrics.inc_request();
        let detail = self.load_detail(hotel_id).await?;
        let now = Utc::now();
        self.purge_idle(now);
        let booking_id = Uuid::new_v4();
        let record = DraftRecord {
            client_id: client_id.to_string(),
            wizard: BookingWizard::new(&detail),
            expires_at: now + self.idle_ttl,
        };
        let view = booking_view(booking_id, &record.wizard);
        self.drafts.write().insert(booking_id, record);

        info!(booking_id = %booking_id, "booking draft opened");
        Ok(view)
    }

    pub fn booking(&self, client_id: &str, booking_id: Uuid) -> Result<BookingView, DeskError> {
        let now = Utc::now();
        let drafts = self.drafts.read();
        let record = drafts
            .get(&booking_id)
            .filter(|record| record.is_live_for(client_id, now))
            .ok_or(DeskError::DraftNotFound(booking_id))?;
        Ok(booking_view(booking_id, &record.wizard))
    }

    pub fn discard_booking(&self, client_id: &str, booking_id: Uuid) -> Result<(), DeskError> {
        let mut drafts = self.drafts.write();
        match drafts.get(&booking_id) {
            Some(record) if record.is_live_for(client_id, Utc::now()) => {
                drafts.remove(&booking_id);
                Ok(())
            }
            _ => Err(DeskError::DraftNotFound(booking_id)),
        }
    }

    pub fn select_dates(
        &self,
        client_id: &str,
        booking_id: Uuid,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> Result<BookingView, DeskError> {
        let today = self.today();
        self.update_draft(client_id, booking_id, |wizard| {
            wizard.select_dates(check_in, check_out, today)
        })
        .map(|(_, view)| view)
    }

    pub fn select_room(
        &self,
        client_id: &str,
        booking_id: Uuid,
        room_id: u32,
    ) -> Result<BookingView, DeskError> {
        self.update_draft(client_id, booking_id, |wizard| wizard.select_room(room_id))
            .map(|(_, view)| view)
    }

    pub fn set_guests(
        &self,
        client_id: &str,
        booking_id: Uuid,
        guests: GuestCounts,
    ) -> Result<BookingView, DeskError> {
        self.update_draft(client_id, booking_id, |wizard| wizard.set_guests(guests))
            .map(|(_, view)| view)
    }

    /// Leaves Idle. A signed-out client gets `AuthenticationRequired` and the
    /// hotel page is remembered in their session for after login.
    #[instrument(skip(self))]
    pub async fn start_booking(&self, client_id: &str, booking_id: Uuid) -> Result<BookingView, DeskError> {
        let mut session = self.client_session(client_id).await?;
        let result = self.update_draft(client_id, booking_id, |wizard| wizard.start(&mut session));
        self.save_session(client_id, session).await?;

        if let Err(DeskError::Booking(BookingError::AuthenticationRequired { redirect, .. })) = &result {
            info!(redirect = %redirect, "booking needs sign-in");
        }
        result.map(|(_, view)| view)
    }

    pub fn submit_guest_details(
        &self,
        client_id: &str,
        booking_id: Uuid,
        details: GuestDetails,
    ) -> Result<BookingView, DeskError> {
        self.update_draft(client_id, booking_id, |wizard| wizard.submit_guest_details(details))
            .map(|(_, view)| view)
    }

    pub fn submit_payment(
        &self,
        client_id: &str,
        booking_id: Uuid,
        details: PaymentDetails,
    ) -> Result<BookingView, DeskError> {
        self.update_draft(client_id, booking_id, |wizard| wizard.submit_payment(details))
            .map(|(_, view)| view)
    }

    pub fn back(&self, client_id: &str, booking_id: Uuid) -> Result<BookingView, DeskError> {
        self.update_draft(client_id, booking_id, BookingWizard::back)
            .map(|(_, view)| view)
    }

    /// Confirms the draft and discards it.
    #[instrument(skip(self))]
    pub fn confirm(
        &self,
        client_id: &str,
        booking_id: Uuid,
        terms_accepted: bool,
    ) -> Result<BookingConfirmation, DeskError> {
        let reference = booking_reference();
        let (confirmation, _) = self.update_draft(client_id, booking_id, |wizard| {
            wizard.confirm(terms_accepted, reference)
        })?;
        self.drafts.write().remove(&booking_id);
        self.metrics.inc_booking_confirmed();

        info!(
            reference = %confirmation.reference,
            hotel_id = confirmation.hotel_id,
            nights = confirmation.quote.nights,
            "booking confirmed"
        );
        Ok(confirmation)
    }

    // Live chat

    pub fn open_chat(&self, client_id: &str) -> ChatView {
        let now = Utc::now();
        self.purge_idle(now);
        let chat_id = Uuid::new_v4();
        let transcript = ChatTranscript::new();
        let view = ChatView {
            chat_id,
            entries: transcript.entries().to_vec(),
        };
        self.chats.write().insert(
            chat_id,
            ChatRecord {
                client_id: client_id.to_string(),
                transcript,
                expires_at: now + self.idle_ttl,
            },
        );
        view
    }

    pub fn chat(&self, client_id: &str, chat_id: Uuid) -> Result<ChatView, DeskError> {
        let now = Utc::now();
        let chats = self.chats.read();
        let record = chats
            .get(&chat_id)
            .filter(|record| record.is_live_for(client_id, now))
            .ok_or(DeskError::ChatNotFound(chat_id))?;
        Ok(ChatView {
            chat_id,
            entries: record.transcript.entries().to_vec(),
        })
    }

    pub fn close_chat(&self, client_id: &str, chat_id: Uuid) -> Result<(), DeskError> {
        let mut chats = self.chats.write();
        match chats.get(&chat_id) {
            Some(record) if record.is_live_for(client_id, Utc::now()) => {
                chats.remove(&chat_id);
                Ok(())
            }
            _ => Err(DeskError::ChatNotFound(chat_id)),
        }
    }

    /// Appends the user's message now and schedules exactly one agent reply.
    #[instrument(skip(self, text))]
    pub fn send_chat(
        &self,
        client_id: &str,
        chat_id: Uuid,
        text: &str,
    ) -> Result<PendingReply, DeskError> {
        self.metrics.inc_request();
        let topic = {
            let now = Utc::now();
            let mut chats = self.chats.write();
            let record = chats
                .get_mut(&chat_id)
                .filter(|record| record.is_live_for(client_id, now))
                .ok_or(DeskError::ChatNotFound(chat_id))?;
            record.expires_at = now + self.idle_ttl;
            record
                .transcript
                .push_user(text)
                .map_err(|error| self.rejected(error))?
        };

        let chats = Arc::clone(&self.chats);
        let metrics = Arc::clone(&self.metrics);
        let delay = self.latency.chat_reply;
        let handle = tokio::spawn(async move {
            latency::pause(delay).await;
            let mut chats = chats.write();
            let Some(record) = chats.get_mut(&chat_id) else {
                warn!(chat_id = %chat_id, "chat closed before reply, dropping it");
                return false;
            };
            record.transcript.push_agent(topic.reply());
            metrics.inc_chat_reply();
            true
        });

        info!(chat_id = %chat_id, topic = ?topic, "chat reply scheduled");
        Ok(PendingReply { chat_id, handle })
    }

    /// Drops drafts, transcripts and client sessions that have sat idle past their
    /// expiry.
    #[instrument(skip(self))]
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<PurgeReport, DeskError> {
        let (drafts, chats) = self.purge_idle(now);
        let clients = self
            .store
            .purge_expired(now)
            .await
            .map_err(DeskError::unavailable(BOOKING_UNAVAILABLE))?;

        let report = PurgeReport {
            drafts,
            chats,
            clients,
        };
        if report != PurgeReport::default() {
            info!(drafts, chats, clients, "purged idle front desk state");
        }
        Ok(report)
    }

    fn purge_idle(&self, now: DateTime<Utc>) -> (u64, u64) {
        let mut drafts_removed = 0_u64;
        self.drafts.write().retain(|_, record| {
            let keep = record.expires_at > now;
            if !keep {
                drafts_removed += 1;
            }
            keep
        });

        let mut chats_removed = 0_u64;
        self.chats.write().retain(|_, record| {
            let keep = record.expires_at > now;
            if !keep {
                chats_removed += 1;
            }
            keep
        });

        (drafts_removed, chats_removed)
    }

    async fn load_detail(&self, hotel_id: u32) -> Result<HotelDetail, DeskError> {
        self.store
            .hotel_detail(hotel_id)
            .await
            .map_err(DeskError::unavailable(DETAIL_UNAVAILABLE))?
            .ok_or(DeskError::HotelNotFound { hotel_id })
    }

    async fn save_session(&self, client_id: &str, session: ClientSession) -> Result<(), DeskError> {
        self.store
            .save_client(client_id, session)
            .await
            .map_err(DeskError::unavailable(BOOKING_UNAVAILABLE))
    }

    /// Runs `action` against a copy of the wizard and commits it only on success.
    fn update_draft<T>(
        &self,
        client_id: &str,
        booking_id: Uuid,
        action: impl FnOnce(&mut BookingWizard) -> Result<T, BookingError>,
    ) -> Result<(T, BookingView), DeskError> {
        self.metrics.inc_request();
        let now = Utc::now();
        let mut drafts = self.drafts.write();
        let record = drafts
            .get_mut(&booking_id)
            .filter(|record| record.is_live_for(client_id, now))
            .ok_or(DeskError::DraftNotFound(booking_id))?;
        record.expires_at = now + self.idle_ttl;

        let mut wizard = record.wizard.clone();
        let outcome = action(&mut wizard).map_err(|error| {
            if let BookingError::Invalid(invalid) = &error {
                self.metrics.inc_validation_failure(invalid.code());
            }
            DeskError::Booking(error)
        })?;

        let view = booking_view(booking_id, &wizard);
        record.wizard = wizard;
        Ok((outcome, view))
    }

    fn rejected(&self, error: ValidationError) -> ValidationError {
        self.metrics.inc_validation_failure(error.code());
        error
    }
}

fn booking_view(booking_id: Uuid, wizard: &BookingWizard) -> BookingView {
    BookingView {
        booking_id,
        step: wizard.step(),
        draft: wizard.draft().clone(),
        quote: wizard.quote(),
    }
}

fn booking_reference() -> String {
    let id = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("HE-{}", &id[..8])
}

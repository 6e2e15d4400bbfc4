use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use hotelease_core::{ClientSession, Hotel, HotelDetail};
use parking_lot::RwLock;

pub mod seed;

pub trait CatalogRepository: Send + Sync {
    async fn list_hotels(&self) -> Result<Vec<Hotel>>;
    async fn hotel_detail(&self, hotel_id: u32) -> Result<Option<HotelDetail>>;
    async fn hotel_ids(&self) -> Result<Vec<u32>>;
}

/// Per-client key/value flags, keyed by the client cookie. Every save pushes the
/// client's expiry out again; expired clients load as fresh sessions.
pub trait ClientSessionRepository: Send + Sync {
    async fn load_client(&self, client_id: &str) -> Result<ClientSession>;
    async fn save_client(&self, client_id: &str, session: ClientSession) -> Result<()>;
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64>;
}

/// Matches the client cookie's max-age.
pub const DEFAULT_CLIENT_TTL_DAYS: i64 = 30;

#[derive(Debug, Clone)]
struct StoredClient {
    session: ClientSession,
    expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct MemoryStore {
    catalog: Arc<Vec<HotelDetail>>,
    clients: Arc<RwLock<HashMap<String, StoredClient>>>,
    client_ttl: Duration,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_catalog(seed::sample_catalog())
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Vec<HotelDetail>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            clients: Arc::new(RwLock::new(HashMap::new())),
            client_ttl: Duration::days(DEFAULT_CLIENT_TTL_DAYS),
        }
    }

    pub fn with_client_ttl(mut self, ttl: Duration) -> Self {
        self.client_ttl = ttl;
        self
    }

    pub fn client_count(&self) -> usize {
        self.clients.read().len()
    }
}

impl CatalogRepository for MemoryStore {
    async fn list_hotels(&self) -> Result<Vec<Hotel>> {
        Ok(self
            .catalog
            .iter()
            .map(|detail| detail.hotel.clone())
            .collect())
    }

    async fn hotel_detail(&self, hotel_id: u32) -> Result<Option<HotelDetail>> {
        Ok(self
            .catalog
            .iter()
            .find(|detail| detail.hotel.id == hotel_id)
            .cloned())
    }

    async fn hotel_ids(&self) -> Result<Vec<u32>> {
        Ok(self.catalog.iter().map(|detail| detail.hotel.id).collect())
    }
}

impl ClientSessionRepository for MemoryStore {
    async fn load_client(&self, client_id: &str) -> Result<ClientSession> {
        let now = Utc::now();
        Ok(self
            .clients
            .read()
            .get(client_id)
            .filter(|stored| stored.expires_at > now)
            .map(|stored| stored.session.clone())
            .unwrap_or_default())
    }

    async fn save_client(&self, client_id: &str, session: ClientSession) -> Result<()> {
        let stored = StoredClient {
            session,
            expires_at: Utc::now() + self.client_ttl,
        };
        self.clients.write().insert(client_id.to_string(), stored);
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut removed = 0_u64;
        self.clients.write().retain(|_, stored| {
            let keep = stored.expires_at > now;
            if !keep {
                removed += 1;
            }
            keep
        });

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn catalog_lists_hotels_in_order() {
        let store = MemoryStore::new();
        let ids = store
            .list_hotels()
            .await
            .unwrap()
            .into_iter()
            .map(|hotel| hotel.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(store.hotel_detail(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_client_starts_signed_out() {
        let store = MemoryStore::new();
        let mut session = store.load_client("fresh").await.unwrap();
        assert!(!session.is_logged_in());

        session.log_in();
        store.save_client("fresh", session).await.unwrap();
        assert!(store.load_client("fresh").await.unwrap().is_logged_in());
        assert_eq!(store.client_count(), 1);
    }

    #[tokio::test]
    async fn expired_clients_are_purged() {
        let store = MemoryStore::new().with_client_ttl(Duration::hours(1));
        let mut session = ClientSession::new();
        session.log_in();
        store.save_client("idle", session.clone()).await.unwrap();
        store.save_client("busy", session).await.unwrap();

        assert_eq!(store.purge_expired(Utc::now()).await.unwrap(), 0);
        let later = Utc::now() + Duration::hours(2);
        assert_eq!(store.purge_expired(later).await.unwrap(), 2);
        assert_eq!(store.client_count(), 0);
        assert!(!store.load_client("idle").await.unwrap().is_logged_in());
    }

    #[tokio::test]
    async fn expired_client_loads_signed_out() {
        let store = MemoryStore::new().with_client_ttl(Duration::zero());
        let mut session = ClientSession::new();
        session.log_in();
        store.save_client("gone", session).await.unwrap();
        assert!(!store.load_client("gone").await.unwrap().is_logged_in());
    }
}

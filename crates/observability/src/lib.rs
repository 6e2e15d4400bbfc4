use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// In-process counters. Every increment is mirrored to the `metrics` facade,
/// which is a no-op until a recorder is installed.
#[derive(Debug, Default)]
pub struct AppMetrics {
    requests_total: AtomicU64,
    filter_runs_total: AtomicU64,
    validation_failures_total: AtomicU64,
    bookings_confirmed_total: AtomicU64,
    chat_replies_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub filter_runs_total: u64,
    pub validation_failures_total: u64,
    pub bookings_confirmed_total: u64,
    pub chat_replies_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("hotelease_requests_total").increment(1);
    }

    pub fn inc_filter_run(&self) {
        self.filter_runs_total.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("hotelease_filter_runs_total").increment(1);
    }

    pub fn inc_validation_failure(&self, code: &'static str) {
        self.validation_failures_total
            .fetch_add(1, Ordering::Relaxed);
        metrics::counter!("hotelease_validation_failures_total", "code" => code).increment(1);
    }

    pub fn inc_booking_confirmed(&self) {
        self.bookings_confirmed_total
            .fetch_add(1, Ordering::Relaxed);
        metrics::counter!("hotelease_bookings_confirmed_total").increment(1);
    }

    pub fn inc_chat_reply(&self) {
        self.chat_replies_total.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("hotelease_chat_replies_total").increment(1);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
        metrics::histogram!("hotelease_request_latency_seconds").record(duration.as_secs_f64());
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: requests,
            filter_runs_total: self.filter_runs_total.load(Ordering::Relaxed),
            validation_failures_total: self.validation_failures_total.load(Ordering::Relaxed),
            bookings_confirmed_total: self.bookings_confirmed_total.load(Ordering::Relaxed),
            chat_replies_total: self.chat_replies_total.load(Ordering::Relaxed),
            avg_latency_millis: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,hotelease_api=info,hotelease_frontdesk=info",
                service_name.replace('-', "_")
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    requests_total: AtomicU64,
    fallback_replies_total: AtomicU64,
    localized_replies_total: AtomicU64,
    catalog_errors_total: AtomicU64,
    recovered_errors_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub fallback_replies_total: u64,
    pub localized_replies_total: u64,
    pub catalog_errors_total: u64,
    pub recovered_errors_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_fallback_reply(&self) {
        self.fallback_replies_total.fetch_add(1, Ordering::Relaxed);
    }

    /// A reply that had to be translated back out of the canonical language.
    pub fn inc_localized_reply(&self) {
        self.localized_replies_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_catalog_error(&self) {
        self.catalog_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Catastrophic failures converted into the fixed technical-error reply.
    pub fn inc_recovered_error(&self) {
        self.recovered_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: requests,
            fallback_replies_total: self.fallback_replies_total.load(Ordering::Relaxed),
            localized_replies_total: self.localized_replies_total.load(Ordering::Relaxed),
            catalog_errors_total: self.catalog_errors_total.load(Ordering::Relaxed),
            recovered_errors_total: self.recovered_errors_total.load(Ordering::Relaxed),
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
                "{}=info,mesero_api=info,mesero_pipeline=info",
                service_name
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

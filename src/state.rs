use crate::calendar::CalendarStore;
use crate::config::AppConfig;
use crate::profile::ProfileProvider;
use portable_atomic::AtomicU64;
use std::sync::Arc;

// ── Performance Counters (lock-free) ──

#[derive(Default)]
pub struct PerfCounters {
    pub advice_computed: AtomicU64,
    pub advice_unavailable: AtomicU64,
    pub calendars_served: AtomicU64,
    pub predictions_served: AtomicU64,
}

// ── Application shared state ──
// Stores are immutable after startup; handlers share them via Arc with
// no locking. The advice engine itself is pure and holds no state here.

pub struct AppState {
    pub config: AppConfig,
    pub calendars: CalendarStore,
    pub profiles: Arc<dyn ProfileProvider>,
    pub counters: PerfCounters,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        calendars: CalendarStore,
        profiles: Arc<dyn ProfileProvider>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            calendars,
            profiles,
            counters: PerfCounters::default(),
        })
    }
}

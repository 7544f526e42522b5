use std::sync::Arc;
use std::time::Duration;

use stockroom_infra::ItemStore;
use stockroom_observability::Telemetry;

use crate::config::DEFAULT_LIST_DELAY;

/// Process-scoped handles injected into every handler.
///
/// Handlers hold no other state, so concurrent requests need no coordination
/// beyond what the store itself provides.
#[derive(Clone)]
pub struct InventoryServices {
    store: Arc<dyn ItemStore>,
    telemetry: Arc<Telemetry>,
    list_delay: Duration,
}

impl InventoryServices {
    pub fn new(store: Arc<dyn ItemStore>, telemetry: Arc<Telemetry>) -> Self {
        Self {
            store,
            telemetry,
            list_delay: DEFAULT_LIST_DELAY,
        }
    }

    /// Pause applied before every list query; zero disables it.
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = delay;
        self
    }

    pub fn store(&self) -> &dyn ItemStore {
        self.store.as_ref()
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn list_delay(&self) -> Duration {
        self.list_delay
    }
}

//! The shared entry point for polls and publishes.

use alloc::sync::Arc;

use crate::{config::HubConfig, janitor::Janitor, registry::ClientRegistry};

/// Long-poll fan-out hub.
///
/// Construct one per process and clone it into every request handler; clones
/// share the same [`ClientRegistry`]. Polling is implemented in
/// [`poll`](crate::poll) and publishing in [`publish`](crate::publish).
#[derive(Debug, Clone)]
pub struct Hub {
    pub(crate) registry: Arc<ClientRegistry>,
    pub(crate) config: HubConfig,
}

impl Hub {
    /// Create a hub with an empty registry.
    #[must_use]
    pub fn new(config: HubConfig) -> Self {
        Self {
            registry: Arc::new(ClientRegistry::new()),
            config,
        }
    }

    /// The hub's timing configuration.
    #[must_use]
    pub const fn config(&self) -> &HubConfig {
        &self.config
    }

    /// The shared client registry.
    #[must_use]
    pub const fn registry(&self) -> &Arc<ClientRegistry> {
        &self.registry
    }

    /// Number of registered clients.
    pub async fn active_clients(&self) -> usize {
        self.registry.len().await
    }

    /// A janitor sweeping this hub's registry with this hub's timings.
    #[must_use]
    pub fn janitor(&self) -> Janitor {
        Janitor::new(self.registry.clone(), &self.config)
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new(HubConfig::default())
    }
}

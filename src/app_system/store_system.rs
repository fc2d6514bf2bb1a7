use tracing::{error, info, instrument};

use crate::actors::InventoryService;
use crate::clients::InventoryClient;
use crate::inventory::Inventory;

/// Starts the inventory service and hands out its client.
///
/// **Shutdown:** send `Shutdown`, then wait for the service task so the
/// last request is answered before the process exits.
pub struct StoreSystem {
    pub inventory_client: InventoryClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    /// Starts the service over the seeded collection.
    pub fn new() -> Self {
        Self::with_inventory(Inventory::seeded())
    }

    #[instrument(name = "store_system", skip(inventory), fields(products = inventory.len()))]
    pub fn with_inventory(inventory: Inventory) -> Self {
        info!("Starting store system");

        let (inventory_service, inventory_client) = InventoryService::new(100, inventory);
        let handles = vec![tokio::spawn(inventory_service.run())];

        info!("Store system started");
        Self {
            inventory_client,
            handles,
        }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store system");

        let _ = self.inventory_client.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
            }
        }

        info!("Store system shutdown complete");
        Ok(())
    }
}

impl Default for StoreSystem {
    fn default() -> Self {
        Self::new()
    }
}

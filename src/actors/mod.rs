use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::clients::InventoryClient;
use crate::domain::{Product, ProductForm, ProductId};
use crate::inventory::{Inventory, InventoryError, SortMode, ViewCache};
use crate::messages::{InventoryRequest, ServiceResponse};

// =============================================================================
// INVENTORY SERVICE
// =============================================================================

/// Sole owner of the product collection. Requests are handled one at a
/// time, so a mutation always runs to completion before the next request is
/// looked at.
pub struct InventoryService {
    receiver: mpsc::Receiver<InventoryRequest>,
    inventory: Inventory,
    views: ViewCache,
}

impl InventoryService {
    pub fn new(buffer_size: usize, inventory: Inventory) -> (Self, InventoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            inventory,
            views: ViewCache::default(),
        };
        let client = InventoryClient::new(sender);
        (service, client)
    }

    #[instrument(name = "inventory_service", skip(self))]
    pub async fn run(mut self) {
        info!(products = self.inventory.len(), "InventoryService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                InventoryRequest::CreateProduct { form, respond_to } => {
                    self.handle_create_product(form, respond_to);
                }
                InventoryRequest::UpdateProduct { id, form, respond_to } => {
                    self.handle_update_product(id, form, respond_to);
                }
                InventoryRequest::DeleteProduct { id, respond_to } => {
                    self.handle_delete_product(id, respond_to);
                }
                InventoryRequest::GetProduct { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.inventory.get(id).cloned()));
                }
                InventoryRequest::ListProducts { respond_to } => {
                    let _ = respond_to.send(Ok(self.inventory.products().to_vec()));
                }
                InventoryRequest::ViewProducts { term, sort, respond_to } => {
                    self.handle_view_products(term, sort, respond_to);
                }
                InventoryRequest::Shutdown => {
                    info!("InventoryService shutting down");
                    break;
                }
            }
        }

        info!("InventoryService stopped");
    }

    #[instrument(fields(product_name = %form.name), skip(self, form, respond_to))]
    fn handle_create_product(
        &mut self,
        form: ProductForm,
        respond_to: ServiceResponse<Product, InventoryError>,
    ) {
        debug!("Processing create_product request");

        let result = self.inventory.create(&form);
        match &result {
            Ok(product) => info!(product_id = %product.id, price = %product.price, stock = product.stock, "Product created"),
            Err(e) => warn!(error = %e, "Product rejected"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id, product_name = %form.name), skip(self, form, respond_to))]
    fn handle_update_product(
        &mut self,
        id: ProductId,
        form: ProductForm,
        respond_to: ServiceResponse<Product, InventoryError>,
    ) {
        debug!("Processing update_product request");

        let result = self.inventory.update(id, &form);
        match &result {
            Ok(product) => info!(price = %product.price, stock = product.stock, "Product updated"),
            Err(e) => warn!(error = %e, "Update rejected"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_delete_product(
        &mut self,
        id: ProductId,
        respond_to: ServiceResponse<Product, InventoryError>,
    ) {
        debug!("Processing delete_product request");

        let result = self.inventory.delete(id);
        match &result {
            Ok(product) => info!(product_name = %product.name, "Product deleted"),
            Err(e) => warn!(error = %e, "Delete rejected"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(term = %term, sort = %sort), skip(self, respond_to))]
    fn handle_view_products(
        &mut self,
        term: String,
        sort: SortMode,
        respond_to: ServiceResponse<Vec<Product>, InventoryError>,
    ) {
        let revision = self.inventory.revision();
        if self.views.is_cached(revision, &term, sort) {
            debug!("Serving cached view");
        }
        let rows = self
            .views
            .view(self.inventory.products(), revision, &term, sort)
            .to_vec();
        debug!(rows = rows.len(), "View computed");

        let _ = respond_to.send(Ok(rows));
    }
}

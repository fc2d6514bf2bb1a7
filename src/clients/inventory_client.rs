use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::{Product, ProductForm, ProductId};
use crate::inventory::{InventoryError, SortMode};
use crate::messages::InventoryRequest;

/// Handle for the inventory service. Cheap to clone; every clone talks to
/// the same collection.
#[derive(Clone)]
pub struct InventoryClient {
    sender: mpsc::Sender<InventoryRequest>,
}

impl InventoryClient {
    pub fn new(sender: mpsc::Sender<InventoryRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), InventoryError> {
        debug!("Sending shutdown request");
        self.sender
            .send(InventoryRequest::Shutdown)
            .await
            .map_err(|e| InventoryError::ServiceUnavailable(e.to_string()))
    }
}

client_method!(InventoryClient => fn create_product(form: ProductForm) -> Product as InventoryRequest::CreateProduct);
client_method!(InventoryClient => fn update_product(id: ProductId, form: ProductForm) -> Product as InventoryRequest::UpdateProduct);
client_method!(InventoryClient => fn delete_product(id: ProductId) -> Product as InventoryRequest::DeleteProduct);
client_method!(InventoryClient => fn get_product(id: ProductId) -> Option<Product> as InventoryRequest::GetProduct);
client_method!(InventoryClient => fn list_products() -> Vec<Product> as InventoryRequest::ListProducts);
client_method!(InventoryClient => fn view_products(term: String, sort: SortMode) -> Vec<Product> as InventoryRequest::ViewProducts);

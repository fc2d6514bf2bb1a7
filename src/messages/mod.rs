use tokio::sync::oneshot;

use crate::domain::{Product, ProductForm, ProductId};
use crate::inventory::{InventoryError, SortMode};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests understood by the inventory service. Each variant carries its
/// parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum InventoryRequest {
    CreateProduct {
        form: ProductForm,
        respond_to: ServiceResponse<Product, InventoryError>,
    },
    UpdateProduct {
        id: ProductId,
        form: ProductForm,
        respond_to: ServiceResponse<Product, InventoryError>,
    },
    DeleteProduct {
        id: ProductId,
        respond_to: ServiceResponse<Product, InventoryError>,
    },
    GetProduct {
        id: ProductId,
        respond_to: ServiceResponse<Option<Product>, InventoryError>,
    },
    ListProducts {
        respond_to: ServiceResponse<Vec<Product>, InventoryError>,
    },
    ViewProducts {
        term: String,
        sort: SortMode,
        respond_to: ServiceResponse<Vec<Product>, InventoryError>,
    },
    Shutdown,
}

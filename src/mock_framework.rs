//! # Mock Framework
//!
//! Utilities for testing callers of the inventory service in isolation.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its
//! channel, then helpers like [`expect_create`] or [`expect_view`] to
//! assert what was sent and answer it.

use tokio::sync::mpsc;

use crate::clients::InventoryClient;
use crate::domain::{Product, ProductForm, ProductId};
use crate::inventory::{InventoryError, SortMode};
use crate::messages::{InventoryRequest, ServiceResponse};

/// Creates a client whose requests land on the returned receiver instead
/// of a running service.
pub fn create_mock_client(buffer_size: usize) -> (InventoryClient, mpsc::Receiver<InventoryRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (InventoryClient::new(sender), receiver)
}

/// Helper to verify that the next message is a CreateProduct request
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(ProductForm, ServiceResponse<Product, InventoryError>)> {
    match receiver.recv().await {
        Some(InventoryRequest::CreateProduct { form, respond_to }) => Some((form, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an UpdateProduct request
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(ProductId, ProductForm, ServiceResponse<Product, InventoryError>)> {
    match receiver.recv().await {
        Some(InventoryRequest::UpdateProduct { id, form, respond_to }) => Some((id, form, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a GetProduct request
pub async fn expect_get(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(ProductId, ServiceResponse<Option<Product>, InventoryError>)> {
    match receiver.recv().await {
        Some(InventoryRequest::GetProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a ViewProducts request
pub async fn expect_view(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(String, SortMode, ServiceResponse<Vec<Product>, InventoryError>)> {
    match receiver.recv().await {
        Some(InventoryRequest::ViewProducts { term, sort, respond_to }) => Some((term, sort, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let create_task = tokio::spawn(async move {
            client
                .create_product(ProductForm::new("Test", "1.00", "10"))
                .await
        });

        let (form, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(form.name, "Test");
        let product = Product::new(1, "Test", Decimal::ONE, 10);
        responder.send(Ok(product.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(product));
    }

    #[tokio::test]
    async fn dropped_responder_reports_unavailable() {
        let (client, mut receiver) = create_mock_client(10);

        let get_task = tokio::spawn(async move { client.get_product(ProductId(1)).await });
        let (_, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        drop(responder);

        assert!(matches!(
            get_task.await.unwrap(),
            Err(InventoryError::ServiceUnavailable(_))
        ));
    }
}

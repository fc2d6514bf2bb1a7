#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::time::Duration;

    use rust_decimal::Decimal;

    use crate::app_system::StoreSystem;
    use crate::config::Config;
    use crate::dashboard::InventoryDashboard;
    use crate::domain::{Product, ProductForm, ProductId};
    use crate::inventory::{Field, Inventory, InventoryError, SortMode, ValidationError};

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id.0).collect()
    }

    #[tokio::test]
    async fn test_add_then_delete_keeps_remaining_ids() {
        let system = StoreSystem::new();
        let mut dashboard = InventoryDashboard::new(system.inventory_client.clone(), &Config::default());

        // Add through the dialog
        dashboard.open_add();
        dashboard.set_name("Air Mineral");
        dashboard.type_price("500");
        dashboard.set_stock("12");
        let created = dashboard.submit().await.unwrap();

        assert_eq!(created.id, ProductId(5));
        assert_eq!(created.price, Decimal::new(500, 2));
        assert!(dashboard.form().is_none());
        assert_eq!(ids(&dashboard.visible().await.unwrap()), vec![1, 2, 3, 4, 5]);

        // Delete with confirmation
        let pending = dashboard.request_delete(created.id).await.unwrap();
        assert_eq!(pending.name, "Air Mineral");
        let deleted = dashboard.confirm_delete().await.unwrap();
        assert_eq!(deleted.map(|p| p.id), Some(ProductId(5)));
        assert_eq!(ids(&dashboard.visible().await.unwrap()), vec![1, 2, 3, 4]);

        // Retired ids are not handed out again
        dashboard.open_add();
        dashboard.set_name("Air Mineral");
        dashboard.type_price("500");
        dashboard.set_stock("12");
        assert_eq!(dashboard.submit().await.unwrap().id, ProductId(6));

        drop(dashboard);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_edit_leaves_collection_unchanged() {
        let system = StoreSystem::new();
        let client = system.inventory_client.clone();
        let before = client.list_products().await.unwrap();
        let mut dashboard = InventoryDashboard::new(client.clone(), &Config::default());

        dashboard.open_edit(ProductId(2)).await.unwrap();
        assert_eq!(dashboard.form().unwrap().price_display(), "1.000,00");
        dashboard.set_stock("5");

        let errors = match dashboard.submit().await {
            Err(InventoryError::Validation(errors)) => errors,
            other => panic!("expected a validation failure, got {other:?}"),
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Stock), Some(ValidationError::StockBelowMinimum));
        assert_eq!(
            errors.get(Field::Stock).map(|e| e.to_string()),
            Some("stock may not be negative or below 10".to_string())
        );

        assert!(dashboard.form().is_some());
        assert_eq!(client.list_products().await.unwrap(), before);

        drop(dashboard);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_every_failing_field_is_reported() {
        let system = StoreSystem::new();
        let mut dashboard = InventoryDashboard::new(system.inventory_client.clone(), &Config::default());

        dashboard.open_add();
        dashboard.set_name("  MINUMAN botol ");
        dashboard.type_price("abc");
        dashboard.set_stock("9");

        match dashboard.submit().await {
            Err(InventoryError::Validation(errors)) => {
                assert_eq!(errors.get(Field::Name), Some(ValidationError::NameTaken));
                assert_eq!(errors.get(Field::Price), Some(ValidationError::PriceNotPositive));
                assert_eq!(errors.get(Field::Stock), Some(ValidationError::StockBelowMinimum));
            }
            other => panic!("expected a validation failure, got {other:?}"),
        }
        assert_eq!(system.inventory_client.list_products().await.unwrap().len(), 4);

        drop(dashboard);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_large_price_survives_a_stock_only_edit() {
        let system = StoreSystem::new();
        let client = system.inventory_client.clone();
        let mut dashboard = InventoryDashboard::new(client.clone(), &Config::default());

        let big = client
            .create_product(ProductForm::new("Big", "100000000000000000000", "20"))
            .await
            .unwrap();
        assert_eq!(big.price, Decimal::from_str("100000000000000000000").unwrap());

        dashboard.open_edit(big.id).await.unwrap();
        let form = dashboard.form().unwrap();
        assert_eq!(form.price_display(), "100.000.000.000.000.000.000,00");
        assert_eq!(form.to_form().price, "100000000000000000000.00");

        dashboard.set_stock("30");
        let edited = dashboard.submit().await.unwrap();
        assert_eq!(edited.price, big.price);
        assert_eq!(edited.stock, 30);

        // Anything the price field could not show again is refused up front
        let err = client
            .create_product(ProductForm::new("Bigger", "1000000000000000000000000000", "20"))
            .await
            .unwrap_err();
        match err {
            InventoryError::Validation(errors) => {
                assert_eq!(errors.get(Field::Price), Some(ValidationError::PriceTooLarge));
            }
            other => panic!("expected a validation failure, got {other:?}"),
        }

        drop(dashboard);
        system.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_settles_before_filtering() {
        let system = StoreSystem::new();
        let mut dashboard = InventoryDashboard::new(system.inventory_client.clone(), &Config::default());
        dashboard.set_sort(SortMode::PriceDescending);

        dashboard.type_search("k");
        tokio::time::sleep(Duration::from_millis(100)).await;
        dashboard.type_search("ka");

        // Still inside the window: the list is unfiltered
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(ids(&dashboard.visible().await.unwrap()), vec![4, 3, 1, 2]);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(dashboard.settled_search(), "ka");
        let rows = dashboard.visible().await.unwrap();
        assert_eq!(ids(&rows), vec![4, 2]);
        assert_eq!(rows[0].name, "Kaca Pembersih");

        dashboard.type_search("zzz");
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert!(dashboard.visible().await.unwrap().is_empty());

        drop(dashboard);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_client_fails_after_shutdown() {
        let system = StoreSystem::with_inventory(Inventory::default());
        let client = system.inventory_client.clone();
        assert!(client.list_products().await.unwrap().is_empty());

        system.shutdown().await.unwrap();

        assert!(matches!(
            client.list_products().await,
            Err(InventoryError::ServiceUnavailable(_))
        ));
    }
}

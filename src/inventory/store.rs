use rust_decimal::Decimal;

use super::error::InventoryError;
use super::validation::validate;
use crate::domain::{Product, ProductForm, ProductId, ValidatedProduct};

/// Owned product collection plus the id counter that feeds it.
///
/// Insertion order is the display order of the unsorted view. Ids are
/// never reused: the counter only moves forward, even across deletes.
#[derive(Debug, Clone)]
pub struct Inventory {
    products: Vec<Product>,
    next_id: u64,
    revision: u64,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Inventory {
    /// Builds a container around existing rows; the next id follows the
    /// highest one present.
    pub fn new(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id.0).max().unwrap_or(0) + 1;
        Self {
            products,
            next_id,
            revision: 0,
        }
    }

    /// The four products every session starts with. Seed rows are not
    /// validated; the stock floor applies to writes only.
    pub fn seeded() -> Self {
        Self::new(vec![
            Product::new(1, "Minuman Botol", Decimal::new(5000, 0), 5),
            Product::new(2, "Makanan Ringan", Decimal::new(1000, 0), 10),
            Product::new(3, "Tisu Basah", Decimal::new(7000, 0), 2),
            Product::new(4, "Kaca Pembersih", Decimal::new(16000, 0), 7),
        ])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Bumped on every successful mutation; lets derived views skip work.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn next_id(&self) -> ProductId {
        ProductId(self.next_id)
    }

    pub fn validate(
        &self,
        form: &ProductForm,
        exclude: Option<ProductId>,
    ) -> Result<ValidatedProduct, InventoryError> {
        Ok(validate(&self.products, form, exclude)?)
    }

    /// Validates and appends a new product under a freshly minted id.
    pub fn create(&mut self, form: &ProductForm) -> Result<Product, InventoryError> {
        let valid = self.validate(form, None)?;
        let product = Product {
            id: ProductId(self.next_id),
            name: valid.name,
            price: valid.price,
            stock: valid.stock,
        };
        self.next_id += 1;
        self.products.push(product.clone());
        self.revision += 1;
        Ok(product)
    }

    /// Validates and replaces the fields of an existing product in place.
    pub fn update(&mut self, id: ProductId, form: &ProductForm) -> Result<Product, InventoryError> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(InventoryError::NotFound(id))?;
        let valid = self.validate(form, Some(id))?;

        let product = &mut self.products[index];
        product.name = valid.name;
        product.price = valid.price;
        product.stock = valid.stock;
        self.revision += 1;
        Ok(product.clone())
    }

    /// Removes a product; its id is retired for good.
    pub fn delete(&mut self, id: ProductId) -> Result<Product, InventoryError> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(InventoryError::NotFound(id))?;
        let removed = self.products.remove(index);
        self.revision += 1;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::error::{Field, ValidationError};

    fn ids(inventory: &Inventory) -> Vec<u64> {
        inventory.products().iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn seeded_collection_has_four_products() {
        let inventory = Inventory::seeded();
        assert_eq!(ids(&inventory), vec![1, 2, 3, 4]);
        assert_eq!(inventory.next_id(), ProductId(5));
    }

    #[test]
    fn add_then_delete_restores_the_starting_collection() {
        let mut inventory = Inventory::seeded();
        let starting = inventory.products().to_vec();

        let added = inventory
            .create(&ProductForm::new("Air Mineral", "5.00", "12"))
            .unwrap();
        assert_eq!(inventory.len(), 5);
        assert_eq!(added.id, ProductId(5));
        assert_eq!(added.price, Decimal::new(500, 2));

        inventory.delete(added.id).unwrap();
        assert_eq!(inventory.products(), starting.as_slice());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut inventory = Inventory::seeded();
        let first = inventory
            .create(&ProductForm::new("Air Mineral", "5.00", "12"))
            .unwrap();
        inventory.delete(first.id).unwrap();

        let second = inventory
            .create(&ProductForm::new("Air Mineral", "5.00", "12"))
            .unwrap();
        assert_eq!(second.id, ProductId(6));
    }

    #[test]
    fn editing_stock_below_floor_leaves_collection_unchanged() {
        let mut inventory = Inventory::seeded();
        let before = inventory.products().to_vec();
        let revision = inventory.revision();

        let err = inventory
            .update(ProductId(2), &ProductForm::new("Makanan Ringan", "1000.00", "5"))
            .unwrap_err();

        match err {
            InventoryError::Validation(errors) => {
                assert_eq!(errors.get(Field::Stock), Some(ValidationError::StockBelowMinimum));
                assert_eq!(
                    errors.get(Field::Stock).unwrap().to_string(),
                    "stock may not be negative or below 10"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(inventory.products(), before.as_slice());
        assert_eq!(inventory.revision(), revision);
    }

    #[test]
    fn duplicate_name_does_not_alter_collection() {
        let mut inventory = Inventory::seeded();
        let err = inventory
            .create(&ProductForm::new("tisu basah", "3.00", "20"))
            .unwrap_err();

        assert!(matches!(err, InventoryError::Validation(_)));
        assert_eq!(inventory.len(), 4);
        assert_eq!(inventory.next_id(), ProductId(5));
    }

    #[test]
    fn update_keeps_id_and_position() {
        let mut inventory = Inventory::seeded();
        let updated = inventory
            .update(ProductId(3), &ProductForm::new("Tisu Kering", "7500.00", "40"))
            .unwrap();

        assert_eq!(updated.id, ProductId(3));
        assert_eq!(inventory.products()[2].name, "Tisu Kering");
        assert_eq!(inventory.products()[2].stock, 40);
    }

    #[test]
    fn missing_products_report_not_found() {
        let mut inventory = Inventory::seeded();
        assert_eq!(
            inventory.delete(ProductId(42)),
            Err(InventoryError::NotFound(ProductId(42)))
        );
        assert_eq!(
            inventory
                .update(ProductId(42), &ProductForm::new("X", "1.00", "10"))
                .unwrap_err(),
            InventoryError::NotFound(ProductId(42))
        );
    }
}

//! State of the inventory screen: search box, sort selector, the add/edit
//! dialog and the delete confirmation. All reads and writes go through the
//! inventory service.

use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::clients::InventoryClient;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::domain::{Product, ProductForm, ProductId};
use crate::inventory::{CurrencyInput, FieldErrors, InventoryError, Locale, SortMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Adding,
    Editing(ProductId),
}

/// The open add/edit dialog.
#[derive(Debug, Clone)]
pub struct ProductFormState {
    mode: FormMode,
    name: String,
    price: CurrencyInput,
    stock: String,
    errors: FieldErrors,
}

impl ProductFormState {
    fn empty(mode: FormMode, locale: Locale) -> Self {
        Self {
            mode,
            name: String::new(),
            price: CurrencyInput::new(locale),
            stock: String::new(),
            errors: FieldErrors::default(),
        }
    }

    fn prefilled(product: &Product, locale: Locale) -> Self {
        let form = ProductForm::from_product(product);
        let mut state = Self::empty(FormMode::Editing(product.id), locale);
        state.name = form.name;
        state.price.sync(&form.price);
        state.stock = form.stock;
        state
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price as shown in the field, e.g. `5.000,00`.
    pub fn price_display(&self) -> &str {
        self.price.display()
    }

    pub fn stock(&self) -> &str {
        &self.stock
    }

    /// Violations from the last rejected submit.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn to_form(&self) -> ProductForm {
        ProductForm::new(self.name.clone(), self.price.value(), self.stock.clone())
    }
}

pub struct InventoryDashboard {
    client: InventoryClient,
    search: Debouncer,
    sort: SortMode,
    locale: Locale,
    form: Option<ProductFormState>,
    pending_delete: Option<Product>,
}

impl InventoryDashboard {
    pub fn new(client: InventoryClient, config: &Config) -> Self {
        Self {
            client,
            search: Debouncer::new(config.search_debounce),
            sort: SortMode::Default,
            locale: config.locale,
            form: None,
            pending_delete: None,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    // Search and sort

    /// Updates the search box. The list follows once typing pauses.
    pub fn type_search(&mut self, text: impl Into<String>) {
        self.search.push(text);
    }

    pub fn settled_search(&self) -> String {
        self.search.settled()
    }

    pub fn subscribe_search(&self) -> watch::Receiver<String> {
        self.search.subscribe()
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    /// Rows to display for the settled search term and current sort.
    pub async fn visible(&self) -> Result<Vec<Product>, InventoryError> {
        self.client
            .view_products(self.search.settled(), self.sort)
            .await
    }

    // Add/edit dialog

    pub fn open_add(&mut self) {
        self.form = Some(ProductFormState::empty(FormMode::Adding, self.locale));
    }

    #[instrument(skip(self))]
    pub async fn open_edit(&mut self, id: ProductId) -> Result<(), InventoryError> {
        let product = self
            .client
            .get_product(id)
            .await?
            .ok_or(InventoryError::NotFound(id))?;
        self.form = Some(ProductFormState::prefilled(&product, self.locale));
        Ok(())
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn form(&self) -> Option<&ProductFormState> {
        self.form.as_ref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some(form) = self.form.as_mut() {
            form.name = name.into();
        }
    }

    /// Feeds the raw price field through the currency input and returns
    /// what the field should now show.
    pub fn type_price(&mut self, raw: &str) -> Option<&str> {
        let form = self.form.as_mut()?;
        form.price.keystroke(raw);
        Some(form.price.display())
    }

    pub fn set_stock(&mut self, stock: impl Into<String>) {
        if let Some(form) = self.form.as_mut() {
            form.stock = stock.into();
        }
    }

    /// Sends the open form. On success the dialog closes; on a validation
    /// failure it stays open with every field error attached.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<Product, InventoryError> {
        let form = self.form.as_ref().ok_or(InventoryError::FormClosed)?;
        let payload = form.to_form();

        let result = match form.mode {
            FormMode::Adding => self.client.create_product(payload).await,
            FormMode::Editing(id) => self.client.update_product(id, payload).await,
        };

        match &result {
            Ok(product) => {
                info!(product_id = %product.id, "Form saved");
                self.form = None;
            }
            Err(InventoryError::Validation(errors)) => {
                debug!(errors = %errors, "Form rejected");
                if let Some(form) = self.form.as_mut() {
                    form.errors = errors.clone();
                }
            }
            Err(_) => {}
        }
        result
    }

    // Delete confirmation

    /// Asks for confirmation before deleting `id`.
    pub async fn request_delete(&mut self, id: ProductId) -> Result<&Product, InventoryError> {
        let product = self
            .client
            .get_product(id)
            .await?
            .ok_or(InventoryError::NotFound(id))?;
        let product = self.pending_delete.insert(product);
        Ok(&*product)
    }

    pub fn pending_delete(&self) -> Option<&Product> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the product awaiting confirmation, if any.
    #[instrument(skip(self))]
    pub async fn confirm_delete(&mut self) -> Result<Option<Product>, InventoryError> {
        let Some(product) = self.pending_delete.take() else {
            return Ok(None);
        };
        self.client.delete_product(product.id).await.map(Some)
    }
}

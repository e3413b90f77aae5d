//! Product catalog screen.

use shopdesk_core::{Product, ProductId};

use super::{Console, ConsoleError};
use crate::backend::ImageUpload;
use crate::forms::ProductDraft;
use crate::state::Collection;

impl Console {
    /// Fetch the catalog and recompute the filtered list.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the fetch fails.
    pub async fn load_products(&mut self) -> Result<(), ConsoleError> {
        self.ensure_authenticated()?;
        let ticket = self.state.begin_fetch(Collection::Products);
        match self.client.list_products().await {
            Ok(products) => {
                let count = products.len();
                self.state.apply_products(ticket, products);
                self.succeed(format!("Loaded {count} products"));
                Ok(())
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }

    /// Fetch one product, merge it into the catalog, and select it.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the fetch fails.
    pub async fn load_product(&mut self, id: &ProductId) -> Result<Product, ConsoleError> {
        self.ensure_authenticated()?;
        match self.client.get_product(id).await {
            Ok(product) => {
                self.succeed(format!("Loaded {}", product.name));
                self.state.upsert_product(product.clone());
                self.state.selection.product = Some(id.clone());
                Ok(product)
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }

    /// Create a product. The catalog shows it after the next fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if the form is invalid (no request is made), if not
    /// logged in, or if the backend refuses the product.
    pub async fn add_product(
        &mut self,
        draft: &ProductDraft,
        image: Option<ImageUpload>,
    ) -> Result<String, ConsoleError> {
        self.ensure_authenticated()?;
        let (form, image) = draft.validate_for_add(image).map_err(|e| self.fail(e))?;

        match self.client.add_product(form, image).await {
            Ok(message) => {
                self.succeed(message.clone());
                Ok(message)
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }

    /// Update a product and patch the local copy with the submitted fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the form is invalid (no request is made), if not
    /// logged in, or if the backend refuses the update.
    pub async fn update_product(
        &mut self,
        id: &ProductId,
        draft: &ProductDraft,
        image: Option<ImageUpload>,
    ) -> Result<String, ConsoleError> {
        self.ensure_authenticated()?;
        let form = draft.validate().map_err(|e| self.fail(e))?;
        let current_image_url = self
            .state
            .product(id)
            .map(|p| p.image_url.clone())
            .unwrap_or_default();

        match self
            .client
            .update_product(id, form.clone(), &current_image_url, image)
            .await
        {
            Ok(message) => {
                if let Some(existing) = self.state.product(id).cloned() {
                    self.state.upsert_product(Product {
                        name: form.name,
                        brand: form.brand,
                        price: form.price,
                        category: form.category,
                        description: form.description,
                        stock: form.stock,
                        specifications: form.specifications,
                        ..existing
                    });
                }
                self.succeed(message.clone());
                Ok(message)
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }

    /// Delete a product and drop it from the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the backend refuses the deletion.
    pub async fn delete_product(&mut self, id: &ProductId) -> Result<String, ConsoleError> {
        self.ensure_authenticated()?;
        match self.client.delete_product(id).await {
            Ok(message) => {
                self.state.remove_product(id);
                self.succeed(message.clone());
                Ok(message)
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }

    /// Flip a product's availability.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the backend refuses the change.
    pub async fn toggle_availability(&mut self, id: &ProductId) -> Result<String, ConsoleError> {
        self.ensure_authenticated()?;
        match self.client.set_product_availability(id).await {
            Ok(message) => {
                self.state.toggle_availability(id);
                self.succeed(message.clone());
                Ok(message)
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }

    /// Flip a product's bestseller flag.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the backend refuses the change.
    pub async fn toggle_bestseller(&mut self, id: &ProductId) -> Result<String, ConsoleError> {
        self.ensure_authenticated()?;
        match self.client.set_bestseller(id).await {
            Ok(message) => {
                self.state.toggle_bestseller(id);
                self.succeed(message.clone());
                Ok(message)
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }
}

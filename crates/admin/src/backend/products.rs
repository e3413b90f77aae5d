//! Catalog product endpoints.

use reqwest::multipart::Form;
use serde::Serialize;
use shopdesk_core::{Price, Product, ProductId, Specifications};
use tracing::instrument;

use super::{BackendClient, BackendError, ImageUpload, routes};

/// A validated product form, ready to submit as multipart.
///
/// Built by [`crate::forms::ProductDraft::validate`]; the fields are already
/// trimmed and the category is canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub(crate) name: String,
    pub(crate) brand: String,
    pub(crate) price: Price,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) stock: u32,
    pub(crate) specifications: Specifications,
}

impl ProductForm {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub const fn specifications(&self) -> &Specifications {
        &self.specifications
    }

    /// The text fields shared by add and update.
    fn into_multipart(self) -> Form {
        Form::new()
            .text("name", self.name)
            .text("brand", self.brand)
            .text("price", self.price.to_form_value())
            .text("category", self.category)
            .text("description", self.description)
            .text("stock_quantity", self.stock.to_string())
            .text("specifications", self.specifications.to_json_string())
    }
}

#[derive(Serialize)]
struct DeleteProduct<'a> {
    prid: &'a ProductId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductRef<'a> {
    product_id: &'a ProductId,
}

impl BackendClient {
    /// List the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, BackendError> {
        let mut envelope = self.get(routes::ALL_PRODUCTS).await?;
        envelope.take("products")
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, BackendError> {
        let mut envelope = self.get_item(routes::GET_PRODUCT, id.as_str()).await?;
        envelope.take("data")
    }

    /// Create a product. The image is required.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self, form, image), fields(name = %form.name))]
    pub async fn add_product(
        &self,
        form: ProductForm,
        image: ImageUpload,
    ) -> Result<String, BackendError> {
        let multipart = form.into_multipart().part("image", image.into_part()?);
        let envelope = self.post_multipart(routes::ADD_PRODUCT, multipart).await?;
        Ok(envelope.message_or("Product added"))
    }

    /// Replace a product's fields, and its image when one is given.
    ///
    /// `current_image_url` is echoed back so the backend keeps the existing
    /// image when no new file is attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self, form, image), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        form: ProductForm,
        current_image_url: &str,
        image: Option<ImageUpload>,
    ) -> Result<String, BackendError> {
        let mut multipart = form
            .into_multipart()
            .text("productId", id.to_string())
            .text("image_url", current_image_url.to_string());
        if let Some(image) = image {
            multipart = multipart.part("image", image.into_part()?);
        }
        let envelope = self.post_multipart(routes::UPDATE_PRODUCT, multipart).await?;
        Ok(envelope.message_or("Product updated"))
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<String, BackendError> {
        let envelope = self
            .post_json(routes::DELETE_PRODUCT, &DeleteProduct { prid: id })
            .await?;
        Ok(envelope.message_or("Product deleted"))
    }

    /// Flip a product's availability flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn set_product_availability(&self, id: &ProductId) -> Result<String, BackendError> {
        let envelope = self
            .post_json(routes::CHANGE_AVAILABILITY, &ProductRef { product_id: id })
            .await?;
        Ok(envelope.message_or("Availability changed"))
    }

    /// Flip a product's bestseller flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn set_bestseller(&self, id: &ProductId) -> Result<String, BackendError> {
        let envelope = self
            .post_json(routes::CHANGE_BESTSELLER, &ProductRef { product_id: id })
            .await?;
        Ok(envelope.message_or("Bestseller status changed"))
    }
}

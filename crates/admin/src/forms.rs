//! Product add/update form and other client-side input checks.
//!
//! [`ProductDraft`] holds what the admin typed. Validation turns it into a
//! [`ProductForm`] or a [`FormError`] before any request is made.

use shopdesk_core::{PRODUCT_CATEGORIES, Price, Product, Specifications, canonical_category};
use thiserror::Error;

use crate::backend::{ImageUpload, ProductForm};

/// Client-side precondition failures on the product form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Product name is required")]
    EmptyName,

    #[error("Price cannot be negative")]
    NegativePrice,

    #[error("Stock quantity cannot be negative")]
    NegativeStock,

    #[error("Stock quantity is too large")]
    StockOverflow,

    #[error("Unknown category '{0}' (expected one of: {cats})", cats = PRODUCT_CATEGORIES.join(" / "))]
    UnknownCategory(String),

    #[error("A product image is required")]
    MissingImage,

    #[error("Reply text is required")]
    EmptyReply,
}

/// The editable product form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub price: Price,
    pub category: String,
    pub description: String,
    pub stock: i64,
    pub specifications: Specifications,
}

impl ProductDraft {
    /// Prefill the form from an existing product, as the edit screen does.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price,
            category: product.category.clone(),
            description: product.description.clone(),
            stock: i64::from(product.stock),
            specifications: product.specifications.clone(),
        }
    }

    /// Check the preconditions shared by add and update.
    ///
    /// # Errors
    ///
    /// Returns the first failed precondition.
    pub fn validate(&self) -> Result<ProductForm, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }
        if self.price.is_negative() {
            return Err(FormError::NegativePrice);
        }
        if self.stock < 0 {
            return Err(FormError::NegativeStock);
        }
        let stock = u32::try_from(self.stock).map_err(|_| FormError::StockOverflow)?;
        let category = canonical_category(&self.category)
            .ok_or_else(|| FormError::UnknownCategory(self.category.trim().to_string()))?;

        Ok(ProductForm {
            name: name.to_string(),
            brand: self.brand.trim().to_string(),
            price: self.price,
            category: category.to_string(),
            description: self.description.trim().to_string(),
            stock,
            specifications: self.specifications.clone(),
        })
    }

    /// Validate for the add screen, where an image is mandatory.
    ///
    /// # Errors
    ///
    /// Returns the first failed precondition.
    pub fn validate_for_add(
        &self,
        image: Option<ImageUpload>,
    ) -> Result<(ProductForm, ImageUpload), FormError> {
        let form = self.validate()?;
        let image = image.filter(|i| !i.is_empty()).ok_or(FormError::MissingImage)?;
        Ok((form, image))
    }
}

//! Case-insensitive product search.
//!
//! A product matches when its name, category, brand, or description contains
//! the search term. Matching uses Unicode lowercasing so Vietnamese product
//! names ("Điện thoại") match regardless of case.

use crate::entities::Product;

/// A normalized search term.
///
/// An empty (or whitespace-only) term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `product` matches this term.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if self.is_empty() {
            return true;
        }
        [
            &product.name,
            &product.category,
            &product.brand,
            &product.description,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.0))
    }
}

/// The subset of `products` matching `term`, in their original order.
#[must_use]
pub fn filter_products(products: &[Product], term: &SearchTerm) -> Vec<Product> {
    products
        .iter()
        .filter(|p| term.matches(p))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn product(id: &str, name: &str, category: &str, brand: &str, description: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            category: category.to_owned(),
            brand: brand.to_owned(),
            description: description.to_owned(),
            ..Product::default()
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("p1", "iPhone 12", "Smartphone", "Apple", "A14 Bionic chip"),
            product("p2", "Dell XPS", "Laptop", "Dell", "13 inch ultrabook"),
            product("p3", "Galaxy Tab", "Tablet", "Samsung", "Great for lapdesk use"),
        ]
    }

    #[test]
    fn test_empty_term_returns_everything() {
        let all = catalog();
        assert_eq!(filter_products(&all, &SearchTerm::new("")), all);
        assert_eq!(filter_products(&all, &SearchTerm::new("   ")), all);
    }

    #[test]
    fn test_matches_category_case_insensitively() {
        let products = vec![
            product("p1", "iPhone 12", "Smartphone", "Apple", ""),
            product("p2", "Dell XPS", "Laptop", "Dell", ""),
        ];
        let hits = filter_products(&products, &SearchTerm::new("lap"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Dell XPS");
    }

    #[test]
    fn test_matches_any_of_the_four_fields() {
        let all = catalog();
        let ids = |term: &str| -> Vec<String> {
            filter_products(&all, &SearchTerm::new(term))
                .into_iter()
                .map(|p| p.id.into_inner())
                .collect()
        };
        assert_eq!(ids("APPLE"), vec!["p1"]);
        assert_eq!(ids("ultrabook"), vec!["p2"]);
        assert_eq!(ids("lap"), vec!["p2", "p3"]);
        assert_eq!(ids("xps"), vec!["p2"]);
        assert!(ids("nokia").is_empty());
    }

    #[test]
    fn test_unicode_lowercasing() {
        let products = vec![product("p9", "Điện thoại Nokia", "Smartphone", "Nokia", "")];
        assert_eq!(filter_products(&products, &SearchTerm::new("ĐIỆN")).len(), 1);
    }

    #[test]
    fn test_term_is_trimmed() {
        assert_eq!(SearchTerm::new("  Dell ").as_str(), "dell");
    }
}

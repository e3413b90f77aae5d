//! Product catalog commands.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use shopdesk_admin::{Console, ImageUpload, ProductDraft};
use shopdesk_core::{Price, ProductId, SpecRow, Specifications};

use super::{CliError, require_login};
use crate::render;

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List the catalog
    List {
        /// Only products whose name, category, brand, or description
        /// contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one product
    Show { id: ProductId },
    /// Add a product
    Add(AddArgs),
    /// Update a product; omitted fields keep their current value
    Update(UpdateArgs),
    /// Delete a product
    Delete { id: ProductId },
    /// Flip a product's availability
    ToggleAvailability { id: ProductId },
    /// Flip a product's bestseller flag
    ToggleBestseller { id: ProductId },
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    brand: String,
    #[arg(long, allow_hyphen_values = true)]
    price: Price,
    /// Laptop, Smartphone, Smartwatch, "Pc, Printer", Accessory, or Tablet
    #[arg(long)]
    category: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, allow_hyphen_values = true)]
    stock: i64,
    /// Product image file
    #[arg(long)]
    image: Option<PathBuf>,
    /// Specification row, repeatable
    #[arg(long = "spec", value_name = "KEY=VALUE")]
    specs: Vec<SpecRow>,
}

#[derive(Args)]
pub struct UpdateArgs {
    id: ProductId,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    brand: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    price: Option<Price>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    stock: Option<i64>,
    /// Replacement image file
    #[arg(long)]
    image: Option<PathBuf>,
    /// Add or overwrite a specification row, repeatable
    #[arg(long = "spec", value_name = "KEY=VALUE")]
    specs: Vec<SpecRow>,
    /// Remove a specification row, repeatable
    #[arg(long = "remove-spec", value_name = "KEY")]
    remove_specs: Vec<String>,
}

impl UpdateArgs {
    /// Apply the given fields on top of the current product.
    fn apply(self, draft: &mut ProductDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(brand) = self.brand {
            draft.brand = brand;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(stock) = self.stock {
            draft.stock = stock;
        }
        for key in &self.remove_specs {
            draft.specifications.remove(key);
        }
        draft
            .specifications
            .merge(&Specifications::from_rows(self.specs));
    }
}

async fn read_image(path: Option<PathBuf>) -> Result<Option<ImageUpload>, CliError> {
    match path {
        Some(path) => Ok(Some(ImageUpload::from_path(&path).await?)),
        None => Ok(None),
    }
}

pub async fn run(
    console: &mut Console,
    action: ProductsAction,
    out: &mut impl Write,
) -> Result<(), CliError> {
    require_login(console)?;

    match action {
        ProductsAction::List { search } => {
            console.load_products().await?;
            console.set_search(search.as_deref().unwrap_or_default());
            render::products(out, console.state().filtered_products())?;
        }
        ProductsAction::Show { id } => {
            let product = console.load_product(&id).await?;
            render::product_detail(out, &product)?;
        }
        ProductsAction::Add(args) => {
            let image = read_image(args.image).await?;
            let draft = ProductDraft {
                name: args.name,
                brand: args.brand,
                price: args.price,
                category: args.category,
                description: args.description,
                stock: args.stock,
                specifications: Specifications::from_rows(args.specs),
            };
            console.add_product(&draft, image).await?;
        }
        ProductsAction::Update(args) => {
            let id = args.id.clone();
            let image = read_image(args.image.clone()).await?;
            let current = console.load_product(&id).await?;
            let mut draft = ProductDraft::from_product(&current);
            args.apply(&mut draft);
            console.update_product(&id, &draft, image).await?;
        }
        ProductsAction::Delete { id } => {
            console.delete_product(&id).await?;
        }
        ProductsAction::ToggleAvailability { id } => {
            console.toggle_availability(&id).await?;
        }
        ProductsAction::ToggleBestseller { id } => {
            console.toggle_bestseller(&id).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        action: ProductsAction,
    }

    fn parse(args: &[&str]) -> ProductsAction {
        Harness::try_parse_from(std::iter::once("products").chain(args.iter().copied()))
            .unwrap()
            .action
    }

    #[test]
    fn test_add_collects_spec_rows() {
        let ProductsAction::Add(args) = parse(&[
            "add", "--name", "Dell XPS", "--price", "32990000", "--category", "laptop",
            "--stock", "5", "--spec", "RAM=16GB", "--spec", "CPU = i7",
        ]) else {
            panic!("expected add");
        };
        let specs = Specifications::from_rows(args.specs);
        assert_eq!(specs.get("RAM"), Some("16GB"));
        assert_eq!(specs.get("CPU"), Some("i7"));
    }

    #[test]
    fn test_malformed_spec_is_rejected() {
        let result = Harness::try_parse_from([
            "products", "add", "--name", "X", "--price", "1", "--category", "Tablet", "--stock",
            "1", "--spec", "no-separator",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_overrides_only_given_fields() {
        let ProductsAction::Update(args) = parse(&[
            "update", "p1", "--price", "100", "--spec", "Color=Black", "--remove-spec", "RAM",
        ]) else {
            panic!("expected update");
        };
        let mut draft = ProductDraft {
            name: "Dell XPS".to_string(),
            price: "200".parse().unwrap(),
            specifications: Specifications::from_rows([SpecRow::new("RAM", "16GB")]),
            ..ProductDraft::default()
        };
        args.apply(&mut draft);

        assert_eq!(draft.name, "Dell XPS");
        assert_eq!(draft.price.to_form_value(), "100");
        assert_eq!(draft.specifications.get("RAM"), None);
        assert_eq!(draft.specifications.get("Color"), Some("Black"));
    }

    #[test]
    fn test_negative_stock_reaches_validation() {
        let ProductsAction::Add(args) = parse(&[
            "add", "--name", "X", "--price", "1", "--category", "Tablet", "--stock", "-2",
        ]) else {
            panic!("expected add");
        };
        assert_eq!(args.stock, -2);
    }
}

use fitfinder_core::config::LoadOptions;
use fitfinder_core::{ApplicationError, Dataset, ShoppingBrand};
use serde::Serialize;

use crate::commands::{load_context, CommandResult};

#[derive(Debug, Serialize)]
struct CatalogListing {
    retailer: String,
    /// Accepted values for `recommend --usual-brand`.
    usual_brands: Vec<String>,
    products: Vec<ProductRow>,
}

#[derive(Debug, Serialize)]
struct ProductRow {
    brand: String,
    bias: &'static str,
    name: String,
    category: String,
    fit: String,
    price: String,
}

pub fn run(brand: Option<&str>, options: &LoadOptions) -> CommandResult {
    let (_, dataset) = match load_context("catalog", options) {
        Ok(context) => context,
        Err(failure) => return failure,
    };

    match listing(&dataset, brand) {
        Ok(listing) => CommandResult::json("catalog", &listing),
        Err(error) => CommandResult::from_error("catalog", &error),
    }
}

/// Brand by brand in dataset order, or a single brand when filtered.
fn listing(dataset: &Dataset, brand: Option<&str>) -> Result<CatalogListing, ApplicationError> {
    let brands = match brand {
        Some(name) => vec![dataset.brand(name)?],
        None => dataset.brands().iter().collect(),
    };

    let products = brands.into_iter().flat_map(|brand| rows_for(dataset, brand)).collect();

    Ok(CatalogListing {
        retailer: dataset.retailer().to_string(),
        usual_brands: dataset.usual_brands().to_vec(),
        products,
    })
}

fn rows_for(dataset: &Dataset, brand: &ShoppingBrand) -> Vec<ProductRow> {
    dataset
        .catalog()
        .products_for_brand(&brand.name)
        .map(|entry| ProductRow {
            brand: entry.brand.clone(),
            bias: brand.bias.as_str(),
            name: entry.name.clone(),
            category: entry.category.clone(),
            fit: entry.fit.clone(),
            price: entry.display_price(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use fitfinder_core::Dataset;

    use super::listing;

    #[test]
    fn brand_filter_keeps_catalog_order() {
        let dataset = Dataset::embedded().expect("embedded dataset");
        let listing = listing(&dataset, Some("old navy")).expect("known brand");

        let names: Vec<_> = listing.products.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, ["Vintage Denim Jacket", "Everyday Joggers"]);
        assert!(listing.products.iter().all(|row| row.bias == "runs_large"));
    }

    #[test]
    fn unfiltered_listing_groups_products_by_brand() {
        let dataset = Dataset::embedded().expect("embedded dataset");
        let listing = listing(&dataset, None).expect("full listing");

        let rows: Vec<_> =
            listing.products.iter().map(|row| (row.brand.as_str(), row.name.as_str())).collect();
        assert_eq!(
            rows,
            [
                ("GAP", "GAP Logo Hoodie"),
                ("GAP", "Essential Crewneck Tee"),
                ("Old Navy", "Vintage Denim Jacket"),
                ("Old Navy", "Everyday Joggers"),
                ("Athleta", "Ultimate Yoga Leggings"),
                ("Banana Republic", "Heritage Oxford Shirt"),
            ]
        );
    }

    #[test]
    fn unknown_brand_is_an_invalid_selection() {
        let dataset = Dataset::embedded().expect("embedded dataset");
        let error = listing(&dataset, Some("Zara")).expect_err("unknown brand");

        assert_eq!(error.error_class(), "invalid_selection");
        assert_eq!(error.exit_code(), 5);
    }
}

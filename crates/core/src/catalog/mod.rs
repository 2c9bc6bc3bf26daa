pub mod dataset;

use crate::domain::product::CatalogEntry;

pub use dataset::{Dataset, DatasetDocument, DatasetError, DatasetSource};

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(products: Vec<CatalogEntry>) -> Self {
        Self { products }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.products
    }

    pub fn products_for_brand<'a>(
        &'a self,
        brand: &'a str,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.products.iter().filter(move |product| product.is_sold_by(brand))
    }

    pub fn find(&self, brand: &str, product_name: &str) -> Option<&CatalogEntry> {
        let product_name = product_name.trim();
        self.products.iter().find(|product| {
            product.is_sold_by(brand) && product.name.eq_ignore_ascii_case(product_name)
        })
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub brand: String,
    pub name: String,
    pub category: String,
    pub fit: String,
    pub price: Decimal,
}

impl CatalogEntry {
    pub fn display_price(&self) -> String {
        format!("${}", self.price)
    }

    pub fn is_sold_by(&self, brand: &str) -> bool {
        self.brand.eq_ignore_ascii_case(brand.trim())
    }
}

//! FitFinder core - size decision logic and its data
//!
//! Everything here is deterministic and free of I/O beyond reading the dataset
//! and config files:
//! - `sizing` maps a usual size onto a brand's labels and owns the precedence
//!   policy between that proposal and a stylist's stated size
//! - `explanation` extracts the stated size from free text
//! - `catalog` loads the brands, products and customer profiles
//! - `form` turns raw selections into a validated `RecommendationRequest`

pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod explanation;
pub mod form;
pub mod sizing;

pub use catalog::{Catalog, Dataset, DatasetSource};
pub use domain::brand::{ShoppingBrand, SizingBias};
pub use domain::customer::{CustomerProfile, PurchaseRecord};
pub use domain::product::CatalogEntry;
pub use domain::size::{BaseSize, SizeToken};
pub use errors::{ApplicationError, DomainError};
pub use explanation::{extract_size, ExtractedSize, NOT_SPECIFIED};
pub use form::{FormInput, RecommendationRequest};
pub use sizing::{resolve_size, SizePrecedence, SizeSource};

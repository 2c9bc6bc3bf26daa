//! Catalog and profile data.
//!
//! The dataset is read once, validated, and then only borrowed. Brands, products
//! and profiles keep the order they were declared in so selectors render the
//! same way every time.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::domain::brand::ShoppingBrand;
use crate::domain::customer::CustomerProfile;
use crate::domain::product::CatalogEntry;
use crate::domain::size::BaseSize;
use crate::errors::{ApplicationError, DomainError};

const EMBEDDED_DATASET: &str = include_str!("../../data/fitfinder.toml");

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetSource {
    Embedded,
    File(PathBuf),
}

impl DatasetSource {
    pub fn from_path(path: Option<&Path>) -> Self {
        path.map_or(Self::Embedded, |path| Self::File(path.to_path_buf()))
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Embedded => "embedded".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("could not read dataset file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse dataset `{origin}`: {source}")]
    Parse { origin: String, source: toml::de::Error },
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

impl From<DatasetError> for ApplicationError {
    fn from(value: DatasetError) -> Self {
        match value {
            DatasetError::Invalid(error) => Self::Domain(error),
            other => Self::Dataset(other.to_string()),
        }
    }
}

/// On-disk layout of a dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDocument {
    pub retailer: String,
    pub usual_brands: Vec<String>,
    pub brands: Vec<ShoppingBrand>,
    #[serde(default)]
    pub products: Vec<CatalogEntry>,
    pub profiles: Vec<CustomerProfile>,
}

#[derive(Clone, Debug)]
pub struct Dataset {
    retailer: String,
    usual_brands: Vec<String>,
    brands: Vec<ShoppingBrand>,
    catalog: Catalog,
    profiles: Vec<CustomerProfile>,
}

impl Dataset {
    pub fn load(source: &DatasetSource) -> Result<Self, DatasetError> {
        match source {
            DatasetSource::Embedded => Self::embedded(),
            DatasetSource::File(path) => {
                let raw = fs::read_to_string(path)
                    .map_err(|source| DatasetError::ReadFile { path: path.clone(), source })?;
                Self::parse(path.display().to_string(), &raw)
            }
        }
    }

    pub fn embedded() -> Result<Self, DatasetError> {
        Self::parse("embedded".to_string(), EMBEDDED_DATASET)
    }

    fn parse(origin: String, raw: &str) -> Result<Self, DatasetError> {
        let document = toml::from_str::<DatasetDocument>(raw)
            .map_err(|source| DatasetError::Parse { origin, source })?;
        Ok(Self::from_document(document)?)
    }

    pub fn from_document(document: DatasetDocument) -> Result<Self, DomainError> {
        validate(&document)?;

        let DatasetDocument { retailer, usual_brands, brands, products, profiles } = document;
        Ok(Self { retailer, usual_brands, brands, catalog: Catalog::new(products), profiles })
    }

    pub fn retailer(&self) -> &str {
        &self.retailer
    }

    pub fn brands(&self) -> &[ShoppingBrand] {
        &self.brands
    }

    pub fn usual_brands(&self) -> &[String] {
        &self.usual_brands
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn profiles(&self) -> &[CustomerProfile] {
        &self.profiles
    }

    pub fn brand(&self, name: &str) -> Result<&ShoppingBrand, DomainError> {
        self.brands
            .iter()
            .find(|brand| brand.matches(name))
            .ok_or_else(|| DomainError::UnknownBrand(name.trim().to_string()))
    }

    pub fn profile(&self, name: &str) -> Result<&CustomerProfile, DomainError> {
        let name = name.trim();
        self.profiles
            .iter()
            .find(|profile| profile.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| DomainError::UnknownProfile(name.to_string()))
    }

    pub fn product(&self, brand: &ShoppingBrand, name: &str) -> Result<&CatalogEntry, DomainError> {
        self.catalog.find(&brand.name, name).ok_or_else(|| DomainError::ProductNotSoldByBrand {
            brand: brand.name.clone(),
            product: name.trim().to_string(),
        })
    }

    /// Canonical spelling of `name` if it is one of the usual-brand choices.
    pub fn usual_brand(&self, name: &str) -> Result<&str, DomainError> {
        let name = name.trim();
        self.usual_brands
            .iter()
            .find(|usual| usual.eq_ignore_ascii_case(name))
            .map(String::as_str)
            .ok_or_else(|| DomainError::UnsupportedUsualBrand(name.to_string()))
    }
}

fn validate(document: &DatasetDocument) -> Result<(), DomainError> {
    if document.retailer.trim().is_empty() {
        return Err(invariant("retailer must not be empty"));
    }
    if document.brands.is_empty() {
        return Err(invariant("dataset must declare at least one brand"));
    }
    if document.profiles.is_empty() {
        return Err(invariant("dataset must declare at least one customer profile"));
    }

    ensure_unique("brand", document.brands.iter().map(|brand| brand.name.as_str()))?;
    ensure_unique("usual brand", document.usual_brands.iter().map(String::as_str))?;
    ensure_unique("profile", document.profiles.iter().map(|profile| profile.name.as_str()))?;

    for product in &document.products {
        if !document.brands.iter().any(|brand| brand.matches(&product.brand)) {
            return Err(invariant(format!(
                "product `{}` references unknown brand `{}`",
                product.name, product.brand
            )));
        }
    }

    for profile in &document.profiles {
        let known_usual_brand = document
            .usual_brands
            .iter()
            .any(|usual| usual.eq_ignore_ascii_case(&profile.usual_brand));
        if !known_usual_brand {
            return Err(invariant(format!(
                "profile `{}` has usual brand `{}` outside the usual-brand choices",
                profile.name, profile.usual_brand
            )));
        }
        if BaseSize::parse(&profile.usual_size).is_none() {
            return Err(invariant(format!(
                "profile `{}` has usual size `{}` (expected S|M|L|XL)",
                profile.name, profile.usual_size
            )));
        }
    }

    Ok(())
}

fn ensure_unique<'a>(kind: &str, names: impl Iterator<Item = &'a str>) -> Result<(), DomainError> {
    let mut seen = BTreeSet::new();
    for name in names {
        if !seen.insert(name.trim().to_ascii_lowercase()) {
            return Err(invariant(format!("duplicate {kind} `{name}`")));
        }
    }
    Ok(())
}

fn invariant(message: impl Into<String>) -> DomainError {
    DomainError::InvariantViolation(message.into())
}

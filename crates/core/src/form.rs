//! Form selections resolved against the dataset.
//!
//! `FormInput` is what a shopper typed or picked; `RecommendationRequest` is the
//! validated, self-contained value the advisor works from. Measurements and the
//! usual brand/size fall back to the selected profile, mirroring a form that is
//! pre-populated when a profile is chosen.

use serde::{Deserialize, Serialize};

use crate::catalog::Dataset;
use crate::domain::brand::ShoppingBrand;
use crate::domain::customer::CustomerProfile;
use crate::domain::product::CatalogEntry;
use crate::errors::DomainError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormInput {
    pub profile: String,
    pub brand: String,
    pub product: String,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub usual_brand: Option<String>,
    pub usual_size: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub retailer: String,
    pub profile: CustomerProfile,
    pub brand: ShoppingBrand,
    pub product: CatalogEntry,
    pub height: String,
    pub weight: String,
    pub usual_brand: String,
    /// Passed through untouched; the resolver owns the fallback for odd values.
    pub usual_size: String,
}

impl FormInput {
    pub fn resolve(&self, dataset: &Dataset) -> Result<RecommendationRequest, DomainError> {
        let profile = dataset.profile(&self.profile)?;
        let brand = dataset.brand(&self.brand)?;
        let product = dataset.product(brand, &self.product)?;

        let usual_brand = match non_blank(self.usual_brand.as_deref()) {
            Some(usual_brand) => dataset.usual_brand(usual_brand)?.to_string(),
            None => profile.usual_brand.clone(),
        };

        Ok(RecommendationRequest {
            retailer: dataset.retailer().to_string(),
            profile: profile.clone(),
            brand: brand.clone(),
            product: product.clone(),
            height: or_profile(self.height.as_deref(), &profile.height),
            weight: or_profile(self.weight.as_deref(), &profile.weight),
            usual_brand,
            usual_size: or_profile(self.usual_size.as_deref(), &profile.usual_size),
        })
    }
}

impl RecommendationRequest {
    pub fn customer_name(&self) -> &str {
        &self.profile.name
    }

    pub fn history_summary(&self) -> String {
        self.profile.history_summary()
    }
}

/// Profiles with the values a form would be pre-populated with.
pub fn profile_defaults(profile: &CustomerProfile) -> FormInput {
    FormInput {
        profile: profile.name.clone(),
        height: Some(profile.height.clone()),
        weight: Some(profile.weight.clone()),
        usual_brand: Some(profile.usual_brand.clone()),
        usual_size: Some(profile.usual_size.clone()),
        ..FormInput::default()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn or_profile(value: Option<&str>, fallback: &str) -> String {
    non_blank(value).unwrap_or(fallback).to_string()
}

#[cfg(test)]
mod tests {
    use crate::catalog::Dataset;
    use crate::domain::brand::SizingBias;
    use crate::errors::DomainError;

    use super::{profile_defaults, FormInput};

    fn form(profile: &str, brand: &str, product: &str) -> FormInput {
        FormInput {
            profile: profile.to_string(),
            brand: brand.to_string(),
            product: product.to_string(),
            ..FormInput::default()
        }
    }

    #[test]
    fn unset_fields_are_prepopulated_from_profile() {
        let dataset = Dataset::embedded().expect("embedded dataset");
        let request = form("Jason", "Banana Republic", "Heritage Oxford Shirt")
            .resolve(&dataset)
            .expect("valid selection");

        assert_eq!(request.retailer, "GAP Inc.");
        assert_eq!(request.customer_name(), "Jason");
        assert_eq!(request.brand.bias, SizingBias::Fitted);
        assert_eq!(request.product.category, "Shirt");
        assert_eq!(request.height, "6'0\"");
        assert_eq!(request.weight, "180 lbs");
        assert_eq!(request.usual_brand, "GAP");
        assert_eq!(request.usual_size, "L");
    }

    #[test]
    fn explicit_fields_override_profile_values() {
        let dataset = Dataset::embedded().expect("embedded dataset");
        let input = FormInput {
            height: Some("183 cm".to_string()),
            weight: Some("  ".to_string()),
            usual_brand: Some("uniqlo".to_string()),
            usual_size: Some("xl".to_string()),
            ..form("Emily", "Athleta", "Ultimate Yoga Leggings")
        };

        let request = input.resolve(&dataset).expect("valid selection");
        assert_eq!(request.height, "183 cm");
        assert_eq!(request.weight, "135 lbs");
        assert_eq!(request.usual_brand, "Uniqlo");
        assert_eq!(request.usual_size, "xl");
    }

    #[test]
    fn product_must_belong_to_selected_brand() {
        let dataset = Dataset::embedded().expect("embedded dataset");

        let error = form("Emily", "GAP", "Everyday Joggers")
            .resolve(&dataset)
            .expect_err("joggers are an Old Navy product");
        assert_eq!(
            error,
            DomainError::ProductNotSoldByBrand {
                brand: "GAP".to_string(),
                product: "Everyday Joggers".to_string(),
            }
        );
    }

    #[test]
    fn usual_brand_outside_choices_is_rejected() {
        let dataset = Dataset::embedded().expect("embedded dataset");
        let input = FormInput {
            usual_brand: Some("Zara".to_string()),
            ..form("Emily", "GAP", "GAP Logo Hoodie")
        };

        assert_eq!(
            input.resolve(&dataset),
            Err(DomainError::UnsupportedUsualBrand("Zara".to_string()))
        );
    }

    #[test]
    fn unknown_profile_and_brand_are_rejected() {
        let dataset = Dataset::embedded().expect("embedded dataset");

        assert_eq!(
            form("Nobody", "GAP", "GAP Logo Hoodie").resolve(&dataset),
            Err(DomainError::UnknownProfile("Nobody".to_string()))
        );
        assert_eq!(
            form("Emily", "Zara", "GAP Logo Hoodie").resolve(&dataset),
            Err(DomainError::UnknownBrand("Zara".to_string()))
        );
    }

    #[test]
    fn profile_defaults_carry_measurements() {
        let dataset = Dataset::embedded().expect("embedded dataset");
        let emily = dataset.profile("Emily").expect("emily exists");

        let defaults = profile_defaults(emily);
        assert_eq!(defaults.height.as_deref(), Some("5'5\""));
        assert_eq!(defaults.usual_brand.as_deref(), Some("Athleta"));
        assert_eq!(defaults.usual_size.as_deref(), Some("M"));
    }
}

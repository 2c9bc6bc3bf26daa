//! Deterministic size resolution.
//!
//! Maps a shopper's usual size onto the target brand's labels through the
//! brand's sizing bias. The usual brand is carried for prompting and display;
//! no cross-brand adjustment is derived from it.
//!
//! `SizePrecedence` decides which size is shown once a stylist reply has been
//! parsed. The default lets the reply win, even when it names no size.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::brand::ShoppingBrand;
use crate::domain::size::{BaseSize, SizeToken};
use crate::explanation::ExtractedSize;

/// Sizes outside the usual set resolve to `M` regardless of bias.
pub const FALLBACK_SIZE: SizeToken = SizeToken::M;

pub fn resolve_size(
    target_brand: &ShoppingBrand,
    _usual_brand: &str,
    usual_size: &str,
) -> SizeToken {
    match BaseSize::parse(usual_size) {
        Some(usual) => target_brand.bias.shift(usual),
        None => FALLBACK_SIZE,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizePrecedence {
    /// The size parsed from the reply is shown, or `Not specified`.
    #[default]
    Model,
    /// The parsed size when there is one, otherwise the resolver's proposal.
    ResolverFallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeSource {
    Model,
    Resolver,
    Unspecified,
}

impl SizePrecedence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::ResolverFallback => "resolver_fallback",
        }
    }

    pub fn decide(
        &self,
        proposed: SizeToken,
        stated: ExtractedSize,
    ) -> (ExtractedSize, SizeSource) {
        match (stated, *self) {
            (ExtractedSize::Stated(_), _) => (stated, SizeSource::Model),
            (ExtractedSize::NotSpecified, Self::Model) => (stated, SizeSource::Unspecified),
            (ExtractedSize::NotSpecified, Self::ResolverFallback) => {
                (ExtractedSize::Stated(proposed), SizeSource::Resolver)
            }
        }
    }
}

impl FromStr for SizePrecedence {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "model" => Ok(Self::Model),
            "resolver_fallback" | "resolver-fallback" => Ok(Self::ResolverFallback),
            other => Err(format!(
                "unsupported size precedence `{other}` (expected model|resolver_fallback)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::brand::{ShoppingBrand, SizingBias};
    use crate::domain::size::SizeToken;
    use crate::explanation::ExtractedSize;

    use super::{resolve_size, SizePrecedence, SizeSource};

    fn shopping_brand(name: &str, bias: SizingBias) -> ShoppingBrand {
        ShoppingBrand { name: name.to_string(), bias }
    }

    #[test]
    fn every_bias_follows_its_shift_table() {
        use SizeToken::*;

        let expected = [
            (SizingBias::RunsLarge, [("S", Xs), ("M", S), ("L", M), ("XL", L)]),
            (SizingBias::RunsSlightlyLarge, [("S", S), ("M", M), ("L", M), ("XL", L)]),
            (SizingBias::Fitted, [("S", M), ("M", L), ("L", Xl), ("XL", Xxl)]),
            (SizingBias::TrueToSize, [("S", S), ("M", M), ("L", L), ("XL", Xl)]),
        ];

        for (bias, rows) in expected {
            let brand = shopping_brand("Test Brand", bias);
            for (usual, want) in rows {
                assert_eq!(
                    resolve_size(&brand, "GAP", usual),
                    want,
                    "{} with usual size {usual}",
                    bias.as_str()
                );
            }
        }
    }

    #[test]
    fn usual_size_is_matched_case_insensitively() {
        let brand = shopping_brand("Banana Republic", SizingBias::Fitted);

        assert_eq!(resolve_size(&brand, "GAP", "l"), SizeToken::Xl);
        assert_eq!(resolve_size(&brand, "GAP", "xl"), SizeToken::Xxl);
    }

    #[test]
    fn unknown_usual_size_falls_back_to_medium() {
        let biases = [
            SizingBias::RunsLarge,
            SizingBias::RunsSlightlyLarge,
            SizingBias::TrueToSize,
            SizingBias::Fitted,
        ];
        for bias in biases {
            let brand = shopping_brand("Any", bias);
            for usual in ["XS", "xxl", "42", "", "medium"] {
                assert_eq!(resolve_size(&brand, "Nike", usual), SizeToken::M);
            }
        }
    }

    #[test]
    fn usual_brand_does_not_change_the_result() {
        let brand = shopping_brand("Old Navy", SizingBias::RunsLarge);

        let sizes: Vec<SizeToken> = ["H&M", "Uniqlo", "Nike", "Athleta", "GAP"]
            .iter()
            .map(|usual_brand| resolve_size(&brand, usual_brand, "L"))
            .collect();

        assert!(sizes.iter().all(|size| *size == SizeToken::M));
    }

    #[test]
    fn stated_size_wins_under_every_precedence() {
        for precedence in [SizePrecedence::Model, SizePrecedence::ResolverFallback] {
            assert_eq!(
                precedence.decide(SizeToken::Xl, ExtractedSize::Stated(SizeToken::L)),
                (ExtractedSize::Stated(SizeToken::L), SizeSource::Model)
            );
        }
    }

    #[test]
    fn model_precedence_keeps_sentinel_when_reply_has_no_size() {
        assert_eq!(
            SizePrecedence::Model.decide(SizeToken::Xl, ExtractedSize::NotSpecified),
            (ExtractedSize::NotSpecified, SizeSource::Unspecified)
        );
    }

    #[test]
    fn resolver_fallback_fills_in_missing_size() {
        assert_eq!(
            SizePrecedence::ResolverFallback.decide(SizeToken::Xl, ExtractedSize::NotSpecified),
            (ExtractedSize::Stated(SizeToken::Xl), SizeSource::Resolver)
        );
    }

    #[test]
    fn precedence_parses_from_config_values() {
        assert_eq!("model".parse::<SizePrecedence>(), Ok(SizePrecedence::Model));
        assert_eq!(
            " Resolver-Fallback ".parse::<SizePrecedence>(),
            Ok(SizePrecedence::ResolverFallback)
        );
        assert!("resolver".parse::<SizePrecedence>().is_err());
    }
}

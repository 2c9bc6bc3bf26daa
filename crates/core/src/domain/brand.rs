use serde::{Deserialize, Serialize};

use crate::domain::size::{BaseSize, SizeToken};

/// How a brand's labels compare with a shopper's usual size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingBias {
    RunsLarge,
    RunsSlightlyLarge,
    TrueToSize,
    Fitted,
}

impl SizingBias {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RunsLarge => "runs_large",
            Self::RunsSlightlyLarge => "runs_slightly_large",
            Self::TrueToSize => "true_to_size",
            Self::Fitted => "fitted",
        }
    }

    /// Shift table for this bias. Total over every `BaseSize`.
    pub fn shift(&self, usual: BaseSize) -> SizeToken {
        use BaseSize as B;
        use SizeToken as T;

        match (self, usual) {
            (Self::RunsLarge, B::S) => T::Xs,
            (Self::RunsLarge, B::M) => T::S,
            (Self::RunsLarge, B::L) => T::M,
            (Self::RunsLarge, B::Xl) => T::L,

            (Self::RunsSlightlyLarge, B::S) => T::S,
            (Self::RunsSlightlyLarge, B::M) => T::M,
            (Self::RunsSlightlyLarge, B::L) => T::M,
            (Self::RunsSlightlyLarge, B::Xl) => T::L,

            (Self::Fitted, B::S) => T::M,
            (Self::Fitted, B::M) => T::L,
            (Self::Fitted, B::L) => T::Xl,
            (Self::Fitted, B::Xl) => T::Xxl,

            (Self::TrueToSize, usual) => usual.as_token(),
        }
    }
}

/// A brand the catalog sells. Only the dataset hands these out, so holding one
/// means the brand's bias is known.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingBrand {
    pub name: String,
    pub bias: SizingBias,
}

impl ShoppingBrand {
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

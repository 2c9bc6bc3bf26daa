use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::size::SizeToken;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub brand: String,
    pub product: String,
    pub size: SizeToken,
    pub fit_feedback: String,
}

impl fmt::Display for PurchaseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (Size {}, Feedback: {})",
            self.brand, self.product, self.size, self.fit_feedback
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub height: String,
    pub weight: String,
    pub style: String,
    pub preferred_fit: String,
    pub usual_brand: String,
    pub usual_size: String,
    #[serde(default)]
    pub purchase_history: Vec<PurchaseRecord>,
}

impl CustomerProfile {
    pub fn history_summary(&self) -> String {
        summarize_history(&self.purchase_history)
    }
}

/// One line per purchase in recorded order, joined with `", "`.
pub fn summarize_history(history: &[PurchaseRecord]) -> String {
    history.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

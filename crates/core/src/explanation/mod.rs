//! Explanation post-processing
//!
//! Pulls the size a stylist reply commits to out of free text. Replies are asked
//! to open with "Recommended size is <SIZE>"; anything that does not carry that
//! phrase yields the `Not specified` sentinel rather than an error.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::domain::size::SizeToken;

pub const NOT_SPECIFIED: &str = "Not specified";

static RECOMMENDED_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)recommended size is (?:a )?\b(XS|S|M|L|XL|XXL)\b")
        .expect("recommended size pattern compiles")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractedSize {
    Stated(SizeToken),
    NotSpecified,
}

impl ExtractedSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stated(size) => size.as_str(),
            Self::NotSpecified => NOT_SPECIFIED,
        }
    }
}

impl fmt::Display for ExtractedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ExtractedSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// First "recommended size is [a] <SIZE>" in `text`, uppercased.
///
/// Case folding is Unicode-aware (`ſ` matches `S`), so the capture is
/// uppercased the same way before it is parsed.
pub fn extract_size(text: &str) -> ExtractedSize {
    RECOMMENDED_SIZE
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .find_map(|token| SizeToken::parse(&token.as_str().to_uppercase()))
        .map_or(ExtractedSize::NotSpecified, ExtractedSize::Stated)
}

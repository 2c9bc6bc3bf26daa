//! Garment size labels
//!
//! `SizeToken` is the closed set a recommendation can land on. `BaseSize` is the
//! narrower set a shopper can report as their usual size; brand shift tables are
//! total over it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizeToken {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown size `{0}` (expected one of XS|S|M|L|XL|XXL)")]
pub struct ParseSizeError(pub String);

impl SizeToken {
    pub const ALL: [SizeToken; 6] = [Self::Xs, Self::S, Self::M, Self::L, Self::Xl, Self::Xxl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xs => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
            Self::Xxl => "XXL",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "XS" => Some(Self::Xs),
            "S" => Some(Self::S),
            "M" => Some(Self::M),
            "L" => Some(Self::L),
            "XL" => Some(Self::Xl),
            "XXL" => Some(Self::Xxl),
            _ => None,
        }
    }
}

impl fmt::Display for SizeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeToken {
    type Err = ParseSizeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| ParseSizeError(value.to_string()))
    }
}

impl Serialize for SizeToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SizeToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A usual size a shopper can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseSize {
    S,
    M,
    L,
    Xl,
}

impl BaseSize {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "S" => Some(Self::S),
            "M" => Some(Self::M),
            "L" => Some(Self::L),
            "XL" => Some(Self::Xl),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.as_token().as_str()
    }

    pub fn as_token(&self) -> SizeToken {
        match self {
            Self::S => SizeToken::S,
            Self::M => SizeToken::M,
            Self::L => SizeToken::L,
            Self::Xl => SizeToken::Xl,
        }
    }
}

impl fmt::Display for BaseSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{BaseSize, SizeToken};

    #[test]
    fn size_token_parse_is_case_insensitive_and_canonicalizes() {
        assert_eq!(SizeToken::parse("xl"), Some(SizeToken::Xl));
        assert_eq!(SizeToken::parse(" xxl "), Some(SizeToken::Xxl));
        assert_eq!(SizeToken::parse("Xs").map(|size| size.to_string()), Some("XS".to_string()));
        assert_eq!(SizeToken::parse("XXXL"), None);
        assert!("medium".parse::<SizeToken>().is_err());
    }

    #[test]
    fn base_size_rejects_sizes_outside_the_usual_set() {
        assert_eq!(BaseSize::parse("l"), Some(BaseSize::L));
        assert_eq!(BaseSize::parse("XS"), None);
        assert_eq!(BaseSize::parse("XXL"), None);
        assert_eq!(BaseSize::parse(""), None);
    }

    #[test]
    fn size_token_serializes_as_uppercase_label() {
        let json = serde_json::to_string(&SizeToken::Xxl).expect("serialize");
        assert_eq!(json, "\"XXL\"");

        let parsed: SizeToken = serde_json::from_str("\"xs\"").expect("deserialize");
        assert_eq!(parsed, SizeToken::Xs);
    }
}

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown customer profile `{0}`")]
    UnknownProfile(String),
    #[error("unknown brand `{0}`")]
    UnknownBrand(String),
    #[error("product `{product}` is not sold by {brand}")]
    ProductNotSoldByBrand { brand: String, product: String },
    #[error("unsupported usual brand `{0}`")]
    UnsupportedUsualBrand(String),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("dataset failure: {0}")]
    Dataset(String),
    #[error("integration failure: {0}")]
    Integration(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::InvariantViolation(_)) | Self::Dataset(_) => "dataset",
            Self::Domain(_) => "invalid_selection",
            Self::Integration(_) => "integration",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) => 2,
            Self::Integration(_) => 3,
            Self::Domain(DomainError::InvariantViolation(_)) | Self::Dataset(_) => 4,
            Self::Domain(_) => 5,
        }
    }
}

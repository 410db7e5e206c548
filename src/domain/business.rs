//! Deployment-specific identity of the business behind the site.
//!
//! Structured-data builders receive this value instead of reading constants.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street_address: String,
    pub locality: String,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessIdentity {
    pub name: String,
    pub address: PostalAddress,
    pub telephone: Option<String>,
    /// ISO 4217 code used for every offer price.
    pub currency: CurrencyCode,
}

/// Three-letter uppercase ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.len() == 3 && trimmed.chars().all(|ch| ch.is_ascii_uppercase()) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(DomainError::validation(format!(
                "currency code `{value}` must be three uppercase letters"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_code_accepts_iso_shape() {
        assert_eq!(CurrencyCode::parse(" CHF ").expect("chf").as_str(), "CHF");
    }

    #[test]
    fn currency_code_rejects_other_shapes() {
        for bad in ["chf", "CH", "EURO", "", "C1F"] {
            assert!(CurrencyCode::parse(bad).is_err(), "accepted {bad}");
        }
    }
}

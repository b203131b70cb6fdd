// crates/interaction/src/domain/value_objects/biz_domain.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::ValueObject;
use shared_kernel::errors::{DomainError, Result};
use std::fmt;

/// Catégorie métier de l'item (ex: "article"). Sert de préfixe aux clés de cache.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BizDomain(String);

impl BizDomain {
    pub const MAX_LENGTH: usize = 128;

    pub fn try_new(value: impl Into<String>) -> Result<Self> {
        let domain = Self(value.into().trim().to_string());
        domain.validate()?;
        Ok(domain)
    }

    /// Reconstruction depuis la DB, sans validation
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for BizDomain {
    fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(DomainError::Validation {
                field: "domain",
                reason: "domain cannot be empty".into(),
            });
        }
        if self.0.len() > Self::MAX_LENGTH {
            return Err(DomainError::Validation {
                field: "domain",
                reason: format!("domain exceeds {} characters", Self::MAX_LENGTH),
            });
        }
        // ':' est le séparateur des clés de cache
        if !self
            .0
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        {
            return Err(DomainError::Validation {
                field: "domain",
                reason: format!("'{}' must only contain [a-z0-9_-]", self.0),
            });
        }
        Ok(())
    }
}

impl TryFrom<String> for BizDomain {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self> {
        Self::try_new(value)
    }
}

impl TryFrom<&str> for BizDomain {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self> {
        Self::try_new(value)
    }
}

impl From<BizDomain> for String {
    fn from(domain: BizDomain) -> Self {
        domain.0
    }
}

impl fmt::Display for BizDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_domains() {
        assert_eq!(BizDomain::try_new("article").unwrap().as_str(), "article");
        assert_eq!(BizDomain::try_new(" short_video-2 ").unwrap().as_str(), "short_video-2");
    }

    #[test]
    fn test_rejects_empty_and_separator() {
        assert!(BizDomain::try_new("").is_err());
        assert!(BizDomain::try_new("   ").is_err());
        assert!(BizDomain::try_new("article:1").is_err());
        assert!(BizDomain::try_new("Article").is_err());
    }

    #[test]
    fn test_rejects_too_long() {
        let err = BizDomain::try_new("a".repeat(129)).unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "domain", .. }));
    }

    #[test]
    fn test_deserialization_validates() {
        assert!(serde_json::from_str::<BizDomain>("\"article\"").is_ok());
        assert!(serde_json::from_str::<BizDomain>("\"\"").is_err());
    }
}

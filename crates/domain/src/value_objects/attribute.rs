//! Attribute value object - the two purchasable attributes.
//!
//! Type safety for attribute references instead of magic strings like "body".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Body,
    Stamina,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Stamina => "stamina",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Body => "Body",
            Self::Stamina => "Stamina",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "body" => Ok(Self::Body),
            "stamina" => Ok(Self::Stamina),
            other => Err(DomainError::parse(format!("Unknown attribute: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Attribute::from_str("body").unwrap(), Attribute::Body);
        assert_eq!(Attribute::from_str("Stamina").unwrap(), Attribute::Stamina);
        assert!(Attribute::from_str("luck").is_err());
    }
}

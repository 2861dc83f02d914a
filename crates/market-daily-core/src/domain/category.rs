use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::ValidationError;

/// Closed instrument classification.
///
/// `Fx` is populated only by the exchange-rate feed; rows from the tabular
/// source carrying it are rejected by the snapshot builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Equity,
    Commodities,
    Crypto,
    Fx,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equity => "equity",
            Self::Commodities => "commodities",
            Self::Crypto => "crypto",
            Self::Fx => "fx",
        }
    }

    pub const fn is_feed_only(self) -> bool {
        matches!(self, Self::Fx)
    }

    /// Parses a category case-insensitively, ignoring surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "equity" => Ok(Self::Equity),
            "commodities" => Ok(Self::Commodities),
            "crypto" => Ok(Self::Crypto),
            "fx" => Ok(Self::Fx),
            _ => Err(ValidationError::UnknownCategory {
                value: input.trim().to_owned(),
            }),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

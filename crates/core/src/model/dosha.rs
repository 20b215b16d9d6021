use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for parsing a dosha name from a string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown dosha: {0}")]
pub struct ParseDoshaError(pub String);

/// The three constitutional categories assigned by the assessment.
///
/// `ALL` lists them in the fixed precedence order used for tie-breaking:
/// Vata, then Pitta, then Kapha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    /// All doshas in precedence order.
    pub const ALL: [Dosha; 3] = [Dosha::Vata, Dosha::Pitta, Dosha::Kapha];

    /// Lowercase storage key for this dosha.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Dosha::Vata => "vata",
            Dosha::Pitta => "pitta",
            Dosha::Kapha => "kapha",
        }
    }

    /// Human-facing display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Dosha::Vata => "Vata",
            Dosha::Pitta => "Pitta",
            Dosha::Kapha => "Kapha",
        }
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dosha {
    type Err = ParseDoshaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vata" => Ok(Dosha::Vata),
            "pitta" => Ok(Dosha::Pitta),
            "kapha" => Ok(Dosha::Kapha),
            other => Err(ParseDoshaError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        for dosha in Dosha::ALL {
            let parsed: Dosha = dosha.as_str().parse().unwrap();
            assert_eq!(parsed, dosha);
        }
    }

    #[test]
    fn rejects_unknown_name() {
        assert!("tridosha".parse::<Dosha>().is_err());
    }

    #[test]
    fn precedence_order_is_fixed() {
        assert_eq!(Dosha::ALL, [Dosha::Vata, Dosha::Pitta, Dosha::Kapha]);
    }
}

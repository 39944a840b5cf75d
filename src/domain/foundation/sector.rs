//! Sector enum: the portal areas that run registration flows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Service sector a conversation or record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Agricultura,
    Pesca,
    Paa,
}

impl Sector {
    /// Returns all sectors in portal menu order.
    pub fn all() -> &'static [Sector] {
        &[Sector::Agricultura, Sector::Pesca, Sector::Paa]
    }

    /// Stable slug used in keys, routes and serialized snapshots.
    pub fn slug(&self) -> &'static str {
        match self {
            Sector::Agricultura => "agricultura",
            Sector::Pesca => "pesca",
            Sector::Paa => "paa",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Sector::Agricultura => "Agricultura",
            Sector::Pesca => "Pesca",
            Sector::Paa => "PAA",
        }
    }

    /// Route of the full web form this sector hands off to.
    pub fn form_route(&self) -> &'static str {
        match self {
            Sector::Agricultura => "/forms/agricultura-completo",
            Sector::Pesca => "/forms/pesca",
            Sector::Paa => "/forms/paa",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Sector {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "agricultura" => Ok(Sector::Agricultura),
            "pesca" => Ok(Sector::Pesca),
            "paa" => Ok(Sector::Paa),
            other => Err(ValidationError::invalid_format(
                "sector",
                format!("unknown sector '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slugs_case_insensitively() {
        assert_eq!("Pesca".parse::<Sector>().unwrap(), Sector::Pesca);
        assert_eq!(" paa ".parse::<Sector>().unwrap(), Sector::Paa);
    }

    #[test]
    fn rejects_unknown_sector() {
        assert!("sim".parse::<Sector>().is_err());
    }

    #[test]
    fn serializes_to_snake_case_slug() {
        let json = serde_json::to_string(&Sector::Agricultura).unwrap();
        assert_eq!(json, "\"agricultura\"");
    }

    #[test]
    fn form_routes_point_at_form_directories() {
        assert_eq!(Sector::Agricultura.form_route(), "/forms/agricultura-completo");
        assert_eq!(Sector::Pesca.form_route(), "/forms/pesca");
        assert_eq!(Sector::Paa.form_route(), "/forms/paa");
    }
}

//! Service category catalog.
//!
//! The marketplace offers a fixed set of categories a salon can register
//! under; the labels and descriptions here are the ones shown by the
//! category picker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A service category a salon can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    /// Cuts, styling, coloring, treatments.
    Hair,
    /// Manicures, pedicures, nail art.
    Nails,
    /// Facials, treatments, skincare.
    Skincare,
    /// Makeup application, lessons.
    Makeup,
    /// Men's cuts, shaves, grooming.
    Barber,
    /// Massage, aromatherapy, wellness.
    Wellness,
}

impl ServiceCategory {
    /// All categories in picker order.
    pub const ALL: [Self; 6] = [
        Self::Hair,
        Self::Nails,
        Self::Skincare,
        Self::Makeup,
        Self::Barber,
        Self::Wellness,
    ];

    /// Stable identifier used in payloads and parsing.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Hair => "hair",
            Self::Nails => "nails",
            Self::Skincare => "skincare",
            Self::Makeup => "makeup",
            Self::Barber => "barber",
            Self::Wellness => "wellness",
        }
    }

    /// Human-readable label shown in the picker.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hair => "Hair Services",
            Self::Nails => "Nail Services",
            Self::Skincare => "Skincare",
            Self::Makeup => "Makeup",
            Self::Barber => "Barber Services",
            Self::Wellness => "Wellness",
        }
    }

    /// Short description of what the category covers.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Hair => "Cuts, styling, coloring, treatments",
            Self::Nails => "Manicures, pedicures, nail art",
            Self::Skincare => "Facials, treatments, skincare",
            Self::Makeup => "Makeup application, lessons",
            Self::Barber => "Men's cuts, shaves, grooming",
            Self::Wellness => "Massage, aromatherapy, wellness",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ServiceCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hair" => Ok(Self::Hair),
            "nails" => Ok(Self::Nails),
            "skincare" => Ok(Self::Skincare),
            "makeup" => Ok(Self::Makeup),
            "barber" => Ok(Self::Barber),
            "wellness" => Ok(Self::Wellness),
            other => Err(CategoryParseError {
                input: other.to_string(),
            }),
        }
    }
}

/// Error indicating an unknown category identifier.
#[derive(Debug, Clone)]
pub struct CategoryParseError {
    /// The identifier that failed to parse.
    pub input: String,
}

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown service category '{}'", self.input)
    }
}

impl std::error::Error for CategoryParseError {}

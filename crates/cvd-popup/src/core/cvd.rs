//! Color vision deficiency types offered by the selector.
//!
//! # Design
//! - The stored representation is the upper-case name used by the filter scripts.
//! - "Unset" is modelled as `Option::None`, never as a variant.

use crate::error::PopupError;
use std::fmt;
use std::str::FromStr;

/// Supported color vision deficiency types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CvdType {
    /// Reduced sensitivity to red light.
    Protanomaly,
    /// Reduced sensitivity to green light.
    Deuteranomaly,
    /// Reduced sensitivity to blue light.
    Tritanomaly,
}

impl CvdType {
    /// All supported types in selector order.
    pub const ALL: [Self; 3] = [Self::Protanomaly, Self::Deuteranomaly, Self::Tritanomaly];

    /// Value persisted in the settings store and used as the radio value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Protanomaly => "PROTANOMALY",
            Self::Deuteranomaly => "DEUTERANOMALY",
            Self::Tritanomaly => "TRITANOMALY",
        }
    }

    /// Human-friendly label shown next to the radio button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Protanomaly => "Protanomaly",
            Self::Deuteranomaly => "Deuteranomaly",
            Self::Tritanomaly => "Tritanomaly",
        }
    }

    /// Parse a stored value, treating anything unrecognised (including empty) as unset.
    #[must_use]
    pub fn from_stored(value: &str) -> Option<Self> {
        value.parse().ok()
    }

    /// Stored representation of an optional selection; unset maps to the empty string.
    #[must_use]
    pub const fn stored(selection: Option<Self>) -> &'static str {
        match selection {
            Some(cvd) => cvd.as_str(),
            None => "",
        }
    }
}

impl FromStr for CvdType {
    type Err = PopupError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|cvd| cvd.as_str() == value)
            .ok_or_else(|| PopupError::InvalidCvdType {
                value: value.to_string(),
            })
    }
}

impl fmt::Display for CvdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::CvdType;

    #[test]
    fn parses_stored_names() {
        assert_eq!(
            "DEUTERANOMALY".parse::<CvdType>().ok(),
            Some(CvdType::Deuteranomaly)
        );
        assert_eq!(CvdType::from_stored("TRITANOMALY"), Some(CvdType::Tritanomaly));
    }

    #[test]
    fn rejects_unset_and_unknown_values() {
        assert!("".parse::<CvdType>().is_err());
        assert!("deuteranomaly".parse::<CvdType>().is_err());
        assert!("ACHROMATOPSIA".parse::<CvdType>().is_err());
        assert_eq!(CvdType::from_stored(" PROTANOMALY"), None);
    }

    #[test]
    fn stored_representation_of_unset_is_empty() {
        assert_eq!(CvdType::stored(None), "");
        assert_eq!(CvdType::stored(Some(CvdType::Protanomaly)), "PROTANOMALY");
    }

    #[test]
    fn labels_capitalise_first_letter_only() {
        for cvd in CvdType::ALL {
            let name = cvd.as_str();
            let expected = format!("{}{}", &name[..1], name[1..].to_lowercase());
            assert_eq!(cvd.label(), expected);
            assert_eq!(cvd.to_string(), name);
        }
    }
}

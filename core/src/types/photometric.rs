use std::fmt;

/// DICOM photometric interpretation of stored pixel values
///
/// Only the monochrome conventions affect radiometric correction;
/// every other value is carried through for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PhotometricInterpretation {
    /// Tag absent or empty
    #[default]
    Unknown,
    /// Higher stored values are darker
    Monochrome1,
    /// Higher stored values are brighter
    Monochrome2,
    /// Any other defined term (RGB, PALETTE COLOR, YBR_FULL, ...)
    Other(String),
}

impl PhotometricInterpretation {
    /// Returns whether pixel polarity must be flipped (MONOCHROME1)
    pub fn is_inverted(&self) -> bool {
        matches!(self, PhotometricInterpretation::Monochrome1)
    }

    /// Returns whether this is a monochrome interpretation
    pub fn is_monochrome(&self) -> bool {
        matches!(
            self,
            PhotometricInterpretation::Monochrome1 | PhotometricInterpretation::Monochrome2
        )
    }

    /// Parses photometric interpretation from a tag value
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "" => PhotometricInterpretation::Unknown,
            "MONOCHROME1" => PhotometricInterpretation::Monochrome1,
            "MONOCHROME2" => PhotometricInterpretation::Monochrome2,
            _ => PhotometricInterpretation::Other(upper),
        }
    }
}

impl fmt::Display for PhotometricInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotometricInterpretation::Unknown => write!(f, "UNKNOWN"),
            PhotometricInterpretation::Monochrome1 => write!(f, "MONOCHROME1"),
            PhotometricInterpretation::Monochrome2 => write!(f, "MONOCHROME2"),
            PhotometricInterpretation::Other(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("MONOCHROME1", PhotometricInterpretation::Monochrome1)]
    #[case("monochrome1 ", PhotometricInterpretation::Monochrome1)]
    #[case("MONOCHROME2", PhotometricInterpretation::Monochrome2)]
    #[case("", PhotometricInterpretation::Unknown)]
    #[case("rgb", PhotometricInterpretation::Other("RGB".to_string()))]
    fn test_from_str(#[case] input: &str, #[case] expected: PhotometricInterpretation) {
        assert_eq!(PhotometricInterpretation::from_str(input), expected);
    }

    #[test]
    fn test_only_monochrome1_is_inverted() {
        assert!(PhotometricInterpretation::Monochrome1.is_inverted());
        assert!(!PhotometricInterpretation::Monochrome2.is_inverted());
        assert!(!PhotometricInterpretation::Unknown.is_inverted());
        assert!(!PhotometricInterpretation::from_str("YBR_FULL").is_inverted());
    }

    #[test]
    fn test_display_round_trips_defined_terms() {
        assert_eq!(PhotometricInterpretation::Monochrome1.to_string(), "MONOCHROME1");
        assert_eq!(
            PhotometricInterpretation::from_str("palette color").to_string(),
            "PALETTE COLOR"
        );
    }
}

//! PHI match data models

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// PHI category: the HIPAA Safe Harbor identifiers plus clinical-context identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhiCategory {
    // HIPAA Safe Harbor identifiers
    /// Names (first, middle, last, maiden, preferred)
    Name,
    /// Street addresses and city/state/ZIP lines
    Address,
    /// ZIP and postal codes
    ZipCode,
    /// Date elements
    Date,
    /// Date of birth
    Dob,
    /// Telephone numbers
    Phone,
    /// Fax numbers
    Fax,
    /// Email addresses
    Email,
    /// Social Security Numbers
    Ssn,
    /// Medical record and personal health numbers
    Mrn,
    /// Health plan, member, policy and carrier identifiers
    InsuranceId,
    /// Account numbers
    Account,
    /// Certificate/license numbers (NPI, DEA)
    License,
    /// Vehicle identifiers
    Vehicle,
    /// Device identifiers and serial numbers
    Device,
    /// Web URLs
    Url,
    /// IP addresses
    IpAddress,
    /// Biometric identifiers
    Biometric,
    /// References to photographs of the patient
    PhotoRef,
    /// Any other unique identifying number
    OtherId,

    // Clinical context identifiers
    /// Sex or gender
    Gender,
    /// Pronouns
    Pronouns,
    /// Sensitive diagnoses (gender-affirming care)
    SensitiveDx,
    /// Race or ethnicity
    RaceEthnicity,
    /// Tax identification numbers
    Tin,
    /// Occupation or employer
    Occupation,
    /// Age mentions
    Age,
    /// Ages over 89
    #[serde(rename = "AGE_90PLUS")]
    Age90Plus,
    /// Room and bed numbers
    Location,
    /// Admission, discharge and service dates
    ServiceDate,
    /// Name-like tokens found by dictionary or heuristic
    PossibleName,
}

impl PhiCategory {
    /// Placeholder label written into redacted text
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Address => "ADDRESS",
            Self::ZipCode => "ZIP_CODE",
            Self::Date => "DATE",
            Self::Dob => "DOB",
            Self::Phone => "PHONE",
            Self::Fax => "FAX",
            Self::Email => "EMAIL",
            Self::Ssn => "SSN",
            Self::Mrn => "MRN",
            Self::InsuranceId => "INSURANCE_ID",
            Self::Account => "ACCOUNT",
            Self::License => "LICENSE",
            Self::Vehicle => "VEHICLE",
            Self::Device => "DEVICE",
            Self::Url => "URL",
            Self::IpAddress => "IP_ADDRESS",
            Self::Biometric => "BIOMETRIC",
            Self::PhotoRef => "PHOTO_REF",
            Self::OtherId => "OTHER_ID",
            Self::Gender => "GENDER",
            Self::Pronouns => "PRONOUNS",
            Self::SensitiveDx => "SENSITIVE_DX",
            Self::RaceEthnicity => "RACE_ETHNICITY",
            Self::Tin => "TIN",
            Self::Occupation => "OCCUPATION",
            Self::Age => "AGE",
            Self::Age90Plus => "AGE_90PLUS",
            Self::Location => "LOCATION",
            Self::ServiceDate => "SERVICE_DATE",
            Self::PossibleName => "POSSIBLE_NAME",
        }
    }

    /// Categories subject to the excluded-phrase filter
    pub fn is_name_like(&self) -> bool {
        matches!(self, Self::Name | Self::PossibleName)
    }
}

impl fmt::Display for PhiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Set of proper-name tokens
///
/// Ordered so that re-scanning a buffer for propagated names always visits
/// tokens in the same order.
pub type NameTokenSet = BTreeSet<String>;

/// A detected PHI span in a canonical text buffer
///
/// `start` and `end` are byte offsets into the buffer and always fall on
/// character boundaries. `start < end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhiMatch {
    /// Matched text
    pub text: String,
    /// Category of PHI
    pub category: PhiCategory,
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
}

impl PhiMatch {
    /// Create a new match
    pub fn new(
        text: impl Into<String>,
        category: PhiCategory,
        start: usize,
        end: usize,
        confidence: f32,
    ) -> Self {
        Self {
            text: text.into(),
            category,
            start,
            end,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Half-open interval intersection with `[start, end)`
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }

    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Count matches per category
pub fn count_by_category(matches: &[PhiMatch]) -> BTreeMap<PhiCategory, usize> {
    let mut counts = BTreeMap::new();
    for m in matches {
        *counts.entry(m.category).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&PhiCategory::Age90Plus).unwrap();
        assert_eq!(json, "\"AGE_90PLUS\"");

        let json = serde_json::to_string(&PhiCategory::IpAddress).unwrap();
        assert_eq!(json, format!("\"{}\"", PhiCategory::IpAddress.label()));

        let parsed: PhiCategory = serde_json::from_str("\"POSSIBLE_NAME\"").unwrap();
        assert_eq!(parsed, PhiCategory::PossibleName);
    }

    #[test]
    fn test_overlap_is_half_open() {
        let m = PhiMatch::new("John", PhiCategory::Name, 5, 9, 0.9);
        assert!(m.overlaps(8, 12));
        assert!(m.overlaps(0, 6));
        assert!(m.overlaps(6, 7));
        assert!(m.overlaps(0, 20));
        assert!(!m.overlaps(9, 12));
        assert!(!m.overlaps(0, 5));
    }

    #[test]
    fn test_confidence_is_clamped() {
        let m = PhiMatch::new("x", PhiCategory::OtherId, 0, 1, 1.4);
        assert_eq!(m.confidence, 1.0);
    }

    #[test]
    fn test_count_by_category() {
        let matches = vec![
            PhiMatch::new("a", PhiCategory::Name, 0, 1, 0.9),
            PhiMatch::new("b", PhiCategory::Name, 2, 3, 0.9),
            PhiMatch::new("c", PhiCategory::Email, 4, 5, 0.98),
        ];
        let counts = count_by_category(&matches);
        assert_eq!(counts.get(&PhiCategory::Name), Some(&2));
        assert_eq!(counts.get(&PhiCategory::Email), Some(&1));
        assert_eq!(counts.get(&PhiCategory::Ssn), None);
    }
}

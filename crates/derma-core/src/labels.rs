//! The fixed skin-condition label enumeration.
//!
//! Label order mirrors the column order the classifier was trained with, so
//! index *i* of the model's output vector always refers to `ALL[i]`. The two
//! must never be permuted independently of each other.

use std::fmt;

use serde::{Serialize, Serializer};

/// A skin condition the classifier can detect.
///
/// Variant order is significant: it is the positional contract with the
/// model's 16-wide sigmoid output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionLabel {
    DarkCircle,
    Eyebag,
    AcneScar,
    Blackhead,
    DarkSpot,
    Freckle,
    Melasma,
    Nodule,
    Papule,
    Pustule,
    Redness,
    Whitehead,
    Wrinkle,
    OilySkin,
    DrySkin,
    LargePores,
}

impl ConditionLabel {
    /// All labels, in model output order.
    pub const ALL: [ConditionLabel; 16] = [
        ConditionLabel::DarkCircle,
        ConditionLabel::Eyebag,
        ConditionLabel::AcneScar,
        ConditionLabel::Blackhead,
        ConditionLabel::DarkSpot,
        ConditionLabel::Freckle,
        ConditionLabel::Melasma,
        ConditionLabel::Nodule,
        ConditionLabel::Papule,
        ConditionLabel::Pustule,
        ConditionLabel::Redness,
        ConditionLabel::Whitehead,
        ConditionLabel::Wrinkle,
        ConditionLabel::OilySkin,
        ConditionLabel::DrySkin,
        ConditionLabel::LargePores,
    ];

    /// The label name exactly as it appears in the training column set.
    /// Casing is inconsistent ("Dark Circle" vs "acne scar") but frozen:
    /// these strings key the knowledge-base tables and the JSON diagnosis.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionLabel::DarkCircle => "Dark Circle",
            ConditionLabel::Eyebag => "Eyebag",
            ConditionLabel::AcneScar => "acne scar",
            ConditionLabel::Blackhead => "blackhead",
            ConditionLabel::DarkSpot => "dark spot",
            ConditionLabel::Freckle => "freckle",
            ConditionLabel::Melasma => "melasma",
            ConditionLabel::Nodule => "nodule",
            ConditionLabel::Papule => "papule",
            ConditionLabel::Pustule => "pustule",
            ConditionLabel::Redness => "redness",
            ConditionLabel::Whitehead => "whitehead",
            ConditionLabel::Wrinkle => "wrinkle",
            ConditionLabel::OilySkin => "oily skin",
            ConditionLabel::DrySkin => "dry skin",
            ConditionLabel::LargePores => "large pores",
        }
    }
}

impl fmt::Display for ConditionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConditionLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_count() {
        assert_eq!(ConditionLabel::ALL.len(), 16);
    }

    #[test]
    fn test_label_order_matches_model_columns() {
        // Spot-check the positional contract at both ends and in the middle.
        assert_eq!(ConditionLabel::ALL[0].as_str(), "Dark Circle");
        assert_eq!(ConditionLabel::ALL[7].as_str(), "nodule");
        assert_eq!(ConditionLabel::ALL[12].as_str(), "wrinkle");
        assert_eq!(ConditionLabel::ALL[15].as_str(), "large pores");
    }

    #[test]
    fn test_label_names_unique() {
        for (i, a) in ConditionLabel::ALL.iter().enumerate() {
            for b in &ConditionLabel::ALL[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }

    #[test]
    fn test_serialize_as_plain_string() {
        let json = serde_json::to_string(&ConditionLabel::AcneScar).unwrap();
        assert_eq!(json, "\"acne scar\"");
    }
}

use std::collections::BTreeSet;

use serde::Serialize;

use crate::labels::ConditionLabel;

/// A condition whose classifier probability exceeded the detection threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedCondition {
    pub label: ConditionLabel,
    /// Classifier probability scaled to [0, 100].
    pub confidence: f32,
}

/// One diagnosis line in the analysis response.
///
/// Carries the condition as a plain string rather than a [`ConditionLabel`]
/// because the empty-detection path reports a synthetic "Healthy Skin" entry
/// that is not part of the label enumeration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisEntry {
    pub condition: String,
    pub confidence: f32,
}

impl From<&DetectedCondition> for DiagnosisEntry {
    fn from(detected: &DetectedCondition) -> Self {
        Self {
            condition: detected.label.as_str().to_string(),
            confidence: detected.confidence,
        }
    }
}

/// One step of the recommended routine.
///
/// Field names match the wire shape consumed by existing clients:
/// `step` ("1. Cleanse"), `product`, and `why` (the rationale).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutineStep {
    pub step: String,
    pub product: String,
    pub why: String,
}

impl RoutineStep {
    pub fn new(
        step: impl Into<String>,
        product: impl Into<String>,
        why: impl Into<String>,
    ) -> Self {
        Self {
            step: step.into(),
            product: product.into(),
            why: why.into(),
        }
    }
}

/// The full result of analyzing one photo.
///
/// `ingredients` is a `BTreeSet` so the serialized order is stable across
/// runs: two analyses of identical input produce byte-identical JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub diagnosis: Vec<DiagnosisEntry>,
    pub routine: Vec<RoutineStep>,
    pub ingredients: BTreeSet<String>,
}

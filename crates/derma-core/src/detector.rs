//! Condition detector: thresholds the classifier's probability vector into a
//! list of detected conditions.
//!
//! Pure and deterministic. An empty result is legitimate (clear skin); the
//! routine builder decides what to do about it.

use thiserror::Error;

use crate::labels::ConditionLabel;
use crate::types::DetectedCondition;

/// Probability cutoff above which a condition counts as present. Strict:
/// a probability of exactly 0.30 is not a detection.
pub const DETECTION_THRESHOLD: f32 = 0.30;

#[derive(Error, Debug)]
pub enum DetectError {
    /// The probability vector does not line up with the label enumeration.
    /// This is a model/configuration fault, not a per-request condition.
    #[error("probability vector has {got} entries, label enumeration has {expected}")]
    ArityMismatch { got: usize, expected: usize },
}

/// Threshold a probability vector into detected conditions, preserving label
/// order. Confidence is the raw probability scaled to [0, 100].
pub fn detect(probabilities: &[f32]) -> Result<Vec<DetectedCondition>, DetectError> {
    let expected = ConditionLabel::ALL.len();
    if probabilities.len() != expected {
        return Err(DetectError::ArityMismatch {
            got: probabilities.len(),
            expected,
        });
    }

    Ok(ConditionLabel::ALL
        .iter()
        .zip(probabilities)
        .filter(|(_, &prob)| prob > DETECTION_THRESHOLD)
        .map(|(&label, &prob)| DetectedCondition {
            label,
            confidence: prob * 100.0,
        })
        .collect())
}

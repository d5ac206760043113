//! The analysis pipeline: classify, threshold, build routine.

use image::DynamicImage;
use thiserror::Error;

use crate::classifier::{ClassifierError, SkinClassifier};
use crate::detector::{self, DetectError};
use crate::knowledge::Knowledge;
use crate::routine;
use crate::types::AnalysisResult;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("classifier error: {0}")]
    Classifier(#[from] ClassifierError),
    #[error("detector error: {0}")]
    Detector(#[from] DetectError),
}

/// Analyze one photo: run the classifier, threshold its probabilities into
/// detected conditions, and build the recommended routine.
///
/// A failed analysis yields no partial result; routine policy (fallbacks,
/// empty detection) lives in [`routine::build_routine`], not here.
pub fn analyze(
    classifier: &mut SkinClassifier,
    kb: &dyn Knowledge,
    image: &DynamicImage,
) -> Result<AnalysisResult, AnalyzeError> {
    let probabilities = classifier.predict(image)?;
    let detected = detector::detect(&probabilities)?;

    tracing::debug!(
        detected = detected.len(),
        "conditions above detection threshold"
    );

    Ok(routine::build_routine(&detected, kb))
}

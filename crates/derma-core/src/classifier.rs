//! Skin-condition classifier via ONNX Runtime.
//!
//! Wraps the EfficientNet-B0 multi-label head (sigmoid over 16 condition
//! labels) exported to ONNX. The model is the external collaborator here:
//! this module only owns preprocessing, the session call, and output
//! validation.

use image::imageops::FilterType;
use image::DynamicImage;
use ndarray::Array4;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::Path;
use thiserror::Error;

use crate::labels::ConditionLabel;

// --- Named constants (no magic numbers) ---
const CLASSIFIER_INPUT_SIZE: u32 = 224;
const CLASSIFIER_CHANNELS: usize = 3;
const CLASSIFIER_INTRA_THREADS: usize = 2;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("model file not found: {0} — export the trained skin model to ONNX and place it there")]
    ModelNotFound(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    /// The model's output width disagrees with the label enumeration. This is
    /// a deployment fault: the wrong model file is installed.
    #[error("model produced {got} probabilities, label enumeration has {expected}")]
    OutputArity { got: usize, expected: usize },
    #[error("ort: {0}")]
    Ort(#[from] ort::Error),
}

/// EfficientNet-B0 based multi-label skin classifier.
#[derive(Debug)]
pub struct SkinClassifier {
    session: Session,
}

impl SkinClassifier {
    /// Load the classifier ONNX model from the given path.
    pub fn load(model_path: &str) -> Result<Self, ClassifierError> {
        if !Path::new(model_path).exists() {
            return Err(ClassifierError::ModelNotFound(model_path.to_string()));
        }

        let session = Session::builder()?
            .with_intra_threads(CLASSIFIER_INTRA_THREADS)?
            .commit_from_file(model_path)?;

        tracing::info!(
            path = model_path,
            inputs = ?session.inputs().iter().map(|i| (i.name(), i.dtype())).collect::<Vec<_>>(),
            outputs = ?session.outputs().iter().map(|o| o.name()).collect::<Vec<_>>(),
            "loaded skin classifier model"
        );

        Ok(Self { session })
    }

    /// Run one forward pass, returning a probability per condition label,
    /// positionally aligned with [`ConditionLabel::ALL`].
    pub fn predict(&mut self, image: &DynamicImage) -> Result<Vec<f32>, ClassifierError> {
        let input = Self::preprocess(image);

        let outputs = self
            .session
            .run(ort::inputs![TensorRef::from_array_view(input.view())?])?;

        let (_, raw) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::InferenceFailed(format!("probability head: {e}")))?;

        let probabilities: Vec<f32> = raw.to_vec();

        let expected = ConditionLabel::ALL.len();
        if probabilities.len() != expected {
            return Err(ClassifierError::OutputArity {
                got: probabilities.len(),
                expected,
            });
        }

        Ok(probabilities)
    }

    /// Preprocess an image into the model's NHWC float tensor.
    ///
    /// Resizes to 224x224 RGB and feeds raw 0-255 pixel values: the exported
    /// EfficientNet graph carries its own rescaling layer, so no mean/std
    /// normalization happens here.
    fn preprocess(image: &DynamicImage) -> Array4<f32> {
        let resized = image::imageops::resize(
            &image.to_rgb8(),
            CLASSIFIER_INPUT_SIZE,
            CLASSIFIER_INPUT_SIZE,
            FilterType::CatmullRom,
        );

        let size = CLASSIFIER_INPUT_SIZE as usize;
        let mut tensor = Array4::<f32>::zeros((1, size, size, CLASSIFIER_CHANNELS));

        for (x, y, pixel) in resized.enumerate_pixels() {
            for c in 0..CLASSIFIER_CHANNELS {
                tensor[[0, y as usize, x as usize, c]] = pixel.0[c] as f32;
            }
        }

        tensor
    }
}

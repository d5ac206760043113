//! derma-core — Skin-condition analysis and routine recommendation engine.
//!
//! Classifies facial photos against a fixed set of 16 skin-condition labels
//! using an EfficientNet-B0 multi-label head running via ONNX Runtime, then
//! maps detected conditions to active ingredients and builds an ordered
//! skincare routine from a static product catalog.

pub mod analyzer;
pub mod classifier;
pub mod detector;
pub mod knowledge;
pub mod labels;
pub mod routine;
pub mod types;

pub use analyzer::{analyze, AnalyzeError};
pub use classifier::SkinClassifier;
pub use knowledge::{Knowledge, KnowledgeBase, Product, ProductRole};
pub use labels::ConditionLabel;
pub use types::{AnalysisResult, DetectedCondition, DiagnosisEntry, RoutineStep};

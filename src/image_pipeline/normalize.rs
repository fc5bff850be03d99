//! Normalization module
//!
//! This module maps raw 16-bit samples onto the 8-bit range, choosing between
//! depth clip+invert, histogram equalization, and min-max stretching per image.

mod classify;
mod normalizer;
pub mod types;

pub use classify::{FilenameClassifier, ImageClassifier};
pub use normalizer::{normalize, NormalizationPath};
pub use types::{
    ImageClassification,
    NormalizationConfig,
    NormalizationMethod,
    Normalized8BitImage,
};

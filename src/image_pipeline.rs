//! Image processing pipeline module
//!
//! This module turns 16-bit TIFF depth/amplitude captures into 8-bit JPEGs,
//! with separate modules for TIFF reading, normalization, geometric
//! transforms, JPEG writing, and conversion orchestration.

pub mod tiff;
pub mod normalize;
pub mod geometry;
pub mod jpeg;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use tiff::{
    RawImage,
    TiffImageReader,
    StandardTiffReader,
};

pub use normalize::{
    normalize,
    FilenameClassifier,
    ImageClassification,
    ImageClassifier,
    NormalizationConfig,
    NormalizationMethod,
    NormalizationPath,
    Normalized8BitImage,
};

pub use geometry::Rotation;

pub use jpeg::{
    ConversionConfig,
    ConversionConfigBuilder,
    JpegWriter,
    StandardJpegWriter,
};

pub use conversions::{
    BatchConverter,
    BatchSummary,
    TiffToJpegPipeline,
};

//! 16-bit to 8-bit normalization.
//!
//! Which transform runs is decided by [`NormalizationPath::select`], checked
//! in priority order:
//!
//! 1. Depth frames are clipped to the configured range, inverted so nearer
//!    surfaces are brighter, stretched to [0, 255], and every sample that was
//!    outside the range is forced to 0.
//! 2. Single-channel frames with `HistEq` keep their top 8 bits and are
//!    histogram-equalized, the darkest occupied level going to 0.
//! 3. Everything else gets a min-max stretch over all samples.
//!
//! A zero-range input (every sample equal) maps to all zeros on every path.

use image::GrayImage;
use imageproc::stats::cumulative_histogram;
use tracing::{debug, warn};

use crate::image_pipeline::normalize::types::{
    ImageClassification, NormalizationConfig, NormalizationMethod, Normalized8BitImage,
};
use crate::image_pipeline::tiff::types::RawImage;

/// The transform applied to one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationPath {
    DepthClipInvert,
    HistogramEqualization,
    MinMax,
}

impl NormalizationPath {
    pub fn select(
        classification: ImageClassification,
        method: NormalizationMethod,
        channels: usize,
    ) -> Self {
        match (classification, method, channels) {
            (ImageClassification::Depth, _, _) => NormalizationPath::DepthClipInvert,
            (_, NormalizationMethod::HistEq, 1) => NormalizationPath::HistogramEqualization,
            _ => NormalizationPath::MinMax,
        }
    }
}

pub fn normalize(
    image: &RawImage,
    classification: ImageClassification,
    config: &NormalizationConfig,
) -> Normalized8BitImage {
    let path = NormalizationPath::select(classification, config.method, image.channels);
    debug!(?classification, ?path, "Normalizing {}x{}x{}", image.width, image.height, image.channels);

    let data = match path {
        NormalizationPath::DepthClipInvert => {
            depth_clip_invert(&image.data, config.depth_clip_min, config.depth_clip_max)
        }
        NormalizationPath::HistogramEqualization => histogram_equalize(image),
        NormalizationPath::MinMax => {
            let widened: Vec<i64> = image.data.iter().map(|&v| i64::from(v)).collect();
            min_max_stretch(&widened)
        }
    };

    Normalized8BitImage {
        width: image.width,
        height: image.height,
        channels: image.channels,
        data,
    }
}

fn depth_clip_invert(samples: &[u16], clip_min: i32, clip_max: i32) -> Vec<u8> {
    let lo = i64::from(clip_min);
    let hi = i64::from(clip_max);

    // max/min rather than clamp: a reversed range must degrade, not panic
    let inverted: Vec<i64> = samples
        .iter()
        .map(|&raw| hi - i64::from(raw).max(lo).min(hi))
        .collect();
    let stretched = min_max_stretch(&inverted);

    samples
        .iter()
        .zip(stretched)
        .map(|(&raw, value)| {
            let raw = i64::from(raw);
            if lo <= raw && raw <= hi { value } else { 0 }
        })
        .collect()
}

fn histogram_equalize(image: &RawImage) -> Vec<u8> {
    let top_bits: Vec<u8> = image.data.iter().map(|&v| (v / 256) as u8).collect();

    match GrayImage::from_raw(image.width as u32, image.height as u32, top_bits) {
        Some(gray) => {
            let lut = equalization_lut(&cumulative_histogram(&gray).channels[0]);
            gray.into_raw().into_iter().map(|v| lut[v as usize]).collect()
        }
        None => {
            warn!("Histogram equalization needs a {}x{} frame, falling back to min-max", image.width, image.height);
            let widened: Vec<i64> = image.data.iter().map(|&v| i64::from(v)).collect();
            min_max_stretch(&widened)
        }
    }
}

/// `round((cdf[v] - cdf_min) * 255 / (total - cdf_min))`: the darkest occupied
/// bin lands on 0, the brightest on 255. A single occupied bin maps to 0.
fn equalization_lut(cdf: &[u32; 256]) -> [u8; 256] {
    let mut lut = [0u8; 256];
    let total = cdf[255];
    let Some(&cdf_min) = cdf.iter().find(|&&count| count > 0) else {
        return lut;
    };
    if cdf_min == total {
        return lut;
    }

    let scale = 255.0 / f64::from(total - cdf_min);
    for (entry, &count) in lut.iter_mut().zip(cdf) {
        if count >= cdf_min {
            *entry = (f64::from(count - cdf_min) * scale).round() as u8;
        }
    }
    lut
}

/// Maps the smallest value to 0 and the largest to 255, rounding to nearest.
fn min_max_stretch(values: &[i64]) -> Vec<u8> {
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Vec::new();
    };
    if min == max {
        return vec![0; values.len()];
    }

    let scale = 255.0 / (max - min) as f64;
    values
        .iter()
        .map(|&v| ((v - min) as f64 * scale).round() as u8)
        .collect()
}

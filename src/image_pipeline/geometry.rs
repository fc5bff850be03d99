//! Resize and rotation applied after normalization.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Clockwise quarter-turn rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Deg90,
    Deg180,
    Deg270,
}

impl TryFrom<u32> for Rotation {
    type Error = ConversionError;

    fn try_from(degrees: u32) -> Result<Self> {
        match degrees {
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(ConversionError::InvalidConfig(format!(
                "rotation angle must be 90, 180 or 270, got {}",
                other
            ))),
        }
    }
}

impl Rotation {
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

/// `round(width * scale) x round(height * scale)`, never below 1x1.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let scale_one = |v: u32| ((v as f64 * scale).round() as u32).max(1);
    (scale_one(width), scale_one(height))
}

/// Area averaging when shrinking, bilinear when enlarging. A factor of
/// exactly 1.0 returns the image untouched.
pub fn resize(image: DynamicImage, scale: f64) -> DynamicImage {
    if scale == 1.0 {
        return image;
    }
    let (width, height) = scaled_dimensions(image.width(), image.height(), scale);
    debug!(
        from_w = image.width(),
        from_h = image.height(),
        width,
        height,
        "Resizing"
    );

    if scale < 1.0 {
        image.thumbnail_exact(width, height)
    } else {
        image.resize_exact(width, height, FilterType::Triangle)
    }
}

pub fn rotate(image: DynamicImage, rotation: Rotation) -> DynamicImage {
    debug!(degrees = rotation.degrees(), "Rotating");
    match rotation {
        Rotation::Deg90 => image.rotate90(),
        Rotation::Deg180 => image.rotate180(),
        Rotation::Deg270 => image.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, GrayImage, Luma};

    fn sample(width: u32, height: u32) -> DynamicImage {
        let gray = GrayImage::from_fn(width, height, |x, y| Luma([(x * 17 + y * 31) as u8]));
        DynamicImage::ImageLuma8(gray)
    }

    #[test]
    fn test_rotation_angles() {
        assert_eq!(Rotation::try_from(90u32).unwrap(), Rotation::Deg90);
        assert_eq!(Rotation::try_from(270u32).unwrap().degrees(), 270);
        assert!(matches!(Rotation::try_from(45u32), Err(ConversionError::InvalidConfig(_))));
        assert!(Rotation::try_from(0u32).is_err());
    }

    #[test]
    fn test_half_turn_twice_is_identity() {
        let original = sample(5, 3);
        let turned = rotate(rotate(original.clone(), Rotation::Deg180), Rotation::Deg180);
        assert_eq!(turned, original);
    }

    #[test]
    fn test_quarter_turn_four_times_is_identity() {
        let original = sample(5, 3);
        let mut turned = original.clone();
        for _ in 0..4 {
            turned = rotate(turned, Rotation::Deg90);
        }
        assert_eq!(turned, original);
    }

    #[test]
    fn test_quarter_turn_is_clockwise() {
        let original = sample(5, 3);
        let turned = rotate(original.clone(), Rotation::Deg90).to_luma8();
        let source = original.to_luma8();

        assert_eq!(turned.dimensions(), (3, 5));
        // top-left of the source ends up top-right
        assert_eq!(turned.get_pixel(2, 0), source.get_pixel(0, 0));

        let back = rotate(rotate(original.clone(), Rotation::Deg90), Rotation::Deg270);
        assert_eq!(back, original);
    }

    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(scaled_dimensions(640, 480, 0.5), (320, 240));
        assert_eq!(scaled_dimensions(5, 3, 0.5), (3, 2));
        assert_eq!(scaled_dimensions(4, 4, 0.01), (1, 1));
        assert_eq!(scaled_dimensions(10, 20, 1.5), (15, 30));
    }

    #[test]
    fn test_resize() {
        assert_eq!(resize(sample(8, 6), 0.5).dimensions(), (4, 3));
        assert_eq!(resize(sample(8, 6), 2.0).dimensions(), (16, 12));
        assert_eq!(resize(sample(8, 6), 1.0), sample(8, 6));
    }
}

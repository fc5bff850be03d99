use image::DynamicImage;
use tracing::{info, instrument};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    geometry::{self, Rotation},
    jpeg::{ConversionConfig, JpegWriter, StandardJpegWriter},
    normalize::{self, FilenameClassifier, ImageClassification, ImageClassifier},
    tiff::{StandardTiffReader, TiffImageReader},
};

pub struct TiffToJpegPipeline<R: TiffImageReader, W: JpegWriter, C: ImageClassifier> {
    reader: R,
    writer: W,
    classifier: C,
    config: ConversionConfig,
    rotation: Option<Rotation>,
}

impl TiffToJpegPipeline<StandardTiffReader, StandardJpegWriter, FilenameClassifier> {
    pub fn new(config: ConversionConfig) -> Result<Self> {
        Self::with_custom(StandardTiffReader, StandardJpegWriter, FilenameClassifier, config)
    }
}

impl<R: TiffImageReader, W: JpegWriter, C: ImageClassifier> TiffToJpegPipeline<R, W, C> {
    pub fn with_custom(reader: R, writer: W, classifier: C, config: ConversionConfig) -> Result<Self> {
        config.validate()?;
        let rotation = config.rotation()?;
        Ok(Self {
            reader,
            writer,
            classifier,
            config,
            rotation,
        })
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    pub fn classify(&self, file_name: &str) -> ImageClassification {
        self.classifier.classify(file_name)
    }

    /// Decode, normalize, resize and rotate; everything short of encoding.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn render(&self, input_data: &[u8], classification: ImageClassification) -> Result<DynamicImage> {
        let raw_image = {
            let _span = tracing::info_span!("decode_tiff").entered();
            self.reader.read_tiff(input_data)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = raw_image.width,
                height = raw_image.height
            ).entered();
            self.validate_dimensions(raw_image.width, raw_image.height)?;
        }

        let normalized = {
            let _span = tracing::info_span!("normalize").entered();
            normalize::normalize(&raw_image, classification, &self.config.normalization)
        };

        let mut image = normalized.into_dynamic()?;

        {
            let _span = tracing::info_span!("transform").entered();
            image = geometry::resize(image, self.config.scale_factor);
            if let Some(rotation) = self.rotation {
                image = geometry::rotate(image, rotation);
            }
        }

        Ok(image)
    }

    pub fn convert(
        &self,
        input_data: &[u8],
        classification: ImageClassification,
        output: &mut dyn Write,
    ) -> Result<()> {
        info!("Starting TIFF to JPEG conversion");

        let image = self.render(input_data, classification)?;

        {
            let _span = tracing::info_span!("encode_jpeg").entered();
            self.writer.write_jpeg(&image, output, &self.config)?;
        }

        info!(
            width = image.width(),
            height = image.height(),
            "Conversion complete"
        );
        Ok(())
    }

    /// Converts one file, classifying it by its file name.
    ///
    /// Nothing is written unless decoding and encoding both succeed, so a
    /// corrupt input never leaves an empty JPEG behind.
    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        let file_name = input_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let classification = self.classify(&file_name);

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            ?classification,
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let mut encoded = Vec::new();
        self.convert(&input_data, classification, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            std::fs::write(output_path, &encoded).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(())
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }
}

use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use image::DynamicImage;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversions::{BatchConverter, TiffToJpegPipeline, is_tiff_path, output_path_for};
use crate::image_pipeline::jpeg::{ConversionConfig, JpegWriter};
use crate::image_pipeline::normalize::{FilenameClassifier, ImageClassification, NormalizationMethod};
use crate::image_pipeline::tiff::{RawImage, TiffImageReader};

struct MockReader {
    should_fail: bool,
    mock_data: Option<RawImage>,
}

impl TiffImageReader for MockReader {
    fn read_tiff(&self, data: &[u8]) -> Result<RawImage> {
        if self.should_fail || data.starts_with(b"corrupt") {
            return Err(ConversionError::DecodeError("Mock decode error".to_string()));
        }
        Ok(self.mock_data.clone().unwrap_or_else(|| {
            let samples = (0..100 * 80).map(|i| (i % 4096) as u16).collect();
            RawImage::gray(100, 80, samples).unwrap()
        }))
    }
}

struct MockWriter {
    should_fail: bool,
    written_data: Arc<Mutex<Vec<DynamicImage>>>,
}

impl JpegWriter for MockWriter {
    fn write_jpeg(&self, image: &DynamicImage, output: &mut dyn Write, _config: &ConversionConfig) -> Result<()> {
        if self.should_fail {
            return Err(ConversionError::EncodeError("Mock encode error".to_string()));
        }
        self.written_data.lock().unwrap().push(image.clone());
        output.write_all(b"jpeg")?;
        Ok(())
    }
}

fn mock_pipeline(
    reader: MockReader,
    config: ConversionConfig,
) -> (TiffToJpegPipeline<MockReader, MockWriter, FilenameClassifier>, Arc<Mutex<Vec<DynamicImage>>>) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockWriter { should_fail: false, written_data: written.clone() };
    let pipeline = TiffToJpegPipeline::with_custom(reader, writer, FilenameClassifier, config).unwrap();
    (pipeline, written)
}

#[test]
fn test_successful_conversion() {
    let reader = MockReader { should_fail: false, mock_data: None };
    let (pipeline, written) = mock_pipeline(reader, ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake tiff data", ImageClassification::Generic, &mut output);

    assert!(result.is_ok());
    assert_eq!(output.into_inner(), b"jpeg");
    let written = written.lock().unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!((written[0].width(), written[0].height()), (100, 80));
}

#[test]
fn test_reader_failure() {
    let reader = MockReader { should_fail: true, mock_data: None };
    let (pipeline, written) = mock_pipeline(reader, ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake tiff data", ImageClassification::Generic, &mut output);

    assert!(matches!(result.unwrap_err(), ConversionError::DecodeError(_)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure() {
    let reader = MockReader { should_fail: false, mock_data: None };
    let writer = MockWriter { should_fail: true, written_data: Arc::new(Mutex::new(Vec::new())) };
    let pipeline =
        TiffToJpegPipeline::with_custom(reader, writer, FilenameClassifier, ConversionConfig::default()).unwrap();

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake tiff data", ImageClassification::Generic, &mut output);

    let err = result.unwrap_err();
    assert!(matches!(err, ConversionError::EncodeError(_)));
    assert!(!err.is_input_error());
}

#[test]
fn test_invalid_config_rejected_up_front() {
    let writer = MockWriter { should_fail: false, written_data: Arc::new(Mutex::new(Vec::new())) };
    let config = ConversionConfig::builder().depth_clip(3000, 1000).build();
    let reader = MockReader { should_fail: false, mock_data: None };

    let result = TiffToJpegPipeline::with_custom(reader, writer, FilenameClassifier, config);

    assert!(matches!(result, Err(ConversionError::InvalidConfig(_))));
}

#[test]
fn test_resize_and_rotate_applied() {
    let reader = MockReader { should_fail: false, mock_data: None };
    let config = ConversionConfig::builder()
        .scale_factor(0.5)
        .rotate(true)
        .rotation_angle(90)
        .build();
    let (pipeline, _) = mock_pipeline(reader, config);

    let image = pipeline.render(b"fake tiff data", ImageClassification::Amplitude).unwrap();

    assert_eq!((image.width(), image.height()), (40, 50));
}

#[test]
fn test_depth_classification_drives_normalization() {
    let raw = RawImage::gray(4, 1, vec![500, 1000, 3000, 4000]).unwrap();
    let reader = MockReader { should_fail: false, mock_data: Some(raw) };
    let config = ConversionConfig::builder()
        .rotate(false)
        .normalization_method(NormalizationMethod::HistEq)
        .depth_clip(1000, 3000)
        .build();
    let (pipeline, _) = mock_pipeline(reader, config);

    let classification = pipeline.classify("scan_dep_01.tiff");
    let image = pipeline.render(b"fake tiff data", classification).unwrap();

    assert_eq!(classification, ImageClassification::Depth);
    assert_eq!(image.to_luma8().into_raw(), vec![0, 255, 0, 0]);
}

#[test]
fn test_injected_classifier() {
    let raw = RawImage::gray(2, 1, vec![1000, 3000]).unwrap();
    let reader = MockReader { should_fail: false, mock_data: Some(raw) };
    let writer = MockWriter { should_fail: false, written_data: Arc::new(Mutex::new(Vec::new())) };
    let config = ConversionConfig::builder().rotate(false).depth_clip(1000, 3000).build();
    let everything_is_depth = |_: &str| ImageClassification::Depth;

    let pipeline = TiffToJpegPipeline::with_custom(reader, writer, everything_is_depth, config).unwrap();

    assert_eq!(pipeline.classify("scan_raw.tiff"), ImageClassification::Depth);
}

#[test]
fn test_zero_dimensions_rejected() {
    struct EmptyReader;
    impl TiffImageReader for EmptyReader {
        fn read_tiff(&self, _data: &[u8]) -> Result<RawImage> {
            Ok(RawImage { width: 0, height: 5, channels: 1, data: Vec::new() })
        }
    }
    let writer = MockWriter { should_fail: false, written_data: Arc::new(Mutex::new(Vec::new())) };
    let pipeline =
        TiffToJpegPipeline::with_custom(EmptyReader, writer, FilenameClassifier, ConversionConfig::default()).unwrap();

    let result = pipeline.render(b"", ImageClassification::Generic);

    assert!(matches!(result, Err(ConversionError::InvalidDimensions(0, 5))));
}

#[test]
fn test_tiff_extension_filter() {
    use std::path::Path;

    assert!(is_tiff_path(Path::new("a/scan_dep_01.tiff")));
    assert!(is_tiff_path(Path::new("SCAN.TIF")));
    assert!(!is_tiff_path(Path::new("scan.tiff.bak")));
    assert!(!is_tiff_path(Path::new("scan.jpg")));
    assert!(!is_tiff_path(Path::new("tiff")));
}

#[test]
fn test_output_path() {
    use std::path::Path;

    assert_eq!(
        output_path_for(Path::new("in/scan_amp_01.TIFF"), Path::new("out")),
        Path::new("out/scan_amp_01.jpg")
    );
}

#[test]
fn test_batch_skips_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    std::fs::create_dir(&input_dir).unwrap();
    std::fs::write(input_dir.join("a_dep.tif"), b"fine").unwrap();
    std::fs::write(input_dir.join("b_corrupt.tiff"), b"corrupt").unwrap();
    std::fs::write(input_dir.join("c_amp.TIF"), b"fine").unwrap();
    std::fs::write(input_dir.join("notes.txt"), b"ignored").unwrap();

    let reader = MockReader { should_fail: false, mock_data: None };
    let (pipeline, written) = mock_pipeline(reader, ConversionConfig::default());
    let batch = BatchConverter::with_pipeline(pipeline);

    let summary = batch.run(&input_dir, &output_dir).unwrap();

    assert_eq!(summary.attempted(), 3);
    assert_eq!(summary.converted, vec![output_dir.join("a_dep.jpg"), output_dir.join("c_amp.jpg")]);
    assert_eq!(summary.skipped.len(), 1);
    assert!(summary.failed.is_empty());
    assert_eq!(written.lock().unwrap().len(), 2);
    assert!(!output_dir.join("b_corrupt.jpg").exists());
}

#[test]
fn test_batch_missing_input_dir() {
    let dir = tempfile::tempdir().unwrap();
    let reader = MockReader { should_fail: false, mock_data: None };
    let (pipeline, _) = mock_pipeline(reader, ConversionConfig::default());

    let result = BatchConverter::with_pipeline(pipeline).run(dir.path().join("nope"), dir.path().join("out"));

    assert!(matches!(result, Err(ConversionError::InputReadError(_))));
}

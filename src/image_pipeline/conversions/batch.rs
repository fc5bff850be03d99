//! Directory-level driver: every `.tif`/`.tiff` in, one `.jpg` out per file.
//!
//! A file that cannot be read or decoded is skipped with a warning; a file
//! that cannot be encoded or written is logged and counted as failed. Neither
//! stops the batch.

use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    conversions::TiffToJpegPipeline,
    jpeg::{ConversionConfig, JpegWriter, StandardJpegWriter},
    normalize::{FilenameClassifier, ImageClassifier},
    tiff::{StandardTiffReader, TiffImageReader},
};

/// What happened to each input of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Written JPEG paths
    pub converted: Vec<PathBuf>,
    /// Inputs that could not be read or decoded, with the reason
    pub skipped: Vec<(PathBuf, String)>,
    /// Inputs whose output could not be encoded or written, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn attempted(&self) -> usize {
        self.converted.len() + self.skipped.len() + self.failed.len()
    }
}

pub struct BatchConverter<R: TiffImageReader, W: JpegWriter, C: ImageClassifier> {
    pipeline: TiffToJpegPipeline<R, W, C>,
}

impl BatchConverter<StandardTiffReader, StandardJpegWriter, FilenameClassifier> {
    pub fn new(config: ConversionConfig) -> Result<Self> {
        Ok(Self::with_pipeline(TiffToJpegPipeline::new(config)?))
    }
}

impl<R: TiffImageReader, W: JpegWriter, C: ImageClassifier> BatchConverter<R, W, C> {
    pub fn with_pipeline(pipeline: TiffToJpegPipeline<R, W, C>) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &TiffToJpegPipeline<R, W, C> {
        &self.pipeline
    }

    /// Converts every TIFF directly inside `input_dir` into `output_dir`,
    /// creating it if needed and overwriting existing JPEGs of the same name.
    ///
    /// Only an unreadable input directory or an uncreatable output directory
    /// is an error; per-file problems end up in the returned summary.
    #[instrument(skip(self, input_dir, output_dir), fields(input = %input_dir.as_ref().display()))]
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(&self, input_dir: P, output_dir: Q) -> Result<BatchSummary> {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();

        std::fs::create_dir_all(output_dir).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_dir.display(), e))
        })?;

        let mut inputs: Vec<PathBuf> = std::fs::read_dir(input_dir)
            .map_err(|e| ConversionError::InputReadError(format!("{}: {}", input_dir.display(), e)))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_tiff_path(path))
            .collect();
        inputs.sort();

        let mut summary = BatchSummary::default();
        for input in inputs {
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            info!("Processing: {}", name);

            let output = output_path_for(&input, output_dir);
            match self.pipeline.convert_file(&input, &output) {
                Ok(()) => {
                    info!("Saved: {}", output.display());
                    summary.converted.push(output);
                }
                Err(e) if e.is_input_error() => {
                    warn!("Skipped: {} ({})", name, e);
                    summary.skipped.push((input, e.to_string()));
                }
                Err(e) => {
                    error!("Failed: {} ({})", name, e);
                    summary.failed.push((input, e.to_string()));
                }
            }
        }

        info!(
            converted = summary.converted.len(),
            skipped = summary.skipped.len(),
            failed = summary.failed.len(),
            "All images processed"
        );
        Ok(summary)
    }
}

/// `.tif` or `.tiff`, any case.
pub fn is_tiff_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("tiff"))
        .unwrap_or(false)
}

/// `<output_dir>/<input stem>.jpg`
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut file_name = stem.to_os_string();
    file_name.push(".jpg");
    output_dir.join(file_name)
}

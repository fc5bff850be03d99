use crate::image_pipeline::normalize::types::ImageClassification;

/// Decides which kind of frame a file holds from its name.
pub trait ImageClassifier {
    fn classify(&self, file_name: &str) -> ImageClassification;
}

/// Substring match on the lowercased file name: "dep" is depth, "amp" is
/// amplitude, anything else is generic. A name containing both is depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilenameClassifier;

impl ImageClassifier for FilenameClassifier {
    fn classify(&self, file_name: &str) -> ImageClassification {
        let name = file_name.to_lowercase();
        if name.contains("dep") {
            ImageClassification::Depth
        } else if name.contains("amp") {
            ImageClassification::Amplitude
        } else {
            ImageClassification::Generic
        }
    }
}

impl<F> ImageClassifier for F
where
    F: Fn(&str) -> ImageClassification,
{
    fn classify(&self, file_name: &str) -> ImageClassification {
        self(file_name)
    }
}

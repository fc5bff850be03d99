use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),
    
    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),
    
    #[error("Failed to decode TIFF image: {0}")]
    DecodeError(String),
    
    #[error("Failed to encode JPEG image: {0}")]
    EncodeError(String),
    
    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),
    
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConversionError {
    /// Errors raised while getting pixels out of an input file.
    ///
    /// The batch driver skips such files and moves on; anything else is a
    /// failure on the output side.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ConversionError::InputReadError(_)
                | ConversionError::DecodeError(_)
                | ConversionError::InvalidDimensions(_, _)
                | ConversionError::UnsupportedFormat(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;

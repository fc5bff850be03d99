use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::tiff::types::RawImage;

pub trait TiffImageReader {
    fn read_tiff(&self, data: &[u8]) -> Result<RawImage>;
}

// optipix/src/processors/mod.rs
//! Codec collaborator: probing, orientation, resampling and encoding.
//!
//! The rest of the crate only talks to the [`Codec`] trait. [`ImageCodec`]
//! is the production implementation on top of the `image` crate family.

mod compressor;
mod loader;
mod metadata;
mod resizer;

pub use compressor::{Compressor, EncodeParams};
pub use loader::Loader;
pub use metadata::MetadataProcessor;
pub use resizer::{Resizer, MAX_WORKING_DIMENSION};

use crate::core::{Dimensions, ImageInfo, ResizeMode, Result};
use crate::utils::image_format_to_string;
use image::metadata::Orientation;
use image::ImageFormat;
use std::time::Duration;

/// Handle on a probed, not yet pixel-decoded, input.
#[derive(Debug, Clone)]
pub struct DecodedImage<'a> {
    data: &'a [u8],
    format: ImageFormat,
    dimensions: Dimensions,
    orientation: Option<Orientation>,
    duration: Option<Duration>,
}

impl<'a> DecodedImage<'a> {
    pub fn new(data: &'a [u8], format: ImageFormat, dimensions: Dimensions) -> Self {
        Self {
            data,
            format,
            dimensions,
            orientation: None,
            duration: None,
        }
    }

    pub fn with_orientation(mut self, orientation: Option<Orientation>) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_duration(mut self, duration: Option<Duration>) -> Self {
        self.duration = duration;
        self
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Display dimensions, after EXIF orientation is taken into account.
    pub fn header(&self) -> Dimensions {
        self.dimensions
    }

    pub fn description(&self) -> String {
        image_format_to_string(self.format)
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            dimensions: self.header(),
            format: self.description(),
            duration: self.duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOptions {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub mode: ResizeMode,
    pub normalize_orientation: bool,
    pub encode: EncodeParams,
}

pub trait Codec {
    /// Probes `data`: magic bytes first, then the header.
    fn decode<'a>(&self, data: &'a [u8]) -> Result<DecodedImage<'a>>;

    /// Decodes pixels, resizes and re-encodes.
    fn transform(&self, image: &DecodedImage<'_>, options: &TransformOptions) -> Result<Vec<u8>>;
}

#[derive(Default)]
pub struct ImageCodec {
    loader: Loader,
    metadata: MetadataProcessor,
    resizer: Resizer,
    compressor: Compressor,
}

impl ImageCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_dimension(mut self, max: u32) -> Self {
        self.resizer = self.resizer.with_max_dimension(max);
        self
    }
}

impl Codec for ImageCodec {
    fn decode<'a>(&self, data: &'a [u8]) -> Result<DecodedImage<'a>> {
        let format = self.loader.detect_format(data)?;
        let stored = self.loader.read_dimensions(data, format)?;
        let orientation = self.metadata.orientation(data);

        let dimensions = match orientation {
            Some(o) if MetadataProcessor::swaps_axes(o) => Dimensions::new(stored.height, stored.width),
            _ => stored,
        };

        Ok(DecodedImage::new(data, format, dimensions)
            .with_orientation(orientation)
            .with_duration(self.loader.duration(data, format)))
    }

    fn transform(&self, image: &DecodedImage<'_>, options: &TransformOptions) -> Result<Vec<u8>> {
        self.resizer.check_target(options.width, options.height)?;

        let mut pixels = self.loader.load(image.data(), image.format())?;
        if options.normalize_orientation {
            if let Some(orientation) = image.orientation() {
                log::debug!("Applying EXIF orientation {:?}", orientation);
                pixels.apply_orientation(orientation);
            }
        }

        let resized = self
            .resizer
            .resize(pixels, options.width, options.height, options.mode)?;

        self.compressor
            .encode(&resized, options.format, options.encode)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptiError;
    use image::{DynamicImage, GenericImageView, RgbImage};
    use std::io::Cursor;

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    fn options(width: u32, height: u32, mode: ResizeMode, format: ImageFormat) -> TransformOptions {
        TransformOptions {
            format,
            width,
            height,
            mode,
            normalize_orientation: true,
            encode: EncodeParams::Default,
        }
    }

    #[test]
    fn decode_probes_header() {
        let data = encoded(64, 48, ImageFormat::Png);
        let decoded = ImageCodec::new().decode(&data).unwrap();
        assert_eq!(decoded.header(), Dimensions::new(64, 48));
        assert_eq!(decoded.description(), "PNG");
        assert_eq!(decoded.duration(), None);
    }

    #[test]
    fn unknown_magic_is_decode_error() {
        let err = ImageCodec::new().decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, OptiError::Decode(_)));
    }

    #[test]
    fn truncated_header_is_header_error() {
        let data = encoded(64, 48, ImageFormat::Png);
        let err = ImageCodec::new().decode(&data[..12]).unwrap_err();
        assert!(matches!(err, OptiError::Header(_)));
    }

    #[test]
    fn fit_crops_to_exact_box() {
        let data = encoded(80, 40, ImageFormat::Png);
        let codec = ImageCodec::new();
        let decoded = codec.decode(&data).unwrap();
        let out = codec
            .transform(&decoded, &options(30, 30, ResizeMode::Fit, ImageFormat::Png))
            .unwrap();
        assert_eq!(image::load_from_memory(&out).unwrap().dimensions(), (30, 30));
    }

    #[test]
    fn transcodes_to_requested_format() {
        let data = encoded(40, 30, ImageFormat::Png);
        let codec = ImageCodec::new();
        let decoded = codec.decode(&data).unwrap();
        let out = codec
            .transform(&decoded, &options(40, 30, ResizeMode::NoResize, ImageFormat::Jpeg))
            .unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn oversized_target_fails_transform() {
        let data = encoded(16, 16, ImageFormat::Png);
        let codec = ImageCodec::new().with_max_dimension(100);
        let decoded = codec.decode(&data).unwrap();
        let err = codec
            .transform(&decoded, &options(101, 16, ResizeMode::Stretch, ImageFormat::Png))
            .unwrap_err();
        assert!(matches!(err, OptiError::Transform(_)));
    }
}

// optipix/src/processors/loader.rs
use crate::core::{Dimensions, OptiError, Result};
use image::codecs::gif::GifDecoder;
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::time::Duration;

#[derive(Clone, Default)]
pub struct Loader;

impl Loader {
    pub fn new() -> Self {
        Self
    }

    /// Identifies the container from its magic bytes.
    pub fn detect_format(&self, data: &[u8]) -> Result<ImageFormat> {
        let format = image::guess_format(data).map_err(|e| OptiError::Decode(e.to_string()))?;
        log::debug!("Detected format {:?} ({} bytes)", format, data.len());
        Ok(format)
    }

    pub fn read_dimensions(&self, data: &[u8], format: ImageFormat) -> Result<Dimensions> {
        let (width, height) = ImageReader::with_format(Cursor::new(data), format)
            .into_dimensions()
            .map_err(|e| OptiError::Header(e.to_string()))?;

        Ok(Dimensions::new(width, height))
    }

    /// Total frame delay of an animated input; `None` for stills.
    pub fn duration(&self, data: &[u8], format: ImageFormat) -> Option<Duration> {
        let total = match format {
            ImageFormat::Gif => total_delay(GifDecoder::new(Cursor::new(data)).ok()?),
            ImageFormat::WebP => {
                let decoder = WebPDecoder::new(Cursor::new(data)).ok()?;
                if !decoder.has_animation() {
                    return None;
                }
                total_delay(decoder)
            }
            _ => return None,
        };

        (!total.is_zero()).then_some(total)
    }

    pub fn load(&self, data: &[u8], format: ImageFormat) -> Result<DynamicImage> {
        let image = ImageReader::with_format(Cursor::new(data), format)
            .decode()
            .map_err(|e| OptiError::Transform(format!("failed to decode pixels: {}", e)))?;

        log::debug!(
            "Loaded image: {}x{} pixels, color: {:?}",
            image.width(),
            image.height(),
            image.color()
        );

        Ok(image)
    }
}

fn total_delay<'a, D: AnimationDecoder<'a>>(decoder: D) -> Duration {
    decoder
        .into_frames()
        .filter_map(|frame| frame.ok())
        .map(|frame| Duration::from(frame.delay()))
        .sum()
}

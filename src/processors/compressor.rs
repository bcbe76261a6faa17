// optipix/src/processors/compressor.rs
use crate::core::{OptiError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat};
use oxipng::{optimize_from_memory, Options};
use std::io::Cursor;

pub const JPEG_QUALITY: u8 = 85;
pub const PNG_COMPRESSION: u8 = 7;
pub const WEBP_QUALITY: u8 = 85;

/// Quality used when JPEG output has no tuned parameters.
const JPEG_CODEC_DEFAULT_QUALITY: u8 = 75;

/// Per-format encoder settings, chosen from the output extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeParams {
    Jpeg { quality: u8 },
    /// zlib-style level, 0 (fastest) to 9 (smallest).
    Png { compression: u8 },
    WebP { quality: u8 },
    Default,
}

impl EncodeParams {
    pub fn for_extension(extension: &str) -> Self {
        match extension.trim_start_matches('.').to_lowercase().as_str() {
            "jpeg" | "jpg" => EncodeParams::Jpeg { quality: JPEG_QUALITY },
            "png" => EncodeParams::Png { compression: PNG_COMPRESSION },
            "webp" => EncodeParams::WebP { quality: WEBP_QUALITY },
            _ => EncodeParams::Default,
        }
    }
}

/// Maps a 0-9 compression level onto oxipng's 0-6 preset range.
pub fn png_preset(compression: u8) -> u8 {
    compression.min(9) * 6 / 9
}

#[derive(Default)]
pub struct Compressor;

impl Compressor {
    pub fn new() -> Self {
        Self
    }

    pub fn encode(
        &self,
        image: &DynamicImage,
        format: ImageFormat,
        params: EncodeParams,
    ) -> Result<Vec<u8>> {
        log::debug!("Encoding {:?} with {:?}", format, params);

        let data = match (format, params) {
            (ImageFormat::Jpeg, EncodeParams::Jpeg { quality }) => self.encode_jpeg(image, quality)?,
            (ImageFormat::Jpeg, _) => self.encode_jpeg(image, JPEG_CODEC_DEFAULT_QUALITY)?,
            (ImageFormat::Png, EncodeParams::Png { compression }) => {
                self.encode_png(image, compression)?
            }
            (ImageFormat::WebP, EncodeParams::WebP { quality }) => self.encode_webp(image, quality)?,
            _ => self.encode_generic(image, format)?,
        };

        log::debug!("Encoded {} bytes", data.len());
        Ok(data)
    }

    fn encode_jpeg(&self, image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
        let rgb = image.to_rgb8();
        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
            .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
            .map_err(|e| OptiError::Transform(format!("JPEG encoding failed: {}", e)))?;
        Ok(buffer)
    }

    fn encode_png(&self, image: &DynamicImage, compression: u8) -> Result<Vec<u8>> {
        let plain = self.encode_generic(image, ImageFormat::Png)?;
        optimize_from_memory(&plain, &Options::from_preset(png_preset(compression)))
            .map_err(|e| OptiError::Transform(format!("PNG optimization failed: {}", e)))
    }

    fn encode_webp(&self, image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
        let quality = f32::from(quality.min(100));
        let encoded = if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
                .encode_simple(false, quality)
                .map(|memory| memory.to_vec())
        } else {
            let rgb = image.to_rgb8();
            webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height())
                .encode_simple(false, quality)
                .map(|memory| memory.to_vec())
        };

        encoded.map_err(|e| OptiError::Transform(format!("WebP encoding failed: {:?}", e)))
    }

    fn encode_generic(&self, image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, format)
            .map_err(|e| OptiError::Transform(format!("{:?} encoding failed: {}", format, e)))?;
        Ok(buffer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x * 8) as u8, (y * 8) as u8, 64, 255])
        }))
    }

    #[test]
    fn params_follow_extension() {
        assert_eq!(EncodeParams::for_extension(".jpeg"), EncodeParams::Jpeg { quality: 85 });
        assert_eq!(EncodeParams::for_extension("JPG"), EncodeParams::Jpeg { quality: 85 });
        assert_eq!(EncodeParams::for_extension("png"), EncodeParams::Png { compression: 7 });
        assert_eq!(EncodeParams::for_extension("webp"), EncodeParams::WebP { quality: 85 });
        assert_eq!(EncodeParams::for_extension("gif"), EncodeParams::Default);
    }

    #[test]
    fn png_levels_map_to_presets() {
        assert_eq!(png_preset(0), 0);
        assert_eq!(png_preset(7), 4);
        assert_eq!(png_preset(9), 6);
        assert_eq!(png_preset(200), 6);
    }

    #[test]
    fn each_tuned_format_round_trips_dimensions() {
        let compressor = Compressor::new();
        let image = gradient(24, 16);
        for (format, ext) in [
            (ImageFormat::Jpeg, "jpeg"),
            (ImageFormat::Png, "png"),
            (ImageFormat::WebP, "webp"),
        ] {
            let data = compressor
                .encode(&image, format, EncodeParams::for_extension(ext))
                .unwrap();
            assert_eq!(image::guess_format(&data).unwrap(), format);
            let decoded = image::load_from_memory(&data).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (24, 16));
        }
    }

    #[test]
    fn jpeg_accepts_alpha_input_without_params() {
        let data = Compressor::new()
            .encode(&gradient(8, 8), ImageFormat::Jpeg, EncodeParams::Default)
            .unwrap();
        assert_eq!(image::guess_format(&data).unwrap(), ImageFormat::Jpeg);
    }
}

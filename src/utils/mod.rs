// optipix/src/utils/mod.rs
use std::path::Path;

/// Renders a byte count with a 1024 divisor and one decimal place.
///
/// Plain bytes carry a `B` suffix (`"512.0B"`); scaled values carry the unit
/// letter only (`"1.5K"`, `"3.2M"`).
pub fn humanize(bytes: u64) -> String {
    const FACTOR: f64 = 1024.0;
    const UNITS: [&str; 8] = ["B", "K", "M", "G", "T", "P", "E", "Z"];

    let mut num = bytes as f64;
    for unit in UNITS {
        if num < FACTOR {
            return format!("{:3.1}{}", num, unit);
        }
        num /= FACTOR;
    }

    format!("{:.1}Y", num)
}

/// Lower-cased extension of `path`, without the dot.
pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

pub fn image_format_to_string(format: image::ImageFormat) -> String {
    match format {
        image::ImageFormat::Jpeg => "JPEG",
        image::ImageFormat::Png => "PNG",
        image::ImageFormat::Gif => "GIF",
        image::ImageFormat::WebP => "WEBP",
        image::ImageFormat::Tiff => "TIFF",
        image::ImageFormat::Bmp => "BMP",
        _ => "Unknown",
    }
    .to_string()
}

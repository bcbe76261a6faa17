// optipix/src/processors/metadata.rs
use exif::{In, Reader, Tag};
use image::metadata::Orientation;
use std::io::Cursor;

#[derive(Default)]
pub struct MetadataProcessor;

impl MetadataProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Reads the EXIF orientation tag. Missing or unreadable EXIF yields `None`.
    pub fn orientation(&self, data: &[u8]) -> Option<Orientation> {
        let exif = match Reader::new().read_from_container(&mut Cursor::new(data)) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) => {
                log::debug!("No EXIF data found");
                return None;
            }
            Err(e) => {
                log::debug!("Skipping EXIF: {}", e);
                return None;
            }
        };

        let value = exif
            .get_field(Tag::Orientation, In::PRIMARY)?
            .value
            .get_uint(0)?;

        let orientation = u8::try_from(value).ok().and_then(Orientation::from_exif);
        if orientation.is_none() {
            log::warn!("Ignoring invalid EXIF orientation {}", value);
        }
        orientation
    }

    /// Whether applying `orientation` exchanges width and height.
    pub fn swaps_axes(orientation: Orientation) -> bool {
        matches!(
            orientation,
            Orientation::Rotate90
                | Orientation::Rotate270
                | Orientation::Rotate90FlipH
                | Orientation::Rotate270FlipH
        )
    }
}

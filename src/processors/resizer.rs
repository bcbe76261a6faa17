// optipix/src/processors/resizer.rs
use crate::core::{OptiError, ResizeMode, Result};
use image::{imageops::FilterType, DynamicImage};

/// Largest width or height the resizer will produce.
pub const MAX_WORKING_DIMENSION: u32 = 8192;

pub struct Resizer {
    filter: FilterType,
    max_dimension: u32,
}

impl Resizer {
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
            max_dimension: MAX_WORKING_DIMENSION,
        }
    }

    pub fn with_max_dimension(mut self, max: u32) -> Self {
        self.max_dimension = max;
        self
    }

    pub fn check_target(&self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(OptiError::Transform(format!(
                "invalid target dimensions {}x{}",
                width, height
            )));
        }

        if width > self.max_dimension || height > self.max_dimension {
            return Err(OptiError::Transform(format!(
                "target dimensions {}x{} exceed maximum working size {}",
                width, height, self.max_dimension
            )));
        }

        Ok(())
    }

    pub fn resize(
        &self,
        image: DynamicImage,
        width: u32,
        height: u32,
        mode: ResizeMode,
    ) -> Result<DynamicImage> {
        self.check_target(width, height)?;

        if mode == ResizeMode::NoResize {
            log::debug!("Image dimensions unchanged, skipping resize");
            return Ok(image);
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{} ({:?})",
            image.width(),
            image.height(),
            width,
            height,
            mode
        );

        Ok(match mode {
            ResizeMode::Fit => image.resize_to_fill(width, height, self.filter),
            _ => image.resize_exact(width, height, self.filter),
        })
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stretch_ignores_aspect() {
        let out = Resizer::new()
            .resize(DynamicImage::new_rgb8(100, 50), 20, 40, ResizeMode::Stretch)
            .unwrap();
        assert_eq!((out.width(), out.height()), (20, 40));
    }

    #[test]
    fn fit_fills_then_crops() {
        let out = Resizer::new()
            .resize(DynamicImage::new_rgb8(100, 50), 40, 40, ResizeMode::Fit)
            .unwrap();
        assert_eq!((out.width(), out.height()), (40, 40));
    }

    #[test]
    fn no_resize_passes_through() {
        let out = Resizer::new()
            .resize(DynamicImage::new_rgb8(7, 5), 7, 5, ResizeMode::NoResize)
            .unwrap();
        assert_eq!((out.width(), out.height()), (7, 5));
    }

    #[test]
    fn zero_and_oversized_targets_are_rejected() {
        let resizer = Resizer::new();
        assert!(resizer.check_target(0, 10).is_err());
        assert!(resizer.check_target(MAX_WORKING_DIMENSION + 1, 10).is_err());
        assert!(resizer.check_target(MAX_WORKING_DIMENSION, MAX_WORKING_DIMENSION).is_ok());
    }
}

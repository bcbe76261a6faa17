// optipix/src/core/processor.rs
use super::output;
use super::report::{Notices, Report};
use super::resolver::{self, Target};
use super::{Config, ImageInfo, OptiError, Result};
use crate::processors::{Codec, DecodedImage, EncodeParams, ImageCodec, TransformOptions};
use crate::utils::get_file_extension;
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a finished run knows, for printing.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub info: ImageInfo,
    pub target: Target,
    pub output_path: PathBuf,
    pub report: Report,
    pub notices: Notices,
}

pub struct ImageProcessor<C = ImageCodec> {
    config: Config,
    codec: C,
}

impl ImageProcessor<ImageCodec> {
    pub fn new(config: Config) -> Self {
        Self::with_codec(config, ImageCodec::new())
    }
}

impl<C: Codec> ImageProcessor<C> {
    pub fn with_codec(config: Config, codec: C) -> Self {
        Self { config, codec }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs read, probe, resolve, guard, transform and write for one file.
    ///
    /// In dry-run mode the destination is neither checked nor touched.
    pub fn process(&self) -> Result<Outcome> {
        let config = &self.config;

        let input = fs::read(&config.input).map_err(|source| OptiError::InputRead {
            path: config.input.clone(),
            source,
        })?;
        log::debug!("Input buf size: {}", input.len());

        let decoded = self.codec.decode(&input)?;
        let info = decoded.info();

        let target = resolver::resolve(info.dimensions, config);
        let output_path = output::resolve_output_path(&config.input, config.output.as_deref());

        let destination = if config.dry_run {
            None
        } else {
            Some(output::validate(&output_path, config.force)?)
        };

        let options = transform_options(&output_path, &decoded, &target);
        let encoded = self.codec.transform(&decoded, &options)?;
        log::debug!("Output buf size: {}", encoded.len());

        if !config.dry_run {
            fs::write(&output_path, &encoded).map_err(|source| OptiError::OutputWrite {
                path: output_path.clone(),
                source,
            })?;
            log::info!("Saved image: {} ({} bytes)", output_path.display(), encoded.len());
        }

        let report = Report {
            input_path: config.input.clone(),
            output_path: output_path.clone(),
            before: info.dimensions,
            after: target.dimensions,
            input_size: input.len() as u64,
            output_size: encoded.len() as u64,
        };

        let notices = Notices {
            dry_run: config.dry_run,
            duration: info.duration,
            rule: target.rule,
            destination,
        };

        Ok(Outcome {
            info,
            target,
            output_path,
            report,
            notices,
        })
    }
}

/// Builds codec options: the output extension picks the format and its
/// encoder settings, falling back to the input format when unrecognised.
pub fn transform_options(
    output_path: &Path,
    image: &DecodedImage<'_>,
    target: &Target,
) -> TransformOptions {
    let extension = get_file_extension(output_path);

    let format = extension
        .as_deref()
        .and_then(ImageFormat::from_extension)
        .unwrap_or_else(|| image.format());

    let encode = extension
        .as_deref()
        .map(EncodeParams::for_extension)
        .unwrap_or(EncodeParams::Default);

    TransformOptions {
        format,
        width: target.dimensions.width,
        height: target.dimensions.height,
        mode: target.mode,
        normalize_orientation: true,
        encode,
    }
}

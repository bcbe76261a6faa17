mod cli;
pub mod core;
pub mod processors;
pub mod utils;

pub use crate::cli::{normalize_args, Cli};
pub use crate::core::output::{resolve_output_path, validate, Destination};
pub use crate::core::processor::{transform_options, ImageProcessor, Outcome};
pub use crate::core::report::{Notices, Report};
pub use crate::core::resolver::{resolve, resolve_axis, Scale, ScaleRule, Target};
pub use crate::core::{Config, Dimensions, ImageInfo, OptiError, ResizeMode, Result};
pub use crate::processors::{
    Codec, Compressor, DecodedImage, EncodeParams, ImageCodec, Loader, MetadataProcessor, Resizer,
    TransformOptions, MAX_WORKING_DIMENSION,
};
pub use crate::utils::humanize;

pub mod prelude {
    pub use crate::{Codec, Config, ImageCodec, ImageProcessor, ResizeMode};
}

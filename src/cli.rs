// optipix/src/cli.rs
use crate::core::Config;
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "optipix",
    version,
    about = "Resize and transcode an image for web delivery",
    disable_help_flag = true
)]
pub struct Cli {
    /// name of input file to resize/transcode
    #[arg(short = 'i', long = "input", visible_alias = "i", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// name of output file, also determines output type
    #[arg(short = 'o', long = "output", visible_alias = "o", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// width of output file
    #[arg(
        short = 'w',
        long = "width",
        visible_alias = "w",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub width: i64,

    /// height of output file
    #[arg(
        short = 'h',
        long = "height",
        visible_alias = "h",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub height: i64,

    /// maximum width of output file
    #[arg(long = "mw", default_value_t = 0, allow_negative_numbers = true)]
    pub max_width: i64,

    /// maximum height of output file
    #[arg(long = "mh", default_value_t = 0, allow_negative_numbers = true)]
    pub max_height: i64,

    /// maximum length of either dimension
    #[arg(long = "max", default_value_t = 0, allow_negative_numbers = true)]
    pub max_longest: i64,

    /// minimum length of shortest side
    #[arg(long = "min", default_value_t = 0, allow_negative_numbers = true)]
    pub min_shortest: i64,

    /// resize to pct of original dimensions
    #[arg(long = "pct", default_value_t = 0.0, allow_negative_numbers = true)]
    pub pct: f64,

    /// perform stretching resize instead of cropping
    #[arg(long = "stretch")]
    pub stretch: bool,

    /// overwrite output file if it exists
    #[arg(short = 'f', long = "force", visible_alias = "f")]
    pub force: bool,

    /// print debug messages to console
    #[arg(short = 'd', long = "debug", visible_alias = "d")]
    pub debug: bool,

    /// don't write files; just display results
    #[arg(short = 'n', long = "dry-run", visible_alias = "n")]
    pub dry_run: bool,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl Cli {
    /// Parses the process arguments, accepting single-dash long flags.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Builds the immutable config, or `None` when no input was given.
    pub fn to_config(&self) -> Option<Config> {
        let input = self.input.clone()?;

        Some(Config {
            input,
            output: self.output.clone(),
            width: positive(self.width),
            height: positive(self.height),
            max_width: positive(self.max_width),
            max_height: positive(self.max_height),
            max_longest: positive(self.max_longest),
            min_shortest: positive(self.min_shortest),
            percent: (self.pct.is_finite() && self.pct > 0.0).then_some(self.pct),
            stretch: self.stretch,
            force: self.force,
            dry_run: self.dry_run,
        })
    }
}

/// Zero and negative values mean "unset".
fn positive(value: i64) -> Option<u32> {
    if value <= 0 {
        return None;
    }
    Some(u32::try_from(value).unwrap_or(u32::MAX))
}

/// Rewrites `-name` and `-name=value` to `--name...` when `name` is longer
/// than one letter, so `-mw 100` and `-stretch` parse like `--mw 100`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = text.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }

            let name = rest.split('=').next().unwrap_or_default();
            if name.len() > 1 && name.chars().all(|c| c.is_ascii_alphabetic()) {
                OsString::from(format!("-{}", text))
            } else {
                arg
            }
        })
        .collect()
}

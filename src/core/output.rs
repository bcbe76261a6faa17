// optipix/src/core/output.rs
use super::{OptiError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const DEFAULT_SUFFIX: &str = "_opt";

/// What `validate` found at the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Fresh,
    /// An existing file was removed because of `force`.
    Replaced,
}

/// Returns `explicit` if given, else `<stem>_opt<.ext>` next to the input.
pub fn resolve_output_path(input: &Path, explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, DEFAULT_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, DEFAULT_SUFFIX),
    };

    input.with_file_name(file_name)
}

/// Makes sure `path` can receive fresh content.
///
/// Without `force` an existing path is a collision. With `force` the file is
/// removed in a single step; a file that vanished in the meantime counts as
/// fresh.
pub fn validate(path: &Path, force: bool) -> Result<Destination> {
    if !force {
        return match fs::symlink_metadata(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Destination::Fresh),
            _ => Err(OptiError::Collision(path.to_path_buf())),
        };
    }

    match fs::remove_file(path) {
        Ok(()) => {
            log::debug!("Removed existing output {}", path.display());
            Ok(Destination::Replaced)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Destination::Fresh),
        Err(source) => Err(OptiError::Removal {
            path: path.to_path_buf(),
            source,
        }),
    }
}

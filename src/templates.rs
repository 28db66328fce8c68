// ABOUTME: Bundled presentation templates
// ABOUTME: Exposes the default template bytes and lists the .pptx files shipped with the crate

use crate::errors::{Result, SlideError};
use std::path::PathBuf;

/// Directory holding the bundled `.pptx` templates.
pub const TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");

/// Path of the default template.
pub const DEFAULT_TEMPLATE_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/templates/universal.pptx");

/// The default template, compiled into the library.
pub const DEFAULT_TEMPLATE: &[u8] = include_bytes!("../templates/universal.pptx");

/// Full paths of the bundled `.pptx` files, searched recursively.
pub fn template_filepaths() -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/**/*.pptx", TEMPLATE_DIR);
    let paths = glob::glob(&pattern)
        .map_err(|e| SlideError::InvalidResourcePath(format!("Invalid glob pattern: {}", e)))?
        .flatten()
        .collect();
    Ok(paths)
}

/// File names of the bundled `.pptx` files.
pub fn template_filenames() -> Result<Vec<String>> {
    Ok(template_filepaths()?
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect())
}

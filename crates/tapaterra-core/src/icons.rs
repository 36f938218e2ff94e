// crates/tapaterra-core/src/icons.rs
#![cfg(feature = "icons")]

use crate::error::{PipelineError, Result};
use image::imageops::FilterType;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_ICON_SOURCE: &str = "../tapaterra.png";
pub const DEFAULT_ICON_DIR: &str = "Tapaterra/Assets.xcassets/AppIcon.appiconset";

/// `(file name, edge in pixels)` for every icon in the set.
pub const ICON_SIZES: [(&str, u32); 11] = [
    // iOS: single 1024 (Xcode derives the rest)
    ("icon-1024.png", 1024),
    // macOS
    ("icon-16.png", 16),
    ("icon-16@2x.png", 32),
    ("icon-32.png", 32),
    ("icon-32@2x.png", 64),
    ("icon-128.png", 128),
    ("icon-128@2x.png", 256),
    ("icon-256.png", 256),
    ("icon-256@2x.png", 512),
    ("icon-512.png", 512),
    ("icon-512@2x.png", 1024),
];

/// Resizes `source` into every entry of [`ICON_SIZES`] under `out_dir`.
///
/// Square Lanczos3 resizes written as PNG. The output directory is created if
/// missing. Any decode or write error aborts the whole run.
pub fn generate_icons(source: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    generate_icon_set(source.as_ref(), out_dir.as_ref(), &ICON_SIZES)
}

pub fn generate_icon_set(
    source: &Path,
    out_dir: &Path,
    sizes: &[(&str, u32)],
) -> Result<Vec<PathBuf>> {
    let img = image::open(source)?;
    fs::create_dir_all(out_dir).map_err(|e| PipelineError::file(out_dir, e))?;

    let mut written = Vec::with_capacity(sizes.len());
    for &(filename, size) in sizes {
        let path = out_dir.join(filename);
        let resized = img.resize_exact(size, size, FilterType::Lanczos3);
        resized.save_with_format(&path, image::ImageFormat::Png)?;
        info!("Generated: {} ({size}x{size})", path.display());
        written.push(path);
    }

    info!("Done! Generated {} icons.", written.len());
    Ok(written)
}

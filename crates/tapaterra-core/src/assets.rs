// crates/tapaterra-core/src/assets.rs

//! # Flag Importer
//!
//! Turns a `region/size/flag.png` tree into an Xcode asset catalog folder:
//!
//! ```text
//! Flags/
//!   Contents.json              (provides-namespace: true)
//!   Europe/
//!     Contents.json            (provides-namespace: false)
//!     poland.imageset/
//!       poland.png
//!       Contents.json          (one universal 1x image)
//! ```
//!
//! Region folders do not namespace, so the app refers to `Flags/poland`
//! rather than `Flags/Europe/poland`.

use crate::error::{PipelineError, Result};
use crate::text::capitalize;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};
use walkdir::WalkDir;

pub const DEFAULT_FLAGS_DIR: &str = "Tapaterra/Assets.xcassets/Flags";
pub const MANIFEST_FILE: &str = "Contents.json";
const IMAGE_EXTENSION: &str = "png";

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

/// Which of the source size variants to import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeVariant {
    #[default]
    Large,
    Medium,
    Small,
}

impl SizeVariant {
    pub fn dir_name(self) -> &'static str {
        match self {
            SizeVariant::Large => "large",
            SizeVariant::Medium => "medium",
            SizeVariant::Small => "small",
        }
    }
}

impl fmt::Display for SizeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for SizeVariant {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "large" => Ok(SizeVariant::Large),
            "medium" => Ok(SizeVariant::Medium),
            "small" => Ok(SizeVariant::Small),
            other => Err(PipelineError::InvalidData(format!(
                "unknown size variant {other:?} (expected large, medium or small)"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    pub size: SizeVariant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Destination region folder names, in import order.
    pub regions: Vec<String>,
    pub images: usize,
}

// -----------------------------------------------------------------------------
// MANIFESTS
// -----------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ManifestInfo {
    author: &'static str,
    version: u32,
}

const XCODE_INFO: ManifestInfo = ManifestInfo {
    author: "xcode",
    version: 1,
};

#[derive(Debug, Serialize)]
struct FolderProperties {
    #[serde(rename = "provides-namespace")]
    provides_namespace: bool,
}

#[derive(Debug, Serialize)]
struct FolderManifest {
    info: ManifestInfo,
    properties: FolderProperties,
}

#[derive(Debug, Serialize)]
struct ImageEntry<'a> {
    filename: &'a str,
    idiom: &'static str,
    scale: &'static str,
}

#[derive(Debug, Serialize)]
struct ImageSetManifest<'a> {
    images: Vec<ImageEntry<'a>>,
    info: ManifestInfo,
}

pub fn folder_manifest(provides_namespace: bool) -> Result<String> {
    Ok(serde_json::to_string_pretty(&FolderManifest {
        info: XCODE_INFO,
        properties: FolderProperties { provides_namespace },
    })?)
}

pub fn imageset_manifest(filename: &str) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ImageSetManifest {
        images: vec![ImageEntry {
            filename,
            idiom: "universal",
            scale: "1x",
        }],
        info: XCODE_INFO,
    })?)
}

fn write_manifest(dir: &Path, body: &str) -> Result<()> {
    let path = dir.join(MANIFEST_FILE);
    fs::write(&path, body).map_err(|e| PipelineError::file(path, e))
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| PipelineError::file(dir, e))
}

/// Immediate children of `dir` matching `keep`, sorted by file name. `keep`
/// should test through `entry.path()` so that symlinks are followed.
fn children(dir: &Path, keep: impl Fn(&walkdir::DirEntry) -> bool) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            PipelineError::file(path, e.into())
        })?;
        if keep(&entry) {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

// -----------------------------------------------------------------------------
// IMPORT
// -----------------------------------------------------------------------------

/// Rebuilds `dest_root` from `source_root`. Whatever was in the destination
/// before is deleted.
pub fn import_flags(config: &ImportConfig) -> Result<ImportReport> {
    let dest = &config.dest_root;
    if dest.exists() {
        fs::remove_dir_all(dest).map_err(|e| PipelineError::file(dest, e))?;
    }
    create_dir(dest)?;
    write_manifest(dest, &folder_manifest(true)?)?;
    info!("Created root Flags folder at {}", dest.display());

    let mut report = ImportReport::default();
    let regions = children(&config.source_root, |e| e.path().is_dir())?;

    for region_path in regions {
        let size_path = region_path.join(config.size.dir_name());
        if !size_path.is_dir() {
            debug!(region = %region_path.display(), size = %config.size, "no size variant, skipped");
            continue;
        }

        let region_name = capitalize(&region_path.file_name().unwrap_or_default().to_string_lossy());
        let dest_region = dest.join(&region_name);
        create_dir(&dest_region)?;
        write_manifest(&dest_region, &folder_manifest(false)?)?;

        let images = children(&size_path, |e| {
            e.path().is_file()
                && e.path().extension().and_then(|x| x.to_str()) == Some(IMAGE_EXTENSION)
        })?;

        for image in &images {
            import_image(image, &dest_region)?;
        }
        info!(region = %region_name, images = images.len(), "imported region");

        report.images += images.len();
        report.regions.push(region_name);
    }

    info!("Done importing flags.");
    Ok(report)
}

fn import_image(image: &Path, dest_region: &Path) -> Result<()> {
    let file_name = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| PipelineError::InvalidData(format!("{} has no file name", image.display())))?;
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.clone());

    let imageset = dest_region.join(format!("{stem}.imageset"));
    create_dir(&imageset)?;
    let target = imageset.join(&file_name);
    fs::copy(image, &target).map_err(|e| PipelineError::file(&target, e))?;
    write_manifest(&imageset, &imageset_manifest(&file_name)?)?;
    Ok(())
}

//! Split archive extraction
//!
//! `.apks`, `.apkm` and `.xapk` files (and any other zip that carries `.apk`
//! entries) are unpacked into a scratch directory, one file per module. Entry
//! paths are flattened to their file names.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use zip::ZipArchive;

use crate::bundle::discovery::strip_apk_suffix;
use crate::error::{Result, bundle as bundle_error};
use crate::logging::BundleLogger;

const SPLIT_ARCHIVE_EXTENSIONS: [&str; 3] = ["apks", "apkm", "xapk"];

/// Whether `path` has one of the well-known split archive extensions
pub fn has_split_archive_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SPLIT_ARCHIVE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Extract every `.apk` entry of `archive_path` into `target_dir`.
///
/// Returns the number of modules written.
pub fn extract_modules(
    archive_path: &Path,
    target_dir: &Path,
    logger: &dyn BundleLogger,
) -> Result<usize> {
    let display = archive_path.display().to_string();
    let file = File::open(archive_path).map_err(|e| bundle_error::archive_read_failed(&display, e))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| bundle_error::archive_read_failed(&display, e))?;

    let mut extracted = 0;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| bundle_error::archive_read_failed(&display, e))?;
        if entry.is_dir() {
            continue;
        }

        let Some(file_name) = Path::new(entry.name())
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
        else {
            continue;
        };
        if strip_apk_suffix(&file_name).is_none() {
            continue;
        }

        let destination = target_dir.join(&file_name);
        if destination.exists() {
            logger.error(&format!(
                "Duplicate module {file_name} in {display}, keeping the last one"
            ));
        }

        let mut out = File::create(&destination)
            .map_err(|e| bundle_error::archive_read_failed(&display, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| bundle_error::archive_read_failed(&display, e))?;
        logger.verbose(&format!("Extracted: {file_name}"));
        extracted += 1;
    }

    if extracted == 0 {
        return Err(bundle_error::no_modules(display));
    }
    Ok(extracted)
}

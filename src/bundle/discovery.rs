//! Module discovery in a directory of split APKs
//!
//! Modules are the `.apk` files directly inside the directory, ordered by file
//! name. For each module the declared size of its resource table is read from
//! the chunk header at the start of `resources.arsc`; nothing past those eight
//! bytes is interpreted.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use walkdir::WalkDir;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::domain::Module;
use crate::error::{Result, bundle as bundle_error};
use crate::logging::BundleLogger;

const RESOURCE_TABLE_ENTRY: &str = "resources.arsc";
const RES_TABLE_TYPE: u16 = 0x0002;
const CHUNK_HEADER_LEN: usize = 8;
const APK_SUFFIX: &str = ".apk";

/// File name without a trailing `.apk` (ASCII case-insensitive)
pub fn strip_apk_suffix(name: &str) -> Option<&str> {
    let split = name.len().checked_sub(APK_SUFFIX.len())?;
    if !name.is_char_boundary(split) {
        return None;
    }
    let (stem, suffix) = name.split_at(split);
    suffix.eq_ignore_ascii_case(APK_SUFFIX).then_some(stem)
}

/// Scan `dir` for split modules, in file name order
pub fn scan_directory(dir: &Path, logger: &dyn BundleLogger) -> Result<Vec<Module>> {
    let mut modules = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| bundle_error::archive_read_failed(dir.display().to_string(), e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        let Some(stem) = strip_apk_suffix(&file_name) else {
            continue;
        };

        let name = stem.to_string();
        logger.verbose(&format!("Loading: {file_name}"));
        let module = Module::new(name.clone(), entry.path());
        let module = match read_resource_table_size(entry.path(), &name, logger)? {
            Some(size) => module.with_resource_table(size),
            None => module,
        };
        modules.push(module);
    }

    tracing::debug!("Found {} module(s) in {}", modules.len(), dir.display());
    Ok(modules)
}

/// Declared chunk size of the module's resource table, if it has one
fn read_resource_table_size(
    path: &Path,
    name: &str,
    logger: &dyn BundleLogger,
) -> Result<Option<u32>> {
    let file = File::open(path).map_err(|e| bundle_error::module_read_failed(name, e))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .map_err(|e| bundle_error::module_read_failed(name, e))?;

    let mut entry = match archive.by_name(RESOURCE_TABLE_ENTRY) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(bundle_error::module_read_failed(name, e)),
    };

    let mut header = [0u8; CHUNK_HEADER_LEN];
    if entry.read_exact(&mut header).is_err() {
        logger.error(&format!("{name}: {RESOURCE_TABLE_ENTRY} is truncated, ignoring it"));
        return Ok(None);
    }

    Ok(parse_table_chunk_size(&header).or_else(|| {
        logger.error(&format!(
            "{name}: {RESOURCE_TABLE_ENTRY} does not start with a table chunk, ignoring it"
        ));
        None
    }))
}

/// Chunk size from a `ResTable_header`, `None` if the chunk is not a table
fn parse_table_chunk_size(header: &[u8; CHUNK_HEADER_LEN]) -> Option<u32> {
    let chunk_type = u16::from_le_bytes([header[0], header[1]]);
    if chunk_type != RES_TABLE_TYPE {
        return None;
    }
    Some(u32::from_le_bytes([header[4], header[5], header[6], header[7]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::testing::RecordingLogger;
    use crate::test_fixtures::{create_temp_dir, write_apk, write_raw_apk};

    #[test]
    fn test_parse_table_chunk_size() {
        let header = [0x02, 0x00, 0x0c, 0x00, 0x10, 0x27, 0x00, 0x00];
        assert_eq!(parse_table_chunk_size(&header), Some(10_000));
    }

    #[test]
    fn test_parse_table_chunk_size_wrong_type() {
        let header = [0x03, 0x00, 0x08, 0x00, 0x10, 0x00, 0x00, 0x00];
        assert_eq!(parse_table_chunk_size(&header), None);
    }

    #[test]
    fn test_strip_apk_suffix() {
        assert_eq!(strip_apk_suffix("base.apk"), Some("base"));
        assert_eq!(strip_apk_suffix("split_config.en.APK"), Some("split_config.en"));
        assert_eq!(strip_apk_suffix("base.apks"), None);
        assert_eq!(strip_apk_suffix("apk"), None);
        assert_eq!(strip_apk_suffix("\u{e9}pk"), None);
    }

    #[test]
    fn test_scan_directory_orders_by_file_name_and_reads_tables() {
        let temp = create_temp_dir();
        write_apk(temp.path(), "feature.apk", None);
        write_apk(temp.path(), "base.apk", Some(4096));
        write_apk(temp.path(), "config.en.apk", Some(128));
        std::fs::write(temp.path().join("notes.txt"), "not a module").unwrap();
        std::fs::create_dir(temp.path().join("nested.apk")).unwrap();

        let logger = RecordingLogger::default();
        let modules = scan_directory(temp.path(), &logger).unwrap();

        let names: Vec<&str> = modules.iter().map(Module::name).collect();
        assert_eq!(names, vec!["base", "config.en", "feature"]);
        assert_eq!(modules[0].resource_table_size(), 4096);
        assert!(modules[1].has_resource_table());
        assert!(!modules[2].has_resource_table());
        assert!(logger.contains("Loading: base.apk"));
    }

    #[test]
    fn test_scan_directory_ignores_non_table_chunk() {
        let temp = create_temp_dir();
        write_raw_apk(temp.path(), "odd.apk", &[0x03, 0x00, 0x08, 0x00, 0x08, 0x00, 0x00, 0x00]);

        let logger = RecordingLogger::default();
        let modules = scan_directory(temp.path(), &logger).unwrap();
        assert_eq!(modules.len(), 1);
        assert!(!modules[0].has_resource_table());
        assert!(logger.contains("does not start with a table chunk"));
    }

    #[test]
    fn test_scan_directory_truncated_table() {
        let temp = create_temp_dir();
        write_raw_apk(temp.path(), "short.apk", &[0x02, 0x00]);

        let logger = RecordingLogger::default();
        let modules = scan_directory(temp.path(), &logger).unwrap();
        assert!(!modules[0].has_resource_table());
        assert!(logger.contains("truncated"));
    }

    #[test]
    fn test_scan_directory_rejects_non_zip_module() {
        let temp = create_temp_dir();
        std::fs::write(temp.path().join("broken.apk"), b"definitely not a zip").unwrap();

        let err = scan_directory(temp.path(), &RecordingLogger::default()).unwrap_err();
        assert!(matches!(err, crate::error::AppError::ModuleReadFailed { .. }));
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp = create_temp_dir();
        let modules = scan_directory(temp.path(), &RecordingLogger::default()).unwrap();
        assert!(modules.is_empty());
    }
}

//! Test fixtures shared by unit tests.
//!
//! Split modules are written as minimal zip files: an `AndroidManifest.xml`
//! placeholder and, when a size is given, a `resources.arsc` that starts with a
//! resource table chunk header declaring that size.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Create a temp directory in the system temp location.
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::scratch_base()).expect("Failed to create temp directory")
}

/// Bytes of a `resources.arsc` whose table chunk declares `size`
pub fn table_chunk(size: u32) -> Vec<u8> {
    let mut bytes = vec![0x02, 0x00, 0x0c, 0x00];
    bytes.extend_from_slice(&size.to_le_bytes());
    bytes.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
    bytes
}

/// Zip bytes of a split module
pub fn apk_bytes(table: Option<&[u8]>) -> Vec<u8> {
    let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer
        .start_file("AndroidManifest.xml", options)
        .expect("Failed to start manifest entry");
    writer.write_all(b"manifest").expect("Failed to write manifest");
    if let Some(table) = table {
        writer
            .start_file("resources.arsc", options)
            .expect("Failed to start table entry");
        writer.write_all(table).expect("Failed to write table");
    }
    writer.finish().expect("Failed to finish zip").into_inner()
}

/// Write a split module with an optional resource table of `table_size` bytes
pub fn write_apk(dir: &Path, file_name: &str, table_size: Option<u32>) -> PathBuf {
    let table = table_size.map(table_chunk);
    write_bytes(dir, file_name, &apk_bytes(table.as_deref()))
}

/// Write a split module whose `resources.arsc` holds exactly `table`
pub fn write_raw_apk(dir: &Path, file_name: &str, table: &[u8]) -> PathBuf {
    write_bytes(dir, file_name, &apk_bytes(Some(table)))
}

/// Write a split archive holding `(entry path, table size)` modules.
///
/// Entries that do not end in `.apk` are written as plain text files.
pub fn write_split_archive(path: &Path, entries: &[(&str, Option<u32>)]) {
    let file = File::create(path).expect("Failed to create archive");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, table_size) in entries {
        writer.start_file(*name, options).expect("Failed to start entry");
        if name.ends_with(".apk") {
            let table = table_size.map(table_chunk);
            writer
                .write_all(&apk_bytes(table.as_deref()))
                .expect("Failed to write module");
        } else {
            writer.write_all(b"{}").expect("Failed to write entry");
        }
    }
    writer.finish().expect("Failed to finish archive");
}

fn write_bytes(dir: &Path, file_name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, bytes).expect("Failed to write module");
    path
}

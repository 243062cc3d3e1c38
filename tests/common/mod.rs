//! Common test utilities for splitmerge integration tests

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// A scratch directory holding split modules, archives and config files
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create (or reuse) a directory for split modules
    pub fn create_splits_dir(&self, name: &str) -> PathBuf {
        let dir = self.path.join(name);
        std::fs::create_dir_all(&dir).expect("Failed to create splits directory");
        dir
    }

    /// Write a split module, with a resource table of `table_size` bytes if given
    pub fn write_apk(&self, dir: &Path, file_name: &str, table_size: Option<u32>) -> PathBuf {
        let path = dir.join(file_name);
        std::fs::write(&path, apk_bytes(table_size)).expect("Failed to write module");
        path
    }

    /// Write a split archive holding the given modules
    #[allow(dead_code)]
    pub fn write_split_archive(&self, file_name: &str, modules: &[(&str, Option<u32>)]) -> PathBuf {
        let path = self.path.join(file_name);
        let file = File::create(&path).expect("Failed to create archive");
        let mut writer = ZipWriter::new(file);
        for (name, table_size) in modules {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .expect("Failed to start entry");
            writer
                .write_all(&apk_bytes(*table_size))
                .expect("Failed to write module");
        }
        writer.finish().expect("Failed to finish archive");
        path
    }

    /// Write a file in workspace
    #[allow(dead_code)]
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Zip bytes of a split module
fn apk_bytes(table_size: Option<u32>) -> Vec<u8> {
    let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer
        .start_file("AndroidManifest.xml", options)
        .expect("Failed to start manifest entry");
    writer.write_all(b"manifest").expect("Failed to write manifest");
    if let Some(size) = table_size {
        let mut table = vec![0x02, 0x00, 0x0c, 0x00];
        table.extend_from_slice(&size.to_le_bytes());
        table.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
        writer
            .start_file("resources.arsc", options)
            .expect("Failed to start table entry");
        writer.write_all(&table).expect("Failed to write table");
    }
    writer.finish().expect("Failed to finish zip").into_inner()
}

/// The splitmerge binary, isolated from the developer's configuration
#[allow(deprecated)]
pub fn splitmerge_cmd(workspace: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("splitmerge").unwrap();
    cmd.env_remove("SPLITMERGE_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd.env("XDG_CONFIG_HOME", workspace.path.join("xdg-config"));
    cmd.env("HOME", &workspace.path);
    cmd.env("NO_COLOR", "1");
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_creation() {
        let workspace = TestWorkspace::new();
        assert!(workspace.path.exists());
    }

    #[test]
    fn test_workspace_writes_modules() {
        let workspace = TestWorkspace::new();
        let dir = workspace.create_splits_dir("splits");
        let module = workspace.write_apk(&dir, "base.apk", Some(64));
        assert!(module.is_file());
    }
}

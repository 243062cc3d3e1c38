//! Filesystem-backed bundle provider
//!
//! Discovers modules from a directory or split archive and merges them by
//! running the configured external merge tool on a staging directory that
//! holds exactly the planned modules.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::bundle::archive::{extract_modules, has_split_archive_extension};
use crate::bundle::discovery::scan_directory;
use crate::bundle::tool::MergeTool;
use crate::bundle::{LoadedBundle, PackageBundleProvider, ReleaseGuard, ScratchDir};
use crate::config::Config;
use crate::domain::{MergePlan, Module, ModuleSet};
use crate::error::{Result, bundle as bundle_error, fs as fs_error};
use crate::logging::BundleLogger;
use crate::planner::{display_name, normalize_module_name};
use crate::temp::Scratch;
use crate::ui::ProgressReporter;

/// Module names bundletool gives the base split
const DECLARED_BASE_NAMES: [&str; 3] = ["base", "base-master", "base-main"];

/// Provider for split modules on the local filesystem
#[derive(Debug, Clone, Default)]
pub struct DirectoryBundleProvider {
    config: Config,
}

impl DirectoryBundleProvider {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn load_archive(&self, archive: &Path, logger: &dyn BundleLogger) -> Result<LoadedBundle> {
        let scratch = Scratch::Modules.create()?;
        logger.message(&format!("Extracting split archive {}", archive.display()));

        // Dropping `scratch` on an early return removes the partial extraction.
        extract_modules(archive, scratch.path(), logger)?;
        let modules = scan_directory(scratch.path(), logger)?;
        Ok(LoadedBundle::extracted(ModuleSet::new(modules), scratch))
    }

    fn stage_modules(&self, plan: &MergePlan<'_>) -> Result<ScratchDir> {
        let stage = Scratch::Stage.create()?;

        for module in plan.iter() {
            let file_name = display_name(module);
            let target = stage.path().join(&file_name);
            match stage_file(module.path(), &target) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    return Err(bundle_error::duplicate_module(file_name));
                }
                Err(e) => return Err(fs_error::write_failed(target.display().to_string(), e)),
            }
        }
        Ok(ScratchDir::new(stage))
    }
}

/// Link `source` to `target`, copying when linking is impossible.
///
/// Never writes through an existing `target`: that could be a link to another
/// module's input file.
fn stage_file(source: &Path, target: &Path) -> io::Result<()> {
    match fs::hard_link(source, target) {
        Err(e) if e.kind() != ErrorKind::AlreadyExists => {
            tracing::debug!("Cannot link {}: {e}, copying", source.display());
            let mut out = OpenOptions::new().write(true).create_new(true).open(target)?;
            io::copy(&mut File::open(source)?, &mut out)?;
            Ok(())
        }
        linked => linked,
    }
}

impl PackageBundleProvider for DirectoryBundleProvider {
    fn discover_modules(&self, source: &Path, logger: &dyn BundleLogger) -> Result<LoadedBundle> {
        let bundle = if source.is_dir() {
            LoadedBundle::new(ModuleSet::new(scan_directory(source, logger)?))
        } else if source.is_file() {
            if !has_split_archive_extension(source) {
                tracing::debug!(
                    "{} has no split archive extension, probing it for .apk entries",
                    source.display()
                );
            }
            self.load_archive(source, logger)?
        } else {
            return Err(bundle_error::no_modules(source.display().to_string()));
        };

        if bundle.modules().is_empty() {
            return Err(bundle_error::no_modules(source.display().to_string()));
        }
        Ok(bundle)
    }

    fn declared_base_module<'a>(&self, modules: &'a ModuleSet) -> Option<&'a Module> {
        modules.iter().find(|module| {
            let normalized = normalize_module_name(module.name());
            DECLARED_BASE_NAMES.contains(&normalized.as_str())
        })
    }

    fn merge_and_write(
        &self,
        plan: &MergePlan<'_>,
        output: &Path,
        sort_entries: bool,
        logger: &dyn BundleLogger,
        progress: &mut dyn ProgressReporter,
    ) -> Result<()> {
        let output = absolute_output_path(output)?;
        let stage = ReleaseGuard::new(self.stage_modules(plan)?);
        let Some(stage_path) = stage.path() else {
            return Err(fs_error::io_error("staging directory released early"));
        };

        logger.message(&format!(
            "Merging {} module(s) into {}",
            plan.len(),
            output.display()
        ));
        MergeTool::new(&self.config.merge_tool, &self.config.output).run(
            stage_path,
            &output,
            &display_name(plan.base()),
            sort_entries,
            logger,
            progress,
        )
    }
}

/// Create the output's parent directory and return the output as an absolute path
fn absolute_output_path(output: &Path) -> Result<PathBuf> {
    let file_name = output
        .file_name()
        .ok_or_else(|| fs_error::write_failed(output.display().to_string(), "not a file path"))?;
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    fs::create_dir_all(&parent)
        .map_err(|e| fs_error::write_failed(parent.display().to_string(), e))?;
    let parent = dunce::canonicalize(&parent)
        .map_err(|e| fs_error::write_failed(parent.display().to_string(), e))?;
    Ok(parent.join(file_name))
}

//! Merge operation module
//!
//! Discovers modules, removes the ones the caller asked to skip (never the
//! base), hands the plan to the provider and summarizes the written file.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::bundle::{PackageBundleProvider, ReleaseGuard};
use crate::domain::SkipSet;
use crate::error::{Result, fs as fs_error};
use crate::logging::BundleLogger;
use crate::planner::{display_name, normalize_module_name, plan_merge};
use crate::ui::ProgressReporter;

/// Configuration options for merge
#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub source: PathBuf,
    pub output: PathBuf,
    pub skip: SkipSet,
    pub sort_entries: bool,
}

/// What a successful merge produced
#[derive(Debug, Clone)]
pub struct MergeReport {
    pub output: PathBuf,
    pub base: String,
    /// Display names of merged modules, base first
    pub merged: Vec<String>,
    pub skipped: Vec<String>,
    pub size: u64,
    /// BLAKE3 digest of the written file, hex encoded
    pub digest: String,
}

/// High-level merge operation
pub struct MergeOperation<'a, P: PackageBundleProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: PackageBundleProvider + ?Sized> MergeOperation<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    pub fn execute(
        &self,
        options: &MergeOptions,
        logger: &dyn BundleLogger,
        progress: &mut dyn ProgressReporter,
    ) -> Result<MergeReport> {
        let bundle = ReleaseGuard::new(self.provider.discover_modules(&options.source, logger)?);
        let modules = bundle.modules();
        let declared = self.provider.declared_base_module(modules);
        let planned = plan_merge(modules, declared, &options.skip)?;

        warn_unmatched_skips(&options.skip, modules.iter().map(|m| m.name()));
        for module in &planned.skipped {
            logger.message(&format!("Skipping module {}", display_name(module)));
        }
        let base = display_name(planned.plan.base());
        logger.message(&format!("Base module: {base}"));

        let merged = self.provider.merge_and_write(
            &planned.plan,
            &options.output,
            options.sort_entries,
            logger,
            progress,
        );
        match merged {
            Ok(()) => progress.finish(),
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        }

        let (size, digest) = hash_file(&options.output)?;
        Ok(MergeReport {
            output: options.output.clone(),
            base,
            merged: planned.plan.iter().map(display_name).collect(),
            skipped: planned.skipped.iter().map(|m| display_name(m)).collect(),
            size,
            digest,
        })
    }
}

fn warn_unmatched_skips<'m>(skip: &SkipSet, names: impl Iterator<Item = &'m str>) {
    let known: Vec<String> = names.map(normalize_module_name).collect();
    for token in skip.sorted() {
        if !known.iter().any(|name| name == token) {
            tracing::warn!("Skip entry '{token}' does not match any module");
        }
    }
}

/// Size and BLAKE3 digest of a file
fn hash_file(path: &Path) -> Result<(u64, String)> {
    let mut file = File::open(path).map_err(|e| {
        fs_error::io_error(format!("Failed to read merged output {}: {e}", path.display()))
    })?;
    let mut hasher = blake3::Hasher::new();
    let size = io::copy(&mut file, &mut hasher)?;
    Ok((size, hasher.finalize().to_hex().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Module;
    use crate::error::{AppError, MergeFailureReason};
    use crate::logging::testing::RecordingLogger;
    use crate::operations::testing::FakeProvider;
    use crate::planner::normalize_skip_set;
    use crate::test_fixtures::create_temp_dir;
    use crate::ui::testing::RecordingProgress;

    fn options(output: PathBuf, skip: &str) -> MergeOptions {
        MergeOptions {
            source: PathBuf::from("/m"),
            output,
            skip: normalize_skip_set(Some(skip)),
            sort_entries: false,
        }
    }

    fn end_to_end_modules() -> Vec<Module> {
        vec![
            Module::new("base.apk", "/m/base.apk").with_resource_table(100),
            Module::new("feature1.apk", "/m/feature1.apk").with_resource_table(20),
            Module::new("feature2.apk", "/m/feature2.apk"),
        ]
    }

    #[test]
    fn test_merge_skips_requested_modules() {
        let temp = create_temp_dir();
        let output = temp.path().join("merged.apk");
        let provider = FakeProvider::new(end_to_end_modules());
        let logger = RecordingLogger::default();
        let mut progress = RecordingProgress::default();

        let report = MergeOperation::new(&provider)
            .execute(&options(output.clone(), "feature1"), &logger, &mut progress)
            .unwrap();

        assert_eq!(report.merged, vec!["base.apk", "feature2.apk"]);
        assert_eq!(report.skipped, vec!["feature1.apk"]);
        assert_eq!(report.base, "base.apk");
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "base.apk\nfeature2.apk");
        assert_eq!(report.size, 21);
        assert_eq!(report.digest.len(), 64);
        assert!(progress.finished);
        assert!(logger.contains("Skipping module feature1.apk"));
        assert!(provider.scratch_released());
    }

    #[test]
    fn test_merge_never_skips_base() {
        let temp = create_temp_dir();
        let output = temp.path().join("merged.apk");
        let provider = FakeProvider::new(end_to_end_modules());

        let report = MergeOperation::new(&provider)
            .execute(
                &options(output, "BASE.APK,feature2"),
                &RecordingLogger::default(),
                &mut RecordingProgress::default(),
            )
            .unwrap();
        assert_eq!(report.merged, vec!["base.apk", "feature1.apk"]);
    }

    #[test]
    fn test_merge_failure_is_surfaced_and_bundle_released() {
        let temp = create_temp_dir();
        let provider = FakeProvider::new(end_to_end_modules()).failing(MergeFailureReason::Corrupted);
        let mut progress = RecordingProgress::default();

        let err = MergeOperation::new(&provider)
            .execute(
                &options(temp.path().join("merged.apk"), ""),
                &RecordingLogger::default(),
                &mut progress,
            )
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::MergeFailed {
                reason: MergeFailureReason::Corrupted,
                ..
            }
        ));
        assert!(progress.abandoned);
        assert!(provider.scratch_released());
    }

    #[test]
    fn test_hash_file_missing() {
        let temp = create_temp_dir();
        assert!(hash_file(&temp.path().join("missing.apk")).is_err());
    }
}

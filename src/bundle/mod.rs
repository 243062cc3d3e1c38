//! Package bundle collaborator
//!
//! Everything that touches split modules on disk sits behind
//! [`PackageBundleProvider`]: discovering modules, naming the declared base,
//! and handing a merge plan to the external merge tool. The planner never sees
//! files, only the [`ModuleSet`] a provider returns.
//!
//! Resources a provider hands out (extracted archives, staging directories)
//! implement [`Release`] and are wrapped in a [`ReleaseGuard`] so they are
//! cleaned up on every exit path.

pub mod archive;
pub mod discovery;
pub mod output;
pub mod provider;
pub mod tool;

use std::io;
use std::ops::{Deref, DerefMut};
use std::path::Path;

use tempfile::TempDir;

use crate::domain::{MergePlan, Module, ModuleSet};
use crate::error::Result;
use crate::logging::BundleLogger;
use crate::ui::ProgressReporter;

pub use provider::DirectoryBundleProvider;

/// Source of split modules and the capability to merge them
pub trait PackageBundleProvider {
    /// Discover the modules in a directory or split archive.
    ///
    /// Fails with [`crate::error::AppError::NoModulesFound`] when nothing is found.
    fn discover_modules(&self, source: &Path, logger: &dyn BundleLogger) -> Result<LoadedBundle>;

    /// The module the provider itself considers the base, if any
    fn declared_base_module<'a>(&self, modules: &'a ModuleSet) -> Option<&'a Module>;

    /// Merge the planned modules and write the result to `output`
    fn merge_and_write(
        &self,
        plan: &MergePlan<'_>,
        output: &Path,
        sort_entries: bool,
        logger: &dyn BundleLogger,
        progress: &mut dyn ProgressReporter,
    ) -> Result<()>;
}

/// Explicit, idempotent release of a provider resource
pub trait Release {
    fn release(&mut self) -> io::Result<()>;
}

/// Modules discovered for one invocation, plus any scratch space they live in
#[derive(Debug)]
pub struct LoadedBundle {
    modules: ModuleSet,
    scratch: Option<TempDir>,
}

impl LoadedBundle {
    pub fn new(modules: ModuleSet) -> Self {
        Self {
            modules,
            scratch: None,
        }
    }

    /// Modules extracted into `scratch`, which is removed on release
    pub fn extracted(modules: ModuleSet, scratch: TempDir) -> Self {
        Self {
            modules,
            scratch: Some(scratch),
        }
    }

    pub fn modules(&self) -> &ModuleSet {
        &self.modules
    }
}

impl Release for LoadedBundle {
    fn release(&mut self) -> io::Result<()> {
        match self.scratch.take() {
            Some(dir) => dir.close(),
            None => Ok(()),
        }
    }
}

/// A temporary directory that is removed on release
#[derive(Debug)]
pub struct ScratchDir(Option<TempDir>);

impl ScratchDir {
    pub fn new(dir: TempDir) -> Self {
        Self(Some(dir))
    }

    /// Path of the directory; `None` once released
    pub fn path(&self) -> Option<&Path> {
        self.0.as_ref().map(TempDir::path)
    }
}

impl Release for ScratchDir {
    fn release(&mut self) -> io::Result<()> {
        match self.0.take() {
            Some(dir) => dir.close(),
            None => Ok(()),
        }
    }
}

/// Releases the wrapped resource when dropped.
///
/// Release errors are logged and swallowed so they never replace the error
/// that caused an early return.
#[derive(Debug)]
pub struct ReleaseGuard<T: Release> {
    inner: T,
}

impl<T: Release> ReleaseGuard<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: Release> Deref for ReleaseGuard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: Release> DerefMut for ReleaseGuard<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T: Release> Drop for ReleaseGuard<T> {
    fn drop(&mut self) {
        if let Err(e) = self.inner.release() {
            tracing::warn!("Failed to release resource: {e}");
        }
    }
}

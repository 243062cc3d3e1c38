//! List operation module
//!
//! Discovers the modules of a split bundle and reports them in merge order.

use std::path::Path;

use crate::bundle::{PackageBundleProvider, ReleaseGuard};
use crate::error::Result;
use crate::logging::BundleLogger;
use crate::planner::{display_name, plan_list};

/// High-level list operation
pub struct ListOperation<'a, P: PackageBundleProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: PackageBundleProvider + ?Sized> ListOperation<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Display names of every module, base first
    pub fn execute(&self, source: &Path, logger: &dyn BundleLogger) -> Result<Vec<String>> {
        let bundle = ReleaseGuard::new(self.provider.discover_modules(source, logger)?);
        let modules = bundle.modules();
        let declared = self.provider.declared_base_module(modules);
        let plan = plan_list(modules, declared)?;

        tracing::debug!("Base module: {}", display_name(plan.base()));
        Ok(plan.iter().map(display_name).collect())
    }
}

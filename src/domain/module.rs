//! Module domain types
//!
//! A module is one discovered part of a split application package. Modules are
//! owned by a [`ModuleSet`]; plans only ever borrow them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One discovered split module (base or feature/config split)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    name: String,
    path: PathBuf,
    resource_table_size: Option<u32>,
}

impl Module {
    /// Create a module without a resource table
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            resource_table_size: None,
        }
    }

    /// Attach the declared chunk size of the module's resource table
    #[must_use]
    pub fn with_resource_table(mut self, size: u32) -> Self {
        self.resource_table_size = Some(size);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_resource_table(&self) -> bool {
        self.resource_table_size.is_some()
    }

    /// Resource table chunk size in bytes, `0` when the module has no table
    pub fn resource_table_size(&self) -> u32 {
        self.resource_table_size.unwrap_or(0)
    }
}

/// All modules discovered for one invocation, in discovery order
#[derive(Debug, Clone, Default)]
pub struct ModuleSet {
    modules: Vec<Module>,
}

impl ModuleSet {
    pub fn new(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    pub fn as_slice(&self) -> &[Module] {
        &self.modules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Module> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<'a> IntoIterator for &'a ModuleSet {
    type Item = &'a Module;
    type IntoIter = std::slice::Iter<'a, Module>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}

/// Normalized module names excluded from a merge
///
/// Tokens are stored lower-cased with a single trailing `.apk` removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet {
    tokens: HashSet<String>,
}

impl SkipSet {
    pub(crate) fn from_normalized(tokens: HashSet<String>) -> Self {
        Self { tokens }
    }

    pub fn contains(&self, normalized: &str) -> bool {
        self.tokens.contains(normalized)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Tokens in sorted order, for logging and re-serialization
    pub fn sorted(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.iter().collect();
        tokens.sort_unstable();
        tokens
    }
}

/// Ordered modules to merge; the base module is always first
#[derive(Debug, Clone)]
pub struct MergePlan<'a> {
    modules: Vec<&'a Module>,
}

impl<'a> MergePlan<'a> {
    /// Build a plan from an already ordered, non-empty module list
    pub(crate) fn from_ordered(modules: Vec<&'a Module>) -> Self {
        debug_assert!(!modules.is_empty(), "a merge plan always has a base module");
        Self { modules }
    }

    pub fn base(&self) -> &'a Module {
        self.modules[0]
    }

    pub fn modules(&self) -> &[&'a Module] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Module> + '_ {
        self.modules.iter().copied()
    }
}

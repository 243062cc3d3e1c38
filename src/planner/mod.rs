//! Merge-order planning
//!
//! Chooses the base module, orders the remaining modules and filters out the
//! modules a caller asked to skip. Everything here is pure: no I/O, no logging,
//! and modules are only ever borrowed from the [`ModuleSet`] they came from.

use std::collections::HashSet;

use crate::domain::{MergePlan, Module, ModuleSet, SkipSet};
use crate::error::{AppError, Result};

const APK_SUFFIX: &str = ".apk";

/// Pick the module every other module is merged into.
///
/// A base declared by the bundle provider always wins. Otherwise the module with
/// the strictly largest resource table is chosen, so on equal sizes the first
/// one discovered stays. Without any resource table the first module is used.
pub fn select_base_module<'a>(
    modules: &'a ModuleSet,
    declared_base: Option<&'a Module>,
) -> Result<&'a Module> {
    let first = modules.iter().next().ok_or(AppError::EmptyModuleSet)?;

    if let Some(declared) = declared_base {
        return Ok(declared);
    }

    Ok(largest_table_module(modules).unwrap_or(first))
}

fn largest_table_module(modules: &ModuleSet) -> Option<&Module> {
    let mut candidate: Option<&Module> = None;
    for module in modules.iter().filter(|m| m.has_resource_table()) {
        match candidate {
            Some(current) if module.resource_table_size() <= current.resource_table_size() => {}
            _ => candidate = Some(module),
        }
    }
    candidate
}

/// Order `modules` with `base` first and the rest in discovery order.
///
/// `base` is matched by identity, so it must be borrowed from `modules`.
pub fn build_order<'a, I>(modules: I, base: &'a Module) -> Vec<&'a Module>
where
    I: IntoIterator<Item = &'a Module>,
{
    let mut order = vec![base];
    order.extend(modules.into_iter().filter(|m| !std::ptr::eq(*m, base)));
    order
}

/// Parse a comma separated list of module names into a [`SkipSet`].
pub fn normalize_skip_set(raw_csv: Option<&str>) -> SkipSet {
    let tokens: HashSet<String> = raw_csv
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(normalize_module_name)
        .collect();
    SkipSet::from_normalized(tokens)
}

/// Lower-case a module name and strip one trailing `.apk`.
pub fn normalize_module_name(name: &str) -> String {
    let lower = name.to_lowercase();
    match lower.strip_suffix(APK_SUFFIX) {
        Some(stem) => stem.to_string(),
        None => lower,
    }
}

/// Drop every non-base module named in `skip`, keeping discovery order.
pub fn apply_skip<'a>(modules: &'a ModuleSet, base: &Module, skip: &SkipSet) -> Vec<&'a Module> {
    modules
        .iter()
        .filter(|m| std::ptr::eq(*m, base) || !skip.contains(&normalize_module_name(m.name())))
        .collect()
}

/// Module name as a file name, with `.apk` appended when missing.
pub fn display_name(module: &Module) -> String {
    let name = module.name();
    if name.to_lowercase().ends_with(APK_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{APK_SUFFIX}")
    }
}

/// Plan for the `list` action: every module, base first.
pub fn plan_list<'a>(
    modules: &'a ModuleSet,
    declared_base: Option<&'a Module>,
) -> Result<MergePlan<'a>> {
    let base = select_base_module(modules, declared_base)?;
    Ok(MergePlan::from_ordered(build_order(modules, base)))
}

/// A merge plan together with the modules the skip set removed
#[derive(Debug)]
pub struct PlannedMerge<'a> {
    pub plan: MergePlan<'a>,
    pub skipped: Vec<&'a Module>,
}

/// Plan for the `merge` action: base first, skipped modules removed.
pub fn plan_merge<'a>(
    modules: &'a ModuleSet,
    declared_base: Option<&'a Module>,
    skip: &SkipSet,
) -> Result<PlannedMerge<'a>> {
    let base = select_base_module(modules, declared_base)?;
    let surviving = apply_skip(modules, base, skip);
    let skipped = modules
        .iter()
        .filter(|m| !surviving.iter().any(|kept| std::ptr::eq(*kept, *m)))
        .collect();

    Ok(PlannedMerge {
        plan: MergePlan::from_ordered(build_order(surviving, base)),
        skipped,
    })
}

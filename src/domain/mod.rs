//! Domain models for splitmerge
//!
//! Plain data describing discovered split modules and merge plans. These types
//! do no I/O; providers build them and the planner reads them.

pub mod module;

pub use module::{MergePlan, Module, ModuleSet, SkipSet};

//! Operations coordinating a bundle provider and the merge planner
//!
//! - [`ListOperation`]: report modules in merge order
//! - [`MergeOperation`]: merge modules into a single APK
//!
//! Operations own the provider resources they acquire and release them on
//! every exit path.

pub mod list;
pub mod merge;

pub use list::ListOperation;
pub use merge::{MergeOperation, MergeOptions, MergeReport};

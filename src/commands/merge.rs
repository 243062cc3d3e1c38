//! Merge command implementation

use std::path::PathBuf;

use console::Term;

use crate::cli::MergeArgs;
use crate::error::Result;
use crate::logging::TracingLogger;
use crate::operations::{MergeOperation, MergeOptions};
use crate::planner::normalize_skip_set;
use crate::ui::display::display_merge_report;
use crate::ui::{InteractiveProgressReporter, ProgressReporter, SilentProgressReporter};

/// Run merge command
pub fn run(config_path: Option<PathBuf>, quiet: bool, args: MergeArgs) -> Result<()> {
    let provider = super::configured_provider(config_path.as_deref())?;

    let options = MergeOptions {
        skip: normalize_skip_set(args.skip_modules.as_deref()),
        sort_entries: args.sort_entries(),
        source: args.modules_dir,
        output: args.output,
    };

    let mut progress: Box<dyn ProgressReporter> = if quiet || !Term::stderr().is_term() {
        Box::new(SilentProgressReporter)
    } else {
        Box::new(InteractiveProgressReporter::new())
    };

    let report =
        MergeOperation::new(&provider).execute(&options, &TracingLogger, progress.as_mut())?;
    display_merge_report(&report);

    Ok(())
}

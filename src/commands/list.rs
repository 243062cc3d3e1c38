//! List command implementation
//!
//! Prints every discovered module in merge order, base first, either as
//! `ORDER:<name>` lines or as a JSON array.

use std::path::PathBuf;

use crate::cli::ListArgs;
use crate::error::Result;
use crate::logging::TracingLogger;
use crate::operations::ListOperation;
use crate::ui::display::order_line;

/// Run list command
pub fn run(config_path: Option<PathBuf>, args: ListArgs) -> Result<()> {
    let provider = super::configured_provider(config_path.as_deref())?;
    let names = ListOperation::new(&provider).execute(&args.modules_dir, &TracingLogger)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        for name in &names {
            println!("{}", order_line(name));
        }
    }

    Ok(())
}

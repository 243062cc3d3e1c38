use clap::Parser;
use std::path::PathBuf;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Print the merge order of a directory of splits:\n    splitmerge list ./splits\n\n\
                  Print the merge order of a split archive as JSON:\n    splitmerge list app.apks --json\n\n\
                  Show how modules are discovered:\n    splitmerge list ./splits -v")]
pub struct ListArgs {
    /// Directory of split .apk files, or an .apks/.apkm/.xapk archive
    #[arg(value_name = "MODULES_DIR")]
    pub modules_dir: PathBuf,

    /// Print a JSON array of module names instead of ORDER: lines
    #[arg(long)]
    pub json: bool,
}

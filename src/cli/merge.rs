use clap::Parser;
use std::path::PathBuf;

/// Arguments for the merge command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Merge every module:\n    splitmerge merge ./splits app.apk\n\n\
                  Skip some modules (the base module is never skipped):\n    \
                  splitmerge merge ./splits app.apk config.xxhdpi,config.fr\n\n\
                  Skip nothing and sort archive entries:\n    splitmerge merge ./splits app.apk \"\" true")]
pub struct MergeArgs {
    /// Directory of split .apk files, or an .apks/.apkm/.xapk archive
    #[arg(value_name = "MODULES_DIR")]
    pub modules_dir: PathBuf,

    /// Path of the merged APK to write
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Comma-separated module names to leave out (case-insensitive, .apk optional)
    #[arg(value_name = "SKIP_MODULES")]
    pub skip_modules: Option<String>,

    /// Sort archive entries in the merged APK ("true" to enable)
    #[arg(value_name = "SORT_ENTRIES")]
    pub sort_entries: Option<String>,
}

impl MergeArgs {
    /// Only a case-insensitive `true` enables sorting; anything else, including
    /// garbage, means false.
    pub fn sort_entries(&self) -> bool {
        self.sort_entries
            .as_deref()
            .is_some_and(|raw| raw.eq_ignore_ascii_case("true"))
    }
}

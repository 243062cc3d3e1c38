//! Scratch directories for extracted archives and staged modules

use std::env;
use std::io;
use std::path::{self, PathBuf};

use tempfile::{Builder, TempDir};

/// What a scratch directory holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scratch {
    /// Modules extracted from a split archive
    Modules,
    /// The planned modules handed to the merge tool
    Stage,
}

impl Scratch {
    fn prefix(self) -> &'static str {
        match self {
            Scratch::Modules => "splitmerge-modules-",
            Scratch::Stage => "splitmerge-stage-",
        }
    }

    /// Create a fresh, empty directory of this kind
    pub fn create(self) -> io::Result<TempDir> {
        Builder::new().prefix(self.prefix()).tempdir_in(scratch_base())
    }
}

/// Absolute parent of all scratch directories.
///
/// A relative `TMPDIR` is resolved against the working directory once here, so
/// scratch paths handed to the merge tool stay valid whatever its own cwd.
pub fn scratch_base() -> PathBuf {
    let base = env::temp_dir();
    path::absolute(&base).unwrap_or(base)
}

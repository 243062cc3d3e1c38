//! External merge tool process
//!
//! The tool gets a directory holding exactly the planned modules and an output
//! path. Its stdout and stderr are drained on helper threads and consumed here
//! as one interleaved line stream.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread;

use crate::bundle::output::{ToolOutput, merge_progress, should_emit};
use crate::config::{MergeToolConfig, OutputConfig};
use crate::error::{MergeFailureReason, Result, merge as merge_error};
use crate::logging::BundleLogger;
use crate::ui::ProgressReporter;

/// One configured merge tool invocation
pub struct MergeTool<'a> {
    command: &'a MergeToolConfig,
    limits: &'a OutputConfig,
}

impl<'a> MergeTool<'a> {
    pub fn new(command: &'a MergeToolConfig, limits: &'a OutputConfig) -> Self {
        Self { command, limits }
    }

    /// Merge the modules in `input` into `output`
    pub fn run(
        &self,
        input: &Path,
        output: &Path,
        base: &str,
        sort_entries: bool,
        logger: &dyn BundleLogger,
        progress: &mut dyn ProgressReporter,
    ) -> Result<()> {
        let (program, args) = self.command.render(input, output, base, sort_entries);
        tracing::debug!("Running merge tool: {} {}", program, args.join(" "));

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| merge_error::tool_unavailable(&program, e))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let mut captured = ToolOutput::new(self.limits);

        thread::scope(|scope| {
            let (tx, rx) = mpsc::channel();
            if let Some(pipe) = stdout {
                let tx = tx.clone();
                scope.spawn(move || forward_lines(pipe, &tx));
            }
            if let Some(pipe) = stderr {
                let tx = tx.clone();
                scope.spawn(move || forward_lines(pipe, &tx));
            }
            drop(tx);

            for raw in rx {
                let Some(line) = captured.record(&raw) else {
                    continue;
                };
                if let Some(event) = merge_progress(&line) {
                    progress.update(&event);
                }
                if should_emit(&line) {
                    logger.message(&line);
                } else {
                    logger.verbose(&line);
                }
            }
        });

        let status = child.wait()?;
        if !status.success() {
            let reason = captured.failure_reason();
            logger.error(&format!("Merge tool exited with {status}"));
            return Err(merge_error::failed(reason, captured.tail()));
        }

        if !output.is_file() {
            return Err(merge_error::failed(
                MergeFailureReason::Unknown,
                format!(
                    "merge tool exited successfully but did not write {}",
                    output.display()
                ),
            ));
        }
        Ok(())
    }
}

// Lines are decoded lossily: tools often print file names in the platform
// encoding, and one bad byte must not end the stream.
fn forward_lines<R: Read>(pipe: R, tx: &Sender<String>) {
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']).to_string();
                if tx.send(line).is_err() {
                    break;
                }
            }
        }
    }
}

//! External merge tool command configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, config as config_error};

pub const INPUT_PLACEHOLDER: &str = "{input}";
pub const OUTPUT_PLACEHOLDER: &str = "{output}";
pub const BASE_PLACEHOLDER: &str = "{base}";

/// Command line of the tool that merges a directory of split modules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeToolConfig {
    /// Program and arguments. `{input}`, `{output}` and `{base}` are substituted
    /// inside every argument.
    pub command: Vec<String>,

    /// Extra arguments appended when entry sorting is requested
    pub sort_args: Vec<String>,
}

impl Default for MergeToolConfig {
    fn default() -> Self {
        Self {
            command: [
                "java",
                "-jar",
                "APKEditor.jar",
                "m",
                "-i",
                INPUT_PLACEHOLDER,
                "-o",
                OUTPUT_PLACEHOLDER,
                "-f",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            sort_args: Vec::new(),
        }
    }
}

impl MergeToolConfig {
    pub fn validate(&self) -> Result<()> {
        if self.command.first().is_none_or(|program| program.trim().is_empty()) {
            return Err(config_error::invalid("merge_tool.command must name a program"));
        }
        for placeholder in [INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER] {
            if !self.command.iter().any(|arg| arg.contains(placeholder)) {
                return Err(config_error::invalid(format!(
                    "merge_tool.command must contain {placeholder}"
                )));
            }
        }
        Ok(())
    }

    /// Expand the command template into a program and its arguments
    pub fn render(
        &self,
        input: &Path,
        output: &Path,
        base: &str,
        sort_entries: bool,
    ) -> (String, Vec<String>) {
        let input = input.display().to_string();
        let output = output.display().to_string();
        let substitute = |arg: &String| {
            arg.replace(INPUT_PLACEHOLDER, &input)
                .replace(OUTPUT_PLACEHOLDER, &output)
                .replace(BASE_PLACEHOLDER, base)
        };

        let mut parts = self.command.iter().map(substitute);
        let program = parts.next().unwrap_or_default();
        let mut args: Vec<String> = parts.collect();
        if sort_entries {
            args.extend(self.sort_args.iter().map(substitute));
        }
        (program, args)
    }
}

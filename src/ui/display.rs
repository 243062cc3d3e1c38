//! Display functions for list and merge results

use console::Style;

use crate::operations::merge::MergeReport;

/// Marker printed in front of every module name by `list`
pub const ORDER_PREFIX: &str = "ORDER:";

/// One `list` output line
pub fn order_line(display_name: &str) -> String {
    format!("{ORDER_PREFIX}{display_name}")
}

/// Print the summary of a finished merge
pub fn display_merge_report(report: &MergeReport) {
    println!(
        "{} {}",
        Style::new().bold().green().apply_to("Merged"),
        Style::new().bold().apply_to(report.output.display())
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Base:"),
        Style::new().yellow().apply_to(&report.base)
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Modules:"),
        report.merged.join(", ")
    );
    if !report.skipped.is_empty() {
        println!(
            "  {} {}",
            Style::new().bold().apply_to("Skipped:"),
            Style::new().dim().apply_to(report.skipped.join(", "))
        );
    }
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Size:"),
        format_size(report.size)
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("BLAKE3:"),
        Style::new().dim().apply_to(&report.digest)
    );
}

/// Human readable byte count
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

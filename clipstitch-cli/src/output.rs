//! Terminal output for the end-of-run summary.

use clipstitch_core::{RunSummary, format_bytes, format_duration};
use console::style;
use std::fmt::Display;

/// Print a heading with styling and clear separation
pub fn print_heading(text: &str) {
    let line = style("=".repeat(50)).blue();
    println!("\n{}", line);
    println!(" {}", style(text).bold());
    println!("{}", line);
}

/// Print an info line with the label styled
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("{:>10}: {}", style(label).cyan(), value);
}

/// Summary of a finished run.
pub fn print_summary(summary: &RunSummary) {
    print_heading("clipstitch summary");

    let Some(output) = &summary.output else {
        println!(" {}", style("No matching clips found; nothing was written.").yellow());
        return;
    };

    print_info("Clips", summary.clips);
    print_info("Output", output.display());
    print_info("Size", format_bytes(summary.output_size));
    print_info("Time", format_duration(summary.elapsed));
    if summary.cleanup_failures > 0 {
        print_info(
            "Warning",
            style(format!(
                "{} temporary files could not be removed",
                summary.cleanup_failures
            ))
            .yellow(),
        );
    }
    println!(" {}", style("Done.").green().bold());
}

/// One-line diagnostic for a fatal error, on stderr.
pub fn print_error<E: Display>(error: &E) {
    eprintln!("{} {}", style("Error:").red().bold().for_stderr(), error);
}

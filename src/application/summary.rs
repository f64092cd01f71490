use colored::Colorize;
use supports_color::Stream;

use crate::generator::GenerationOutcome;

/// Prints the outcome of a run to stdout, coloured when the terminal supports it.
pub fn print_summary(outcome: &GenerationOutcome) {
    colored::control::set_override(supports_color::on(Stream::Stdout).is_some());
    println!("{}", format_summary(outcome));
}

fn format_summary(outcome: &GenerationOutcome) -> String {
    let mut lines = vec![format!(
        "{} {} directories under {}",
        "Created".green().bold(),
        outcome.created.len(),
        outcome.root.display()
    )];

    if !outcome.failures.is_empty() {
        lines.push(format!(
            "{} directories that could not be created: {}",
            "Failed".red().bold(),
            outcome.failures.len()
        ));
        lines.extend(outcome.failures.iter().map(|failed| {
            format!("  {} ({})", failed.path.display(), failed.error)
        }));
    }

    if outcome.report_written {
        lines.push(format!(
            "{} {}",
            "Report".green().bold(),
            outcome.report_path.display()
        ));
    } else {
        lines.push(format!(
            "{} the report could not be written to {}",
            "Warning".yellow().bold(),
            outcome.report_path.display()
        ));
    }

    lines.join("\n")
}

//! Styled terminal output shared by the suite commands.

use apicheck_core::{ApiCheckError, SuiteReport};
use console::style;
use std::process::ExitCode;

pub fn banner(title: &str, base_url: &str) {
    println!("{}", style(title).bold());
    println!("  Target:  {}", style(base_url).cyan());
    println!(
        "  Started: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!();
}

/// Prints per-case results and the summary; returns the process exit code.
pub fn print(report: &SuiteReport) -> ExitCode {
    println!();
    println!("{}", style("Results:").bold());
    for outcome in &report.outcomes {
        if outcome.passed {
            println!("  {} {}", style("✓").green(), outcome.name);
        } else {
            println!(
                "  {} {} {}",
                style("×").red(),
                outcome.name,
                style(outcome.reason.as_deref().unwrap_or("")).dim()
            );
        }
    }

    println!();
    let required = format!("(threshold {:.0}%)", report.threshold * 100.0);
    if report.succeeded() {
        println!(
            "{} {} {}",
            style("✓").green(),
            style(report.summary_line()).green().bold(),
            style(required).dim()
        );
        ExitCode::SUCCESS
    } else {
        println!(
            "{} {} {}",
            style("×").red(),
            style(report.summary_line()).red().bold(),
            style(required).dim()
        );
        ExitCode::FAILURE
    }
}

/// Reports a run that stopped before any case ran.
pub fn aborted(err: &ApiCheckError) -> ExitCode {
    println!();
    println!("{} {}", style("×").red(), style(err).red().bold());
    if let Some(hint) = err.recovery_suggestion() {
        println!("  {} {}", style("→").cyan(), hint);
    }
    ExitCode::FAILURE
}

use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::diagnostics::Warning;
use crate::engine::{Report, SubjectResult};
use crate::model::GRADE_MAX;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format an average on the grading scale, rounded to two decimals ("12.40/20")
pub fn format_average(average: f64) -> String {
    format!("{:.2}/{}", average, GRADE_MAX)
}

fn format_status(validated: bool, use_colors: bool) -> String {
    match (validated, use_colors) {
        (true, true) => "validated".green().to_string(),
        (false, true) => "not validated".red().to_string(),
        (true, false) => "validated".to_string(),
        (false, false) => "not validated".to_string(),
    }
}

fn format_subject_line(subject: &SubjectResult, indent: &str) -> String {
    let exams = if subject.exams.is_empty() {
        "no exams recorded".to_string()
    } else {
        subject
            .exams
            .iter()
            .map(|e| format!("{}/{} ({}%)", e.grade, GRADE_MAX, e.percentage))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "{}{} (weight {}): {}  [{}]",
        indent,
        subject.name,
        subject.weight,
        format_average(subject.average),
        exams
    )
}

/// Format a report as a human-readable multi-line summary
pub fn format_report(report: &Report, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let heading = |text: &str| {
        if use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    };

    lines.push(heading("Subjects"));
    if report.subjects.is_empty() {
        lines.push("  No subjects.".to_string());
    }
    for subject in &report.subjects {
        lines.push(format_subject_line(subject, "  "));
    }

    if let Some(ref blocks) = report.blocks {
        lines.push(String::new());
        lines.push(heading("Blocks"));
        for block in blocks {
            let name = if use_colors {
                block.name.cyan().to_string()
            } else {
                block.name.clone()
            };
            lines.push(format!(
                "  {}: {}  {}",
                name,
                format_average(block.average),
                format_status(block.validated, use_colors)
            ));
            if block.subjects.is_empty() {
                lines.push("    (no subjects)".to_string());
            }
            for subject in &block.subjects {
                lines.push(format!(
                    "    - {}: {}",
                    subject.name,
                    format_average(subject.average)
                ));
            }
        }
    }

    if let Some(ref semesters) = report.semesters {
        lines.push(String::new());
        lines.push(heading("Semesters"));
        for semester in semesters {
            let name = if use_colors {
                semester.name.yellow().to_string()
            } else {
                semester.name.clone()
            };
            lines.push(format!(
                "  {}: {} ({} subjects)",
                name,
                format_average(semester.average),
                semester.subjects.len()
            ));
        }
    }

    lines.push(String::new());
    let overall = &report.overall;
    let average = format_average(overall.average);
    let average = if !use_colors {
        average
    } else if overall.validated {
        average.green().bold().to_string()
    } else {
        average.red().bold().to_string()
    };
    lines.push(format!(
        "{} {}  {} (threshold {})",
        heading("Overall:"),
        average,
        format_status(overall.validated, use_colors),
        report.validation_threshold
    ));
    lines.push(format!("  {}", overall.evaluation.message()));

    if report.compensation_between_subjects || report.compensation_between_blocks {
        lines.push("  Compensation is enabled but not applied to validation.".to_string());
    }

    if !report.warnings.is_empty() {
        lines.push(String::new());
        lines.push(format_warnings(&report.warnings, use_colors));
    }

    lines.join("\n")
}

/// Format warnings as a bulleted list
pub fn format_warnings(warnings: &[Warning], use_colors: bool) -> String {
    warnings
        .iter()
        .map(|w| {
            if use_colors {
                format!("{} {}", "warning:".yellow().bold(), w)
            } else {
                format!("warning: {}", w)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize a report as pretty JSON for exporters
pub fn format_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}

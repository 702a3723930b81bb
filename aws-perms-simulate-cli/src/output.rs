//! Rendering of simulation reports and the progress bar

use anyhow::{Context, Result};
use aws_perms_simulate_core::{EvaluatedAction, SimulationReport};
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Progress bar on stderr, hidden when stderr is not a terminal
pub fn progress_bar(total: usize) -> ProgressBar {
    if !atty::is(atty::Stream::Stderr) {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos}/{len} actions [{elapsed_precise}<{eta_precise}]",
    )
    .map(|style| style.progress_chars("##-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());

    ProgressBar::new(total as u64).with_style(style)
}

/// Styling for a line written to a stream that may not be a terminal
pub fn paint(text: ColoredString, is_tty: bool) -> String {
    if is_tty {
        text.to_string()
    } else {
        text.clear().to_string()
    }
}

pub fn render(
    report: &SimulationReport,
    format: OutputFormat,
    allowed_only: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report, allowed_only)),
        OutputFormat::Json => render_json(report, allowed_only),
    }
}

fn render_text(report: &SimulationReport, allowed_only: bool) -> String {
    let mut out = String::new();
    let allowed = report.allowed().count();
    let denied = report.denied().count();

    if allowed_only {
        let _ = writeln!(out, "{}", "User Permissions:".green());
        for result in report.allowed() {
            let _ = writeln!(out, "{}", format!("  - {}", result.action).yellow());
        }
    } else {
        let _ = writeln!(
            out,
            "{}",
            format!("Permissions for {}:", report.principal_arn).green()
        );
        let width = report
            .results
            .iter()
            .map(|r| r.action.len())
            .max()
            .unwrap_or_default();
        for result in &report.results {
            let _ = writeln!(out, "{}", decision_line(result, width));
        }
    }

    let _ = writeln!(out, "{allowed} allowed, {denied} denied");
    out
}

fn decision_line(result: &EvaluatedAction, width: usize) -> String {
    let line = format!("  {:<width$}  {}", result.action, result.decision);
    if result.decision.is_allowed() {
        line.green().to_string()
    } else {
        line.red().to_string()
    }
}

fn render_json(report: &SimulationReport, allowed_only: bool) -> Result<String> {
    let json = if allowed_only {
        let mut filtered = report.clone();
        filtered.retain_allowed();
        serde_json::to_string_pretty(&filtered)
    } else {
        serde_json::to_string_pretty(report)
    };
    json.context("Failed to serialize simulation report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_perms_simulate_core::Decision;

    fn sample_report() -> SimulationReport {
        colored::control::set_override(false);
        SimulationReport::new(
            "arn:aws:iam::123456789012:user/alice".to_string(),
            vec![
                EvaluatedAction::new("s3:PutObject".into(), Decision::ImplicitDeny),
                EvaluatedAction::new("s3:GetObject".into(), Decision::Allowed),
                EvaluatedAction::new("iam:CreateUser".into(), Decision::ExplicitDeny),
            ],
        )
    }

    #[test]
    fn test_text_lists_every_action_with_its_decision() {
        let text = render(&sample_report(), OutputFormat::Text, false).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Permissions for arn:aws:iam::123456789012:user/alice:",
                "  iam:CreateUser  explicitDeny",
                "  s3:GetObject    allowed",
                "  s3:PutObject    implicitDeny",
                "1 allowed, 2 denied",
            ]
        );
    }

    #[test]
    fn test_text_allowed_only() {
        let text = render(&sample_report(), OutputFormat::Text, true).unwrap();

        assert!(text.contains("  - s3:GetObject"));
        assert!(!text.contains("s3:PutObject"));
        assert!(!text.contains("iam:CreateUser"));
        assert!(text.ends_with("1 allowed, 2 denied\n"));
    }

    #[test]
    fn test_paint_strips_colour_for_non_terminal() {
        assert_eq!(paint("Error:".red(), false), "Error:");
        assert_eq!(paint("Checking 2 permissions...".cyan(), false), "Checking 2 permissions...");
    }

    #[test]
    fn test_json_output() {
        let json = render(&sample_report(), OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["principalArn"], "arn:aws:iam::123456789012:user/alice");
        assert_eq!(value["results"].as_array().unwrap().len(), 3);
        assert_eq!(value["results"][0]["action"], "iam:CreateUser");
        assert_eq!(value["results"][0]["decision"], "explicitDeny");
    }

    #[test]
    fn test_json_allowed_only() {
        let json = render(&sample_report(), OutputFormat::Json, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value["results"],
            serde_json::json!([{"action": "s3:GetObject", "decision": "allowed"}])
        );
    }
}

//! Console rendering of checks and the final summary.

use colored::Colorize;
use std::fmt::Write;

use super::result::{CheckResult, RunSummary, Verdict};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn render_banner(banner: &str, base_url: &str) -> String {
    format!(
        "{} {}\n{}\n{}",
        "→".cyan().bold(),
        banner.bold(),
        format!("  target: {base_url}").dimmed(),
        rule()
    )
}

pub fn render_section(title: &str) -> String {
    format!("\n{} {}", "→".cyan().bold(), title.bold())
}

pub fn render_check(check: &CheckResult) -> String {
    let mut out = String::new();
    if check.passed {
        let _ = write!(out, "{} {}", "✓ PASS".green().bold(), check.name);
    } else {
        let _ = write!(out, "{} {}", "✗ FAIL".red().bold(), check.name);
    }
    if !check.detail.is_empty() {
        let _ = write!(out, "\n   {} {}", "Details:".dimmed(), check.detail);
    }
    out
}

pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", rule());
    let _ = writeln!(out, "{}", "TEST SUMMARY".bold());
    let _ = writeln!(out, "{}", rule());

    for scenario in &summary.scenarios {
        let status = if scenario.passed {
            "✓ PASS".green().bold()
        } else {
            "✗ FAIL".red().bold()
        };
        let _ = writeln!(out, "{status} {}", scenario.name);
        if !scenario.passed {
            for check in scenario.failed_checks() {
                let _ = writeln!(out, "    {} {}", "✗".red(), check.name);
            }
        }
    }

    let _ = writeln!(out, "\nTotal Tests: {}", summary.total());
    let _ = writeln!(out, "Passed: {}", summary.passed_count());
    let _ = writeln!(out, "Failed: {}", summary.failed_count());

    let critical = summary.critical_failures();
    if !critical.is_empty() {
        let _ = writeln!(out, "\n{}", "CRITICAL FAILURES:".red().bold());
        for name in &critical {
            let _ = writeln!(out, "   - {name}");
        }
    }

    let verdict = match summary.verdict() {
        Verdict::AllPassed => format!(
            "{} ALL TESTS PASSED! Backend API is working correctly.",
            "✓".green().bold()
        ),
        Verdict::CriticalFailures => format!(
            "{} CRITICAL ISSUES FOUND! {} critical test(s) failed.",
            "!".red().bold(),
            critical.len()
        ),
        Verdict::NonCriticalFailures => format!(
            "{} {} test(s) failed, but no critical failures.",
            "!".yellow().bold(),
            summary.failed_count()
        ),
    };
    let _ = write!(out, "\n{verdict}");
    out
}

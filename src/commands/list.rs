//! List command - prints the scenario plan

use colored::Colorize;

use crate::scenarios::{plan, Scenario};

/// Print the plan in execution order, marking critical scenarios.
pub fn execute() {
    for line in render(&plan()) {
        println!("{line}");
    }
}

fn render(plan: &[Scenario]) -> Vec<String> {
    plan.iter()
        .enumerate()
        .map(|(i, scenario)| {
            let mut line = format!("{:>2}. {}", i + 1, scenario.name);
            if scenario.is_critical() {
                line.push_str(&format!(" {}", "[critical]".red().bold()));
            }
            if scenario.lenient {
                line.push_str(&format!(" {}", "[best effort]".dimmed()));
            }
            line
        })
        .collect()
}

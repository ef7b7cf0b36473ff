//! # Plan Rendering
//!
//! Turns the core's structured output into terminal text.
//!
//! The core hands over grouped quantity lists and integer-cent figures; every
//! formatting decision — wording, layout, currency symbols — is made here.
//! A web host would make different choices against the same data.

use till_core::{
    DenomStatus, ExchangeStep, Money, StatusLine, StepAction, TakingsCheck, TillReport,
};

/// Formats cents for display, e.g. `-$5.50`.
///
/// Hosts own display formatting; the core's `Display` impl happens to match
/// what a terminal wants, so we lean on it.
pub fn format_money(amount: Money) -> String {
    amount.to_string()
}

/// One status-column row: `  $20   counted 12   target 10   Extra 2`.
fn render_status(line: &StatusLine) -> String {
    let status = match line.status {
        DenomStatus::Perfect => "Perfect!".to_string(),
        DenomStatus::Surplus { extra } => format!("Extra {extra}"),
        DenomStatus::Short { missing } => format!("Short {missing}"),
    };
    format!(
        "  {:<6} counted {:>3}   target {:>3}   {}",
        line.label, line.counted, line.target, status
    )
}

/// Renders a `- N × $X` group, or `- (none)` for an empty one.
fn render_lines(lines: &[till_core::CountLine]) -> String {
    if lines.is_empty() {
        return "    - (none)".to_string();
    }
    lines
        .iter()
        .map(|l| format!("    - {} × {}", l.quantity, l.label))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders one step as numbered instruction text.
pub fn render_step(step: &ExchangeStep) -> String {
    let body = match &step.action {
        StepAction::MoveToTakings { line } => format!(
            "Remove {} × {} from the float and place into takings.",
            line.quantity, line.label
        ),
        StepAction::FillFromTakings { moves } => format!(
            "Move these from takings into the float (no breaking needed):\n{}",
            render_lines(moves)
        ),
        StepAction::ChangeBagExchange {
            deposit,
            withdraw,
            into_float,
            leftovers,
        } => format!(
            "Use the change bag to fix the shortages:\n  Put into the change bag (from takings):\n{}\n  Take out from the change bag:\n{}\n  Put into the float:\n{}\n  Put the leftovers into takings:\n{}",
            render_lines(deposit),
            render_lines(withdraw),
            render_lines(into_float),
            render_lines(leftovers)
        ),
        StepAction::UnresolvedShortage {
            needed,
            available,
            outstanding,
        } => format!(
            "WARNING: not enough value in takings to fix the remaining shortages.\n  Needed {}, available {}. Still short:\n{}",
            format_money(*needed),
            format_money(*available),
            render_lines(outstanding)
        ),
    };
    format!("Step {}: {}", step.number, body)
}

/// Renders the whole report: statuses, steps, bank bag, summary.
pub fn render_report(report: &TillReport) -> String {
    let mut out = String::new();

    out.push_str("Float status\n");
    for line in &report.statuses {
        out.push_str(&render_status(line));
        out.push('\n');
    }

    out.push_str("\nSteps\n");
    if report.steps.is_empty() {
        out.push_str("  No swaps needed. Your float is already perfect!\n");
    } else {
        for step in &report.steps {
            out.push_str(&render_step(step));
            out.push('\n');
        }
    }

    if !report.takings_after.is_empty() {
        out.push_str("\nBank bag (takings)\n");
        out.push_str(&render_lines(&report.takings_after));
        out.push('\n');
    }

    out.push_str(&format!(
        "\nTotal in till now:  {}\nTarget float total: {}\n",
        format_money(report.summary.total_actual),
        format_money(report.summary.total_target)
    ));
    let takings = report.summary.expected_takings;
    if takings.is_negative() {
        out.push_str(&format!(
            "Till short by {}\n",
            format_money(takings.abs())
        ));
    } else {
        out.push_str(&format!("Takings to bank: {}\n", format_money(takings)));
    }

    out
}

/// Renders the takings double-check result.
pub fn render_check(check: &TakingsCheck) -> String {
    match check {
        TakingsCheck::Match { amount } => format!(
            "Perfect match! Your cash-up balances at {}.",
            format_money(*amount)
        ),
        TakingsCheck::Mismatch {
            counted,
            expected,
            difference,
        } => format!(
            "These don't match. Counted {}, expected {}. Difference: {}.\nRe-check counts and any exchanges.",
            format_money(*counted),
            format_money(*expected),
            format_money(*difference)
        ),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

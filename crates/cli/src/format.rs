//! Report → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): a short summary per run, e.g. `✓ Correct`
//! - **JSON** (`--json`): `serde_json::to_string_pretty` of the report

use lockwise_core::{Error, Transaction};
use lockwise_engine::{BankReport, CounterReport, InterleaveReport, PipelineReport};
use serde::Serialize;
use std::fmt::Write;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": format!("{}", err)
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Human => format!("(error) {}", err),
    }
}

fn format_json<T: Serialize>(report: &T) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Format a counter run.
pub fn format_counter(report: &CounterReport, mode: OutputMode) -> String {
    if mode == OutputMode::Json {
        return format_json(report);
    }

    let verdict = if report.is_consistent() {
        "✓ Correct".to_string()
    } else {
        format!(
            "✗ Race condition detected ({} updates lost)",
            report.lost_updates()
        )
    };
    format!(
        "{} counter\n  Expected: {}\n  Actual:   {}\n  {}\n  Time:     {:?}",
        report.mode, report.expected, report.actual, verdict, report.elapsed
    )
}

/// Format a pipeline run.
pub fn format_pipeline(report: &PipelineReport, mode: OutputMode) -> String {
    if mode == OutputMode::Json {
        return format_json(report);
    }

    let mut out = format!("Pipeline: {} items produced\n", report.produced);
    for consumer in &report.consumers {
        let _ = writeln!(
            out,
            "  {} consumed: {}",
            consumer.name,
            consumer.consumed.join(", ")
        );
    }
    let _ = write!(
        out,
        "  Items remaining ({}): {}",
        report.remaining.len(),
        report.remaining.join(", ")
    );
    if report.has_double_consumption() {
        out.push_str("\n  ✗ Item consumed more than once");
    }
    out
}

fn format_transaction(tx: &Transaction) -> String {
    let mut line = format!(
        "  [{}] {} {} {} {} -> {} {}",
        tx.timestamp().format("%H:%M:%S%.3f"),
        tx.client_id(),
        tx.kind(),
        tx.amount(),
        tx.initial_balance(),
        tx.final_balance(),
        tx.status()
    );
    if let Some(reason) = tx.reason() {
        let _ = write!(line, " ({})", reason);
    }
    line
}

/// Format a bank run, including the drained transaction log.
pub fn format_bank(report: &BankReport, mode: OutputMode) -> String {
    if mode == OutputMode::Json {
        return format_json(report);
    }

    let mut out = format!(
        "Bank: initial {}, final {}\n",
        report.initial_balance, report.final_balance
    );
    for stats in &report.clients {
        let _ = writeln!(
            out,
            "  {}: {} successful, {} failed",
            stats.client_id, stats.successful, stats.failed
        );
    }
    let _ = writeln!(
        out,
        "  Deposited {}, withdrew {}",
        report.total_deposited(),
        report.total_withdrawn()
    );
    out.push_str(if report.reconciles() {
        "  ✓ Balance reconciles with journal\n"
    } else {
        "  ✗ Balance does not reconcile with journal\n"
    });
    let _ = write!(out, "Transaction log ({} records):", report.journal.len());
    for tx in &report.journal {
        out.push('\n');
        out.push_str(&format_transaction(tx));
    }
    out
}

/// Format an interleave run.
pub fn format_interleave(report: &InterleaveReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => format_json(report),
        OutputMode::Human => report.lines.join("\n"),
    }
}

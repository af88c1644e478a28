use crate::models::smart::ControllerReport;
use serde_json::{json, Value};

const RULE_WIDTH: usize = 40;

/// Render the human-readable audit for a whole run.
pub fn generate(reports: &[ControllerReport], show_codes: bool) -> String {
    let mut out = String::new();

    out.push_str("SMART Attribute Status Check\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');

    if reports.is_empty() {
        out.push_str("No controllers found.\n");
        return out;
    }

    for report in reports {
        push_controller(&mut out, report, show_codes);
    }

    let flagged: usize = reports.iter().map(|r| r.drives.len()).sum();
    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "{} controller(s) checked, {} drive(s) with failing attributes\n",
        reports.len(), flagged
    ));
    out
}

fn push_controller(out: &mut String, report: &ControllerReport, show_codes: bool) {
    let id = report.controller;
    out.push_str(&format!("\nChecking Controller {}...\n", id));

    if let Some(diag) = &report.diagnostic {
        out.push_str(&format!("  ! {}\n", diag));
    }

    if report.is_healthy() {
        // No stats at all is not the same as healthy
        if report.diagnostic.is_none() {
            out.push_str(&format!("  ✅ All disks healthy on controller {}\n", id));
        }
        return;
    }

    out.push_str(&format!("  ⚠️  Potential issues found on controller {}:\n", id));
    for drive in &report.drives {
        out.push_str(&format!(
            "\n    Disk Channel {}, ID {}\n",
            drive.channel_label(), drive.id_label()
        ));
        for attr in &drive.attributes {
            if show_codes {
                out.push_str(&format!("      • {} ({}):\n", attr.name, attr.id));
            } else {
                out.push_str(&format!("      • {}:\n", attr.name));
            }
            out.push_str(&format!(
                "        Current: {} | Threshold: {}\n",
                attr.normalized, attr.threshold
            ));
            out.push_str("        Status: WARNING - Value below threshold!\n");
        }
    }
}

/// One-shot JSON snapshot of the run.
pub fn snapshot(reports: &[ControllerReport]) -> Value {
    json!({
        "version":     env!("CARGO_PKG_VERSION"),
        "timestamp":   chrono::Local::now().to_rfc3339(),
        "controllers": reports,
    })
}

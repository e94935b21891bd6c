//! Compose dialog rendering.

use std::fmt::Write as _;

use rolodex_compose::{AttemptResult, ComposeEndpoint, ComposeRequest, DispatchReport, Outcome};

/// Shows the URLs a send would use, without opening anything.
#[must_use]
pub fn render_preview(request: &ComposeRequest, endpoint: &ComposeEndpoint) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "To:      {}", request.to());
    let _ = writeln!(out, "Subject: {}", request.subject());
    let _ = writeln!(out, "Webmail: {}", request.web_compose_url(endpoint));
    let _ = writeln!(out, "Mailto:  {}", request.mailto_uri());
    out
}

/// Summarizes a dispatch for the user.
#[must_use]
pub fn render_report(report: &DispatchReport) -> String {
    let mut out = String::new();

    for attempt in &report.attempts {
        let status = match &attempt.result {
            AttemptResult::Succeeded => "ok".to_string(),
            AttemptResult::Blocked => "blocked".to_string(),
            AttemptResult::Failed(reason) => format!("failed ({reason})"),
            AttemptResult::Skipped => "skipped".to_string(),
        };
        let _ = writeln!(out, "  {:<15} {status}", attempt.strategy.label());
    }

    match &report.outcome {
        Outcome::Sent { via } => {
            let _ = writeln!(out, "Message handed to {}.", via.label());
        }
        Outcome::AwaitingManualAction(fallback) => {
            let _ = writeln!(out, "{}", fallback.message());
            let _ = writeln!(out, "Open default mail client: {}", fallback.mailto);
        }
    }
    out
}

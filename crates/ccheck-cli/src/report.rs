//! Markdown rendering for the bot's comments.
//!
//! Every report begins with a hidden HTML marker line. The marker is how
//! the next run finds the bot's previous comment of the same kind and
//! edits it instead of piling up new ones.

use std::collections::BTreeMap;

use ccheck_catalogue::{EntryMetadata, FetchOutcome};
use ccheck_core::{ActionList, EntryId, Tag};
use ccheck_schema::ValidationResult;

use crate::messages::{MSG_CHECKLIST, MSG_HEADER};

/// Marker of the descriptor validation report.
pub const VALIDATION_REPORT_MARKER: &str = "<!-- ccheck:validation-report -->";

/// Marker of the entry check report.
pub const PR_REPORT_MARKER: &str = "<!-- ccheck:pr-report -->";

/// Render validation results keyed by entry directory.
pub fn render_validation_report(results: &BTreeMap<String, ValidationResult>) -> String {
    let mut lines = vec![
        VALIDATION_REPORT_MARKER.to_string(),
        "## Challenge Validation Report\n".to_string(),
    ];

    for (path, result) in results {
        lines.push(format!("### `{path}`"));
        if result.valid {
            lines.push("✅ All checks passed".to_string());
        } else {
            lines.push("❌ Validation errors:".to_string());
            lines.extend(result.errors.iter().map(|e| format!("- {e}")));
        }
        lines.push(String::new());
    }

    if results.is_empty() {
        lines.push("No doc.json files found in challenge directories".to_string());
    }

    lines.join("\n")
}

/// Set when more entries were touched than one run may check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverLimit {
    pub count: usize,
    pub limit: usize,
}

/// Inputs of the entry check report.
#[derive(Debug, Clone, Copy)]
pub struct PrReport<'a> {
    pub outcomes: &'a [FetchOutcome],
    pub removed: &'a [EntryId],
    pub over_limit: Option<OverLimit>,
    pub recheck_label: &'a str,
}

/// Render the entry check report.
pub fn render_pr_report(report: &PrReport<'_>) -> String {
    let mut out = String::new();
    out.push_str(PR_REPORT_MARKER);
    out.push('\n');
    out.push_str("## Challenge Check Report\n");

    if let Some(OverLimit { count, limit }) = report.over_limit {
        out.push_str(&format!(
            "\n> ⚠️ This pull request touches {count} challenges, more than the {limit} \
             checked per run. Details were skipped; a maintainer can add the \
             `{}` label to check all of them.\n",
            report.recheck_label
        ));
    }

    for outcome in report.outcomes {
        out.push_str(&format!("\n### `{}`\n", outcome.entry));
        match &outcome.result {
            Ok(meta) => out.push_str(&metadata_table(meta)),
            Err(err) => out.push_str(&format!("❌ Failed to load challenge: {err}\n")),
        }
    }

    if !report.removed.is_empty() {
        out.push_str("\n### Removed challenges\n");
        for entry in report.removed {
            out.push_str(&format!("- `{entry}`\n"));
        }
    }

    out
}

fn metadata_table(meta: &EntryMetadata) -> String {
    let challenge = &meta.descriptor.challenge;
    let files = if meta.files.is_empty() {
        "-".to_string()
    } else {
        meta.files
            .iter()
            .map(|f| format!("`{}`", escape_cell(f)))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let rows = [
        ("Author", escape_cell(&meta.descriptor.author)),
        ("Difficulty", challenge.difficulty.to_string()),
        ("Category", escape_cell(&challenge.category)),
        ("Name", escape_cell(&challenge.name)),
        ("Files", files),
    ];

    let mut table = String::from("| Field | Value |\n|-------|-------|\n");
    for (field, value) in rows {
        table.push_str(&format!("| {field} | {value} |\n"));
    }
    table
}

/// Keep user text from breaking out of a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Greeting posted on `opened`; carries the maintainer checklist when an
/// entry is added.
pub fn render_greeting(actions: &ActionList) -> String {
    let mut reply = MSG_HEADER.to_string();
    if actions.has_tag(Tag::EntryAdded) {
        reply.push_str(MSG_CHECKLIST);
    }
    reply
}

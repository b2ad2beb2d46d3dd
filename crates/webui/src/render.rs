// tracediff - EVM execution trace diff viewer
// Copyright (C) 2025 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Server-rendered HTML for the web interface.
//!
//! Every page is assembled from the engine's view data in one pass and
//! replaces whatever the browser showed before; there is no client-side
//! script and no partial update.

use std::fmt::Write;
use tracediff_engine::{
    menu_state, split32, state_view, step_entries, step_view, summarize, transaction_label,
    transaction_view, CompareTable, DiffContext, MenuState, RenderError, ViewKind,
};

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render cell text, segmenting long values into stacked blocks.
pub fn cell(text: &str) -> String {
    let chunks = split32(text);
    if chunks.len() == 1 {
        escape(&chunks[0])
    } else {
        chunks.iter().fold(String::new(), |mut out, chunk| {
            let _ = write!(out, "<div>{}</div>", escape(chunk));
            out
        })
    }
}

/// Render a comparison table with the fixed three-column header.
pub fn table_html(table: &CompareTable, label_a: &str, label_b: &str) -> String {
    let mut out = String::new();

    if let Some(title) = &table.title {
        let _ = write!(out, "<h4>{}</h4>", escape(title));
    }

    let _ = write!(
        out,
        "<table><thead><tr><th>Field</th><th>{}</th><th>{}</th></tr></thead><tbody>",
        escape(label_a),
        escape(label_b)
    );
    for row in &table.rows {
        let class = if row.diverged { " class=\"diverged\"" } else { "" };
        let _ = write!(
            out,
            "<tr{class}><td>{}</td><td>{}</td><td>{}</td></tr>",
            cell(&row.field),
            cell(&row.lhs),
            cell(&row.rhs)
        );
    }
    out.push_str("</tbody></table>");

    out
}

/// Render the navigation bar. The transaction-scoped menus disable, link
/// directly, or open a dropdown depending on the transaction count.
pub fn nav_html(ctx: &DiffContext, active: ViewKind) -> String {
    let menu = menu_state(ctx.transaction_count());
    let mut out = String::from("<nav>");

    for view in [ViewKind::Opcodes, ViewKind::Transactions] {
        let class = if view == active { "menu active" } else { "menu" };
        match &menu {
            MenuState::Disabled => {
                let _ = write!(
                    out,
                    "<span class=\"{class} disabled\">{}</span>",
                    escape(view.title())
                );
            }
            MenuState::Single => {
                let _ = write!(
                    out,
                    "<a class=\"{class}\" href=\"{}\">{}</a>",
                    view_href(view, 0),
                    escape(view.title())
                );
            }
            MenuState::Dropdown(indices) => {
                let _ = write!(
                    out,
                    "<details class=\"{class}\"><summary>{}</summary><ul>",
                    escape(view.title())
                );
                for &index in indices {
                    let _ = write!(
                        out,
                        "<li><a href=\"{}\">TX #{index}</a></li>",
                        view_href(view, index)
                    );
                }
                out.push_str("</ul></details>");
            }
        }
    }

    let class = if active == ViewKind::State { "menu active" } else { "menu" };
    let _ = write!(out, "<a class=\"{class}\" href=\"/state\">State</a>");

    out.push_str("</nav>");
    out
}

fn view_href(view: ViewKind, tx: usize) -> String {
    match view {
        ViewKind::Opcodes => format!("/opcodes/{tx}/0"),
        ViewKind::Transactions => format!("/transactions/{tx}"),
        ViewKind::State => "/state".to_string(),
    }
}

/// Wrap body content in the page shell.
pub fn page(title: &str, nav: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>{title} | tracediff</title><style>{STYLE}</style></head>\
         <body>{nav}<main><h3>{title}</h3>{body}</main></body></html>",
        title = escape(title),
    )
}

const STYLE: &str = "\
body{font-family:monospace;margin:0}\
nav{background:#222;color:#eee;padding:8px;display:flex;gap:16px}\
nav a,nav span,nav summary{color:#eee;text-decoration:none;cursor:pointer}\
nav .active{font-weight:bold;text-decoration:underline}\
nav .disabled{color:#777;cursor:default}\
nav details{position:relative}\
nav details ul{position:absolute;list-style:none;margin:0;padding:8px;background:#333}\
nav details li a{display:block;padding:2px 8px}\
main{padding:16px}\
table{border-collapse:collapse;margin-bottom:16px}\
td,th{border-bottom:1px solid #ccc;padding:4px 12px;text-align:left;vertical-align:top}\
tr.diverged td{color:#c00}\
ul.steps{list-style:none;padding:0;max-height:70vh;overflow-y:auto;float:left;margin-right:24px}\
ul.steps a{text-decoration:none;color:inherit;display:block;padding:1px 8px}\
ul.steps .diverged a{color:#c00}\
ul.steps .selected a{background:#ddd}\
.missing{color:#c00}\
.error{color:#c00;font-weight:bold}";

/// The landing page: the per-transaction divergence digest.
pub fn index_page(ctx: &DiffContext) -> String {
    let nav = nav_html(ctx, ViewKind::Opcodes);

    let body = match summarize(ctx) {
        Ok(summaries) if summaries.is_empty() => {
            "<p>The payload contains no transactions.</p>".to_string()
        }
        Ok(summaries) => {
            let mut out = String::from(
                "<table><thead><tr><th>Transaction</th><th>Steps</th>\
                 <th>Diverged steps</th><th>Receipt fields</th></tr></thead><tbody>",
            );
            for summary in &summaries {
                let class = if summary.has_divergence() { " class=\"diverged\"" } else { "" };
                let _ = write!(
                    out,
                    "<tr{class}><td><a href=\"/opcodes/{idx}/0\">{label}</a></td>\
                     <td>{total}</td><td>{steps}</td><td>{receipt}</td></tr>",
                    idx = summary.index,
                    label = escape(&transaction_label(summary.index)),
                    total = summary.total_steps,
                    steps = summary.diverged_steps,
                    receipt = summary.receipt_divergences,
                );
            }
            out.push_str("</tbody></table>");
            out
        }
        Err(e) => error_body(&e),
    };

    page("Overview", &nav, &body)
}

/// The opcode view page for one step of one transaction.
pub fn opcodes_page(ctx: &DiffContext, tx: usize, step: usize) -> Result<String, RenderError> {
    let entries = step_entries(ctx, tx)?;
    let view = step_view(ctx, tx, step)?;
    let nav = nav_html(ctx, ViewKind::Opcodes);

    let mut body = String::from("<ul class=\"steps\">");
    for entry in &entries {
        let mut classes = Vec::new();
        if entry.diverged {
            classes.push("diverged");
        }
        if entry.index == step {
            classes.push("selected");
        }
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(" class=\"{}\"", classes.join(" "))
        };
        let _ = write!(
            body,
            "<li{class_attr}><a href=\"/opcodes/{tx}/{}\">{}</a></li>",
            entry.index,
            escape(&entry.label())
        );
    }
    body.push_str("</ul>");

    body.push_str(&table_html(&view.fields, &ctx.label_a, &ctx.label_b));
    for extra in &view.extras {
        body.push_str("<hr>");
        body.push_str(&table_html(extra, &ctx.label_a, &ctx.label_b));
    }

    Ok(page(&transaction_label(tx), &nav, &body))
}

/// The receipt view page for one transaction.
pub fn transactions_page(ctx: &DiffContext, tx: usize) -> Result<String, RenderError> {
    let table = transaction_view(ctx, tx)?;
    let nav = nav_html(ctx, ViewKind::Transactions);
    let body = table_html(&table, &ctx.label_a, &ctx.label_b);
    Ok(page(&transaction_label(tx), &nav, &body))
}

/// The post-state page.
pub fn state_page(ctx: &DiffContext) -> String {
    let view = state_view(ctx);
    let nav = nav_html(ctx, ViewKind::State);

    let body = if view.entries.is_empty() {
        "<p>No post-state accounts in payload.</p>".to_string()
    } else {
        let mut out = format!(
            "<table><thead><tr><th>Address</th><th>Balance</th><th>Code</th>\
             <th>{}</th></tr></thead><tbody>",
            escape(&ctx.label_b)
        );
        for entry in &view.entries {
            let status = if entry.in_comparison {
                "<td>known</td>".to_string()
            } else {
                "<td class=\"missing\">missing</td>".to_string()
            };
            let _ = write!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td>{status}</tr>",
                cell(&entry.address),
                cell(&entry.balance),
                cell(&entry.code)
            );
        }
        out.push_str("</tbody></table>");
        out
    };

    page("Post-execution state", &nav, &body)
}

/// The fail-closed page for a view that could not be built.
pub fn error_page(ctx: &DiffContext, error: &RenderError) -> String {
    let nav = nav_html(ctx, ViewKind::Opcodes);
    page("Unable to render", &nav, &error_body(error))
}

fn error_body(error: &RenderError) -> String {
    format!("<p class=\"error\">Unable to render: {}</p>", escape(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracediff_common::TracePayload;

    fn context(payload: serde_json::Value) -> DiffContext {
        let payload: TracePayload = serde_json::from_value(payload).unwrap();
        DiffContext::new(payload, "nimbus", "geth")
    }

    fn two_tx_context() -> DiffContext {
        let side = serde_json::json!({
            "block": { "transactions": [{}, {}] },
            "txTraces": [
                { "gas": 1, "returnValue": "0x", "structLogs": [{ "op": "STOP", "pc": 0 }] },
                { "gas": 2, "returnValue": "0x", "structLogs": [{ "op": "STOP", "pc": 0 }] }
            ],
            "receipts": [{}, {}]
        });
        context(serde_json::json!({ "reference": side, "comparison": side }))
    }

    #[test]
    fn test_escape_covers_html_metacharacters() {
        assert_eq!(escape("<a b=\"c\">&'"), "&lt;a b=&quot;c&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_cell_chunks_long_values() {
        let short = cell("0x5208");
        assert_eq!(short, "0x5208");

        let long = cell(&"a".repeat(40));
        assert_eq!(long.matches("<div>").count(), 2);
        assert!(long.contains(&"a".repeat(32)));
    }

    #[test]
    fn test_table_html_marks_diverged_rows() {
        let ctx = context(serde_json::json!({
            "reference": {
                "block": { "transactions": [{}] },
                "txTraces": [{ "gas": 1, "returnValue": "0x" }]
            },
            "comparison": {
                "block": { "transactions": [{}] },
                "txTraces": [{ "gas": 2, "returnValue": "0x" }]
            }
        }));
        let table = transaction_view(&ctx, 0).unwrap();
        let html = table_html(&table, &ctx.label_a, &ctx.label_b);
        assert!(html.contains("<th>nimbus</th><th>geth</th>"));
        assert!(html.contains("class=\"diverged\""));
    }

    #[test]
    fn test_nav_disabled_without_transactions() {
        let ctx = context(serde_json::json!({
            "reference": { "block": { "transactions": [] } },
            "comparison": { "block": { "transactions": [] } }
        }));
        let nav = nav_html(&ctx, ViewKind::Opcodes);
        assert!(nav.contains("disabled"));
        assert!(!nav.contains("href=\"/opcodes/0/0\""));
    }

    #[test]
    fn test_nav_single_transaction_links_directly() {
        let side = serde_json::json!({
            "block": { "transactions": [{}] },
            "txTraces": [{ "structLogs": [{ "op": "STOP" }] }]
        });
        let ctx = context(serde_json::json!({ "reference": side, "comparison": side }));
        let nav = nav_html(&ctx, ViewKind::Opcodes);
        assert!(nav.contains("href=\"/opcodes/0/0\""));
        assert!(!nav.contains("<details"));
    }

    #[test]
    fn test_nav_dropdown_lists_every_transaction() {
        let nav = nav_html(&two_tx_context(), ViewKind::Opcodes);
        assert!(nav.contains("<details"));
        assert!(nav.contains("TX #0"));
        assert!(nav.contains("TX #1"));
        assert!(nav.contains("href=\"/transactions/1\""));
    }

    #[test]
    fn test_opcodes_page_marks_selected_step() {
        let html = opcodes_page(&two_tx_context(), 0, 0).unwrap();
        assert!(html.contains("class=\"selected\""));
        assert!(html.contains("0 STOP"));
    }

    #[test]
    fn test_out_of_range_renders_error_page() {
        let ctx = two_tx_context();
        let error = opcodes_page(&ctx, 9, 0).unwrap_err();
        let html = error_page(&ctx, &error);
        assert!(html.contains("Unable to render"));
    }

    #[test]
    fn test_index_page_lists_transactions() {
        let html = index_page(&two_tx_context());
        assert!(html.contains("Tx #1"));
        assert!(html.contains("Tx #2"));
    }
}

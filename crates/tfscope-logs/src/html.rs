//! Markup adapter for the table view-model
//!
//! Produces the `<tbody>` rows and a self-contained report document. Every piece of
//! entry text goes through [`escape`] or [`truncate`] before it reaches the markup.

use std::fmt::Write;

use tfscope_types::{EntryFilter, Summary};

use crate::sanitize::{escape, truncate};
use crate::table::{CellView, Column, RowView, TableView, NO_DATA};

/// Budget for the raw-message tooltip attribute
pub const TOOLTIP_MAX_LEN: usize = 500;

/// Render the table body rows
///
/// An empty view yields exactly one placeholder row spanning all columns.
pub fn render_rows(view: &TableView) -> String {
    match view {
        TableView::Empty => format!(
            "<tr><td colspan=\"{}\" class=\"no-data\">{}</td></tr>\n",
            Column::ALL.len(),
            NO_DATA
        ),
        TableView::Rows(rows) => rows.iter().map(render_row).collect(),
    }
}

fn render_row(row: &RowView) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<tr data-level=\"{}\" data-resource=\"{}\">",
        row.level.class,
        row.resource_type.target.is_some()
    );
    let _ = write!(html, "<td class=\"line-number\">{}</td>", row.line_number);
    html.push_str(&render_cell(&row.timestamp, "timestamp", None));
    let _ = write!(
        html,
        "<td><span class=\"badge {}\">{}</span></td>",
        row.level.class,
        escape(Some(&row.level.label))
    );
    html.push_str(&render_cell(&row.resource_type, "resource", None));
    html.push_str(&render_cell(&row.section, "section", None));
    html.push_str(&render_cell(&row.message, "message", row.tooltip.as_deref()));
    html.push_str(&render_cell(&row.request_id, "request-id", None));
    html.push_str("</tr>\n");
    html
}

fn render_cell(cell: &CellView, class: &str, tooltip: Option<&str>) -> String {
    let title_attr = tooltip
        .map(|t| format!(" title=\"{}\"", truncate(Some(t), TOOLTIP_MAX_LEN)))
        .unwrap_or_default();

    match &cell.target {
        Some(target) => format!(
            "<td class=\"{} clickable\"{} data-title=\"{}\" data-content=\"{}\" onclick=\"openModal(this)\">{}</td>",
            class,
            title_attr,
            escape(Some(target.title)),
            escape(Some(&target.content)),
            escape(Some(&cell.display))
        ),
        None => format!(
            "<td class=\"{}\"{}>{}</td>",
            class,
            title_attr,
            escape(Some(&cell.display))
        ),
    }
}

/// Everything the standalone report needs
#[derive(Clone, Copy, Debug)]
pub struct ReportInput<'a> {
    pub log_id: Option<&'a str>,
    pub summary: &'a Summary,
    pub filter: &'a EntryFilter,
    pub search_term: &'a str,
    pub total_entries: usize,
    pub table: &'a TableView,
    pub generated_at: &'a str,
}

/// Client-side narrowing controls: (label, `data-filter` value)
const REPORT_FILTERS: [(&str, &str); 6] = [
    ("All", "all"),
    ("Errors", "badge-error"),
    ("Warnings", "badge-warning"),
    ("Info", "badge-info"),
    ("Debug", "badge-debug"),
    ("With resource", "resource"),
];

/// Render a standalone HTML document of the current view
pub fn render_report(input: &ReportInput<'_>) -> String {
    let log_id = escape(input.log_id.or(Some("-")));
    let summary = input.summary;
    let search = if input.search_term.trim().is_empty() {
        "none".to_string()
    } else {
        format!("&quot;{}&quot;", escape(Some(input.search_term.trim())))
    };

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>tfscope - {log_id}</title>\n<style>{REPORT_CSS}</style>\n</head>\n<body>\n"
    );
    let _ = write!(html, "<h1>Terraform log {log_id}</h1>\n");
    let _ = write!(
        html,
        "<div class=\"stats\"><ul>\
         <li>Lines processed: {}</li>\
         <li>Errors: {}</li>\
         <li>Warnings: {}</li>\
         <li>Unique requests: {}</li>\
         <li>JSON blocks: {}</li>\
         </ul></div>\n",
        summary.total_lines,
        summary.errors(),
        summary.warnings(),
        summary.unique_requests,
        if summary.has_json_blocks { "yes" } else { "no" }
    );
    let _ = write!(
        html,
        "<p class=\"view\">Filter: {} &middot; Search: {} &middot; Showing {} of {} entries (generated {})</p>\n",
        escape(Some(&input.filter.label())),
        search,
        input.table.rows().len(),
        input.total_entries,
        escape(Some(input.generated_at))
    );

    html.push_str("<div class=\"controls\">");
    for (label, filter) in REPORT_FILTERS {
        let active = if filter == "all" { " active" } else { "" };
        let _ = write!(
            html,
            "<button class=\"filter-btn{active}\" data-filter=\"{filter}\" onclick=\"setFilter(this)\">{label}</button>"
        );
    }
    html.push_str(
        "<input id=\"searchInput\" type=\"search\" placeholder=\"Search logs...\" oninput=\"applyFilters()\">",
    );
    html.push_str("</div>\n");

    html.push_str("<table>\n<thead><tr>");
    for column in Column::ALL {
        let _ = write!(html, "<th>{}</th>", column.header());
    }
    html.push_str("</tr></thead>\n<tbody id=\"logTableBody\">\n");
    html.push_str(&render_rows(input.table));
    html.push_str("</tbody>\n</table>\n");
    html.push_str(REPORT_MODAL);
    let _ = write!(html, "<script>{REPORT_SCRIPT}</script>\n</body>\n</html>\n");
    html
}

const REPORT_CSS: &str = r##"
body { font-family: sans-serif; margin: 2rem; color: #212529; }
table { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
th, td { border-bottom: 1px solid #dee2e6; padding: 0.3rem 0.5rem; text-align: left; vertical-align: top; }
td.clickable { cursor: pointer; }
td.clickable:hover { background: #e9ecef; }
td.no-data { text-align: center; color: #6c757d; padding: 2rem; }
.badge { padding: 0.1rem 0.4rem; border-radius: 0.25rem; font-size: 0.75rem; font-weight: bold; color: #fff; }
.badge-trace { background: #6c757d; }
.badge-debug { background: #17a2b8; }
.badge-info { background: #28a745; }
.badge-warning { background: #ffc107; color: #212529; }
.badge-error { background: #dc3545; }
.badge-default { background: #adb5bd; color: #212529; }
.modal { display: none; position: fixed; inset: 0; background: rgba(0, 0, 0, 0.5); align-items: center; justify-content: center; }
.modal-content { background: #fff; width: 80%; max-height: 80%; overflow: auto; padding: 1rem; border-radius: 0.5rem; }
.modal-header { display: flex; justify-content: space-between; align-items: center; }
#modalBody { white-space: pre-wrap; word-break: break-all; }
.controls { margin: 1rem 0; display: flex; gap: 0.5rem; flex-wrap: wrap; }
.filter-btn { border: 1px solid #6c757d; background: #fff; border-radius: 0.25rem; padding: 0.2rem 0.6rem; cursor: pointer; }
.filter-btn.active { background: #6c757d; color: #fff; }
#searchInput { flex: 1; min-width: 12rem; padding: 0.2rem 0.5rem; }
"##;

const REPORT_MODAL: &str = r##"<div id="modal" class="modal" onclick="if (event.target === this) closeModal()">
<div class="modal-content">
<div class="modal-header"><h3 id="modalTitle"></h3><button onclick="closeModal()">&times;</button></div>
<pre id="modalBody"></pre>
<button id="copyBtn" onclick="copyModalContent()">Copy</button>
</div>
</div>
"##;

const REPORT_SCRIPT: &str = r##"
let currentModalContent = '';
let copyTimer = null;
let currentFilter = 'all';

function setFilter(btn) {
    document.querySelectorAll('.filter-btn').forEach((b) => b.classList.remove('active'));
    btn.classList.add('active');
    currentFilter = btn.dataset.filter;
    applyFilters();
}

function applyFilters() {
    const needle = document.getElementById('searchInput').value.trim().toLowerCase();
    document.querySelectorAll('#logTableBody tr[data-level]').forEach((row) => {
        const byFilter = currentFilter === 'all'
            || (currentFilter === 'resource' ? row.dataset.resource === 'true' : row.dataset.level === currentFilter);
        const bySearch = !needle || row.textContent.toLowerCase().includes(needle);
        row.style.display = byFilter && bySearch ? '' : 'none';
    });
}

function openModal(cell) {
    currentModalContent = cell.dataset.content;
    document.getElementById('modalTitle').textContent = cell.dataset.title;
    document.getElementById('modalBody').textContent = currentModalContent;
    document.getElementById('modal').style.display = 'flex';
    document.body.style.overflow = 'hidden';
}

function closeModal() {
    document.getElementById('modal').style.display = 'none';
    document.body.style.overflow = '';
}

document.addEventListener('keydown', (e) => {
    if (e.key === 'Escape' && document.getElementById('modal').style.display === 'flex') {
        closeModal();
    }
});

function legacyCopy(text) {
    const area = document.createElement('textarea');
    area.value = text;
    document.body.appendChild(area);
    area.select();
    let ok = false;
    try {
        ok = document.execCommand('copy');
    } finally {
        document.body.removeChild(area);
    }
    return ok;
}

function acknowledgeCopy() {
    const btn = document.getElementById('copyBtn');
    btn.textContent = 'Copied!';
    clearTimeout(copyTimer);
    copyTimer = setTimeout(() => { btn.textContent = 'Copy'; }, 2000);
}

async function copyModalContent() {
    try {
        if (!navigator.clipboard) {
            throw new Error('clipboard unavailable');
        }
        await navigator.clipboard.writeText(currentModalContent);
        acknowledgeCopy();
    } catch (e) {
        if (legacyCopy(currentModalContent)) {
            acknowledgeCopy();
        } else {
            alert('Copy failed');
        }
    }
}
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{build_table, RenderOptions};
    use tfscope_types::{LogEntry, LogLevel};

    #[test]
    fn test_empty_view_renders_one_placeholder_row() {
        let html = render_rows(&TableView::Empty);
        assert_eq!(html.matches("<tr>").count(), 1);
        assert!(html.contains("colspan=\"7\""));
        assert!(html.contains(NO_DATA));
    }

    #[test]
    fn test_markup_in_entries_is_escaped() {
        let entries = vec![
            LogEntry::new(1, LogLevel::Error, "<script>alert('x')</script>")
                .with_request_id("a\"b"),
        ];
        let html = render_rows(&build_table(&entries, &RenderOptions::default()));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("data-content=\"a&quot;b\""));
        assert!(html.contains("<span class=\"badge badge-error\">ERROR</span>"));
    }

    #[test]
    fn test_message_cell_truncated_before_escaping() {
        let message = format!("{}&tail", "m".repeat(150));
        let entries = vec![LogEntry::new(1, LogLevel::Info, message.clone())];
        let html = render_rows(&build_table(&entries, &RenderOptions::default()));
        let expected_display = truncate(Some(&message), 150);
        assert!(html.contains(&format!(">{}</td>", expected_display)));
        // full content stays reachable through the overlay target
        assert!(html.contains("&amp;tail\""));
    }

    #[test]
    fn test_render_is_idempotent() {
        let entries = vec![
            LogEntry::new(1, LogLevel::Info, "a").with_timestamp("2024-01-15T10:30:00.500Z"),
            LogEntry::new(2, LogLevel::from("odd"), "b"),
        ];
        let view = build_table(&entries, &RenderOptions::default());
        let first = render_rows(&view);
        assert_eq!(first, render_rows(&view));
        assert_eq!(first.matches("<tr ").count(), 2);
        assert!(first.contains("badge-default"));
    }

    #[test]
    fn test_report_contains_summary_and_modal() {
        let summary = Summary {
            total_lines: 2,
            error_count: 1,
            ..Summary::default()
        };
        let view = TableView::Empty;
        let html = render_report(&ReportInput {
            log_id: Some("log_1"),
            summary: &summary,
            filter: &EntryFilter::Level(LogLevel::Error),
            search_term: "<b>",
            total_entries: 2,
            table: &view,
            generated_at: "2024-01-15 10:30",
        });
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Lines processed: 2"));
        assert!(html.contains("Errors: 1"));
        assert!(html.contains("Search: &quot;&lt;b&gt;&quot;"));
        assert!(html.contains("id=\"modalBody\""));
        assert!(html.contains("function copyModalContent"));
    }

    #[test]
    fn test_rows_carry_filter_attributes() {
        let entries = vec![
            LogEntry::new(1, LogLevel::Error, "boom").with_resource_type("aws_instance.web"),
            LogEntry::new(2, LogLevel::Info, "fine"),
        ];
        let html = render_rows(&build_table(&entries, &RenderOptions::default()));
        assert!(html.contains("<tr data-level=\"badge-error\" data-resource=\"true\">"));
        assert!(html.contains("<tr data-level=\"badge-info\" data-resource=\"false\">"));
    }

    #[test]
    fn test_report_has_filter_controls() {
        let summary = Summary::default();
        let view = TableView::Empty;
        let html = render_report(&ReportInput {
            log_id: None,
            summary: &summary,
            filter: &EntryFilter::All,
            search_term: "",
            total_entries: 0,
            table: &view,
            generated_at: "2024-01-15 10:30",
        });
        for (label, filter) in REPORT_FILTERS {
            assert!(html.contains(&format!("data-filter=\"{filter}\" onclick=\"setFilter(this)\">{label}</button>")));
        }
        assert!(html.contains("id=\"searchInput\""));
        assert!(html.contains("function applyFilters"));
    }
}

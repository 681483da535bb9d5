use tfscope_logs::{
    build_table, render_rows, visible_entries, EntryFilter, LogLevel, LogStore, RenderOptions,
    TableView, TerraformLogParser, UploadResponse,
};

const UPLOAD: &str = r#"{
    "log_id": "log_1",
    "message": "Log file processed successfully",
    "summary": {
        "total_lines": 5,
        "levels": {"error": 2, "warning": 1, "info": 2},
        "sections": {"general": 5},
        "unique_requests": 1,
        "has_json_blocks": true
    },
    "logs": [
        {"line_number": 1, "timestamp": "2024-01-15T10:30:00Z", "level": "info", "message": "Terraform initialized"},
        {"line_number": 2, "timestamp": "2024-01-15T10:30:01Z", "level": "error", "message": "Error: connection timeout", "tf_req_id": "req-7"},
        {"line_number": 3, "timestamp": "2024-01-15T10:30:02Z", "level": "warning", "message": "Deprecated attribute"},
        {"line_number": 4, "timestamp": null, "level": "error", "message": "Error: access denied"},
        {"line_number": 5, "timestamp": "2024-01-15T10:30:04Z", "level": "info", "message": "<script>alert(1)</script>"}
    ]
}"#;

fn loaded_store() -> LogStore {
    let response: UploadResponse = serde_json::from_str(UPLOAD).unwrap();
    let mut store = LogStore::new();
    store.replace(response);
    store
}

#[test]
fn test_upload_payload_decodes_with_aliases() {
    let store = loaded_store();
    assert_eq!(store.len(), 5);
    assert_eq!(store.summary().errors(), 2);
    assert_eq!(store.summary().warnings(), 1);
    assert_eq!(store.entries()[1].request_id.as_deref(), Some("req-7"));
    assert_eq!(store.entries()[3].timestamp, "");
}

#[test]
fn test_filter_then_search_narrows_to_one_row() {
    let mut store = loaded_store();
    store.set_filter(EntryFilter::Level(LogLevel::Error));
    assert_eq!(visible_entries(&store).len(), 2);

    store.set_search_term("timeout");
    let visible = visible_entries(&store);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].line_number, 2);

    let view = build_table(visible, &RenderOptions::default());
    assert_eq!(view.rows().len(), 1);
    assert_eq!(view.rows()[0].request_id.display, "req-7");
}

#[test]
fn test_no_matches_renders_placeholder_row() {
    let mut store = loaded_store();
    store.set_search_term("nothing matches this");
    let view = build_table(visible_entries(&store), &RenderOptions::default());
    assert_eq!(view, TableView::Empty);

    let html = render_rows(&view);
    assert_eq!(html.matches("<tr>").count(), 1);
    assert!(html.contains("No data available"));
}

#[test]
fn test_markup_in_messages_is_escaped_in_html() {
    let store = loaded_store();
    let view = build_table(visible_entries(&store), &RenderOptions::default());
    let html = render_rows(&view);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn test_new_upload_resets_view_state() {
    let mut store = loaded_store();
    store.set_filter(EntryFilter::Level(LogLevel::Warning));
    store.set_search_term("deprecated");

    let parsed = TerraformLogParser::new().parse(
        r#"{"@level":"info","@message":"fresh upload","@timestamp":"2024-02-01T00:00:00Z"}"#,
    );
    store.replace(UploadResponse {
        log_id: "log_2".into(),
        message: "ok".into(),
        summary: parsed.summary,
        logs: parsed.logs,
    });

    assert_eq!(store.active_filter(), &EntryFilter::All);
    assert_eq!(store.search_term(), "");
    assert_eq!(visible_entries(&store).len(), 1);
    assert_eq!(store.log_id(), Some("log_2"));
}

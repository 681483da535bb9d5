use tfscope_types::{EntryFilter, LogEntry, Summary, UploadResponse};

/// The log collection from the last accepted upload plus the active view state
///
/// The collection is only ever replaced as a whole; filter and search reset on
/// every replacement.
#[derive(Debug, Default)]
pub struct LogStore {
    /// Entries in original line order
    entries: Vec<LogEntry>,

    /// Backend id of the loaded upload
    log_id: Option<String>,

    /// Backend status message for the loaded upload
    status_message: String,

    summary: Summary,

    active_filter: EntryFilter,

    active_search_term: String,

    /// Bumped on every change that affects the visible view
    revision: u64,
}

impl LogStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection with an accepted upload
    pub fn replace(&mut self, response: UploadResponse) {
        let revision = self.revision + 1;
        let mut summary = response.summary;
        if summary.log_id.is_none() {
            summary.log_id = Some(response.log_id.clone());
        }

        tracing::debug!(
            log_id = %response.log_id,
            entries = response.logs.len(),
            "replacing log store"
        );

        *self = Self {
            entries: response.logs,
            log_id: Some(response.log_id),
            status_message: response.message,
            summary,
            active_filter: EntryFilter::All,
            active_search_term: String::new(),
            revision,
        };
    }

    /// Select the single active filter; search is left untouched
    pub fn set_filter(&mut self, filter: EntryFilter) {
        if self.active_filter != filter {
            self.active_filter = filter;
            self.revision += 1;
        }
    }

    /// Set the raw search term as typed
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if self.active_search_term != term {
            self.active_search_term = term;
            self.revision += 1;
        }
    }

    pub fn clear_search(&mut self) {
        self.set_search_term(String::new());
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn active_filter(&self) -> &EntryFilter {
        &self.active_filter
    }

    pub fn search_term(&self) -> &str {
        &self.active_search_term
    }

    pub fn log_id(&self) -> Option<&str> {
        self.log_id.as_deref()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Total entry count
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfscope_types::LogLevel;

    fn response(log_id: &str, count: u64) -> UploadResponse {
        UploadResponse {
            log_id: log_id.to_string(),
            message: "File parsed successfully".to_string(),
            summary: Summary {
                total_lines: count,
                ..Summary::default()
            },
            logs: (1..=count)
                .map(|n| LogEntry::new(n, LogLevel::Info, format!("line {}", n)))
                .collect(),
        }
    }

    #[test]
    fn test_starts_empty_with_defaults() {
        let store = LogStore::new();
        assert!(store.is_empty());
        assert_eq!(store.active_filter(), &EntryFilter::All);
        assert_eq!(store.search_term(), "");
        assert_eq!(store.log_id(), None);
    }

    #[test]
    fn test_replace_resets_view_state() {
        let mut store = LogStore::new();
        store.replace(response("log_1", 3));
        store.set_filter(EntryFilter::Level(LogLevel::Error));
        store.set_search_term("timeout");

        store.replace(response("log_2", 2));

        assert_eq!(store.len(), 2);
        assert_eq!(store.log_id(), Some("log_2"));
        assert_eq!(store.summary().log_id.as_deref(), Some("log_2"));
        assert_eq!(store.active_filter(), &EntryFilter::All);
        assert_eq!(store.search_term(), "");
    }

    #[test]
    fn test_replace_never_merges() {
        let mut store = LogStore::new();
        store.replace(response("log_1", 5));
        store.replace(response("log_2", 1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].message, "line 1");
    }

    #[test]
    fn test_revision_changes_only_on_effective_updates() {
        let mut store = LogStore::new();
        let start = store.revision();

        store.set_filter(EntryFilter::All);
        assert_eq!(store.revision(), start);

        store.set_search_term("x");
        store.set_search_term("x");
        assert_eq!(store.revision(), start + 1);

        store.replace(response("log_1", 1));
        assert!(store.revision() > start + 1);
    }

    #[test]
    fn test_filter_change_keeps_search() {
        let mut store = LogStore::new();
        store.set_search_term("apply");
        store.set_filter(EntryFilter::WithResource);
        assert_eq!(store.search_term(), "apply");
    }
}

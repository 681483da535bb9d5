use tfscope_types::{EntryFilter, LogEntry, LogLevel};

use crate::store::LogStore;

/// Level predicate and search predicate compiled from the store state
#[derive(Clone, Debug)]
pub struct ViewFilter {
    filter: EntryFilter,

    /// Trimmed, lower-cased search term (None = no search)
    needle: Option<String>,
}

impl ViewFilter {
    pub fn new(filter: EntryFilter, search_term: &str) -> Self {
        let needle = search_term.trim().to_lowercase();
        Self {
            filter,
            needle: (!needle.is_empty()).then_some(needle),
        }
    }

    /// Compile the active filter and search term of a store
    pub fn from_store(store: &LogStore) -> Self {
        Self::new(store.active_filter().clone(), store.search_term())
    }

    /// Check if a log entry passes both predicates
    pub fn matches(&self, entry: &LogEntry) -> bool {
        self.matches_filter(entry) && self.matches_search(entry)
    }

    fn matches_filter(&self, entry: &LogEntry) -> bool {
        match &self.filter {
            EntryFilter::All => true,
            EntryFilter::Level(level) => entry.level == *level,
            EntryFilter::WithResource => entry.resource_type.is_some(),
        }
    }

    fn matches_search(&self, entry: &LogEntry) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };

        entry
            .search_targets()
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle.as_str()))
    }
}

/// Entries passing the store's active filter and search, in original order
pub fn visible_entries(store: &LogStore) -> Vec<&LogEntry> {
    let view = ViewFilter::from_store(store);
    let visible: Vec<&LogEntry> = store.entries().iter().filter(|e| view.matches(e)).collect();

    tracing::debug!(
        total = store.len(),
        visible = visible.len(),
        filter = ?store.active_filter(),
        "filter pass"
    );

    visible
}

/// Indices into `store.entries()` of the visible entries
pub fn visible_indices(store: &LogStore) -> Vec<usize> {
    let view = ViewFilter::from_store(store);
    store
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| view.matches(e))
        .map(|(i, _)| i)
        .collect()
}

/// Counts per log level
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub trace: usize,
    pub debug: usize,
    pub info: usize,
    pub warning: usize,
    pub error: usize,
    pub other: usize,
}

impl LevelCounts {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a LogEntry>) -> Self {
        let mut counts = Self::default();
        for entry in entries {
            match entry.level {
                LogLevel::Trace => counts.trace += 1,
                LogLevel::Debug => counts.debug += 1,
                LogLevel::Info => counts.info += 1,
                LogLevel::Warning => counts.warning += 1,
                LogLevel::Error => counts.error += 1,
                LogLevel::Other(_) => counts.other += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.trace + self.debug + self.info + self.warning + self.error + self.other
    }
}

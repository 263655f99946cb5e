//! Application state: the canonical record set plus the active query.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::info;

use crate::data::{prepare, RecordSet, SimulationRecord, StatusCounts};
use crate::export::write_csv;
use crate::query::{QueryEngine, QueryState, SortKey, SortSpec};
use crate::source::DataSource;

/// Main application state.
///
/// Owns the data source. A payload is only installed when this value polls
/// it, so nothing is applied once the `App` has been dropped.
pub struct App {
    source: Box<dyn DataSource>,
    records: RecordSet,
    pub load_error: Option<String>,

    // Search/sort
    pub query: QueryState,
    engine: QueryEngine,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from the given data source.
    pub fn new(source: Box<dyn DataSource>) -> Self {
        Self {
            source,
            records: RecordSet::default(),
            load_error: None,
            query: QueryState::default(),
            engine: QueryEngine::new(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Poll the data source and install a completed load.
    ///
    /// Returns `true` if a new canonical set was installed. A failed load
    /// installs an empty set and keeps the error for display.
    pub fn reload_data(&mut self) -> bool {
        let Some(payload) = self.source.poll() else {
            return false;
        };

        let records = prepare(&payload);
        info!(
            source = self.source.description(),
            candidates = payload.len(),
            records = records.len(),
            "installed record set"
        );

        self.records = RecordSet::new(self.records.revision() + 1, records);
        self.load_error = self.source.error().map(str::to_string);
        true
    }

    /// Poll until a load completes or `timeout` elapses.
    ///
    /// Returns `true` if a set was installed. The source makes progress on its
    /// own runtime; this only sleeps between polls.
    pub fn wait_for_load(&mut self, timeout: Duration) -> bool {
        let start = Instant::now();
        loop {
            if self.reload_data() {
                return true;
            }
            if start.elapsed() >= timeout {
                return false;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
    }

    /// Whether at least one load has been installed.
    pub fn is_loaded(&self) -> bool {
        self.records.revision() > 0
    }

    /// The canonical (unfiltered, unsorted) set.
    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// The rows to display: filtered by the search, then sorted.
    pub fn visible_records(&mut self) -> Arc<[SimulationRecord]> {
        self.engine.run(&self.records, &self.query)
    }

    /// Per-status counts over the canonical set.
    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts::from_records(self.records.records())
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    /// Append a character to the search text.
    pub fn search_push(&mut self, c: char) {
        self.query.search.push(c);
    }

    /// Remove the last character from the search text.
    pub fn search_pop(&mut self) {
        self.query.search.pop();
    }

    pub fn clear_search(&mut self) {
        self.query.search.clear();
    }

    /// Sort by a column, toggling direction if it is already ascending.
    pub fn select_sort_column(&mut self, key: SortKey) {
        self.query.select_column(key);
    }

    pub fn set_sort(&mut self, spec: Option<SortSpec>) {
        self.query.sort = spec;
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Export the currently displayed rows as CSV.
    ///
    /// Returns the number of rows written.
    pub fn export_csv(&mut self, path: &Path) -> Result<usize> {
        let rows = self.visible_records();
        write_csv(&rows, path)?;
        info!(rows = rows.len(), path = %path.display(), "exported CSV");
        self.set_status_message(format!("Exported {} rows to {}", rows.len(), path.display()));
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortDirection;
    use crate::source::{ChannelSource, FileSource};
    use serde_json::json;

    fn loaded_app() -> (crate::source::PayloadSender, App) {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source));
        tx.send(Some(vec![
            json!({"id": "sim001", "timestamp": "2025-05-01T10:00:00Z", "value": 120,
                   "parameter_set": "Alpha", "status": "completed"}),
            json!({"id": "sim002", "timestamp": "2025-05-01T10:05:00Z", "value": null,
                   "parameter_set": "BetaSet", "status": "running"}),
            json!({"id": 3}),
            json!({"id": "sim003", "timestamp": "2025-05-01T10:10:00Z", "value": 30,
                   "parameter_set": "GammaSet", "status": "running"}),
        ]))
        .unwrap();
        assert!(app.reload_data());
        (tx, app)
    }

    fn ids(records: &[SimulationRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_new_app_is_empty() {
        let (_tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source));
        assert!(!app.is_loaded());
        assert!(!app.reload_data());
        assert!(app.visible_records().is_empty());
        assert_eq!(app.source_description(), "channel: test");
    }

    #[test]
    fn test_load_validates_and_transforms() {
        let (_tx, mut app) = loaded_app();
        assert!(app.is_loaded());
        assert_eq!(app.records().len(), 3);
        let rows = app.visible_records();
        assert_eq!(ids(&rows), vec!["sim001", "sim002", "sim003"]);
        assert_eq!(rows[2].performance_index(), Some(15.0));
    }

    #[test]
    fn test_status_counts_ignore_query() {
        let (_tx, mut app) = loaded_app();
        app.set_search("Alpha");
        let counts = app.status_counts();
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![("completed", 1), ("running", 2)]);
    }

    #[test]
    fn test_search_editing() {
        let (_tx, mut app) = loaded_app();
        for c in "Gam".chars() {
            app.search_push(c);
        }
        assert_eq!(ids(&app.visible_records()), vec!["sim003"]);
        app.search_pop();
        app.search_pop();
        assert_eq!(app.query.search, "G");
        app.set_search("[");
        assert_eq!(app.visible_records().len(), 3);
        app.clear_search();
        assert!(app.query.search.is_empty());
    }

    #[test]
    fn test_sort_controls() {
        let (_tx, mut app) = loaded_app();
        app.select_sort_column(SortKey::Value);
        assert_eq!(ids(&app.visible_records()), vec!["sim002", "sim003", "sim001"]);
        app.select_sort_column(SortKey::Value);
        assert_eq!(ids(&app.visible_records()), vec!["sim001", "sim003", "sim002"]);
        assert_eq!(app.query.sort.map(|s| s.direction), Some(SortDirection::Desc));

        app.set_sort(Some(SortSpec::asc(SortKey::ParameterSet)));
        assert_eq!(ids(&app.visible_records()), vec!["sim001", "sim002", "sim003"]);
        app.set_sort(None);
        assert_eq!(ids(&app.visible_records()), vec!["sim001", "sim002", "sim003"]);
    }

    #[test]
    fn test_reload_replaces_set_wholesale() {
        let (tx, mut app) = loaded_app();
        let before = app.visible_records();
        tx.send(Some(vec![json!({"id": "only", "timestamp": "2025-05-02", "value": 1,
            "parameter_set": "A", "status": "pending"})]))
            .unwrap();
        assert!(app.reload_data());
        assert_eq!(ids(&app.visible_records()), vec!["only"]);
        // Previously handed-out rows are untouched
        assert_eq!(before.len(), 3);
    }

    #[test]
    fn test_failed_load_installs_empty_set() {
        let mut app = App::new(Box::new(FileSource::new("/nonexistent/simulation_data.json")));
        assert!(app.wait_for_load(Duration::from_millis(100)));
        assert!(app.is_loaded());
        assert!(app.records().is_empty());
        assert!(app.load_error.as_deref().unwrap().contains("Read error"));
    }

    #[test]
    fn test_export_writes_visible_rows() {
        let (_tx, mut app) = loaded_app();
        app.set_search("running");
        app.set_sort(Some(SortSpec::desc(SortKey::Id)));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        assert_eq!(app.export_csv(&path).unwrap(), 2);

        let text = std::fs::read_to_string(&path).unwrap();
        let ids: Vec<_> = text.lines().skip(1).map(|l| l.split(',').next().unwrap()).collect();
        assert_eq!(ids, vec!["sim003", "sim002"]);
        assert!(app.get_status_message().unwrap().starts_with("Exported 2 rows"));
    }
}

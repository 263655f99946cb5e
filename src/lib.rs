//! # simulation-dashboard
//!
//! Load simulation-run records, validate them, derive a performance index, and
//! search, sort and export the result.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           App                                │
//! │  ┌─────────┐    ┌──────────┐    ┌──────────┐    ┌─────────┐  │
//! │  │ source  │───▶│   data   │───▶│  query   │───▶│ export  │  │
//! │  │ (input) │    │(validate,│    │ (filter, │    │  (CSV)  │  │
//! │  └─────────┘    │transform)│    │   sort)  │    └─────────┘  │
//! │                 └────┬─────┘    └──────────┘                 │
//! │                      └──▶ StatusCounts (chart feed)          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: [`DataSource`] trait with [`HttpSource`], [`FileSource`]
//!   and [`ChannelSource`]
//! - **[`data`]**: [`SimulationRecord`], validation, the performance index and
//!   [`StatusCounts`]
//! - **[`query`]**: Regex search, type-aware stable sorting and the memoizing
//!   [`QueryEngine`]
//! - **[`export`]**: CSV serialization of the displayed rows
//! - **[`app`]**: [`App`], holding the canonical set and the [`QueryState`]
//!
//! ## Usage
//!
//! ```
//! use simulation_dashboard::{App, ChannelSource, SortKey};
//! use serde_json::json;
//!
//! let (tx, source) = ChannelSource::create("example");
//! let mut app = App::new(Box::new(source));
//!
//! tx.send(Some(vec![json!({
//!     "id": "a",
//!     "timestamp": "2024-01-10T00:00:00Z",
//!     "value": 120,
//!     "parameter_set": "abcd",
//!     "status": "completed"
//! })]))
//! .unwrap();
//!
//! app.reload_data();
//! app.select_sort_column(SortKey::Value);
//! let rows = app.visible_records();
//! assert_eq!(rows[0].performance_index(), Some(300.0));
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod query;
pub mod source;

// Re-export main types for convenience
pub use app::App;
pub use config::Settings;
pub use data::{RecordSet, RecordValue, SimulationRecord, StatusCounts};
pub use error::{CompileError, LoadError, Rejection};
pub use export::{to_csv, write_csv, EXPORT_FILE_NAME};
pub use query::{Matcher, QueryEngine, QueryState, SortDirection, SortKey, SortSpec};
pub use source::{ChannelSource, DataSource, FileSource, HttpSource, PayloadSender, RawPayload};

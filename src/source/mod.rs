//! Data source abstraction for receiving raw record payloads.
//!
//! A payload is the parsed JSON array of loosely-typed candidates, before
//! validation. Sources never fail structurally: a transport or decode failure
//! is logged, kept as the source's [`error`](DataSource::error) and delivered
//! as an empty payload so the consumer keeps rendering.

mod channel;
mod file;
mod http;
mod payload;

pub use channel::{ChannelSource, PayloadSender};
pub use file::FileSource;
pub use http::{fetch_payload, resource_url, HttpSource, RESOURCE_PATH};
pub use payload::decode_payload;

use std::fmt::Debug;

/// A raw, unvalidated payload.
pub type RawPayload = Vec<serde_json::Value>;

/// Trait for receiving record payloads from various sources.
///
/// # Example
///
/// ```
/// use simulation_dashboard::{DataSource, FileSource};
///
/// let mut source = FileSource::new("simulation_data.json");
/// if let Some(payload) = source.poll() {
///     println!("Got {} candidates", payload.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for a completed load.
    ///
    /// Returns `Some(payload)` once a load has finished (an empty payload if it
    /// failed), `None` otherwise. This method must not block.
    fn poll(&mut self) -> Option<RawPayload>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// The message of the last failed load, if any.
    fn error(&self) -> Option<&str>;
}

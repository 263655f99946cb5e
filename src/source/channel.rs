//! Channel-based data source.
//!
//! Receives payloads pushed through a tokio watch channel, for embedding the
//! pipeline behind another transport.

use tokio::sync::watch;

use super::{DataSource, RawPayload};

/// Sending half paired with a [`ChannelSource`].
pub type PayloadSender = watch::Sender<Option<RawPayload>>;

/// A data source that receives payloads via a channel.
///
/// Every pushed payload is a complete load and replaces the previous one.
///
/// # Example
///
/// ```
/// use simulation_dashboard::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("embedded");
/// tx.send(Some(Vec::new())).unwrap();
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Option<RawPayload>>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - Where payloads come from
    pub fn new(receiver: watch::Receiver<Option<RawPayload>>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
        }
    }

    /// Create a channel pair for sending payloads to a ChannelSource.
    pub fn create(source_description: &str) -> (PayloadSender, Self) {
        let (tx, rx) = watch::channel(None);
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<RawPayload> {
        if self.receiver.has_changed().unwrap_or(false) {
            self.receiver.borrow_and_update().clone()
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        // Transport errors belong to whoever feeds the channel
        None
    }
}

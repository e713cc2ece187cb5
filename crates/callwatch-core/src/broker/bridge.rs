//! Publisher bridge
//!
//! Turns pipeline output into broker messages. Publish failures are logged
//! and dropped: the broker client's own reconnect and redelivery is the only
//! retry mechanism, and a broker problem must never stop the pipeline.

use tokio::sync::mpsc;

use super::{BrokerClient, PublishOptions, Topics};
use crate::{
    state::{Availability, BinarySensorValue, CallState},
    Result,
};

/// Publishes call state and liveness for one process.
#[derive(Debug)]
pub struct PublisherBridge<B> {
    client: B,
    topics: Topics,
}

impl<B: BrokerClient> PublisherBridge<B> {
    pub const fn new(client: B, topics: Topics) -> Self {
        Self { client, topics }
    }

    pub const fn client(&self) -> &B {
        &self.client
    }

    /// Publish the call state as `ON` / `OFF`.
    pub async fn publish_call_state(&self, state: CallState) {
        let value = BinarySensorValue::from(state);
        self.send(self.topics.state(), value.as_ref()).await;
    }

    /// Publish this process's availability.
    pub async fn announce(&self, availability: Availability) {
        self.send(self.topics.availability(), availability.as_ref())
            .await;
    }

    /// Announce `online` every time the client reports a (re)connect.
    ///
    /// Returns when the sender side is dropped, i.e. the client's event loop
    /// has stopped.
    pub async fn announce_on_connect(&self, connected: &mut mpsc::Receiver<()>) {
        while connected.recv().await.is_some() {
            self.announce(Availability::Available).await;
        }
        tracing::debug!("connection signal closed");
    }

    /// Announce `offline` and disconnect.
    ///
    /// A graceful disconnect suppresses the last will, so the offline
    /// message is sent explicitly first.
    ///
    /// # Errors
    ///
    /// Returns the client's error if the disconnect itself fails.
    pub async fn close(&self) -> Result<()> {
        self.announce(Availability::Unavailable).await;
        self.client.disconnect().await
    }

    async fn send(&self, topic: &str, payload: &str) {
        match self
            .client
            .publish(topic, payload, PublishOptions::RETAINED)
            .await
        {
            Ok(()) => tracing::debug!(topic, payload, "published"),
            Err(e) => tracing::error!(topic, payload, error = %e, "MQTT publish failed"),
        }
    }
}

//! Broker boundary
//!
//! The pipeline only needs to publish small retained messages and to learn
//! when a connection came up. [`BrokerClient`] is that seam; [`MqttBroker`]
//! implements it over `rumqttc`, and tests substitute an in-memory recorder.
//!
//! # Module Structure
//!
//! - `topics`: topic layout under the configured prefix, and the last will
//! - `bridge`: maps call states and liveness onto publishes
//! - `mqtt`: the `rumqttc` client and its event loop driver

mod bridge;
mod mqtt;
mod topics;

pub use bridge::PublisherBridge;
pub use mqtt::{mqtt_options, MqttBroker};
pub use topics::Topics;

use std::sync::Arc;

use crate::Result;

// ═══════════════════════════════════════════════════════════════════════════
// TYPES
// ═══════════════════════════════════════════════════════════════════════════

/// MQTT delivery guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qos {
    AtMostOnce,
    AtLeastOnce,
    ExactlyOnce,
}

/// Delivery options for a single publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishOptions {
    pub qos: Qos,
    pub retain: bool,
}

impl PublishOptions {
    /// What every callwatch message uses: at least once, retained.
    pub const RETAINED: Self = Self {
        qos: Qos::AtLeastOnce,
        retain: true,
    };
}

/// A fully addressed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub topic: String,
    pub payload: String,
    pub options: PublishOptions,
}

// ═══════════════════════════════════════════════════════════════════════════
// CLIENT TRAIT
// ═══════════════════════════════════════════════════════════════════════════

/// The narrow publish capability the pipeline needs from a broker client.
///
/// Implementations own their reconnection policy. A failed publish is
/// reported but callers never retry it themselves.
#[async_trait::async_trait]
pub trait BrokerClient: Send + Sync {
    /// Queue `payload` for delivery on `topic`.
    async fn publish(&self, topic: &str, payload: &str, options: PublishOptions) -> Result<()>;

    /// Close the connection cleanly. The last will is not triggered.
    async fn disconnect(&self) -> Result<()>;
}

#[async_trait::async_trait]
impl<T: BrokerClient + ?Sized> BrokerClient for Arc<T> {
    async fn publish(&self, topic: &str, payload: &str, options: PublishOptions) -> Result<()> {
        (**self).publish(topic, payload, options).await
    }

    async fn disconnect(&self) -> Result<()> {
        (**self).disconnect().await
    }
}

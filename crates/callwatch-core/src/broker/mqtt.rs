//! MQTT client over `rumqttc`
//!
//! `rumqttc` splits a connection into an [`AsyncClient`] handle and an
//! [`EventLoop`] that must be polled for anything to happen, including
//! reconnection. The event loop runs on its own task for the lifetime of the
//! broker and reports each successful connect on a channel; it never
//! publishes anything itself.

use std::{sync::Mutex, time::Duration};

use rumqttc::{AsyncClient, Event, EventLoop, LastWill, MqttOptions, Outgoing, Packet, QoS};
use tokio::{sync::mpsc, task::JoinHandle};

use super::{BrokerClient, Message, PublishOptions, Qos};
use crate::{config::BrokerSettings, Error, Result};

/// Outstanding requests the client may queue before `publish` is refused.
const REQUEST_CAPACITY: usize = 16;

/// How long `disconnect` waits for the event loop to flush.
const DISCONNECT_GRACE: Duration = Duration::from_secs(2);

/// A live `rumqttc` connection.
pub struct MqttBroker {
    client: AsyncClient,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for MqttBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MqttBroker").finish_non_exhaustive()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

impl MqttBroker {
    /// Start connecting to the broker in the background.
    ///
    /// Returns the client and a receiver yielding `()` on every successful
    /// (re)connect. Must be called from within a tokio runtime.
    pub fn connect(settings: &BrokerSettings, will: &Message) -> (Self, mpsc::Receiver<()>) {
        let (client, eventloop) = AsyncClient::new(mqtt_options(settings, will), REQUEST_CAPACITY);
        let (connected_tx, connected_rx) = mpsc::channel(1);

        tracing::info!(
            broker = %settings.endpoint,
            client_id = %settings.client_id,
            "connecting to MQTT broker"
        );
        let driver = tokio::spawn(drive(eventloop, connected_tx, settings.reconnect_delay));

        (
            Self {
                client,
                driver: Mutex::new(Some(driver)),
            },
            connected_rx,
        )
    }

    fn take_driver(&self) -> Option<JoinHandle<()>> {
        self.driver.lock().ok().and_then(|mut driver| driver.take())
    }
}

/// Build connection options: identity, credentials, keep-alive and the
/// last will.
pub fn mqtt_options(settings: &BrokerSettings, will: &Message) -> MqttOptions {
    let mut options = MqttOptions::new(
        settings.client_id.clone(),
        settings.endpoint.host.clone(),
        settings.endpoint.port,
    );
    options.set_credentials(settings.username.clone(), settings.password.clone());
    options.set_keep_alive(settings.keep_alive);
    options.set_last_will(LastWill::new(
        will.topic.clone(),
        will.payload.clone(),
        to_qos(will.options.qos),
        will.options.retain,
    ));
    options
}

#[async_trait::async_trait]
impl BrokerClient for MqttBroker {
    /// Never waits for queue space: while the broker is unreachable the
    /// event loop does not drain requests, so a full queue is an error.
    async fn publish(&self, topic: &str, payload: &str, options: PublishOptions) -> Result<()> {
        self.client
            .try_publish(topic, to_qos(options.qos), options.retain, payload.as_bytes().to_vec())
            .map_err(|e| Error::broker(format!("Failed to publish to {topic}: {e}")))
    }

    async fn disconnect(&self) -> Result<()> {
        let requested = self
            .client
            .try_disconnect()
            .map_err(|e| Error::broker(format!("Failed to disconnect: {e}")));

        if let Some(mut driver) = self.take_driver() {
            let flushed = match requested {
                Ok(()) => tokio::time::timeout(DISCONNECT_GRACE, &mut driver)
                    .await
                    .is_ok(),
                Err(_) => false,
            };
            if !flushed {
                tracing::warn!("MQTT event loop did not stop, aborting it");
                driver.abort();
            }
        }

        requested
    }
}

impl Drop for MqttBroker {
    fn drop(&mut self) {
        if let Some(driver) = self.take_driver() {
            driver.abort();
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// EVENT LOOP
// ═══════════════════════════════════════════════════════════════════════════

/// Poll the event loop until our own disconnect has gone out.
///
/// Errors are logged and polling continues after `reconnect_delay`, which is
/// how `rumqttc` reconnects.
async fn drive(mut eventloop: EventLoop, connected: mpsc::Sender<()>, reconnect_delay: Duration) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                tracing::info!("MQTT connected!");
                // A pending signal already covers this connect.
                if let Err(mpsc::error::TrySendError::Closed(())) = connected.try_send(()) {
                    tracing::debug!("nobody listening for connects");
                }
            }
            Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                tracing::debug!("MQTT disconnect sent");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "MQTT error");
                tokio::time::sleep(reconnect_delay).await;
            }
        }
    }
}

const fn to_qos(qos: Qos) -> QoS {
    match qos {
        Qos::AtMostOnce => QoS::AtMostOnce,
        Qos::AtLeastOnce => QoS::AtLeastOnce,
        Qos::ExactlyOnce => QoS::ExactlyOnce,
    }
}

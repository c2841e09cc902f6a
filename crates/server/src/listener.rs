//! Record listener for the external message stream.
//!
//! Connects to the configured broker, subscribes to a single topic, and logs
//! every record it receives. The listener never touches the entity store and
//! produces no responses; it exists to surface the stream's traffic in the
//! service logs.

use rumqttc::{AsyncClient, Event, Incoming, MqttOptions, QoS};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tokio::time::Duration;

use crate::config::BrokerConfig;
use crate::models::ShopTwo;

/// Errors that terminate the listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("broker subscription failed: {0}")]
    Subscribe(#[from] rumqttc::ClientError),
}

/// A record delivered over the message stream.
///
/// The broker has no native key or partition metadata, so producers embed
/// both in the JSON payload alongside the entity value.
#[derive(Debug, Deserialize)]
pub struct RecordEnvelope {
    /// Partition the record was read from.
    pub partition: i32,
    /// Numeric record key.
    pub key: i64,
    /// The entity payload.
    pub value: ShopTwo,
}

/// Run the listener loop.
///
/// Never returns under normal operation. Poll errors back off for a second
/// and continue; undecodable payloads are logged and dropped.
///
/// # Errors
///
/// Returns [`ListenerError`] if the initial subscription fails.
pub async fn run(config: BrokerConfig) -> Result<(), ListenerError> {
    let mut options = MqttOptions::new(&config.client_id, &config.host, config.port);
    options.set_keep_alive(Duration::from_secs(5));
    if let Some(credentials) = &config.credentials {
        options.set_credentials(
            credentials.username.clone(),
            credentials.password.expose_secret().to_owned(),
        );
    }

    let (client, mut eventloop) = AsyncClient::new(options, 10);
    client.subscribe(&config.topic, QoS::AtLeastOnce).await?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        topic = %config.topic,
        "record listener subscribed"
    );

    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Incoming::Publish(publish))) => {
                handle_payload(&publish.payload);
            }
            Ok(_) => {}
            Err(e) => {
                // Back off on errors to avoid busy loops.
                tracing::warn!(error = %e, "record listener poll error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
}

/// Decode one published payload and log the record it carries.
fn handle_payload(payload: &[u8]) {
    match serde_json::from_slice::<RecordEnvelope>(payload) {
        Ok(record) => {
            tracing::info!(
                partition = record.partition,
                key = record.key,
                value = ?record.value,
                "received record"
            );
        }
        Err(e) => {
            tracing::warn!(error = %e, "dropping undecodable record payload");
        }
    }
}

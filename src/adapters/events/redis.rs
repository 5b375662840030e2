//! Redis event publisher.
//!
//! Publishes event envelopes as JSON onto Redis pub/sub channels. Each event
//! type gets its own channel, `<prefix>.<event_type>`, so consumers can
//! subscribe to exactly the types they care about (or pattern-subscribe to
//! `<prefix>.*` for everything).
//!
//! Delivery is fire-and-forget pub/sub: subscribers that are offline when an
//! event is published never see it. Callers that need stronger guarantees
//! own the retry decision.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::config::EventsConfig;
use crate::domain::foundation::EventEnvelope;
use crate::ports::{EventPublisher, PublishError};

/// Redis pub/sub event publisher.
///
/// Holds a multiplexed connection, so clones share one TCP stream and the
/// publisher can be cloned freely into handlers.
#[derive(Clone)]
pub struct RedisEventPublisher {
    connection: MultiplexedConnection,
    channel_prefix: String,
}

impl RedisEventPublisher {
    /// Connects to Redis and prepares the publisher.
    pub async fn connect(config: &EventsConfig) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection = client.get_multiplexed_async_connection().await?;

        Ok(Self {
            connection,
            channel_prefix: config.channel_prefix.clone(),
        })
    }

    /// Wraps an existing connection, for callers that manage their own client.
    pub fn with_connection(connection: MultiplexedConnection, channel_prefix: impl Into<String>) -> Self {
        Self {
            connection,
            channel_prefix: channel_prefix.into(),
        }
    }
}

#[async_trait]
impl EventPublisher for RedisEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), PublishError> {
        let channel = channel_name(&self.channel_prefix, &event.event_type);
        let payload = serde_json::to_string(&event)
            .map_err(|e| PublishError::Serialization(e.to_string()))?;

        let mut connection = self.connection.clone();
        let receivers: i64 = connection
            .publish(&channel, payload)
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        tracing::debug!(
            channel = %channel,
            event_id = %event.event_id,
            receivers,
            "Event published"
        );

        Ok(())
    }
}

/// Builds the channel name for an event type.
fn channel_name(prefix: &str, event_type: &str) -> String {
    format!("{}.{}", prefix, event_type)
}

//! Supervised pull receiver with duplicate suppression.
//!
//! Each pull loop runs as its own task. A loop that fails or panics is
//! logged and started again after `restart_delay_ms`. Every message goes
//! through [`SampleReceiver::process`]:
//!
//! 1. a marker for the message id already in the cache means the message
//!    was processed before: log, acknowledge, stop;
//! 2. otherwise the handler runs on its own task; failure or panic is
//!    logged and the message is left unacknowledged for redelivery;
//! 3. on success the message is acknowledged and marked as seen for two
//!    days.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, warn};

use strata_cache::CacheManager;
use strata_cache::keys;
use strata_core::bridge::dispatch;
use strata_core::config::pubsub::ReceiverConfig;
use strata_core::result::AppResult;
use strata_core::traits::CacheProvider;

use crate::client::PubSubClient;
use crate::message::ReceivedMessage;

/// How long a processed message id is remembered.
pub const SEEN_MARKER_TTL: Duration = Duration::from_secs(2 * 24 * 60 * 60);

const RECEIVER_NAME: &str = "SampleReceiver";

/// Where messages come from and where acknowledgements go.
#[async_trait]
pub trait MessageSource: Send + Sync + 'static {
    async fn pull(&self) -> AppResult<Vec<ReceivedMessage>>;

    async fn acknowledge(&self, ack_id: &str) -> AppResult<()>;
}

/// Business handling of one message.
#[async_trait]
pub trait MessageHandler: Send + Sync + 'static {
    async fn handle(&self, message: ReceivedMessage) -> AppResult<()>;
}

/// [`MessageSource`] reading one Pub/Sub subscription.
#[derive(Debug, Clone)]
pub struct SubscriptionSource {
    client: PubSubClient,
    project_id: String,
    subscription_id: String,
    max_messages: u32,
}

impl SubscriptionSource {
    pub fn new(client: PubSubClient, config: &ReceiverConfig) -> Self {
        Self {
            client,
            project_id: config.project_id.clone(),
            subscription_id: config.subscription_id.clone(),
            max_messages: config.max_messages.max(1),
        }
    }
}

#[async_trait]
impl MessageSource for SubscriptionSource {
    async fn pull(&self) -> AppResult<Vec<ReceivedMessage>> {
        self.client
            .pull(&self.project_id, &self.subscription_id, self.max_messages)
            .await
    }

    async fn acknowledge(&self, ack_id: &str) -> AppResult<()> {
        self.client
            .acknowledge(&self.project_id, &self.subscription_id, &[ack_id.to_string()])
            .await
    }
}

/// What happened to a single delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Handled, acknowledged and marked as seen.
    Processed,
    /// Seen before; acknowledged without handling.
    Duplicate,
    /// Not acknowledged; the broker will redeliver it.
    Failed,
}

/// Runs `count` supervised pull loops feeding a [`MessageHandler`].
pub struct SampleReceiver {
    source: Arc<dyn MessageSource>,
    handler: Arc<dyn MessageHandler>,
    cache: CacheManager,
    restart_delay: Duration,
}

impl SampleReceiver {
    pub fn new(
        source: Arc<dyn MessageSource>,
        handler: Arc<dyn MessageHandler>,
        cache: CacheManager,
        restart_delay: Duration,
    ) -> Self {
        Self {
            source,
            handler,
            cache,
            restart_delay,
        }
    }

    /// Start `count` independent loops that stop when `shutdown` is cancelled.
    pub fn start(
        self: Arc<Self>,
        count: usize,
        shutdown: CancellationToken,
    ) -> Vec<JoinHandle<()>> {
        info!(receiver = RECEIVER_NAME, "{RECEIVER_NAME} Initializing receivers.");
        let handles = (0..count)
            .map(|index| {
                let receiver = self.clone();
                let shutdown = shutdown.clone();
                tokio::spawn(
                    async move { receiver.supervise(index, shutdown).await }.in_current_span(),
                )
            })
            .collect();
        info!(
            receiver = RECEIVER_NAME,
            count,
            "{RECEIVER_NAME} Initialized {count} receivers."
        );
        handles
    }

    /// Keep one pull loop alive until shutdown.
    async fn supervise(self: Arc<Self>, index: usize, shutdown: CancellationToken) {
        loop {
            let receiver = self.clone();
            let token = shutdown.clone();
            let run =
                tokio::spawn(async move { receiver.pull_loop(token).await }.in_current_span());

            match run.await {
                Ok(Ok(())) => return,
                Ok(Err(e)) => error!(
                    receiver = RECEIVER_NAME,
                    index,
                    error = %e,
                    "{RECEIVER_NAME} Pull loop failed. Trying to receive again."
                ),
                Err(join_err) => error!(
                    receiver = RECEIVER_NAME,
                    index,
                    panic = %join_err,
                    "{RECEIVER_NAME} Recovered the panic. Trying to receive again."
                ),
            }

            tokio::select! {
                _ = shutdown.cancelled() => return,
                _ = tokio::time::sleep(self.restart_delay) => {}
            }
        }
    }

    /// Pull and process until cancelled or the source fails.
    async fn pull_loop(&self, shutdown: CancellationToken) -> AppResult<()> {
        loop {
            let batch = tokio::select! {
                _ = shutdown.cancelled() => return Ok(()),
                batch = self.source.pull() => batch?,
            };
            for message in batch {
                self.process(message).await;
            }
        }
    }

    /// Handle one delivery end to end.
    pub async fn process(&self, message: ReceivedMessage) -> Outcome {
        let marker = keys::sample_receiver_message(&message.message_id);

        match self.cache.exists(&marker).await {
            Ok(true) => {
                error!(
                    receiver = RECEIVER_NAME,
                    message_id = %message.message_id,
                    data = %message.data_lossy(),
                    attributes = ?message.attributes,
                    "{RECEIVER_NAME} {} ID message is duplicate.",
                    message.message_id
                );
                self.acknowledge(&message).await;
                return Outcome::Duplicate;
            }
            Ok(false) => {}
            Err(e) => {
                error!(
                    receiver = RECEIVER_NAME,
                    message_id = %message.message_id,
                    error = %e,
                    "{RECEIVER_NAME} {} ID message could not be checked for duplication.",
                    message.message_id
                );
                return Outcome::Failed;
            }
        }

        let handler = self.handler.clone();
        let delivery = message.clone();
        if let Err(e) = dispatch(async move { handler.handle(delivery).await }).await {
            error!(
                receiver = RECEIVER_NAME,
                message_id = %message.message_id,
                data = %message.data_lossy(),
                attributes = ?message.attributes,
                error = %e,
                "{RECEIVER_NAME} {} ID message is failed to process.",
                message.message_id
            );
            return Outcome::Failed;
        }

        self.acknowledge(&message).await;
        if let Err(e) = self.cache.set(&marker, "1", SEEN_MARKER_TTL).await {
            warn!(
                receiver = RECEIVER_NAME,
                message_id = %message.message_id,
                error = %e,
                "Failed to mark message as processed"
            );
        }
        info!(
            receiver = RECEIVER_NAME,
            message_id = %message.message_id,
            data = %message.data_lossy(),
            attributes = ?message.attributes,
            "{RECEIVER_NAME} {} ID message is processed successfully.",
            message.message_id
        );
        Outcome::Processed
    }

    async fn acknowledge(&self, message: &ReceivedMessage) {
        if let Err(e) = self.source.acknowledge(&message.ack_id).await {
            warn!(
                receiver = RECEIVER_NAME,
                message_id = %message.message_id,
                error = %e,
                "Failed to acknowledge message"
            );
        }
    }
}

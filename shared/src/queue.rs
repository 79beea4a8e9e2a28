//! Queue publisher adapter backed by SQS.
//!
//! Enqueueing is best-effort: callers log failures and carry on, so neither
//! implementation retries.

use async_trait::async_trait;
use aws_config::SdkConfig;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::NotificationMessage;

/// Narrow interface over the notification queue.
#[async_trait]
pub trait QueuePublisher: Send + Sync {
    async fn send(&self, message: &NotificationMessage) -> Result<()>;
}

/// SQS-backed queue publisher.
pub struct SqsQueuePublisher {
    client: aws_sdk_sqs::Client,
    queue_url: String,
}

impl SqsQueuePublisher {
    pub fn new(client: aws_sdk_sqs::Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }
}

#[async_trait]
impl QueuePublisher for SqsQueuePublisher {
    async fn send(&self, message: &NotificationMessage) -> Result<()> {
        let body = serde_json::to_string(message)?;

        self.client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| Error::Queue(format!("Failed to send message: {}", e)))?;

        Ok(())
    }
}

/// Log-only publisher used when no queue is configured (local runs).
pub struct LogQueuePublisher;

#[async_trait]
impl QueuePublisher for LogQueuePublisher {
    async fn send(&self, message: &NotificationMessage) -> Result<()> {
        info!(
            appointment_id = %message.id,
            insured_id = %message.insured_id,
            schedule_id = %message.schedule_id,
            "no queue configured, notification would be sent"
        );
        Ok(())
    }
}

/// Select the queue publisher once at startup based on configuration.
pub fn from_config(config: &Config, aws_config: &SdkConfig) -> Box<dyn QueuePublisher> {
    match &config.queue_url {
        Some(url) => Box::new(SqsQueuePublisher::new(
            aws_sdk_sqs::Client::new(aws_config),
            url.clone(),
        )),
        None => {
            info!("no queue URL configured, enqueues will be logged only");
            Box::new(LogQueuePublisher)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_publisher_always_succeeds() {
        let message = NotificationMessage {
            id: "a1".to_string(),
            insured_id: "u1".to_string(),
            schedule_id: "s1".to_string(),
        };

        assert!(LogQueuePublisher.send(&message).await.is_ok());
    }
}

//! Topic publisher adapter backed by SNS.
//!
//! Publishes a human-readable notification for each appointment. Failures are
//! best-effort for callers; per-message handling stays with the consumer.

use async_trait::async_trait;
use aws_config::SdkConfig;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::NotificationMessage;

/// Subject line used for every appointment notification.
pub const NOTIFICATION_SUBJECT: &str = "New Appointment Notification";

/// Narrow interface over the notification topic.
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    async fn publish(&self, message: &NotificationMessage) -> Result<()>;
}

/// Human-readable notification body for an appointment.
pub fn notification_text(message: &NotificationMessage) -> String {
    format!(
        "New appointment for insuredId {} scheduled at {}",
        message.insured_id, message.schedule_id
    )
}

/// A usable topic destination must be a full ARN.
pub fn is_valid_topic_arn(arn: &str) -> bool {
    arn.starts_with("arn:")
}

/// SNS-backed topic publisher.
pub struct SnsTopicPublisher {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsTopicPublisher {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }
}

#[async_trait]
impl TopicPublisher for SnsTopicPublisher {
    async fn publish(&self, message: &NotificationMessage) -> Result<()> {
        self.client
            .publish()
            .topic_arn(&self.topic_arn)
            .message(notification_text(message))
            .subject(NOTIFICATION_SUBJECT)
            .send()
            .await
            .map_err(|e| Error::Topic(format!("Failed to publish notification: {}", e)))?;

        Ok(())
    }
}

/// Log-only publisher used when no valid topic is configured (local runs).
pub struct LogTopicPublisher;

#[async_trait]
impl TopicPublisher for LogTopicPublisher {
    async fn publish(&self, message: &NotificationMessage) -> Result<()> {
        info!(
            appointment_id = %message.id,
            "local notification for appointment"
        );
        Ok(())
    }
}

/// Select the topic publisher once at startup based on configuration.
pub fn from_config(config: &Config, aws_config: &SdkConfig) -> Box<dyn TopicPublisher> {
    match config
        .topic_arn
        .as_deref()
        .filter(|arn| is_valid_topic_arn(arn))
    {
        Some(arn) => Box::new(SnsTopicPublisher::new(
            aws_sdk_sns::Client::new(aws_config),
            arn,
        )),
        None => {
            info!("no topic ARN configured, notifications will be logged only");
            Box::new(LogTopicPublisher)
        }
    }
}

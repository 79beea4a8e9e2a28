//! Notify Appointment Lambda - consumes the notification queue.
//!
//! This Lambda is triggered by SQS and:
//! 1. Parses each record body as a notification message
//! 2. Publishes a human-readable notification to the topic
//! 3. Logs and skips malformed records and failed publishes
//!
//! Publishing is partial-failure tolerant: every record in the batch is
//! attempted and the invocation reports success once all have been tried.

use std::sync::Arc;

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use shared::models::NotificationMessage;
use shared::topic::{self, TopicPublisher};
use shared::Config;

/// SQS event wrapper
#[derive(Debug, Deserialize)]
struct SqsEvent {
    #[serde(rename = "Records", default)]
    records: Vec<SqsRecord>,
}

#[derive(Debug, Deserialize)]
struct SqsRecord {
    body: String,
    #[serde(rename = "messageId", default)]
    message_id: String,
}

/// Processing-result signal consumed by the hosting runtime.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotifyResponse {
    status_code: u16,
    notifications_sent: u32,
    errors: u32,
}

async fn handler(
    publisher: &dyn TopicPublisher,
    event: LambdaEvent<SqsEvent>,
) -> Result<NotifyResponse, Error> {
    let records = event.payload.records;

    if records.is_empty() {
        warn!("no records received in event");
        return Ok(NotifyResponse {
            status_code: 400,
            notifications_sent: 0,
            errors: 0,
        });
    }

    let mut sent = 0;
    let mut errors = 0;

    for record in &records {
        let message: NotificationMessage = match serde_json::from_str(&record.body) {
            Ok(message) => message,
            Err(e) => {
                error!(
                    message_id = %record.message_id,
                    error = %e,
                    "skipping malformed queue message"
                );
                errors += 1;
                continue;
            }
        };

        match publisher.publish(&message).await {
            Ok(()) => {
                info!(appointment_id = %message.id, "notification sent for appointment");
                sent += 1;
            }
            Err(e) => {
                error!(
                    appointment_id = %message.id,
                    error = %e,
                    "failed to publish notification"
                );
                errors += 1;
            }
        }
    }

    Ok(NotifyResponse {
        status_code: 200,
        notifications_sent: sent,
        errors,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let publisher: Arc<dyn TopicPublisher> = Arc::from(topic::from_config(&config, &aws_config));

    run(service_fn(move |event| {
        let publisher = publisher.clone();
        async move { handler(publisher.as_ref(), event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use lambda_runtime::Context;
    use shared::topic::LogTopicPublisher;
    use shared::{Error as AppError, Result as AppResult};

    #[derive(Default)]
    struct RecordingPublisher {
        published: Mutex<Vec<NotificationMessage>>,
    }

    #[async_trait]
    impl TopicPublisher for RecordingPublisher {
        async fn publish(&self, message: &NotificationMessage) -> AppResult<()> {
            self.published.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    struct FailingPublisher {
        attempts: Mutex<u32>,
    }

    #[async_trait]
    impl TopicPublisher for FailingPublisher {
        async fn publish(&self, _message: &NotificationMessage) -> AppResult<()> {
            *self.attempts.lock().unwrap() += 1;
            Err(AppError::Topic("topic unreachable".to_string()))
        }
    }

    fn sqs_event(bodies: &[&str]) -> LambdaEvent<SqsEvent> {
        let records = bodies
            .iter()
            .enumerate()
            .map(|(i, body)| SqsRecord {
                body: (*body).to_string(),
                message_id: format!("m{}", i),
            })
            .collect();
        LambdaEvent::new(SqsEvent { records }, Context::default())
    }

    #[tokio::test]
    async fn test_empty_batch_rejected_without_publishing() {
        let publisher = RecordingPublisher::default();

        let response = handler(&publisher, sqs_event(&[])).await.unwrap();

        assert_eq!(response.status_code, 400);
        assert!(publisher.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_publishes_each_record() {
        let publisher = RecordingPublisher::default();
        let event = sqs_event(&[
            r#"{"id":"a1","insuredId":"u1","scheduleId":"s1"}"#,
            r#"{"id":"a2","insuredId":"u2","scheduleId":"s2"}"#,
        ]);

        let response = handler(&publisher, event).await.unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.notifications_sent, 2);
        assert_eq!(response.errors, 0);

        let published = publisher.published.lock().unwrap();
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].id, "a1");
        assert_eq!(published[1].insured_id, "u2");
    }

    #[tokio::test]
    async fn test_unreachable_publisher_still_succeeds_after_all_attempts() {
        let publisher = FailingPublisher {
            attempts: Mutex::new(0),
        };
        let event = sqs_event(&[
            r#"{"id":"a1","insuredId":"u1","scheduleId":"s1"}"#,
            r#"{"id":"a2","insuredId":"u2","scheduleId":"s2"}"#,
            r#"{"id":"a3","insuredId":"u3","scheduleId":"s3"}"#,
        ]);

        let response = handler(&publisher, event).await.unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.notifications_sent, 0);
        assert_eq!(response.errors, 3);
        assert_eq!(*publisher.attempts.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_malformed_record_skipped() {
        let publisher = RecordingPublisher::default();
        let event = sqs_event(&[
            "not json",
            r#"{"id":"a2","insuredId":"u2","scheduleId":"s2"}"#,
        ]);

        let response = handler(&publisher, event).await.unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.notifications_sent, 1);
        assert_eq!(response.errors, 1);
        assert_eq!(publisher.published.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_log_only_mode_succeeds() {
        let event = sqs_event(&[r#"{"id":"a1","insuredId":"u1","scheduleId":"s1"}"#]);

        let response = handler(&LogTopicPublisher, event).await.unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.notifications_sent, 1);
    }
}

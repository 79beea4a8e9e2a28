//! Configuration management for the appointment Lambda functions.

use std::env;

/// Application configuration loaded from environment variables.
///
/// Read once at process start; the values are immutable for the lifetime of
/// the process.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding appointment records
    pub table_name: String,
    /// SQS queue for appointment notifications (None = log-only mode)
    pub queue_url: Option<String>,
    /// SNS topic for appointment notifications (None = log-only mode)
    pub topic_arn: Option<String>,
    /// AWS region
    pub aws_region: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Empty strings are treated as unset so that blank values in a
    /// deployment template do not select the real publishers.
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("APPOINTMENTS_TABLE")
                .unwrap_or_else(|_| "AppointmentsTable".to_string()),
            queue_url: env::var("NOTIFICATIONS_QUEUE_URL")
                .ok()
                .filter(|v| !v.is_empty()),
            topic_arn: env::var("NOTIFICATIONS_TOPIC_ARN")
                .ok()
                .filter(|v| !v.is_empty()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        }
    }
}

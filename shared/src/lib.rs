//! Shared library for the appointment Lambda functions.
//!
//! This crate provides the configuration, error taxonomy, domain models, HTTP
//! helpers, and managed-service adapters used across all Lambda functions.

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod queue;
pub mod store;
pub mod topic;

pub use config::Config;
pub use error::{Error, Result};
pub use models::{Appointment, AppointmentStatus, NotificationMessage};
pub use queue::QueuePublisher;
pub use store::AppointmentStore;
pub use topic::TopicPublisher;

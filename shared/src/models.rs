//! Domain models for appointments and notifications.

use std::fmt;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Lifecycle status of an appointment.
///
/// Appointments are always created as `Pending`; this core never transitions
/// them, but downstream processors may.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(Error::Internal(format!(
                "unknown appointment status: {}",
                other
            ))),
        }
    }
}

/// An appointment record as stored and returned over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub insured_id: String,
    pub schedule_id: String,
    #[serde(rename = "countryISO")]
    pub country_iso: String,
    pub status: AppointmentStatus,
    pub created_at: String,
}

impl Appointment {
    /// Build a new appointment with a fresh identifier, `pending` status, and
    /// the current timestamp.
    pub fn new(
        insured_id: impl Into<String>,
        schedule_id: impl Into<String>,
        country_iso: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            insured_id: insured_id.into(),
            schedule_id: schedule_id.into(),
            country_iso: country_iso.into(),
            status: AppointmentStatus::Pending,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Ephemeral notification payload sent to the queue when an appointment is
/// created, and consumed by the notify Lambda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessage {
    pub id: String,
    pub insured_id: String,
    pub schedule_id: String,
}

impl From<&Appointment> for NotificationMessage {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id.clone(),
            insured_id: appointment.insured_id.clone(),
            schedule_id: appointment.schedule_id.clone(),
        }
    }
}

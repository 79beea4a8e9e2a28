//! Appointment store adapter backed by DynamoDB.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::error::{Error, Result};
use crate::models::{Appointment, AppointmentStatus};

/// Narrow interface over the appointment table: one write, one full scan.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn put(&self, appointment: &Appointment) -> Result<()>;
    async fn scan(&self) -> Result<Vec<Appointment>>;
}

/// DynamoDB-backed appointment store.
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl AppointmentStore for DynamoDbStore {
    async fn put(&self, appointment: &Appointment) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(appointment)))
            .send()
            .await
            .map_err(|e| Error::Store(format!("Failed to put appointment: {}", e)))?;

        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Appointment>> {
        let mut appointments = Vec::new();
        let mut start_key = None;

        // Follow LastEvaluatedKey until the table is exhausted.
        loop {
            let response = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| Error::Store(format!("Failed to scan appointments: {}", e)))?;

            for item in response.items() {
                appointments.push(from_item(item)?);
            }

            start_key = response.last_evaluated_key;
            if start_key.is_none() {
                break;
            }
        }

        Ok(appointments)
    }
}

fn to_item(appointment: &Appointment) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("id".to_string(), AttributeValue::S(appointment.id.clone())),
        (
            "insuredId".to_string(),
            AttributeValue::S(appointment.insured_id.clone()),
        ),
        (
            "scheduleId".to_string(),
            AttributeValue::S(appointment.schedule_id.clone()),
        ),
        (
            "countryISO".to_string(),
            AttributeValue::S(appointment.country_iso.clone()),
        ),
        (
            "status".to_string(),
            AttributeValue::S(appointment.status.as_str().to_string()),
        ),
        (
            "createdAt".to_string(),
            AttributeValue::S(appointment.created_at.clone()),
        ),
    ])
}

fn from_item(item: &HashMap<String, AttributeValue>) -> Result<Appointment> {
    Ok(Appointment {
        id: get_string(item, "id")?,
        insured_id: get_string(item, "insuredId")?,
        schedule_id: get_string(item, "scheduleId")?,
        country_iso: get_string(item, "countryISO")?,
        status: AppointmentStatus::from_str(&get_string(item, "status")?)?,
        created_at: get_string(item, "createdAt")?,
    })
}

fn get_string(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| Error::Store(format!("missing or non-string attribute: {}", key)))
}

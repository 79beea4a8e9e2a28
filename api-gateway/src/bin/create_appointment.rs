//! Create Appointment Lambda - POST /appointments.
//!
//! Validates the request, persists the appointment in DynamoDB, and forwards
//! a notification to the queue on a best-effort basis.

use std::sync::Arc;

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Deserialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shared::http::{error_response, json_response, ApiResponse};
use shared::models::{Appointment, NotificationMessage};
use shared::queue::{self, QueuePublisher};
use shared::store::{AppointmentStore, DynamoDbStore};
use shared::Config;

/// Create appointment request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAppointmentRequest {
    insured_id: Option<String>,
    schedule_id: Option<String>,
    #[serde(rename = "countryISO")]
    country_iso: Option<String>,
}

impl CreateAppointmentRequest {
    /// Presence check only; no format validation beyond non-empty strings.
    fn into_fields(self) -> Option<(String, String, String)> {
        match (self.insured_id, self.schedule_id, self.country_iso) {
            (Some(i), Some(s), Some(c)) if !i.is_empty() && !s.is_empty() && !c.is_empty() => {
                Some((i, s, c))
            }
            _ => None,
        }
    }
}

/// Application state
struct AppState {
    store: DynamoDbStore,
    queue: Box<dyn QueuePublisher>,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env();
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        let store = DynamoDbStore::new(
            aws_sdk_dynamodb::Client::new(&aws_config),
            config.table_name.clone(),
        );
        let queue = queue::from_config(&config, &aws_config);

        Ok(Self { store, queue })
    }
}

async fn handler(
    store: &dyn AppointmentStore,
    queue: &dyn QueuePublisher,
    event: Request,
) -> Result<Response<Body>, Error> {
    let body = event.body();
    if body.as_ref().is_empty() {
        return error_response(400, "Missing request body");
    }

    let request: CreateAppointmentRequest = match serde_json::from_slice(body.as_ref()) {
        Ok(parsed) => parsed,
        Err(e) => {
            info!(error = %e, "rejected unparseable request body");
            return error_response(400, "Invalid request body");
        }
    };

    let Some((insured_id, schedule_id, country_iso)) = request.into_fields() else {
        return error_response(400, "Missing required fields");
    };

    let appointment = Appointment::new(insured_id, schedule_id, country_iso);

    if let Err(e) = store.put(&appointment).await {
        error!(error = %e, "failed to persist appointment");
        return error_response(500, "Internal server error");
    }

    // Best-effort forwarding: persistence already succeeded, so a queue
    // failure must not fail the request.
    let notification = NotificationMessage::from(&appointment);
    match queue.send(&notification).await {
        Ok(()) => info!(appointment_id = %appointment.id, "notification enqueued"),
        Err(e) => error!(
            appointment_id = %appointment.id,
            error = %e,
            "failed to enqueue notification"
        ),
    }

    json_response(
        201,
        &ApiResponse::with_data("Appointment created successfully", appointment),
    )
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);
    let state_clone = state.clone();

    run(service_fn(move |event| {
        let state = state_clone.clone();
        async move { handler(&state.store, state.queue.as_ref(), event).await }
    }))
    .await
}

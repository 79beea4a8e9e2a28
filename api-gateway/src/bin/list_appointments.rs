//! List Appointments Lambda - GET /appointments.
//!
//! Full scan of the appointment table, returned in the store's native order.

use std::sync::Arc;

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use tracing::error;
use tracing_subscriber::EnvFilter;

use shared::http::{error_response, json_response, ApiResponse};
use shared::store::{AppointmentStore, DynamoDbStore};
use shared::Config;

/// Application state
struct AppState {
    store: DynamoDbStore,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env();
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        let store = DynamoDbStore::new(
            aws_sdk_dynamodb::Client::new(&aws_config),
            config.table_name.clone(),
        );

        Ok(Self { store })
    }
}

async fn handler(store: &dyn AppointmentStore, _event: Request) -> Result<Response<Body>, Error> {
    match store.scan().await {
        Ok(appointments) => json_response(
            200,
            &ApiResponse::with_data("List of appointments", appointments),
        ),
        Err(e) => {
            error!(error = %e, "failed to fetch appointments");
            error_response(500, "Internal server error")
        }
    }
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
        async move { handler(&state.store, event).await }
    }))
    .await
}

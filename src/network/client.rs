//! Contact client - builds the delivery pipeline and runs submissions

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::constants::DELIVERY_TIMEOUT_SECS;
use crate::contact::{
    ContactDraft, ContactFlow, DeliveryChannel, HttpDelivery, LogAudit, SimulatedDelivery,
};
use crate::messages::NetworkResponse;

/// Pick the delivery channel the configuration asks for
pub fn build_flow(config: &Config, client: reqwest::Client) -> ContactFlow {
    let channel: Arc<dyn DeliveryChannel> = match &config.api_url {
        Some(base) => {
            let http = HttpDelivery::new(client, base);
            tracing::info!(endpoint = http.endpoint(), "Contact deliveries go over HTTP");
            Arc::new(http)
        }
        None => {
            tracing::info!("No contact API configured, simulating deliveries");
            Arc::new(SimulatedDelivery::default())
        }
    };

    ContactFlow::new(channel, Arc::new(LogAudit))
}

/// Run one submission through the flow and wrap the outcome for the App layer
pub async fn execute_submission(
    flow: &ContactFlow,
    draft: ContactDraft,
    request_id: u64,
) -> NetworkResponse {
    let start = Instant::now();
    let result = flow.submit(&draft).await;
    let elapsed = start.elapsed().as_millis() as u64;

    NetworkResponse::ContactResult {
        id: request_id,
        result,
        time_ms: elapsed,
    }
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(DELIVERY_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

//! Delivery channels - where a validated dispatch actually goes

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::constants::{CONTACT_ENDPOINT, SIMULATED_LATENCY_MS};
use crate::contact::schema::ContactSubmission;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("contact API answered with status {0}")]
    Status(u16),

    #[error("transport failure: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> Self {
        let msg = if e.is_timeout() {
            "request timed out".to_string()
        } else if e.is_connect() {
            format!("connection failed: {}", e)
        } else {
            e.to_string()
        };
        DeliveryError::Transport(msg)
    }
}

/// Something that can transmit a validated submission
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<(), DeliveryError>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Posts submissions as JSON to `{base}/api/contact`
pub struct HttpDelivery {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpDelivery {
    pub fn new(client: reqwest::Client, api_base: &str) -> Self {
        HttpDelivery {
            client,
            endpoint: format!("{}{}", api_base.trim_end_matches('/'), CONTACT_ENDPOINT),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DeliveryChannel for HttpDelivery {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<(), DeliveryError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Status(status.as_u16()))
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Stand-in used when no contact API is configured: waits, then accepts
pub struct SimulatedDelivery {
    latency: Duration,
}

impl SimulatedDelivery {
    pub fn new(latency: Duration) -> Self {
        SimulatedDelivery { latency }
    }
}

impl Default for SimulatedDelivery {
    fn default() -> Self {
        Self::new(Duration::from_millis(SIMULATED_LATENCY_MS))
    }
}

#[async_trait]
impl DeliveryChannel for SimulatedDelivery {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<(), DeliveryError> {
        tracing::debug!(email = %submission.email, "Simulating contact delivery");
        tokio::time::sleep(self.latency).await;
        Ok(())
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn local_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            subject: "Project enquiry".to_string(),
            message: "x".repeat(25),
            budget: None,
            timeline: None,
        }
    }

    /// Accept one request, read it fully, answer with `status_line`, and hand
    /// back the raw request text
    async fn serve_once(status_line: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);

                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let length = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if buf.len() >= head_end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!("{}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n", status_line);
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&buf).to_string()
        });

        (base, handle)
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = reqwest::Client::new();
        assert_eq!(
            HttpDelivery::new(client.clone(), "https://api.example.com/").endpoint(),
            "https://api.example.com/api/contact"
        );
        assert_eq!(
            HttpDelivery::new(client, "https://api.example.com").endpoint(),
            "https://api.example.com/api/contact"
        );
    }

    #[tokio::test]
    async fn test_simulated_delivery_succeeds() {
        let channel = SimulatedDelivery::new(Duration::from_millis(1));
        assert!(channel.deliver(&submission()).await.is_ok());
    }

    #[tokio::test]
    async fn test_non_2xx_is_status_error() {
        let (base, server) = serve_once("HTTP/1.1 503 Service Unavailable").await;
        let channel = HttpDelivery::new(local_client(), &base);

        let result = channel.deliver(&submission()).await;
        assert!(matches!(result, Err(DeliveryError::Status(503))));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/contact "));
        assert!(request.contains("\"email\":\"jane@example.com\""));
        assert!(!request.contains("budget"));
    }

    #[tokio::test]
    async fn test_2xx_is_delivered() {
        let (base, server) = serve_once("HTTP/1.1 201 Created").await;
        let channel = HttpDelivery::new(local_client(), &base);

        assert!(channel.deliver(&submission()).await.is_ok());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = crate::network::client::create_client();
        // Port 9 on localhost is discard; nothing should be listening
        let channel = HttpDelivery::new(client, "http://127.0.0.1:9");
        let err = channel.deliver(&submission()).await.unwrap_err();
        assert!(matches!(err, DeliveryError::Transport(_)));
    }
}

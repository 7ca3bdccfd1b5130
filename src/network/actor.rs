//! Network actor - runs contact deliveries in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::contact::ContactFlow;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::execute_submission;

/// Network actor that processes submission commands
pub struct NetworkActor {
    flow: ContactFlow,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(flow: ContactFlow, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            flow,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::SubmitContact { id, draft }) => {
                            let response_tx = self.response_tx.clone();
                            let flow = self.flow.clone();

                            // Every submission gets its own task and its own copy of the draft
                            self.active_requests.spawn(async move {
                                tracing::info!(id, channel = flow.channel_name(), "Submitting contact dispatch");
                                let result = execute_submission(&flow, draft, id).await;
                                tracing::info!(id, "Contact submission completed");
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::Shutdown) => {
                            self.active_requests.abort_all();
                            break;
                        }

                        None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {
                    // Task completed - results are sent by the tasks themselves
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::contact::{ContactDraft, SubmissionStatus};
    use crate::network::client::{build_flow, create_client};
    use std::time::Duration;

    #[tokio::test]
    async fn test_submission_round_trip_through_actor() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let flow = build_flow(&Config::default(), create_client());
        let handle = tokio::spawn(NetworkActor::new(flow, resp_tx).run(cmd_rx));

        cmd_tx
            .send(NetworkCommand::SubmitContact { id: 7, draft: ContactDraft::default() })
            .unwrap();

        let response = tokio::time::timeout(Duration::from_secs(2), resp_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(response.id(), 7);
        let NetworkResponse::ContactResult { result, .. } = response;
        assert_eq!(result.status, SubmissionStatus::Error);

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
    }
}

//! Replication client
//!
//! Reshapes a record into the sink payload and makes exactly one attempt to
//! transmit it. Every fault is logged and folded into the outcome; nothing
//! is retried, queued or propagated.

use std::time::Duration;

use tracing::{debug, warn};

use super::payload::SinkPayload;
use super::transport::Transport;
use crate::models::InventoryRecord;

/// Result of one replication attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationOutcome {
    /// The transmission raised no transport fault. This is not evidence
    /// that the sink accepted or stored anything.
    pub delivered_to_transport: bool,
    /// Fault description when delivery failed
    pub fault: Option<String>,
}

impl ReplicationOutcome {
    fn delivered() -> Self {
        Self {
            delivered_to_transport: true,
            fault: None,
        }
    }

    fn failed(fault: impl Into<String>) -> Self {
        Self {
            delivered_to_transport: false,
            fault: Some(fault.into()),
        }
    }
}

/// Stateless sender of records to a sink
pub struct ReplicationClient<T> {
    transport: T,
    deadline: Duration,
}

impl<T: Transport> ReplicationClient<T> {
    /// Create a client; attempts that outlive `deadline` count as failed
    pub fn new(transport: T, deadline: Duration) -> Self {
        Self {
            transport,
            deadline,
        }
    }

    /// Send one record to `destination_url`
    ///
    /// Callers skip this entirely when no destination is configured.
    pub async fn send(&self, record: &InventoryRecord, destination_url: &str) -> ReplicationOutcome {
        let body = match serde_json::to_vec(&SinkPayload::from(record)) {
            Ok(body) => body,
            Err(e) => {
                warn!("Could not encode record {} for the sink: {}", record.id, e);
                return ReplicationOutcome::failed(e.to_string());
            }
        };

        let attempt = self.transport.transmit(destination_url, body);
        match tokio::time::timeout(self.deadline, attempt).await {
            Ok(Ok(())) => {
                debug!("Record {} handed to transport", record.id);
                ReplicationOutcome::delivered()
            }
            Ok(Err(e)) => {
                warn!("Replication of record {} failed: {}", record.id, e);
                ReplicationOutcome::failed(e.to_string())
            }
            Err(_) => {
                warn!(
                    "Replication of record {} gave up after {:?}",
                    record.id, self.deadline
                );
                ReplicationOutcome::failed(format!("timed out after {:?}", self.deadline))
            }
        }
    }
}

//! ReporterActor - single consumer delivering readings to the sink
//!
//! The reporter owns the one connection to the remote sink, which makes
//! delivery strictly serialized by construction. It is a two-state machine,
//! `connected` / `disconnected`, starting disconnected:
//!
//! 1. If disconnected, attempt one connect (the connector applies the
//!    configured timeout). Failure is logged and the state stays
//!    disconnected.
//! 2. Dequeue the next reading. This is the only suspension point besides
//!    the network I/O itself, so reconnect attempts are paced by reading
//!    arrival, not by a timer.
//! 3. If connected: classify, build the outbound event, send. A send
//!    failure logs, closes the connection, and goes back to disconnected;
//!    the in-flight reading is dropped, never requeued.
//! 4. If the connect in step 1 failed, the dequeued reading is dropped
//!    unclassified.
//!
//! Every reading is therefore attempted at most once, and the queue keeps
//! draining through an outage.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, error, instrument, trace, warn};

use crate::classify::classify;
use crate::config::{AgentConfig, Threshold};
use crate::sink::{SinkConnection, SinkConnector};
use crate::{Event, Reading};

use super::messages::ReporterCommand;

/// The slice of agent configuration the reporter needs to build events.
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    pub thresholds: HashMap<String, Threshold>,
    pub ttl: f32,
    pub tags: Vec<String>,
    pub host: String,
}

impl From<&AgentConfig> for ReporterConfig {
    fn from(config: &AgentConfig) -> Self {
        Self {
            thresholds: config.thresholds.clone(),
            ttl: config.ttl(),
            tags: config.tags.clone(),
            host: config.event_host(),
        }
    }
}

/// Actor draining the shared queue into the sink.
pub struct ReporterActor {
    config: ReporterConfig,
    connector: Box<dyn SinkConnector>,
    connection: Option<Box<dyn SinkConnection>>,
    queue: mpsc::Receiver<Reading>,
    command_rx: mpsc::Receiver<ReporterCommand>,
}

impl ReporterActor {
    pub fn new(
        config: ReporterConfig,
        connector: Box<dyn SinkConnector>,
        queue: mpsc::Receiver<Reading>,
    ) -> (Self, ReporterHandle) {
        let (command_tx, command_rx) = mpsc::channel(8);

        (
            Self {
                config,
                connector,
                connection: None,
                queue,
                command_rx,
            },
            ReporterHandle { sender: command_tx },
        )
    }

    /// Run the reporter until shutdown or until the queue closes.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        debug!("starting reporter");

        loop {
            // Lazy reconnect: one attempt per iteration, no backoff timer.
            if self.connection.is_none() {
                match self.connector.connect().await {
                    Ok(connection) => {
                        debug!("connected to sink");
                        self.connection = Some(connection);
                    }
                    Err(e) => {
                        error!("can not connect to sink: {e}");
                    }
                }
            }

            let reading = tokio::select! {
                maybe = self.queue.recv() => {
                    match maybe {
                        Some(reading) => reading,
                        None => {
                            warn!("queue closed, shutting down");
                            break;
                        }
                    }
                }

                command = self.command_rx.recv() => {
                    match command {
                        Some(ReporterCommand::Shutdown) | None => {
                            debug!("received shutdown command");
                            break;
                        }
                    }
                }
            };

            let Some(connection) = self.connection.as_mut() else {
                // Disconnected: the reading is dropped unclassified so the
                // queue keeps draining through a sink outage.
                trace!("disconnected, dropping reading for {}", reading.service);
                continue;
            };

            let reading = classify(reading, &self.config.thresholds);
            let event = Event {
                value: reading.value,
                ttl: self.config.ttl,
                service: reading.service,
                description: reading.description,
                tags: self.config.tags.clone(),
                host: self.config.host.clone(),
                state: reading.state,
            };

            if let Err(e) = connection.send(&event).await {
                // The in-flight event is dropped, not requeued.
                error!("error: {e}");
                connection.close().await;
                self.connection = None;
            }
        }

        if let Some(mut connection) = self.connection.take() {
            connection.close().await;
        }
        debug!("reporter stopped");
    }
}

/// Handle for controlling a ReporterActor.
#[derive(Clone)]
pub struct ReporterHandle {
    sender: mpsc::Sender<ReporterCommand>,
}

impl ReporterHandle {
    /// Close the sink connection and stop the reporter.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(ReporterCommand::Shutdown).await;
    }
}

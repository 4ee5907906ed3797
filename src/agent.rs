//! Agent orchestrator.
//!
//! Wires the enabled collectors to the shared queue and the clock, spawns
//! the reporter, then starts the clock. The reporter is spawned before the
//! clock so the queue has its consumer before the first round can fill it.

use std::time::Duration;

use futures::future::join_all;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::actors::clock::{ClockActor, ClockHandle};
use crate::actors::collector::CollectorActor;
use crate::actors::reporter::{ReporterActor, ReporterHandle};
use crate::config::{AgentConfig, KNOWN_CHECKS};
use crate::samplers;
use crate::sink::{NetSink, SinkConnector};

/// Capacity of the hand-off queue between collectors and the reporter.
///
/// Large enough to hold all readings of one round; a full queue blocks the
/// producing collector rather than dropping readings.
pub const QUEUE_CAPACITY: usize = 100;

pub struct Agent {
    config: AgentConfig,
}

impl Agent {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }

    /// Start the pipeline against the sink named in the configuration.
    pub fn start(self) -> anyhow::Result<AgentHandle> {
        let connector = Box::new(NetSink::new(
            self.config.address.clone(),
            self.config.transport,
            Duration::from_secs(self.config.timeout),
        ));
        self.start_with_connector(connector)
    }

    /// Start the pipeline with an explicit sink connector.
    ///
    /// Tests use this to swap in mock sinks.
    #[instrument(skip_all)]
    pub fn start_with_connector(
        self,
        connector: Box<dyn SinkConnector>,
    ) -> anyhow::Result<AgentHandle> {
        info!(
            "starting agent: will report each {} seconds",
            self.config.interval
        );

        for check in &self.config.checks {
            if !KNOWN_CHECKS.contains(&check.as_str()) {
                warn!("unknown check '{check}' in configuration, ignoring");
            }
        }

        let (queue_tx, queue_rx) = mpsc::channel(QUEUE_CAPACITY);
        let (mut clock, clock_handle) =
            ClockActor::new(Duration::from_secs(self.config.interval));

        let mut tasks = vec![];
        for check in KNOWN_CHECKS {
            if !self.config.checks.contains(check) {
                continue;
            }

            debug!("collector '{check}' is enabled");
            let sampler = samplers::build(check, &self.config)?;
            let listener = clock.register();
            tasks.push(tokio::spawn(
                CollectorActor::new(sampler, queue_tx.clone(), listener).run(),
            ));
        }

        // The reporter holds the only remaining receiver; dropping our
        // sender means the queue closes once every collector is gone.
        drop(queue_tx);

        let (reporter, reporter_handle) =
            ReporterActor::new((&self.config).into(), connector, queue_rx);
        tasks.push(tokio::spawn(reporter.run()));

        tasks.push(tokio::spawn(clock.run()));

        Ok(AgentHandle {
            clock: clock_handle,
            reporter: reporter_handle,
            tasks,
        })
    }
}

/// Handle owning the running pipeline.
pub struct AgentHandle {
    clock: ClockHandle,
    reporter: ReporterHandle,
    tasks: Vec<JoinHandle<()>>,
}

impl AgentHandle {
    /// Stop the clock, let the collectors wind down, stop the reporter, and
    /// wait for every task to finish.
    pub async fn shutdown(self) {
        self.clock.shutdown().await;
        self.reporter.shutdown().await;

        for result in join_all(self.tasks).await {
            if let Err(e) = result {
                warn!("task ended abnormally: {e}");
            }
        }
    }
}

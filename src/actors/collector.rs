//! CollectorActor - drives one sampler on the shared clock
//!
//! One collector actor runs per enabled check. The actor itself knows
//! nothing about the metric being sampled; it only enforces the driving
//! contract:
//!
//! ```text
//! wait for tick → sample → push readings into the shared queue → repeat
//! ```
//!
//! Pushes use a blocking `send().await`, so a saturated queue stalls this
//! collector's next round instead of dropping readings. Sampler errors are
//! logged and the round is skipped; the actor exits when the clock closes
//! its tick channel.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, error, instrument, trace};

use crate::Reading;

use super::clock::TickListener;

/// Contract for the external metric producers.
///
/// `sample` runs once per observed tick and may return any number of
/// readings, all created with the default `ok` state.
#[async_trait]
pub trait Sampler: Send {
    fn name(&self) -> &'static str;

    async fn sample(&mut self) -> Result<Vec<Reading>>;
}

/// Actor binding one sampler to the shared queue and a clock listener.
pub struct CollectorActor {
    sampler: Box<dyn Sampler>,
    queue: mpsc::Sender<Reading>,
    ticks: TickListener,
}

impl CollectorActor {
    pub fn new(sampler: Box<dyn Sampler>, queue: mpsc::Sender<Reading>, ticks: TickListener) -> Self {
        Self {
            sampler,
            queue,
            ticks,
        }
    }

    /// Run the collector until the clock shuts down or the queue closes.
    #[instrument(skip(self), fields(check = %self.sampler.name()))]
    pub async fn run(mut self) {
        debug!("starting collector");

        while let Some(tick) = self.ticks.recv().await {
            trace!("sampling for tick {}", tick.seq);

            let readings = match self.sampler.sample().await {
                Ok(readings) => readings,
                Err(e) => {
                    error!("sampling failed: {e:#}");
                    continue;
                }
            };

            for reading in readings {
                // Blocking send: backpressure instead of data loss.
                if self.queue.send(reading).await.is_err() {
                    debug!("queue closed, shutting down");
                    return;
                }
            }
        }

        debug!("tick channel closed, collector stopped");
    }
}

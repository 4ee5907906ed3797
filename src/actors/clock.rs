//! ClockActor - periodic tick fan-out
//!
//! The clock is the round barrier for the whole pipeline: every `interval`
//! it delivers one [`Tick`] to every registered listener. Fan-out is an
//! explicit loop over per-listener bounded channels owned by this actor, so
//! the buffering policy is visible and testable instead of hidden inside a
//! pub/sub primitive.
//!
//! ## Tick overrun policy
//!
//! Each listener channel has capacity 1. A collector still busy with the
//! previous round has a full buffer when the next tick fires; that tick is
//! dropped *for that listener only*. The clock never blocks and the other
//! collectors keep their rounds.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::{Instant, interval_at};
use tracing::{debug, instrument, trace, warn};

use super::messages::{ClockCommand, Tick};

/// Capacity of each per-listener tick channel.
const LISTENER_BUFFER: usize = 1;

/// Receiving end of one listener registration.
pub struct TickListener {
    receiver: mpsc::Receiver<Tick>,
}

impl TickListener {
    /// Wait for the next tick. Returns `None` once the clock has shut down.
    pub async fn recv(&mut self) -> Option<Tick> {
        self.receiver.recv().await
    }
}

/// Actor that fires a tick at a fixed interval and fans it out.
pub struct ClockActor {
    interval: Duration,
    listeners: Vec<mpsc::Sender<Tick>>,
    command_rx: mpsc::Receiver<ClockCommand>,
}

impl ClockActor {
    pub fn new(interval: Duration) -> (Self, ClockHandle) {
        let (command_tx, command_rx) = mpsc::channel(8);

        (
            Self {
                interval,
                listeners: vec![],
                command_rx,
            },
            ClockHandle { sender: command_tx },
        )
    }

    /// Register a listener.
    ///
    /// Must be called before the clock is spawned; a listener registered
    /// here observes every tick emitted afterwards.
    pub fn register(&mut self) -> TickListener {
        let (tx, rx) = mpsc::channel(LISTENER_BUFFER);
        self.listeners.push(tx);
        TickListener { receiver: rx }
    }

    /// Run the clock until shutdown.
    ///
    /// The first tick fires one full interval after start.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        debug!(
            "starting clock with {} listeners, interval {:?}",
            self.listeners.len(),
            self.interval
        );

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        let mut seq = 0u64;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let tick = Tick { seq, at: Utc::now() };
                    trace!("broadcasting tick {seq}");
                    self.broadcast(tick);
                    seq += 1;
                }

                command = self.command_rx.recv() => {
                    match command {
                        Some(ClockCommand::Shutdown) => {
                            debug!("received shutdown command");
                            break;
                        }
                        None => {
                            warn!("command channel closed, shutting down");
                            break;
                        }
                    }
                }
            }
        }

        // Dropping the senders closes every tick channel, which in turn
        // terminates the collector loops.
        debug!("clock stopped after {seq} ticks");
    }

    fn broadcast(&self, tick: Tick) {
        for listener in &self.listeners {
            match listener.try_send(tick) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    debug!("listener busy, dropping tick {} for it", tick.seq);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    trace!("listener gone, skipping");
                }
            }
        }
    }
}

/// Handle for controlling a ClockActor.
#[derive(Clone)]
pub struct ClockHandle {
    sender: mpsc::Sender<ClockCommand>,
}

impl ClockHandle {
    /// Stop the clock. Collectors wind down once their tick channels close.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(ClockCommand::Shutdown).await;
    }
}

//! Actor-based collection and delivery pipeline
//!
//! Each actor runs as an independent async task communicating via Tokio
//! channels. There is no shared mutable state anywhere in the pipeline.
//!
//! ## Architecture Overview
//!
//! ```text
//!                 ┌───────────────┐
//!                 │  ClockActor   │ ticks every `interval`
//!                 └───────┬───────┘
//!            fan-out      │ one bounded channel per listener
//!          ┌──────────────┼──────────────┐
//!          │              │              │
//!  ┌───────▼──────┐ ┌─────▼──────┐ ┌─────▼──────┐
//!  │ Collector-1  │ │ Collector-2│ │ Collector-N│   one per enabled check
//!  └───────┬──────┘ └─────┬──────┘ └─────┬──────┘
//!          │              │              │
//!          └──────────────┼──────────────┘
//!                         │ bounded mpsc queue (backpressure)
//!                 ┌───────▼───────┐
//!                 │ ReporterActor │ classify + deliver, single consumer
//!                 └───────┬───────┘
//!                         │ one persistent connection
//!                 ┌───────▼───────┐
//!                 │  remote sink  │
//!                 └───────────────┘
//! ```
//!
//! ## Coordination rules
//!
//! 1. **Ticks**: the clock owns one channel per collector; a tick is a round
//!    barrier. A collector still busy when the next tick fires loses that
//!    tick only for itself.
//! 2. **Queue**: readings travel through a single bounded mpsc channel; a
//!    full queue blocks the producing collector rather than dropping data.
//! 3. **Delivery**: the reporter is the only task touching the sink
//!    connection, so sends are serialized by construction.

pub mod clock;
pub mod collector;
pub mod messages;
pub mod reporter;

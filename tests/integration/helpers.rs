//! Helper types for integration tests

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use hostwatch::actors::collector::Sampler;
use hostwatch::config::AgentConfig;
use hostwatch::sink::{ConnectError, SendError, SinkConnection, SinkConnector};
use hostwatch::{Event, Reading};

/// In-memory sink connector recording everything the reporter delivers.
#[derive(Clone, Default)]
pub struct MockSink {
    pub sent: Arc<Mutex<Vec<Event>>>,
    pub refuse_connect: Arc<AtomicBool>,
    pub connect_attempts: Arc<AtomicUsize>,
}

impl MockSink {
    pub fn sent_events(&self) -> Vec<Event> {
        self.sent.lock().unwrap().clone()
    }
}

pub struct MockConnection {
    sink: MockSink,
}

#[async_trait]
impl SinkConnector for MockSink {
    async fn connect(&self) -> Result<Box<dyn SinkConnection>, ConnectError> {
        self.connect_attempts.fetch_add(1, Ordering::SeqCst);
        if self.refuse_connect.load(Ordering::SeqCst) {
            return Err(ConnectError::Timeout);
        }
        Ok(Box::new(MockConnection { sink: self.clone() }))
    }
}

#[async_trait]
impl SinkConnection for MockConnection {
    async fn send(&mut self, event: &Event) -> Result<(), SendError> {
        self.sink.sent.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn close(&mut self) {}
}

/// Sampler producing one fixed reading per round, tagged with the round
/// count so tests can tell rounds apart.
pub struct ScriptedSampler {
    pub service: &'static str,
    pub value: f64,
    pub rounds: Arc<AtomicUsize>,
}

impl ScriptedSampler {
    pub fn new(service: &'static str, value: f64) -> Self {
        Self {
            service,
            value,
            rounds: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Sampler for ScriptedSampler {
    fn name(&self) -> &'static str {
        self.service
    }

    async fn sample(&mut self) -> Result<Vec<Reading>> {
        let round = self.rounds.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Reading::new(
            self.service,
            format!("round {round}"),
            self.value,
        )])
    }
}

pub fn create_test_config(thresholds_json: &str) -> AgentConfig {
    serde_json::from_str(&format!(
        r#"{{
            "address": "127.0.0.1:5555",
            "interval": 1,
            "ttl": 20.0,
            "tags": ["integration"],
            "host": "test-host",
            "thresholds": {thresholds_json}
        }}"#
    ))
    .unwrap()
}

/// Poll until `condition` holds or a two second budget runs out.
pub async fn wait_for<F: Fn() -> bool>(condition: F) {
    tokio::time::timeout(std::time::Duration::from_secs(2), async {
        while !condition() {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

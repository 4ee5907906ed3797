use std::collections::{HashMap, HashSet};

use tracing::trace;

/// Transport used to reach the monitoring sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Tcp,
    Udp,
}

/// Warning/critical boundaries for one service.
///
/// Keyed by the base service name, i.e. `"disk"` covers `"disk /boot"`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct Threshold {
    pub warning: f64,
    pub critical: f64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AgentConfig {
    /// Address of the monitoring sink, `host:port`.
    pub address: String,

    #[serde(default)]
    pub transport: TransportKind,

    /// Connect timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Reporting interval in seconds.
    #[serde(default = "default_interval")]
    pub interval: u64,

    /// Time-to-live attached to every outbound event. Defaults to twice the
    /// interval so the sink expires an event only after a missed round.
    pub ttl: Option<f32>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Host identity reported to the sink. Defaults to the OS hostname.
    pub host: Option<String>,

    #[serde(default)]
    pub ifaces: HashSet<String>,

    #[serde(default)]
    pub ignore_ifaces: HashSet<String>,

    #[serde(default)]
    pub devices: HashSet<String>,

    #[serde(default)]
    pub ignore_devices: HashSet<String>,

    #[serde(default)]
    pub thresholds: HashMap<String, Threshold>,

    /// Enabled check names. Defaults to every known check.
    #[serde(default = "default_checks")]
    pub checks: HashSet<String>,
}

impl AgentConfig {
    pub fn ttl(&self) -> f32 {
        self.ttl.unwrap_or((self.interval * 2) as f32)
    }

    pub fn event_host(&self) -> String {
        self.host
            .clone()
            .or_else(sysinfo::System::host_name)
            .unwrap_or_else(|| String::from("unknown"))
    }
}

/// The fixed set of checks the agent knows how to run.
pub const KNOWN_CHECKS: [&str; 6] = ["cpu", "memory", "load", "net", "disk", "diskstats"];

fn default_checks() -> HashSet<String> {
    KNOWN_CHECKS.iter().map(|check| check.to_string()).collect()
}

fn default_timeout() -> u64 {
    5
}

fn default_interval() -> u64 {
    10
}

pub fn read_config_file(path: &str) -> anyhow::Result<AgentConfig> {
    let file_content = std::fs::read_to_string(path)?;
    serde_json::from_str(&file_content)
        .map_err(|_| anyhow::anyhow!("Invalid configuration file provided!"))
        .inspect(|config| trace!("loaded config: {config:?}"))
}

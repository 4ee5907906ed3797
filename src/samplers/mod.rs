//! Built-in samplers for the local host.
//!
//! One file per check, all backed by `sysinfo`. Samplers keep their
//! `sysinfo` handles across rounds so counters that report deltas (network
//! traffic, disk I/O) measure exactly one round.

pub mod cpu;
pub mod disk;
pub mod diskstats;
pub mod load;
pub mod memory;
pub mod net;

use std::collections::HashSet;

use anyhow::bail;

use crate::actors::collector::Sampler;
use crate::config::AgentConfig;

/// Build the sampler for a check name.
pub fn build(check: &str, config: &AgentConfig) -> anyhow::Result<Box<dyn Sampler>> {
    Ok(match check {
        "cpu" => Box::new(cpu::CpuSampler::new()),
        "memory" => Box::new(memory::MemorySampler::new()),
        "load" => Box::new(load::LoadSampler),
        "net" => Box::new(net::NetSampler::new(
            config.ifaces.clone(),
            config.ignore_ifaces.clone(),
        )),
        "disk" => Box::new(disk::DiskSampler::new()),
        "diskstats" => Box::new(diskstats::DiskStatsSampler::new(
            config.devices.clone(),
            config.ignore_devices.clone(),
        )),
        unknown => bail!("unknown check '{unknown}'"),
    })
}

/// Device/interface selection: a non-empty include set wins, otherwise
/// everything not in the exclude set.
pub(crate) fn selected(name: &str, include: &HashSet<String>, exclude: &HashSet<String>) -> bool {
    if !include.is_empty() {
        return include.contains(name);
    }
    !exclude.contains(name)
}

//! Global CPU utilisation.

use anyhow::Result;
use async_trait::async_trait;
use sysinfo::System;

use crate::Reading;
use crate::actors::collector::Sampler;

pub struct CpuSampler {
    system: System,
}

impl CpuSampler {
    pub fn new() -> Self {
        let mut system = System::new();
        // Prime the usage counters; the first refresh always reads zero.
        system.refresh_cpu_usage();
        Self { system }
    }
}

impl Default for CpuSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sampler for CpuSampler {
    fn name(&self) -> &'static str {
        "cpu"
    }

    async fn sample(&mut self) -> Result<Vec<Reading>> {
        self.system.refresh_cpu_usage();
        let usage = self.system.global_cpu_usage() as f64;

        Ok(vec![Reading::new(
            "cpu",
            "cpu utilisation in percent",
            usage,
        )])
    }
}

//! Memory and swap usage.

use anyhow::Result;
use async_trait::async_trait;
use sysinfo::System;

use crate::Reading;
use crate::actors::collector::Sampler;

pub struct MemorySampler {
    system: System,
}

impl MemorySampler {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for MemorySampler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sampler for MemorySampler {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn sample(&mut self) -> Result<Vec<Reading>> {
        self.system.refresh_memory();

        let mut readings = vec![Reading::new(
            "memory",
            "memory used in percent",
            percent(self.system.used_memory(), self.system.total_memory()),
        )];

        // Hosts without swap report a total of zero; skip the reading
        // instead of producing a division artifact.
        if self.system.total_swap() > 0 {
            readings.push(Reading::new(
                "swap",
                "swap used in percent",
                percent(self.system.used_swap(), self.system.total_swap()),
            ));
        }

        Ok(readings)
    }
}

fn percent(used: u64, total: u64) -> f64 {
    used as f64 / total as f64 * 100.0
}

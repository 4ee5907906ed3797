//! Per-mount-point disk space.

use anyhow::Result;
use async_trait::async_trait;
use sysinfo::Disks;

use crate::Reading;
use crate::actors::collector::Sampler;

pub struct DiskSampler {
    disks: Disks,
}

impl DiskSampler {
    pub fn new() -> Self {
        Self {
            disks: Disks::new_with_refreshed_list(),
        }
    }
}

impl Default for DiskSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sampler for DiskSampler {
    fn name(&self) -> &'static str {
        "disk"
    }

    async fn sample(&mut self) -> Result<Vec<Reading>> {
        self.disks.refresh(true);

        let mut readings = vec![];
        for disk in &self.disks {
            let total = disk.total_space();
            if total == 0 {
                continue;
            }

            let used = total - disk.available_space();
            let mount = disk.mount_point().display();

            // Compound service key: thresholds resolve under "disk".
            readings.push(Reading::new(
                format!("disk {mount}"),
                "disk space used in percent",
                used as f64 / total as f64 * 100.0,
            ));
        }

        Ok(readings)
    }
}

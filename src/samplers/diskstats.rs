//! Per-device disk I/O.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use sysinfo::Disks;

use crate::Reading;
use crate::actors::collector::Sampler;

use super::selected;

pub struct DiskStatsSampler {
    disks: Disks,
    devices: HashSet<String>,
    ignore_devices: HashSet<String>,
}

impl DiskStatsSampler {
    pub fn new(devices: HashSet<String>, ignore_devices: HashSet<String>) -> Self {
        Self {
            disks: Disks::new_with_refreshed_list(),
            devices,
            ignore_devices,
        }
    }
}

#[async_trait]
impl Sampler for DiskStatsSampler {
    fn name(&self) -> &'static str {
        "diskstats"
    }

    async fn sample(&mut self) -> Result<Vec<Reading>> {
        self.disks.refresh(true);

        let mut readings = vec![];
        for disk in &self.disks {
            let device = disk.name().to_string_lossy();
            if !selected(&device, &self.devices, &self.ignore_devices) {
                continue;
            }

            // read_bytes/written_bytes are deltas since the last refresh.
            let usage = disk.usage();
            readings.push(Reading::new(
                format!("diskstats {device} read"),
                "bytes read since last round",
                usage.read_bytes as i64,
            ));
            readings.push(Reading::new(
                format!("diskstats {device} written"),
                "bytes written since last round",
                usage.written_bytes as i64,
            ));
        }

        Ok(readings)
    }
}

//! Per-interface network traffic.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use sysinfo::Networks;

use crate::Reading;
use crate::actors::collector::Sampler;

use super::selected;

pub struct NetSampler {
    networks: Networks,
    ifaces: HashSet<String>,
    ignore_ifaces: HashSet<String>,
}

impl NetSampler {
    pub fn new(ifaces: HashSet<String>, ignore_ifaces: HashSet<String>) -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
            ifaces,
            ignore_ifaces,
        }
    }
}

#[async_trait]
impl Sampler for NetSampler {
    fn name(&self) -> &'static str {
        "net"
    }

    async fn sample(&mut self) -> Result<Vec<Reading>> {
        self.networks.refresh(true);

        let mut readings = vec![];
        for (iface, data) in &self.networks {
            if !selected(iface, &self.ifaces, &self.ignore_ifaces) {
                continue;
            }

            // received()/transmitted() are deltas since the last refresh,
            // i.e. exactly one round.
            readings.push(Reading::new(
                format!("net {iface} rx"),
                "bytes received since last round",
                data.received() as i64,
            ));
            readings.push(Reading::new(
                format!("net {iface} tx"),
                "bytes transmitted since last round",
                data.transmitted() as i64,
            ));
        }

        Ok(readings)
    }
}

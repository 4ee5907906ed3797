//! System load average.

use anyhow::Result;
use async_trait::async_trait;
use sysinfo::System;

use crate::Reading;
use crate::actors::collector::Sampler;

pub struct LoadSampler;

#[async_trait]
impl Sampler for LoadSampler {
    fn name(&self) -> &'static str {
        "load"
    }

    async fn sample(&mut self) -> Result<Vec<Reading>> {
        let load = System::load_average();

        Ok(vec![Reading::new(
            "load",
            "one-minute load average",
            load.one,
        )])
    }
}

use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use shared_kernel::configuration::config;
use shared_kernel::date_time::civil_date_time::CivilTimeZone;
use shared_kernel::http_client::HttpClientConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct OutageApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for OutageApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
        }
    }
}

impl OutageApiConfig {
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: Duration::from_secs(self.timeout_seconds),
            max_retries: self.max_retries,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub outage_api: OutageApiConfig,
    #[serde(default = "default_civil_time_zone")]
    pub civil_time_zone: String,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Settings> {
        config::<Settings>().context("Failed to deserialize settings to outage_schedule settings")
    }

    pub fn civil_time_zone(&self) -> anyhow::Result<CivilTimeZone> {
        CivilTimeZone::from_name(&self.civil_time_zone)
    }
}

fn default_host() -> String {
    "https://off.energy.mk.ua".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_max_retries() -> u32 {
    3
}

fn default_civil_time_zone() -> String {
    "Europe/Kyiv".to_string()
}

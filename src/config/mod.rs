#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::{DEFAULT_TIMEOUT, GMD_NAMESPACE};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const MIN_TIMEOUT_SECONDS: u64 = 1;
pub const MAX_TIMEOUT_SECONDS: u64 = 600;

/// Resolved catalogue settings handed to the interactor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub url_csw: String,
    pub ns_gmd: String,
    pub timeout_seconds: u64,
}

impl CatalogConfig {
    pub fn new(url_csw: impl Into<String>) -> Self {
        Self {
            url_csw: url_csw.into(),
            ns_gmd: GMD_NAMESPACE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
        }
    }

    pub fn with_ns_gmd(mut self, ns_gmd: impl Into<String>) -> Self {
        self.ns_gmd = ns_gmd.into();
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

impl ConfigProvider for CatalogConfig {
    fn url_csw(&self) -> &str {
        &self.url_csw
    }

    fn ns_gmd(&self) -> &str {
        &self.ns_gmd
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        validate_url("url_csw", &self.url_csw)?;
        validate_non_empty_string("ns_gmd", &self.ns_gmd)?;
        validate_range(
            "timeout_seconds",
            self.timeout_seconds,
            MIN_TIMEOUT_SECONDS,
            MAX_TIMEOUT_SECONDS,
        )
    }
}

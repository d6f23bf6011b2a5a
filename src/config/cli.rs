use crate::config::toml_config::TomlConfig;
use crate::config::CatalogConfig;
use crate::utils::error::{CswError, Result};
use crate::utils::validation::{validate_required_field, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "csw-interactor")]
#[command(about = "Query an OGC CSW 2.0.2 catalogue")]
pub struct CliConfig {
    /// Catalogue service endpoint
    #[arg(long, env = "CSW_URL")]
    pub url_csw: Option<String>,

    /// Output schema for GetRecordById
    #[arg(long)]
    pub ns_gmd: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// TOML file with a [catalog] section; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// GetRecords with brief element set
    Records {
        #[arg(long, default_value = "10")]
        max_records: u32,

        #[arg(long, default_value = "1")]
        start_position: u32,
    },
    /// Number of records in the catalogue
    Count,
    /// GetRecordById with full element set
    Record {
        #[arg(long)]
        id: String,
    },
}

/// Effective settings after merging flags over the optional TOML file.
#[derive(Debug, Clone)]
pub struct ResolvedCli {
    pub catalog: CatalogConfig,
    pub verbose: bool,
    pub log_json: bool,
}

impl CliConfig {
    pub fn resolve(&self) -> Result<ResolvedCli> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };

        let url = match (&self.url_csw, &file) {
            (Some(url), _) => url.clone(),
            (None, Some(file)) => file.catalog.url.clone(),
            (None, None) => validate_required_field("url_csw", &self.url_csw)?.clone(),
        };

        let mut catalog = match &file {
            Some(file) => file.catalog_config(),
            None => CatalogConfig::new(url.clone()),
        };
        catalog.url_csw = url;
        if let Some(ns) = &self.ns_gmd {
            catalog.ns_gmd = ns.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            catalog.timeout_seconds = timeout;
        }
        catalog.validate()?;

        Ok(ResolvedCli {
            catalog,
            verbose: self.verbose || file.as_ref().is_some_and(|f| f.verbose()),
            log_json: self.log_json || file.as_ref().is_some_and(|f| f.json_logs()),
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.url_csw.is_none() && self.config.is_none() {
            return Err(CswError::MissingConfigError {
                field: "url_csw (or --config)".to_string(),
            });
        }
        Ok(())
    }
}

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::CswAdapter;
pub use config::{toml_config::TomlConfig, CatalogConfig};
pub use core::interactor::CatalogInteractor;
pub use utils::error::{CswError, Result};

use crate::domain::model::{Operation, OperationResult, ParameterSet};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Endpoint-relevant settings of a catalogue client.
pub trait ConfigProvider: Send + Sync {
    fn url_csw(&self) -> &str;
    fn ns_gmd(&self) -> &str;
    fn timeout(&self) -> Duration;
}

/// Transport seam between the interactor and the catalogue service.
#[async_trait]
pub trait CatalogAdapter: Send + Sync {
    async fn do_operation(
        &self,
        operation: &Operation,
        parameters: &ParameterSet,
    ) -> Result<OperationResult>;

    async fn post_xml(&self, url: &str, body: String) -> Result<OperationResult>;
}

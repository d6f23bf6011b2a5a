use crate::adapters::request_builder::{get_record_by_id_url, get_records_document};
use crate::core::response::exception_report;
use crate::domain::model::{Operation, OperationName, OperationResult, ParameterSet};
use crate::domain::ports::{CatalogAdapter, ConfigProvider};
use crate::utils::error::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::time::Duration;

const TEXT_XML: &str = "text/xml";

/// [`CatalogAdapter`] speaking CSW 2.0.2 over HTTP.
///
/// GetRecordById goes out as a KVP GET, GetRecords as a POSTed XML document.
/// Responses that are OWS exception reports are turned into errors.
#[derive(Debug, Clone)]
pub struct CswAdapter {
    client: Client,
}

impl CswAdapter {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.timeout())
    }

    async fn read_result(response: Response) -> Result<OperationResult> {
        let status = response.status();
        tracing::debug!("CSW response status: {}", status);
        let body = response.bytes().await?.to_vec();
        Ok(OperationResult {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait::async_trait]
impl CatalogAdapter for CswAdapter {
    async fn do_operation(
        &self,
        operation: &Operation,
        parameters: &ParameterSet,
    ) -> Result<OperationResult> {
        let result = match operation.name {
            OperationName::GetRecordById => {
                let url = get_record_by_id_url(&operation.get_url, parameters)?;
                tracing::debug!("GET {}", url);
                let response = self.client.get(url).send().await?;
                Self::read_result(response).await?
            }
            OperationName::GetRecords => {
                let document = get_records_document(parameters)?;
                self.post_xml(&operation.post_url, document).await?
            }
        };

        if let Some(error) = exception_report(&result.body) {
            tracing::warn!("{} answered with an exception report: {}", operation.name, error);
            return Err(error);
        }

        Ok(result)
    }

    async fn post_xml(&self, url: &str, body: String) -> Result<OperationResult> {
        tracing::debug!("POST {} ({} bytes, {})", url, body.len(), TEXT_XML);
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, TEXT_XML)
            .body(body)
            .send()
            .await?;
        Self::read_result(response).await
    }
}

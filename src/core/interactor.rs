use crate::adapters::request_builder::hits_document;
use crate::adapters::CswAdapter;
use crate::core::response::parse_record_count;
use crate::domain::model::{
    ElementSetName, Operation, OperationName, ParameterSet, RequestParameter, ResultType,
    CSW_NAMESPACE, OUTPUT_FORMAT_XML, RECORD_TYPE_NAME, SERVICE_TYPE, SUPPORTED_VERSION,
};
use crate::domain::ports::{CatalogAdapter, ConfigProvider};
use crate::utils::error::Result;

/// Longest response excerpt written to the debug log, in characters.
const LOG_EXCERPT_CHARS: usize = 17 * 42;

/// Runs the three catalogue queries against the configured CSW endpoint.
pub struct CatalogInteractor<C: ConfigProvider, A: CatalogAdapter = CswAdapter> {
    config: C,
    adapter: A,
}

impl<C: ConfigProvider> CatalogInteractor<C, CswAdapter> {
    pub fn new(config: C) -> Result<Self> {
        let adapter = CswAdapter::from_config(&config)?;
        Ok(Self { config, adapter })
    }
}

impl<C: ConfigProvider, A: CatalogAdapter> CatalogInteractor<C, A> {
    pub fn with_adapter(config: C, adapter: A) -> Self {
        Self { config, adapter }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Paginated brief records, raw `csw:GetRecordsResponse` XML.
    pub async fn fetch_records(&self, max_records: u32, start_position: u32) -> Result<String> {
        let parameters = get_records_parameters(max_records, start_position);
        let operation = Operation::for_service(OperationName::GetRecords, self.config.url_csw());

        self.execute(&parameters, &operation).await
    }

    /// Number of records the catalogue holds, from a `resultType="hits"` query.
    pub async fn fetch_record_count(&self) -> Result<u64> {
        let request = hits_document()?;
        let url_csw = self.config.url_csw();
        tracing::debug!("Requesting record count from {}", url_csw);

        let result = self.adapter.post_xml(url_csw, request).await?;
        let count = parse_record_count(&result.body)?;

        tracing::debug!("Catalogue reports {} matching records", count);
        Ok(count)
    }

    /// Full record for `record_id` in the configured metadata schema, raw XML.
    pub async fn fetch_record_by_id(&self, record_id: &str) -> Result<String> {
        tracing::debug!("Calling GetRecordById for record '{}'", record_id);

        let parameters = get_record_by_id_parameters(record_id, self.config.ns_gmd());
        let operation =
            Operation::for_service(OperationName::GetRecordById, self.config.url_csw());

        self.execute(&parameters, &operation).await
    }

    async fn execute(&self, parameters: &ParameterSet, operation: &Operation) -> Result<String> {
        tracing::debug!("Executing operation {}", operation);
        let result = self.adapter.do_operation(operation, parameters).await?;

        let text = result.text();
        tracing::debug!("Received (excerpt): {}", excerpt(&text));
        Ok(text)
    }
}

pub fn get_records_parameters(max_records: u32, start_position: u32) -> ParameterSet {
    ParameterSet::new()
        .with(RequestParameter::MaxRecords, max_records)
        .with(RequestParameter::StartPosition, start_position)
        .with(RequestParameter::ResultType, ResultType::Results.as_str())
        .with(RequestParameter::OutputFormat, OUTPUT_FORMAT_XML)
        .with(RequestParameter::OutputSchema, CSW_NAMESPACE)
        .with(RequestParameter::TypeNames, RECORD_TYPE_NAME)
        .with(RequestParameter::ElementSetName, ElementSetName::Brief.as_str())
}

pub fn get_record_by_id_parameters(record_id: &str, output_schema: &str) -> ParameterSet {
    ParameterSet::new()
        .with(RequestParameter::Request, OperationName::GetRecordById.as_str())
        .with(RequestParameter::Version, SUPPORTED_VERSION)
        .with(RequestParameter::Service, SERVICE_TYPE)
        .with(RequestParameter::Id, record_id)
        .with(RequestParameter::ElementSetName, ElementSetName::Full.as_str())
        .with(RequestParameter::OutputSchema, output_schema)
}

fn excerpt(text: &str) -> &str {
    match text.char_indices().nth(LOG_EXCERPT_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

use crate::domain::model::{
    OperationName, ParameterSet, RequestParameter, ResultType, CSW_NAMESPACE, RECORD_TYPE_NAME,
    SERVICE_TYPE, SUPPORTED_VERSION,
};
use crate::utils::error::{CswError, Result};
use url::Url;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Parameters a GetRecordById KVP request may carry.
const GET_RECORD_BY_ID_PARAMETERS: &[RequestParameter] = &[
    RequestParameter::Request,
    RequestParameter::Version,
    RequestParameter::Service,
    RequestParameter::Id,
    RequestParameter::ElementSetName,
    RequestParameter::OutputSchema,
    RequestParameter::OutputFormat,
];

/// Parameters that become attributes of `csw:GetRecords`.
const GET_RECORDS_ATTRIBUTES: &[RequestParameter] = &[
    RequestParameter::ResultType,
    RequestParameter::OutputFormat,
    RequestParameter::OutputSchema,
    RequestParameter::StartPosition,
    RequestParameter::MaxRecords,
];

fn require(
    operation: OperationName,
    parameters: &ParameterSet,
    parameter: RequestParameter,
) -> Result<String> {
    parameters
        .get(parameter)
        .map(|v| v.to_string())
        .ok_or_else(|| CswError::AdapterError {
            message: format!(
                "{} requires parameter '{}'",
                operation,
                parameter.key()
            ),
        })
}

fn reject_unsupported(
    operation: OperationName,
    parameters: &ParameterSet,
    supported: &[RequestParameter],
) -> Result<()> {
    match parameters.keys().find(|p| !supported.contains(p)) {
        Some(parameter) => Err(CswError::AdapterError {
            message: format!(
                "parameter '{}' is not applicable to {}",
                parameter.key(),
                operation
            ),
        }),
        None => Ok(()),
    }
}

/// Encodes a GetRecordById request as a KVP GET URL.
pub fn get_record_by_id_url(base_url: &str, parameters: &ParameterSet) -> Result<Url> {
    let operation = OperationName::GetRecordById;
    reject_unsupported(operation, parameters, GET_RECORD_BY_ID_PARAMETERS)?;
    require(operation, parameters, RequestParameter::Id)?;

    if let Some(request) = parameters.get(RequestParameter::Request) {
        if request.to_string() != operation.as_str() {
            return Err(CswError::AdapterError {
                message: format!(
                    "request parameter '{}' does not match operation {}",
                    request, operation
                ),
            });
        }
    }

    let mut url = Url::parse(base_url).map_err(|e| CswError::InvalidConfigValueError {
        field: "url_csw".to_string(),
        value: base_url.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    {
        let mut query = url.query_pairs_mut();
        for (parameter, value) in parameters.iter() {
            query.append_pair(parameter.key(), &value.to_string());
        }
    }

    Ok(url)
}

/// Encodes a GetRecords request as a `csw:GetRecords` XML document.
pub fn get_records_document(parameters: &ParameterSet) -> Result<String> {
    let operation = OperationName::GetRecords;
    let mut supported = GET_RECORDS_ATTRIBUTES.to_vec();
    supported.extend([
        RequestParameter::Service,
        RequestParameter::Version,
        RequestParameter::TypeNames,
        RequestParameter::ElementSetName,
    ]);
    reject_unsupported(operation, parameters, &supported)?;
    let type_names = require(operation, parameters, RequestParameter::TypeNames)?;

    let service = parameters
        .get(RequestParameter::Service)
        .map(|v| v.to_string())
        .unwrap_or_else(|| SERVICE_TYPE.to_string());
    let version = parameters
        .get(RequestParameter::Version)
        .map(|v| v.to_string())
        .unwrap_or_else(|| SUPPORTED_VERSION.to_string());

    let mut attributes = format!(
        r#"xmlns:csw="{}" service="{}" version="{}""#,
        CSW_NAMESPACE,
        escape_xml(&service),
        escape_xml(&version)
    );
    for (parameter, value) in parameters.iter() {
        if GET_RECORDS_ATTRIBUTES.contains(&parameter) {
            attributes.push_str(&format!(
                r#" {}="{}""#,
                parameter.key(),
                escape_xml(&value.to_string())
            ));
        }
    }

    let mut output = format!("{}\n<csw:GetRecords {}>\n", XML_DECLARATION, attributes);
    match parameters.get(RequestParameter::ElementSetName) {
        Some(element_set) => {
            output.push_str(&format!(
                "  <csw:Query typeNames=\"{}\">\n",
                escape_xml(&type_names)
            ));
            output.push_str(&format!(
                "    <csw:ElementSetName>{}</csw:ElementSetName>\n",
                escape_xml(&element_set.to_string())
            ));
            output.push_str("  </csw:Query>\n");
        }
        None => output.push_str(&format!(
            "  <csw:Query typeNames=\"{}\"/>\n",
            escape_xml(&type_names)
        )),
    }
    output.push_str("</csw:GetRecords>\n");
    Ok(output)
}

/// The `resultType="hits"` GetRecords document used to count catalogue records.
pub fn hits_document() -> Result<String> {
    let parameters = ParameterSet::new()
        .with(RequestParameter::ResultType, ResultType::Hits.as_str())
        .with(RequestParameter::TypeNames, RECORD_TYPE_NAME);
    get_records_document(&parameters)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

use crate::utils::error::{CswError, Result};
use serde::Deserialize;
use std::num::IntErrorKind;
use xml::reader::{EventReader, XmlEvent};

const GET_RECORDS_RESPONSE: &str = "GetRecordsResponse";
const EXCEPTION_REPORT: &str = "ExceptionReport";

/// Shape shared by `csw:GetRecordsResponse` and `ows:ExceptionReport`.
/// Elements are matched by local name, so namespace prefixes do not matter.
#[derive(Debug, Deserialize)]
struct ResponseDocument {
    #[serde(rename = "SearchResults", default)]
    search_results: Option<SearchResults>,
    #[serde(rename = "Exception", default)]
    exceptions: Vec<ExceptionEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    #[serde(rename = "numberOfRecordsMatched", default)]
    number_of_records_matched: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExceptionEntry {
    #[serde(rename = "exceptionCode", default)]
    exception_code: Option<String>,
    #[serde(default)]
    locator: Option<String>,
    #[serde(rename = "ExceptionText", default)]
    texts: Vec<String>,
}

impl ExceptionEntry {
    fn into_error(self) -> CswError {
        CswError::ExceptionReport {
            code: self
                .exception_code
                .unwrap_or_else(|| "NoApplicableCode".to_string()),
            locator: self.locator,
            texts: self.texts.into_iter().map(|t| t.trim().to_string()).collect(),
        }
    }
}

/// Parses the body and returns the root element's local name alongside its content.
fn parse_document(body: &[u8]) -> Result<(String, ResponseDocument)> {
    let document: ResponseDocument = serde_xml_rs::from_reader(body)?;
    Ok((root_name(body)?, document))
}

fn root_name(body: &[u8]) -> Result<String> {
    for event in EventReader::new(body) {
        if let XmlEvent::StartElement { name, .. } = event? {
            return Ok(name.local_name);
        }
    }
    Err(CswError::IllegalState {
        message: "response has no root element".to_string(),
    })
}

/// Extracts `SearchResults/@numberOfRecordsMatched` from a GetRecords response.
pub fn parse_record_count(body: &[u8]) -> Result<u64> {
    let (root, document) = parse_document(body)?;

    match root.as_str() {
        GET_RECORDS_RESPONSE => {}
        EXCEPTION_REPORT => {
            return Err(match document.exceptions.into_iter().next() {
                Some(exception) => exception.into_error(),
                None => CswError::IllegalState {
                    message: "ExceptionReport contains no Exception element".to_string(),
                },
            });
        }
        other => {
            return Err(CswError::IllegalState {
                message: format!("expected {} but got {}", GET_RECORDS_RESPONSE, other),
            })
        }
    }

    let search_results = document
        .search_results
        .ok_or_else(|| CswError::IllegalState {
            message: "response contains no SearchResults element".to_string(),
        })?;
    let matched = search_results
        .number_of_records_matched
        .ok_or_else(|| CswError::IllegalState {
            message: "SearchResults has no numberOfRecordsMatched attribute".to_string(),
        })?;

    parse_count_value(&matched)
}

fn parse_count_value(value: &str) -> Result<u64> {
    value.trim().parse::<u64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => CswError::CountOverflow {
            value: value.to_string(),
        },
        _ => CswError::InvalidCount {
            value: value.to_string(),
        },
    })
}

/// Returns the first exception of an OWS exception report, or `None` when the body is
/// anything else (including unparsable text).
pub fn exception_report(body: &[u8]) -> Option<CswError> {
    let text = String::from_utf8_lossy(body);
    if !text.contains(EXCEPTION_REPORT) {
        return None;
    }

    let (root, document) = parse_document(body).ok()?;
    if root != EXCEPTION_REPORT {
        return None;
    }
    document
        .exceptions
        .into_iter()
        .next()
        .map(ExceptionEntry::into_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HITS_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<csw:GetRecordsResponse xmlns:csw="http://www.opengis.net/cat/csw/2.0.2"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://www.opengis.net/cat/csw/2.0.2 http://schemas.opengis.net/csw/2.0.2/CSW-discovery.xsd">
  <csw:SearchStatus timestamp="2014-03-12T10:41:12"/>
  <csw:SearchResults numberOfRecordsMatched="42" numberOfRecordsReturned="0" elementSet="brief" nextRecord="1"/>
</csw:GetRecordsResponse>"#;

    const EXCEPTION_REPORT_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ows:ExceptionReport xmlns:ows="http://www.opengis.net/ows" version="1.2.0">
  <ows:Exception exceptionCode="InvalidParameterValue" locator="outputSchema">
    <ows:ExceptionText>Unsupported output schema</ows:ExceptionText>
  </ows:Exception>
</ows:ExceptionReport>"#;

    #[test]
    fn test_parse_record_count() {
        assert_eq!(parse_record_count(HITS_RESPONSE.as_bytes()).unwrap(), 42);
    }

    #[test]
    fn test_parse_record_count_zero_is_explicit() {
        let body = HITS_RESPONSE.replace(
            r#"numberOfRecordsMatched="42""#,
            r#"numberOfRecordsMatched="0""#,
        );
        assert_eq!(parse_record_count(body.as_bytes()).unwrap(), 0);
    }

    #[test]
    fn test_parse_record_count_rejects_non_xml() {
        let err = parse_record_count(b"this is not xml").unwrap_err();
        assert!(matches!(err, CswError::XmlError(_)));
    }

    #[test]
    fn test_parse_record_count_rejects_empty_body() {
        assert!(matches!(
            parse_record_count(b""),
            Err(CswError::XmlError(_))
        ));
    }

    #[test]
    fn test_parse_record_count_overflow() {
        let body = HITS_RESPONSE.replace("\"42\"", "\"18446744073709551616\"");
        let err = parse_record_count(body.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            CswError::CountOverflow { value } if value == "18446744073709551616"
        ));
    }

    #[test]
    fn test_parse_record_count_negative() {
        let body = HITS_RESPONSE.replace("\"42\"", "\"-3\"");
        assert!(matches!(
            parse_record_count(body.as_bytes()),
            Err(CswError::InvalidCount { .. })
        ));
    }

    #[test]
    fn test_parse_record_count_missing_attribute() {
        let body = r#"<csw:GetRecordsResponse xmlns:csw="http://www.opengis.net/cat/csw/2.0.2">
  <csw:SearchResults numberOfRecordsReturned="0"/>
</csw:GetRecordsResponse>"#;
        assert!(matches!(
            parse_record_count(body.as_bytes()),
            Err(CswError::IllegalState { .. })
        ));
    }

    #[test]
    fn test_parse_record_count_missing_search_results() {
        let body = r#"<csw:GetRecordsResponse xmlns:csw="http://www.opengis.net/cat/csw/2.0.2">
  <csw:SearchStatus timestamp="2014-03-12T10:41:12"/>
</csw:GetRecordsResponse>"#;
        assert!(matches!(
            parse_record_count(body.as_bytes()),
            Err(CswError::IllegalState { .. })
        ));
    }

    #[test]
    fn test_parse_record_count_rejects_unexpected_root() {
        let err = parse_record_count(br#"<foo><SearchResults numberOfRecordsMatched="9"/></foo>"#)
            .unwrap_err();
        assert!(matches!(
            err,
            CswError::IllegalState { message } if message.contains("foo")
        ));
    }

    #[test]
    fn test_parse_record_count_rejects_get_record_by_id_response() {
        let body = r#"<csw:GetRecordByIdResponse xmlns:csw="http://www.opengis.net/cat/csw/2.0.2">
  <csw:SearchResults numberOfRecordsMatched="9"/>
</csw:GetRecordByIdResponse>"#;
        assert!(matches!(
            parse_record_count(body.as_bytes()),
            Err(CswError::IllegalState { .. })
        ));
    }

    #[test]
    fn test_parse_record_count_empty_exception_report() {
        let body =
            r#"<ows:ExceptionReport xmlns:ows="http://www.opengis.net/ows" version="1.2.0"/>"#;
        assert!(matches!(
            parse_record_count(body.as_bytes()),
            Err(CswError::IllegalState { .. })
        ));
    }

    #[test]
    fn test_parse_record_count_exception_report() {
        let err = parse_record_count(EXCEPTION_REPORT_BODY.as_bytes()).unwrap_err();
        match err {
            CswError::ExceptionReport {
                code,
                locator,
                texts,
            } => {
                assert_eq!(code, "InvalidParameterValue");
                assert_eq!(locator.as_deref(), Some("outputSchema"));
                assert_eq!(texts, vec!["Unsupported output schema".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_exception_report_detection() {
        assert!(exception_report(EXCEPTION_REPORT_BODY.as_bytes()).is_some());
        assert!(exception_report(HITS_RESPONSE.as_bytes()).is_none());
        assert!(exception_report(b"<ExceptionReport").is_none());
        assert!(exception_report(
            br#"<ExceptionReportWrapper><Exception exceptionCode="X"/></ExceptionReportWrapper>"#
        )
        .is_none());
    }
}

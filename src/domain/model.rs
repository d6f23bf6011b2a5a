use std::fmt;
use std::time::Duration;

pub const SERVICE_TYPE: &str = "CSW";
pub const SUPPORTED_VERSION: &str = "2.0.2";
pub const CSW_NAMESPACE: &str = "http://www.opengis.net/cat/csw/2.0.2";
pub const GMD_NAMESPACE: &str = "http://www.isotc211.org/2005/gmd";
pub const OUTPUT_FORMAT_XML: &str = "application/xml";
pub const RECORD_TYPE_NAME: &str = "csw:Record";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationName {
    GetRecords,
    GetRecordById,
}

impl OperationName {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationName::GetRecords => "GetRecords",
            OperationName::GetRecordById => "GetRecordById",
        }
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `csw:ResultType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    Results,
    Hits,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::Results => "results",
            ResultType::Hits => "hits",
        }
    }
}

/// `csw:ElementSetName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementSetName {
    Brief,
    Full,
}

impl ElementSetName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementSetName::Brief => "brief",
            ElementSetName::Full => "full",
        }
    }
}

/// Named request parameters understood by the CSW request encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestParameter {
    Request,
    Version,
    Service,
    Id,
    ElementSetName,
    OutputSchema,
    OutputFormat,
    TypeNames,
    ResultType,
    MaxRecords,
    StartPosition,
}

impl RequestParameter {
    /// KVP key, also used as the XML attribute name where one exists.
    pub fn key(&self) -> &'static str {
        match self {
            RequestParameter::Request => "request",
            RequestParameter::Version => "version",
            RequestParameter::Service => "service",
            RequestParameter::Id => "id",
            RequestParameter::ElementSetName => "elementSetName",
            RequestParameter::OutputSchema => "outputSchema",
            RequestParameter::OutputFormat => "outputFormat",
            RequestParameter::TypeNames => "typeNames",
            RequestParameter::ResultType => "resultType",
            RequestParameter::MaxRecords => "maxRecords",
            RequestParameter::StartPosition => "startPosition",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
    Text(String),
    Integer(u32),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Text(s) => f.write_str(s),
            ParameterValue::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

impl From<u32> for ParameterValue {
    fn from(value: u32) -> Self {
        ParameterValue::Integer(value)
    }
}

/// Insertion-ordered request parameters. Re-adding a key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(RequestParameter, ParameterValue)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, parameter: RequestParameter, value: impl Into<ParameterValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == parameter) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((parameter, value)),
        }
    }

    pub fn with(mut self, parameter: RequestParameter, value: impl Into<ParameterValue>) -> Self {
        self.add(parameter, value);
        self
    }

    pub fn get(&self, parameter: RequestParameter) -> Option<&ParameterValue> {
        self.entries
            .iter()
            .find(|(p, _)| *p == parameter)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, parameter: RequestParameter) -> bool {
        self.get(parameter).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = RequestParameter> + '_ {
        self.entries.iter().map(|(p, _)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RequestParameter, &ParameterValue)> {
        self.entries.iter().map(|(p, v)| (*p, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An operation of the catalogue service and the endpoints it is dispatched to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub name: OperationName,
    pub get_url: String,
    pub post_url: String,
}

impl Operation {
    pub fn new(
        name: OperationName,
        get_url: impl Into<String>,
        post_url: impl Into<String>,
    ) -> Self {
        Self {
            name,
            get_url: get_url.into(),
            post_url: post_url.into(),
        }
    }

    /// Both GET and POST go to the service URL itself.
    pub fn for_service(name: OperationName, url_csw: &str) -> Self {
        Self::new(name, url_csw, url_csw)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [GET {} | POST {}]",
            self.name, self.get_url, self.post_url
        )
    }
}

/// Raw outcome of a transport call.
#[derive(Debug, Clone)]
pub struct OperationResult {
    pub status: u16,
    pub body: Vec<u8>,
}

impl OperationResult {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// Adapters layer: the HTTP transport and the CSW request encodings it sends.

pub mod http;
pub mod request_builder;

pub use http::CswAdapter;

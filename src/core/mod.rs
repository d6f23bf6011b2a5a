pub mod interactor;
pub mod response;

pub use crate::domain::model::{Operation, OperationResult, ParameterSet};
pub use crate::domain::ports::{CatalogAdapter, ConfigProvider};
pub use crate::utils::error::Result;

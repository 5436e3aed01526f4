// refmart-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefmartError {
    // --- DOMAIN ERRORS (business rules) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, parsing, database) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- GENERIC / APPLICATION ERRORS ---
    #[error("Internal Error: {0}")]
    InternalError(String),
}

// Manual shortcuts so `?` works on raw io/csv results without stacking
// two From conversions by hand.
impl From<std::io::Error> for RefmartError {
    fn from(err: std::io::Error) -> Self {
        RefmartError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<csv::Error> for RefmartError {
    fn from(err: csv::Error) -> Self {
        RefmartError::Infrastructure(InfrastructureError::Csv(err))
    }
}

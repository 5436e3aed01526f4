// refmart-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Cannot build dimensions from an empty extract")]
    #[diagnostic(
        code(refmart::domain::empty_input),
        help("The source extract has no data rows. Check the extract_path in refmart.yaml.")
    )]
    EmptyInput,
}

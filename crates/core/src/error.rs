use crate::validation::ValidationReport;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {} invalid field(s)", .0.error_count())]
    Validation(ValidationReport),

    #[error("Unknown order field: {0}")]
    UnknownField(String),
}

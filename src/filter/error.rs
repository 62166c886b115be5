use thiserror::Error;

/// Errors that can occur when applying filter events
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid {field} range: lower bound {min} is greater than upper bound {max}")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Resource error: {0}")]
    ResourceError(#[from] std::io::Error),

    #[error("Inadmissible value for '{name}': {value}. Expected {expected}")]
    InadmissibleValue {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

impl SimulationError {
    pub(crate) fn ensure_finite(value: f64, what: &str) -> Result<f64, SimulationError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(SimulationError::DomainError(format!(
                "{} is not finite ({})",
                what, value
            )))
        }
    }
}

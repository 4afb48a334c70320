use thiserror::Error;

#[derive(Debug, Error)]
pub enum RateError {
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidRate { name: &'static str, value: f64 },
}

pub type RateResult<T> = Result<T, RateError>;

//! Supported arithmetic operations.
//!
//! All arithmetic is `f64`. Division and modulus by zero are rejected, and so
//! is any result JSON cannot carry (infinities and NaN).

use std::{fmt, str::FromStr};
use thiserror::Error;

use super::super::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulus,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Unsupported operation type: {0}")]
    Unsupported(String),
    #[error("Result is not a finite number")]
    NonFinite,
}

impl From<CalculationError> for ApiError {
    fn from(err: CalculationError) -> Self {
        Self::Domain(err.to_string())
    }
}

impl Operation {
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::Modulus,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
            Self::Power => "Power",
            Self::Modulus => "Modulus",
        }
    }

    /// Compute `a <op> b`.
    ///
    /// # Errors
    /// Returns [`CalculationError::DivisionByZero`] for `Divide`/`Modulus` with
    /// `b == 0`, and [`CalculationError::NonFinite`] when the result overflows
    /// or is undefined.
    pub fn apply(self, a: f64, b: f64) -> Result<f64, CalculationError> {
        let result = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide | Self::Modulus if b == 0.0 => {
                return Err(CalculationError::DivisionByZero);
            }
            Self::Divide => a / b,
            Self::Modulus => a % b,
            Self::Power => a.powf(b),
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalculationError::NonFinite)
        }
    }
}

impl FromStr for Operation {
    type Err = CalculationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CalculationError::Unsupported(trimmed.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

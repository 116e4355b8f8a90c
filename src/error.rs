//! Domain error type shared by every calculation.

use thiserror::Error;

/// Errors produced by the sizing pipeline and the appliance working set.
///
/// Division hazards (zero irradiance, zero panel wattage) are reported as
/// [`SizingError::InvalidInput`] so callers never see an infinite or NaN
/// result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    /// A numeric input was negative, non-finite, or would divide by zero.
    #[error("invalid input: {field}: {message}")]
    InvalidInput {
        /// Name of the offending input (e.g., `"daily_kwh"`).
        field: String,
        /// Human-readable constraint description.
        message: String,
    },

    /// Location lookup failed under the reject policy.
    #[error("unknown location \"{0}\"")]
    UnknownLocation(String),

    /// An appliance with the same name is already in the working set.
    #[error("appliance \"{0}\" is already in the working set")]
    DuplicateAppliance(String),

    /// The named appliance is not in the working set or the catalog.
    #[error("unknown appliance \"{0}\"")]
    UnknownAppliance(String),
}

/// Result alias for sizing operations.
pub type Result<T> = std::result::Result<T, SizingError>;

impl SizingError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Rejects negative and non-finite values.
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(SizingError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(SizingError::invalid(field, format!("must be >= 0, got {value}")));
    }
    Ok(value)
}

/// Rejects zero, negative and non-finite values.
pub(crate) fn ensure_positive(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(SizingError::invalid(field, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(SizingError::invalid(field, format!("must be > 0, got {value}")));
    }
    Ok(value)
}

/// Rejects a computed value that overflowed to infinity or became NaN.
pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SizingError::invalid(field, "result overflows the representable range"))
    }
}

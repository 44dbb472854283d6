//! Error type shared by every link-budget computation.

use thiserror::Error;

/// Errors that can occur while evaluating a link-budget quantity.
///
/// Each error is local to a single evaluation. Sweep generators record the
/// failing combination and carry on with the rest of the grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinkError {
    #[error("Invalid parameter `{name}` = {value:e}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Numerical domain error: {0}")]
    NumericalDomain(String),
}

impl LinkError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        LinkError::InvalidParameter { name, value, reason }
    }
}

/// Require `value` to be finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, LinkError> {
    if !value.is_finite() {
        return Err(LinkError::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(LinkError::invalid(name, value, "must be strictly positive"));
    }
    Ok(value)
}

/// Require `value` to be finite and non-negative.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64, LinkError> {
    if !value.is_finite() {
        return Err(LinkError::invalid(name, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(LinkError::invalid(name, value, "must not be negative"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_guard() {
        assert_eq!(require_positive("w0", 0.5), Ok(0.5));
        assert!(matches!(
            require_positive("w0", 0.0),
            Err(LinkError::InvalidParameter { name: "w0", .. })
        ));
        assert!(require_positive("w0", f64::NAN).is_err());
        assert!(require_positive("w0", f64::INFINITY).is_err());
    }

    #[test]
    fn test_non_negative_guard() {
        assert_eq!(require_non_negative("z", 0.0), Ok(0.0));
        assert!(require_non_negative("z", -1e-9).is_err());
    }

    #[test]
    fn test_error_message_names_parameter() {
        let msg = LinkError::invalid("snr_linear", -1.0, "must not be negative").to_string();
        assert!(msg.contains("snr_linear"), "unexpected message: {msg}");
    }
}

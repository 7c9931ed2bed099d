//! Error types for popup operations.

use thiserror::Error;

/// Convenience alias for popup results.
pub type Result<T> = std::result::Result<T, PopupError>;

/// Primary error type for popup operations.
#[derive(Debug, Error)]
pub enum PopupError {
    /// No element carries the requested id.
    #[error("popup element missing")]
    MissingElement {
        /// Element id that failed to resolve.
        id: String,
    },
    /// Element exists but is not the expected kind of control.
    #[error("popup element has unexpected type")]
    UnexpectedElement {
        /// Element id that was resolved.
        id: String,
        /// Element kind the caller required.
        expected: &'static str,
    },
    /// A slider or field held a value that is not a finite number.
    #[error("invalid numeric control value")]
    InvalidNumber {
        /// Control the value was read from.
        field: String,
        /// Raw value as found in the control.
        value: String,
    },
    /// Value did not name a supported CVD type.
    #[error("invalid CVD type")]
    InvalidCvdType {
        /// Raw value provided by the caller.
        value: String,
    },
    /// A call into the browser or page scripts failed.
    #[error("browser bridge call failed")]
    Bridge {
        /// Operation that was being performed.
        operation: &'static str,
        /// Detail reported by the browser.
        detail: String,
    },
    /// A payload returned by the browser could not be decoded.
    #[error("malformed browser payload")]
    Payload {
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

impl PopupError {
    /// Build a [`PopupError::MissingElement`] for the given id.
    #[must_use]
    pub fn missing(id: &str) -> Self {
        Self::MissingElement { id: id.to_string() }
    }
}

impl From<serde_json::Error> for PopupError {
    fn from(source: serde_json::Error) -> Self {
        Self::Payload { source }
    }
}

#[cfg(test)]
mod tests {
    use super::PopupError;
    use std::error::Error as _;

    #[test]
    fn missing_element_keeps_id() {
        let err = PopupError::missing("severity");
        assert!(matches!(err, PopupError::MissingElement { ref id } if id == "severity"));
        assert_eq!(err.to_string(), "popup element missing");
    }

    #[test]
    fn payload_errors_expose_source() {
        let decode = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = PopupError::from(decode);
        assert!(err.source().is_some());
    }
}

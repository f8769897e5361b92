//! Response envelope returned by every remote access API query.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Standard `{ success, data, message }` envelope wrapping remote responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the remote operation succeeded.
    pub success: bool,
    /// The payload. Present only on success.
    #[serde(default)]
    pub data: Option<T>,
    /// Optional human-readable message, usually set on failure.
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Build a successful envelope around a payload.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Build a failed envelope with a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// The payload when the envelope reports success, `None` otherwise.
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }

    /// The payload, or an [`AppError::external_service`] describing the
    /// unsuccessful envelope. `what` names the resource for the message.
    pub fn into_result(self, what: &str) -> AppResult<T> {
        let message = self.message.clone();
        self.into_data().ok_or_else(|| {
            AppError::external_service(match message {
                Some(m) => format!("{what} request unsuccessful: {m}"),
                None => format!("{what} request unsuccessful"),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_data_requires_success() {
        let envelope = Envelope {
            success: false,
            data: Some(1),
            message: None,
        };
        assert_eq!(envelope.into_data(), None);
        assert_eq!(Envelope::ok(1).into_data(), Some(1));
    }

    #[test]
    fn test_into_result_carries_message() {
        let envelope: Envelope<Vec<String>> = Envelope::failed("backend offline");
        let err = envelope.into_result("menus").unwrap_err();
        assert!(err.message.contains("backend offline"));
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let envelope: Envelope<bool> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data, None);
    }
}

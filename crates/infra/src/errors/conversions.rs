//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use slotbot_domain::SlotBotError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SlotBotError);

impl From<InfraError> for SlotBotError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SlotBotError> for InfraError {
    fn from(value: SlotBotError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSlotBotError {
    fn into_slotbot(self) -> SlotBotError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SlotBotError */
/* -------------------------------------------------------------------------- */

impl IntoSlotBotError for HttpError {
    fn into_slotbot(self) -> SlotBotError {
        if self.is_timeout() {
            return SlotBotError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return SlotBotError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => SlotBotError::Auth(message),
                404 => SlotBotError::NotFound(message),
                429 => SlotBotError::Network(message),
                400..=499 => SlotBotError::InvalidInput(message),
                _ => SlotBotError::Network(message),
            };
        }

        if self.is_decode() {
            return SlotBotError::Parse(self.to_string());
        }

        SlotBotError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_slotbot())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

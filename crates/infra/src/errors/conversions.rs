//! Conversions from external infrastructure errors into domain errors.

use memberdesk_domain::MemberdeskError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MemberdeskError);

impl From<InfraError> for MemberdeskError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MemberdeskError> for InfraError {
    fn from(value: MemberdeskError) -> Self {
        InfraError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → MemberdeskError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for InfraError {
    fn from(err: HttpError) -> Self {
        if err.is_timeout() {
            return InfraError(MemberdeskError::Network("HTTP request timed out".into()));
        }

        if err.is_connect() {
            return InfraError(MemberdeskError::Network(format!(
                "HTTP connection failure: {err}"
            )));
        }

        if err.is_builder() {
            return InfraError(MemberdeskError::InvalidInput(format!(
                "invalid HTTP request: {err}"
            )));
        }

        if let Some(status) = err.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return InfraError(match code {
                401 | 403 => MemberdeskError::Auth(message),
                404 => MemberdeskError::NotFound(message),
                400..=499 => MemberdeskError::InvalidInput(message),
                _ => MemberdeskError::Network(message),
            });
        }

        InfraError(MemberdeskError::Network(format!("HTTP transport error: {err}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

use crate::Error;
use crate::http::HttpResponse;

/// Status handed to error callbacks when no response code exists.
pub const NO_RESPONSE_STATUS: u16 = 204;

const ERROR_FIELD_NAME: &str = "message";

/// Callback receiving `(status, message)` for a failed request.
pub type ErrorCallback = Box<dyn FnOnce(u16, String) + Send + 'static>;

/// Normalized outcome of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    NoError,
    /// The request produced no response.
    TransportError { message: String },
    /// The service answered outside 200-299.
    ServiceError {
        status: u16,
        message: String,
        body: String,
    },
}

impl Classification {
    /// Status reported to error callbacks.
    pub fn status_code(&self) -> u16 {
        match self {
            Classification::ServiceError { status, .. } => *status,
            _ => NO_RESPONSE_STATUS,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Classification::NoError => None,
            Classification::TransportError { message }
            | Classification::ServiceError { message, .. } => Some(message),
        }
    }

    pub fn into_result(self) -> Result<(), Error> {
        match self {
            Classification::NoError => Ok(()),
            Classification::TransportError { message } => Err(Error::Transport { message }),
            Classification::ServiceError {
                status,
                message,
                body,
            } => Err(Error::Service {
                status,
                message,
                body,
            }),
        }
    }

    /// Invoke `on_error` with status and message when this is a failure.
    /// Returns true if it was.
    pub fn report(&self, on_error: Option<ErrorCallback>) -> bool {
        match self.message() {
            Some(message) => {
                if let Some(callback) = on_error {
                    callback(self.status_code(), message.to_string());
                }
                true
            }
            None => false,
        }
    }
}

/// Classify a request completion. `None` means the request did not succeed
/// or produced no response object.
///
/// Failures are logged at warn level together with the raw body.
pub fn classify_response(response: Option<&HttpResponse>) -> Classification {
    let Some(response) = response else {
        let classification = Classification::TransportError {
            message: "No response".to_string(),
        };
        tracing::warn!(error = "No response", body = "invalid", "request failed");
        return classification;
    };

    if (200..300).contains(&response.status) {
        return Classification::NoError;
    }

    let body = response.body_text();
    let message = extract_error_message(&body);
    tracing::warn!(
        status = response.status,
        error = %message,
        body = %body,
        "request failed"
    );

    Classification::ServiceError {
        status: response.status,
        message,
        body,
    }
}

// Example body: {"message": "Unauthenticated."}
fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(body) {
        Ok(object) => match object.get(ERROR_FIELD_NAME).and_then(|v| v.as_str()) {
            Some(message) => message.to_string(),
            None => format!("Can't deserialize error json: no field '{ERROR_FIELD_NAME}' found"),
        },
        Err(_) => "Can't deserialize error json".to_string(),
    }
}

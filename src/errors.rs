use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HookError {
    #[error("unsupported request method `{0}`")]
    #[diagnostic(
        code(chatworkhook::request::method),
        help("ChatWork delivers webhooks with POST only.")
    )]
    UnsupportedMethod(String),

    #[error("missing `{0}` header")]
    #[diagnostic(
        code(chatworkhook::request::no_signature),
        help("Requests without a signature cannot be authenticated.")
    )]
    MissingSignature(String),

    #[error("failed to read webhook request body")]
    #[diagnostic(code(chatworkhook::request::body))]
    BodyRead(#[source] std::io::Error),

    #[error("webhook token is not valid base64")]
    #[diagnostic(
        code(chatworkhook::signature::key),
        help("Copy the token exactly as shown on the ChatWork webhook settings page.")
    )]
    KeyDecode(#[source] base64::DecodeError),

    #[error("invalid signature")]
    #[diagnostic(code(chatworkhook::signature::mismatch))]
    SignatureMismatch,

    #[error("malformed webhook payload: {0}")]
    #[diagnostic(code(chatworkhook::payload::malformed))]
    MalformedPayload(#[source] serde_json::Error),

    #[error("invalid event type: {0}")]
    #[diagnostic(code(chatworkhook::payload::event_type))]
    InvalidEventType(String),

    #[error("invalid timestamp: {0}")]
    #[diagnostic(code(chatworkhook::payload::timestamp))]
    InvalidTimestamp(String),

    #[error("failed to encode webhook payload")]
    #[diagnostic(code(chatworkhook::payload::encode))]
    Encode(#[source] serde_json::Error),

    #[error("could not resolve user home/config directory")]
    #[diagnostic(
        code(chatworkhook::config::paths),
        help("Set HOME, then retry `chatworkhook doctor`.")
    )]
    HomeDirUnavailable,

    #[error("failed to load config")]
    #[diagnostic(
        code(chatworkhook::config::load),
        help("Fix the config file syntax or run `chatworkhook init` to rewrite it.")
    )]
    ConfigLoad,

    #[error("not configured")]
    #[diagnostic(
        code(chatworkhook::config::not_configured),
        help("Run `chatworkhook init --token <TOKEN>` or set CHATWORKHOOK_WEBHOOK_TOKEN.")
    )]
    NotConfigured,

    #[error("failed to prepare config directory: {0}")]
    #[diagnostic(code(chatworkhook::config::mkdir))]
    CreateConfigDir(String),

    #[error("failed to write config file: {0}")]
    #[diagnostic(code(chatworkhook::config::write))]
    WriteConfig(String),

    #[error("failed to serialize config")]
    #[diagnostic(code(chatworkhook::config::serialize))]
    ConfigSerialize,

    #[error("doctor check failed: {0}")]
    #[diagnostic(code(chatworkhook::doctor::unhealthy))]
    DoctorUnhealthy(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HookError {
    /// True for failures that mean the request could not be authenticated.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::MissingSignature(_) | Self::SignatureMismatch)
    }

    /// HTTP status an integrator would typically answer with.
    ///
    /// Integrator-side failures (token decoding, config, io) map to 500.
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            Self::UnsupportedMethod(_) => http::StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingSignature(_) | Self::SignatureMismatch => http::StatusCode::UNAUTHORIZED,
            Self::BodyRead(_)
            | Self::MalformedPayload(_)
            | Self::InvalidEventType(_)
            | Self::InvalidTimestamp(_) => http::StatusCode::BAD_REQUEST,
            _ => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, HookError>;

#[cfg(test)]
mod tests {
    use super::HookError;

    #[test]
    fn authentication_failures_map_to_unauthorized() {
        assert!(HookError::SignatureMismatch.is_authentication_failure());
        assert_eq!(
            HookError::SignatureMismatch.status_code(),
            http::StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            HookError::MissingSignature("X-ChatWorkWebhookSignature".to_string()).status_code(),
            http::StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn malformed_input_maps_to_bad_request() {
        let err = HookError::InvalidEventType("unknown variant `bogus`".to_string());
        assert!(!err.is_authentication_failure());
        assert_eq!(err.status_code(), http::StatusCode::BAD_REQUEST);
        assert_eq!(
            HookError::UnsupportedMethod("GET".to_string()).status_code(),
            http::StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn server_side_key_problem_is_internal() {
        let err = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, "!!")
            .map(|_| ())
            .map_err(HookError::KeyDecode)
            .unwrap_err();
        assert!(!err.is_authentication_failure());
        assert_eq!(err.status_code(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}

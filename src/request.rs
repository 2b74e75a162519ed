//! What the core needs from an inbound HTTP request.

use std::io::Read;

use crate::errors::{HookError, Result};

/// An inbound webhook request as seen by [`crate::Hook::read`].
///
/// Implemented for [`http::Request`] with any [`Read`] body, so server
/// frameworks only need to hand over the collected body bytes.
pub trait WebhookRequest {
    fn method(&self) -> &str;

    /// Value of the named header, if present and valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Read the whole body. Called at most once.
    fn read_body(&mut self) -> std::io::Result<Vec<u8>>;
}

impl<B: Read> WebhookRequest for http::Request<B> {
    fn method(&self) -> &str {
        http::Request::method(self).as_str()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    fn read_body(&mut self) -> std::io::Result<Vec<u8>> {
        let mut body = Vec::new();
        self.body_mut().read_to_end(&mut body)?;
        Ok(body)
    }
}

/// The two artifacts extracted from a request: claimed signature and raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Extracted {
    pub signature: String,
    pub body: Vec<u8>,
}

/// Pull the claimed signature from the `header` header and read the body.
pub(crate) fn extract<R>(request: &mut R, header: &str) -> Result<Extracted>
where
    R: WebhookRequest + ?Sized,
{
    let method = request.method();
    if !method.eq_ignore_ascii_case("POST") {
        return Err(HookError::UnsupportedMethod(method.to_string()));
    }

    let signature = match request.header(header) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => return Err(HookError::MissingSignature(header.to_string())),
    };

    let body = request.read_body().map_err(HookError::BodyRead)?;
    Ok(Extracted { signature, body })
}

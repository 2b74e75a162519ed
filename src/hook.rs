use tracing::{info, warn};

use crate::{
    codec,
    errors::Result,
    models::WebhookPayload,
    request::{self, WebhookRequest},
    signature::{self, SIGNATURE_HEADER},
};

/// An inbound ChatWork webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hook {
    pub signature: String,
    pub raw_payload: Vec<u8>,
    /// `None` until the raw payload has been decoded.
    pub payload: Option<WebhookPayload>,
}

impl Hook {
    /// Extract the signature and raw body from a request without verifying or
    /// decoding anything. Prefer [`parse`].
    pub fn read<R>(request: &mut R) -> Result<Self>
    where
        R: WebhookRequest + ?Sized,
    {
        Self::read_with_header(request, SIGNATURE_HEADER)
    }

    /// Like [`Hook::read`], taking the signature from `header`, e.g. when a
    /// relay in front of the integrator renames it.
    pub fn read_with_header<R>(request: &mut R, header: &str) -> Result<Self>
    where
        R: WebhookRequest + ?Sized,
    {
        let request::Extracted { signature, body } = request::extract(request, header)?;
        Ok(Self {
            signature,
            raw_payload: body,
            payload: None,
        })
    }

    /// Check that the hook signature was produced with `secret`, the base64
    /// webhook token.
    pub fn signed_by(&self, secret: &[u8]) -> Result<()> {
        signature::verify(secret, &self.raw_payload, &self.signature)
    }

    /// Decode the raw payload, storing and returning the result.
    pub fn decode(&mut self) -> Result<&WebhookPayload> {
        let payload = codec::decode(&self.raw_payload)?;
        Ok(self.payload.insert(payload))
    }
}

/// Outcome of [`parse_unchecked`]: the decoded hook and, separately, whether
/// its signature checked out.
#[derive(Debug)]
pub struct Parsed {
    pub hook: Hook,
    pub verification: Result<()>,
}

impl Parsed {
    pub fn is_verified(&self) -> bool {
        self.verification.is_ok()
    }

    /// The hook, but only when its signature is valid.
    pub fn into_verified(self) -> Result<Hook> {
        self.verification.map(|()| self.hook)
    }
}

/// Read, verify and decode the hook in an inbound request.
///
/// Verification comes first: when the signature does not match the body is
/// never decoded and the verification error is returned.
pub fn parse<R>(secret: &[u8], request: &mut R) -> Result<Hook>
where
    R: WebhookRequest + ?Sized,
{
    parse_with_header(secret, SIGNATURE_HEADER, request)
}

/// [`parse`] with the signature taken from `header`.
pub fn parse_with_header<R>(secret: &[u8], header: &str, request: &mut R) -> Result<Hook>
where
    R: WebhookRequest + ?Sized,
{
    let mut hook = Hook::read_with_header(request, header)?;
    hook.signed_by(secret)?;
    let payload = hook.decode()?;

    info!(
        setting_id = %payload.setting_id,
        event_type = %payload.event_type,
        "verified webhook"
    );
    Ok(hook)
}

/// Read and decode the hook whatever the outcome of signature verification.
///
/// Extraction and decode failures are returned as errors. The verification
/// result is reported in [`Parsed::verification`] and callers must check it
/// before trusting the payload.
pub fn parse_unchecked<R>(secret: &[u8], request: &mut R) -> Result<Parsed>
where
    R: WebhookRequest + ?Sized,
{
    let mut hook = Hook::read(request)?;
    let verification = hook.signed_by(secret);
    hook.decode()?;

    if let Err(err) = &verification {
        warn!(error = %err, "decoded webhook with unverified signature");
    }
    Ok(Parsed { hook, verification })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::HookError, models::EventType, signature::compute_signature};

    const TOKEN: &[u8] = b"A9ne+ygvdV0IZBaPFV2zC1e5Bk+IsI14BPwieRoBQNU=";
    const BODY: &[u8] = br#"{"webhook_setting_id":"246","webhook_event_type":"message_created","webhook_event_time":1511238729,"webhook_event":{"message_id":"984676321621704704","room_id":36818150,"account_id":1484814,"body":"test","send_time":1511238729,"update_time":0}}"#;
    const SIGNATURE: &str = "G7Gtrh5Ee6d8erOVXhWPtUrkNJqqIT5vwLU50KhyLQk=";

    fn post(signature: &str, body: &'static [u8]) -> http::Request<&'static [u8]> {
        http::Request::builder()
            .method("POST")
            .uri("/path")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .unwrap()
    }

    #[test]
    fn read_leaves_payload_undecoded() {
        let hook = Hook::read(&mut post(SIGNATURE, BODY)).unwrap();
        assert_eq!(hook.signature, SIGNATURE);
        assert_eq!(hook.raw_payload, BODY);
        assert!(hook.payload.is_none());
        assert!(hook.signed_by(TOKEN).is_ok());
    }

    #[test]
    fn decode_stores_payload() {
        let mut hook = Hook::read(&mut post(SIGNATURE, BODY)).unwrap();
        assert_eq!(hook.decode().unwrap().setting_id, "246");
        assert_eq!(
            hook.payload.as_ref().map(|p| p.event_type),
            Some(EventType::MessageCreated)
        );
    }

    #[test]
    fn parse_returns_decoded_hook_for_valid_signature() {
        let hook = parse(TOKEN, &mut post(SIGNATURE, BODY)).unwrap();
        let payload = hook.payload.unwrap();
        assert_eq!(payload.setting_id, "246");
        assert_eq!(payload.event.room_id, Some(36818150));
    }

    #[test]
    fn parse_stops_at_signature_mismatch() {
        let wrong = compute_signature(TOKEN, b"another body").unwrap();
        assert!(matches!(
            parse(TOKEN, &mut post(&wrong, BODY)),
            Err(HookError::SignatureMismatch)
        ));
    }

    #[test]
    fn parse_does_not_decode_unverified_garbage() {
        assert!(matches!(
            parse(TOKEN, &mut post(SIGNATURE, b"not json")),
            Err(HookError::SignatureMismatch)
        ));
    }

    #[test]
    fn parse_reports_decode_errors_of_signed_bodies() {
        let body: &'static [u8] = br#"{"webhook_event_type":"bogus"}"#;
        let signature = compute_signature(TOKEN, body).unwrap();
        assert!(matches!(
            parse(TOKEN, &mut post(&signature, body)),
            Err(HookError::InvalidEventType(_))
        ));
    }

    #[test]
    fn parse_rejects_malformed_token() {
        assert!(matches!(
            parse(b"***", &mut post(SIGNATURE, BODY)),
            Err(HookError::KeyDecode(_))
        ));
    }

    #[test]
    fn parse_with_header_reads_renamed_signature() {
        let mut request = http::Request::builder()
            .method("POST")
            .header("X-Relay-Signature", SIGNATURE)
            .body(BODY)
            .unwrap();
        let hook = parse_with_header(TOKEN, "X-Relay-Signature", &mut request).unwrap();
        assert_eq!(hook.payload.unwrap().setting_id, "246");
    }

    #[test]
    fn parse_unchecked_decodes_despite_mismatch() {
        let wrong = compute_signature(TOKEN, b"another body").unwrap();
        let parsed = parse_unchecked(TOKEN, &mut post(&wrong, BODY)).unwrap();

        assert!(!parsed.is_verified());
        assert!(matches!(
            parsed.verification,
            Err(HookError::SignatureMismatch)
        ));
        assert_eq!(parsed.hook.payload.as_ref().unwrap().setting_id, "246");
        assert!(matches!(
            parsed.into_verified(),
            Err(HookError::SignatureMismatch)
        ));
    }

    #[test]
    fn parse_unchecked_with_valid_signature_is_verified() {
        let parsed = parse_unchecked(TOKEN, &mut post(SIGNATURE, BODY)).unwrap();
        assert!(parsed.is_verified());
        let hook = parsed.into_verified().unwrap();
        assert_eq!(hook.payload.unwrap().event.account_id, Some(1484814));
    }

    #[test]
    fn parse_unchecked_still_fails_on_undecodable_body() {
        assert!(matches!(
            parse_unchecked(TOKEN, &mut post(SIGNATURE, b"not json")),
            Err(HookError::MalformedPayload(_))
        ));
    }
}

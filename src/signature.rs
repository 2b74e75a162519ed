//! ChatWork request signature verification.
//!
//! ChatWork signs each request body with HMAC-SHA256, keyed by the webhook
//! token after base64 decoding, and sends the base64 encoded MAC in the
//! `X-ChatWorkWebhookSignature` header.

use base64::{
    Engine, alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig, general_purpose::STANDARD},
};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::errors::{HookError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the claimed signature.
pub const SIGNATURE_HEADER: &str = "X-ChatWorkWebhookSignature";

/// Padded standard base64 that ignores non-zero trailing bits in the last
/// symbol, so tokens like `QR==` decode as ChatWork's own tooling does.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decode the base64 webhook token into HMAC key bytes.
pub fn decode_token(secret: &[u8]) -> Result<Vec<u8>> {
    TOKEN_ENGINE.decode(secret).map_err(HookError::KeyDecode)
}

/// Compute the base64 signature ChatWork would send for `payload`.
///
/// `secret` is the webhook token as shown in the ChatWork settings, i.e. base64
/// text. It is decoded before keying the MAC.
pub fn compute_signature(secret: &[u8], payload: &[u8]) -> Result<String> {
    let key = decode_token(secret)?;

    let mut mac = HmacSha256::new_from_slice(&key).expect("HMAC can take key of any size");
    mac.update(payload);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Check `signature` against the signature computed for `payload`.
pub fn verify(secret: &[u8], payload: &[u8], signature: &str) -> Result<()> {
    let expected = compute_signature(secret, payload)?;

    if constant_time_compare(expected.as_bytes(), signature.as_bytes()) {
        Ok(())
    } else {
        debug!(
            payload_len = payload.len(),
            "webhook signature verification failed"
        );
        Err(HookError::SignatureMismatch)
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

use std::io::Read;

use chatworkhook::{HookError, Result, config};
use tracing::info;

use super::{VerifyArgs, body_reader};

pub fn execute(args: VerifyArgs) -> Result<()> {
    let config = config::load()?;
    let token = config.token()?;
    let header = config.signature_header.as_str();

    let body = body_reader(args.body.body.as_deref())?;
    let mut request = build_request(header, &args.signature, body)?;

    let hook = chatworkhook::parse_with_header(token, header, &mut request)?;
    if let Some(payload) = &hook.payload {
        let text = serde_json::to_string_pretty(payload).map_err(HookError::Encode)?;
        println!("{text}");
        info!(
            event_type = %payload.event_type,
            bytes = hook.raw_payload.len(),
            "signature verified"
        );
    }
    Ok(())
}

/// A signature that cannot be carried in a header counts as no signature.
fn build_request<B: Read>(header: &str, signature: &str, body: B) -> Result<http::Request<B>> {
    http::Request::builder()
        .method(http::Method::POST)
        .header(header, signature)
        .body(body)
        .map_err(|_| HookError::MissingSignature(header.to_string()))
}

//! Verification and decoding of inbound ChatWork webhooks.
//!
//! ```rust,ignore
//! let hook = chatworkhook::parse(token.as_bytes(), &mut request)?;
//! if let Some(payload) = &hook.payload {
//!     println!("{} in room {:?}", payload.event_type, payload.event.room_id);
//! }
//! ```

pub mod codec;
pub mod config;
pub mod errors;
pub mod hook;
pub mod models;
pub mod request;
pub mod signature;

pub use errors::{HookError, Result};
pub use hook::{Hook, Parsed, parse, parse_unchecked, parse_with_header};
pub use models::{EventType, Timestamp, WebhookEvent, WebhookPayload};
pub use request::WebhookRequest;
pub use signature::{SIGNATURE_HEADER, compute_signature, decode_token, verify};

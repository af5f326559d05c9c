//! Client for single-turn text completions.

mod client;
mod error;
mod transport;
mod types;

pub use client::{Client, DIAGNOSTIC_PROMPT, RequestDefaults, SendOptions};
pub use error::LLMError;
pub use transport::{HttpTransport, Transport};
pub use types::{ContentBlock, MessagesRequest, MessagesResponse, RequestMessage, Role, Usage};

//! runelet: web converter between emoji and Unicode code-point escapes.
//!
//! The core is the [`codec`] module, a pure bidirectional transform
//! between text and `\U+XXXX ` escape tokens. [`service`] wraps it with a
//! decode policy and request metrics; [`transport`] exposes it over HTTP.

pub mod codec;
pub mod metrics;
pub mod service;
pub mod transport;

pub use codec::{DecodeError, DecodePolicy, Token, decode, encode, tokens};
pub use metrics::HttpMetrics;
pub use service::ConverterService;

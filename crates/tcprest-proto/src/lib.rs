//! Wire-level primitives shared by every other TCPREST crate: the version
//! tag that distinguishes legacy bracketed frames from pipe-separated v2
//! frames, the `{{value}}typeFQN` token shape, URL-safe Base64 encoding, and
//! the small amount of string-splitting glue that sits between them.
//!
//! Nothing in this crate knows about sockets, mappers, or dispatch; it only
//! knows how to turn frame components into strings and back.

pub mod base64url;
pub mod frame;
pub mod token;
pub mod version;

pub use frame::{format_meta, join_params, parse_meta, split_params};
pub use token::{Token, TokenError, NULL_SENTINEL, PARAM_DELIM};
pub use version::{sniff, FrameForm, Version};

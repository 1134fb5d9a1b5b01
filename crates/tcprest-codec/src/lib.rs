//! Frame-level encode/decode for TCPREST: turns wire bytes into
//! [`request::ParsedRequest`]/[`response::ParsedResponse`] values and back,
//! independent of any socket or dispatch concern.
//!
//! Layering, outside in: [`tcprest_compress`] strips/applies the
//! compression prefix, [`suffix`] peels/appends the `CHK`/`SIG` suffixes,
//! [`converter`] handles the Base64/token layer, and [`tcprest_proto`]
//! underneath that handles the raw frame shapes.

pub mod assemble;
pub mod converter;
pub mod parser;
pub mod request;
pub mod request_encoder;
pub mod response;
pub mod response_encoder;
pub mod response_parser;
pub mod suffix;
pub mod verify;

pub use parser::RequestParser;
pub use request::ParsedRequest;
pub use request_encoder::RequestEncoder;
pub use response::{ParsedResponse, ResponseOutcome};
pub use response_encoder::ResponseEncoder;
pub use response_parser::ResponseParser;

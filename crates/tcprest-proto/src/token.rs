//! The innermost unit of a TCPREST frame: one encoded parameter or return
//! value, `{{value}}typeFQN`, optionally wrapped in a further layer of
//! URL-safe Base64.

use thiserror::Error;

use crate::base64url;

/// The sentinel value that stands in for `null` inside a token.
///
/// This has to survive the outer Base64 layer undisturbed so that a user
/// string literally equal to `"NULL"` is never misread as a null value.
pub const NULL_SENTINEL: &str = "TCPREST.NULL";

/// The delimiter between encoded parameter tokens once PARAMS has been
/// Base64-decoded.
pub const PARAM_DELIM: &str = "@@";

/// One decoded `{{value}}typeFQN` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The encoded value, or [`NULL_SENTINEL`] if this token represents null.
    pub value: String,
    /// Fully-qualified type name used to select a mapper.
    pub type_fqn: String,
}

/// A token could not be parsed out of its wire representation.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    /// Couldn't find a balanced `{{...}}` span.
    #[error("malformed token: no balanced {{{{...}}}} span")]
    Malformed,
    /// Found a `{{...}}` span but no type name followed it.
    #[error("malformed token: missing type name after value")]
    MissingType,
    /// The outer Base64 wrapper didn't decode.
    #[error("malformed token: invalid outer encoding")]
    BadEncoding,
}

impl Token {
    /// Construct a token from a value and a type name.
    pub fn new(value: impl Into<String>, type_fqn: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            type_fqn: type_fqn.into(),
        }
    }

    /// Construct the null token for a given type.
    pub fn null(type_fqn: impl Into<String>) -> Self {
        Self::new(NULL_SENTINEL, type_fqn)
    }

    /// True if this token represents a null value.
    pub fn is_null(&self) -> bool {
        self.value == NULL_SENTINEL
    }

    /// Render as `{{value}}typeFQN`.
    pub fn format_inner(&self) -> String {
        format!("{{{{{}}}}}{}", self.value, self.type_fqn)
    }

    /// Parse `{{value}}typeFQN` by locating the first `{{` and the last `}}`.
    ///
    /// Using first-`{{`/last-`}}` rather than a naive split lets a value
    /// legitimately contain the literal substring `}}` (e.g. a JSON blob),
    /// so long as it doesn't also contain `{{`.
    pub fn parse_inner(s: &str) -> Result<Token, TokenError> {
        let start = s.find("{{").ok_or(TokenError::Malformed)?;
        let end = s.rfind("}}").ok_or(TokenError::Malformed)?;
        if end < start + 2 {
            return Err(TokenError::Malformed);
        }
        let value = &s[start + 2..end];
        let type_fqn = &s[end + 2..];
        if type_fqn.is_empty() {
            return Err(TokenError::MissingType);
        }
        Ok(Token::new(value, type_fqn))
    }

    /// Encode this token for wire transport: Base64 of its `{{value}}typeFQN`
    /// rendering, so internal braces never collide with frame delimiters.
    pub fn encode_param(&self) -> String {
        base64url::encode_str(&self.format_inner())
    }

    /// Reverse of [`Token::encode_param`].
    pub fn decode_param(s: &str) -> Result<Token, TokenError> {
        let inner = base64url::decode_str(s).map_err(|_| TokenError::BadEncoding)?;
        Token::parse_inner(&inner)
    }
}

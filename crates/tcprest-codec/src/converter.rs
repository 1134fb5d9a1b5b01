//! The argument codec: turns `(Value, typeFQN)` pairs into the PARAMS wire
//! component and back, and turns a `Class/method` pair into the METADATA
//! component.

use tcprest_mapper::{MapperError, MapperRegistry, Value};
use tcprest_proto::{base64url, format_meta, join_params, parse_meta, split_params, Token, TokenError};
use thiserror::Error;

/// A frame component failed to decode.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// The outer Base64 layer didn't decode.
    #[error("invalid base64 in frame component")]
    BadEncoding,
    /// A param token didn't parse.
    #[error("malformed parameter token: {0}")]
    BadToken(#[from] TokenError),
    /// A mapper failed to encode or decode a value.
    #[error("mapper error: {0}")]
    Mapper(#[from] MapperError),
    /// METADATA didn't contain a `/`.
    #[error("malformed metadata: missing '/' between class and method")]
    BadMetadata,
}

/// Render `ClassFQN/methodName` as the Base64-wrapped METADATA component.
pub fn encode_meta(class_fqn: &str, method: &str) -> String {
    base64url::encode_str(&format_meta(class_fqn, method))
}

/// Reverse of [`encode_meta`].
pub fn decode_meta(meta_b64: &str) -> Result<(String, String), ConverterError> {
    let decoded = base64url::decode_str(meta_b64).map_err(|_| ConverterError::BadEncoding)?;
    parse_meta(&decoded).ok_or(ConverterError::BadMetadata)
}

/// Encode a list of `(value, typeFQN)` pairs as the Base64-wrapped PARAMS
/// component.
///
/// Each value is mapper-encoded, wrapped into a `{{value}}typeFQN` token,
/// individually Base64-encoded (`encodeParam`), and the resulting list is
/// joined on `@@` and Base64-encoded once more as a whole.
pub fn encode_params(
    mappers: &MapperRegistry,
    params: &[(Value, String)],
) -> Result<String, ConverterError> {
    let mut encoded_tokens = Vec::with_capacity(params.len());
    for (value, type_fqn) in params {
        let v = mappers.encode(type_fqn, value)?;
        let token = Token::new(v, type_fqn.clone());
        encoded_tokens.push(token.encode_param());
    }
    let joined = join_params(&encoded_tokens);
    Ok(base64url::encode_str(&joined))
}

/// Reverse of [`encode_params`]: returns the decoded values and the type FQN
/// each was declared under, in order.
pub fn decode_params(
    mappers: &MapperRegistry,
    params_b64: &str,
) -> Result<(Vec<Value>, Vec<String>), ConverterError> {
    let joined = base64url::decode_str(params_b64).map_err(|_| ConverterError::BadEncoding)?;
    let encoded_tokens = split_params(&joined);

    let mut values = Vec::with_capacity(encoded_tokens.len());
    let mut type_fqns = Vec::with_capacity(encoded_tokens.len());
    for encoded in encoded_tokens {
        let token = Token::decode_param(&encoded)?;
        let value = mappers.decode(&token.type_fqn, &token.value)?;
        type_fqns.push(token.type_fqn);
        values.push(value);
    }
    Ok((values, type_fqns))
}

/// Encode a response BODY: the mapper-encoded value (or the null sentinel
/// for a null return), Base64-wrapped as a whole.
///
/// Unlike a PARAMS token, BODY carries no `{{...}}typeFQN` wrapper: only
/// the caller's declared return type is needed to select the mapper, and
/// that type isn't itself transmitted.
pub fn encode_body(
    mappers: &MapperRegistry,
    return_type_fqn: &str,
    value: &Value,
) -> Result<String, ConverterError> {
    let encoded = mappers.encode(return_type_fqn, value)?;
    Ok(base64url::encode_str(&encoded))
}

/// Reverse of [`encode_body`].
pub fn decode_body(
    mappers: &MapperRegistry,
    return_type_fqn: &str,
    body_b64: &str,
) -> Result<Value, ConverterError> {
    let decoded = base64url::decode_str(body_b64).map_err(|_| ConverterError::BadEncoding)?;
    Ok(mappers.decode(return_type_fqn, &decoded)?)
}

/// Parse a legacy bracketed request body `Class/method(tok1,tok2,...)`
/// (tokens not Base64-wrapped, comma-joined) into its parts.
///
/// The legacy converter tolerates a single trailing `,` before the closing
/// `)`, which is trimmed before splitting.
pub fn parse_legacy_request(
    frame: &str,
) -> Result<(String, String, Vec<(String, String)>), ConverterError> {
    let (meta, rest) = frame.split_once('(').ok_or(ConverterError::BadMetadata)?;
    let params_str = rest.strip_suffix(')').unwrap_or(rest);
    let (class_fqn, method) = parse_meta(meta).ok_or(ConverterError::BadMetadata)?;

    let params_str = params_str.strip_suffix(',').unwrap_or(params_str);
    let mut tokens = Vec::new();
    if !params_str.is_empty() {
        for part in params_str.split(',') {
            let token = Token::parse_inner(part)?;
            tokens.push((token.value, token.type_fqn));
        }
    }
    Ok((class_fqn, method, tokens))
}

/// Render a legacy bracketed request body.
pub fn format_legacy_request(class_fqn: &str, method: &str, tokens: &[(String, String)]) -> String {
    let rendered: Vec<String> = tokens
        .iter()
        .map(|(value, type_fqn)| Token::new(value.clone(), type_fqn.clone()).format_inner())
        .collect();
    format!("{}/{}({})", class_fqn, method, rendered.join(","))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn meta_roundtrips() {
        let enc = encode_meta("com.example.Hello", "helloWorld");
        assert_eq!(
            decode_meta(&enc).unwrap(),
            ("com.example.Hello".to_string(), "helloWorld".to_string())
        );
    }

    #[test]
    fn params_roundtrip_through_mappers() {
        let mappers = MapperRegistry::with_builtins();
        let params = vec![
            (Value::Str("x".to_string()), "java.lang.String".to_string()),
            (Value::Int(2), "int".to_string()),
            (Value::Bool(false), "boolean".to_string()),
        ];
        let encoded = encode_params(&mappers, &params).unwrap();
        let (values, type_fqns) = decode_params(&mappers, &encoded).unwrap();
        assert_eq!(values, vec![Value::Str("x".to_string()), Value::Int(2), Value::Bool(false)]);
        assert_eq!(type_fqns, vec!["java.lang.String", "int", "boolean"]);
    }

    #[test]
    fn empty_params_decode_to_zero_values() {
        let mappers = MapperRegistry::with_builtins();
        let encoded = encode_params(&mappers, &[]).unwrap();
        let (values, type_fqns) = decode_params(&mappers, &encoded).unwrap();
        assert!(values.is_empty());
        assert!(type_fqns.is_empty());
    }

    #[test]
    fn body_roundtrips_including_null() {
        let mappers = MapperRegistry::with_builtins();
        let body = encode_body(&mappers, "java.lang.String", &Value::Null).unwrap();
        assert_eq!(decode_body(&mappers, "java.lang.String", &body).unwrap(), Value::Null);

        let body = encode_body(&mappers, "java.lang.String", &Value::Str("hi".into())).unwrap();
        assert_eq!(
            decode_body(&mappers, "java.lang.String", &body).unwrap(),
            Value::Str("hi".into())
        );
    }

    #[test]
    fn legacy_request_roundtrips_with_trailing_comma_tolerance() {
        let (class_fqn, method, tokens) = parse_legacy_request(
            "com.example.HelloWorld/oneTwoThree({{x}}java.lang.String,{{2}}int,{{false}}boolean,)",
        )
        .unwrap();
        assert_eq!(class_fqn, "com.example.HelloWorld");
        assert_eq!(method, "oneTwoThree");
        assert_eq!(
            tokens,
            vec![
                ("x".to_string(), "java.lang.String".to_string()),
                ("2".to_string(), "int".to_string()),
                ("false".to_string(), "boolean".to_string()),
            ]
        );
    }

    #[test]
    fn legacy_request_with_no_params_roundtrips() {
        let (class_fqn, method, tokens) =
            parse_legacy_request("com.example.HelloWorld/helloWorld()").unwrap();
        assert_eq!(class_fqn, "com.example.HelloWorld");
        assert_eq!(method, "helloWorld");
        assert!(tokens.is_empty());

        let formatted = format_legacy_request(&class_fqn, &method, &tokens);
        assert_eq!(formatted, "com.example.HelloWorld/helloWorld()");
    }
}

//! Shared shapes for the pieces of a v2 frame that sit above a single
//! [`crate::Token`]: the `Class/method` metadata component, and the
//! `@@`-joined list of encoded parameter tokens that PARAMS decodes to.

use crate::token::PARAM_DELIM;

/// Join already-encoded parameter tokens into the string that gets wrapped in
/// the outer PARAMS Base64 layer.
pub fn join_params(encoded_tokens: &[String]) -> String {
    encoded_tokens.join(PARAM_DELIM)
}

/// Split a decoded PARAMS body back into its individual encoded tokens.
///
/// An empty body means zero parameters, not one empty parameter.
pub fn split_params(decoded: &str) -> Vec<String> {
    if decoded.is_empty() {
        Vec::new()
    } else {
        decoded.split(PARAM_DELIM).map(str::to_string).collect()
    }
}

/// Render the `Class/method` metadata component of a frame.
pub fn format_meta(class_fqn: &str, method: &str) -> String {
    format!("{}/{}", class_fqn, method)
}

/// Split a `Class/method` metadata component on its first `/`.
///
/// A class' fully-qualified name never itself contains `/`, so the first
/// occurrence is always the right split point.
pub fn parse_meta(s: &str) -> Option<(String, String)> {
    s.split_once('/')
        .map(|(class_fqn, method)| (class_fqn.to_string(), method.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn params_roundtrip() {
        let tokens = vec!["abc".to_string(), "def".to_string(), "ghi".to_string()];
        let joined = join_params(&tokens);
        assert_eq!(split_params(&joined), tokens);
    }

    #[test]
    fn empty_params_is_zero_tokens_not_one() {
        assert!(split_params("").is_empty());
    }

    #[test]
    fn meta_roundtrip() {
        let meta = format_meta("com.example.Hello", "helloWorld");
        assert_eq!(meta, "com.example.Hello/helloWorld");
        assert_eq!(
            parse_meta(&meta),
            Some(("com.example.Hello".to_string(), "helloWorld".to_string()))
        );
    }
}

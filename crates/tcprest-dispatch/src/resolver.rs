//! Overload-aware method resolution by `(name, param count, param type FQN
//! sequence)`, preferring an exact type match over an assignable one.

use thiserror::Error;

use crate::descriptor::MethodDescriptor;

/// Pairs of primitive / wrapper type names Java (and so this framework's
/// wire format) treats as interchangeable for the purposes of overload
/// resolution.
const ASSIGNABLE_PAIRS: &[(&str, &str)] = &[
    ("int", "java.lang.Integer"),
    ("long", "java.lang.Long"),
    ("short", "java.lang.Short"),
    ("byte", "java.lang.Byte"),
    ("boolean", "java.lang.Boolean"),
    ("double", "java.lang.Double"),
    ("float", "java.lang.Float"),
    ("char", "java.lang.Character"),
];

/// True if a parameter declared as `declared` accepts an argument whose
/// wire type FQN is `actual`.
fn is_assignable(declared: &str, actual: &str) -> bool {
    if declared == actual || declared == "java.lang.Object" {
        return true;
    }
    ASSIGNABLE_PAIRS
        .iter()
        .any(|(primitive, wrapper)| {
            (declared == *primitive && actual == *wrapper)
                || (declared == *wrapper && actual == *primitive)
        })
}

/// No method could be resolved, or more than one matched ambiguously.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// No method with this name and parameter count/types exists.
    #[error("no method named {name:?} accepting ({params})", params = .param_type_fqns.join(", "))]
    NoSuchMethod {
        /// The requested method name.
        name: String,
        /// The requested parameter type FQNs.
        param_type_fqns: Vec<String>,
    },
    /// More than one method matched equally well.
    #[error("call to {name:?} with ({params}) is ambiguous", params = .param_type_fqns.join(", "))]
    Ambiguous {
        /// The requested method name.
        name: String,
        /// The requested parameter type FQNs.
        param_type_fqns: Vec<String>,
    },
}

/// Resolve `name`/`param_type_fqns` against `methods`, preferring an exact
/// type-sequence match and falling back to an assignable one.
pub fn resolve<'a>(
    methods: &'a [MethodDescriptor],
    name: &str,
    param_type_fqns: &[String],
) -> Result<&'a MethodDescriptor, ResolveError> {
    let candidates: Vec<&MethodDescriptor> = methods
        .iter()
        .filter(|m| m.name == name && m.param_type_fqns.len() == param_type_fqns.len())
        .collect();

    let mut exact = candidates
        .iter()
        .copied()
        .filter(|m| m.param_type_fqns.as_slice() == param_type_fqns);
    if let Some(first) = exact.next() {
        if exact.next().is_some() {
            return Err(ResolveError::Ambiguous {
                name: name.to_string(),
                param_type_fqns: param_type_fqns.to_vec(),
            });
        }
        return Ok(first);
    }

    let mut assignable = candidates.iter().copied().filter(|m| {
        m.param_type_fqns
            .iter()
            .zip(param_type_fqns)
            .all(|(declared, actual)| is_assignable(declared, actual))
    });
    match (assignable.next(), assignable.next()) {
        (Some(unique), None) => Ok(unique),
        (Some(_), Some(_)) => Err(ResolveError::Ambiguous {
            name: name.to_string(),
            param_type_fqns: param_type_fqns.to_vec(),
        }),
        (None, _) => Err(ResolveError::NoSuchMethod {
            name: name.to_string(),
            param_type_fqns: param_type_fqns.to_vec(),
        }),
    }
}

/// Artifact naming and getter/property name derivation.
use super::config::GeneratorSettings;
use crate::error::GeneratorError;
use crate::metadata::{Nesting, TypeInfo};

const GET_PREFIX: &str = "get";
const IS_PREFIX: &str = "is";

pub const SEPARATOR: &str = "::";

/// Whether a method name follows the getter convention (`getFoo`, `isFoo`).
pub fn is_getter_name(name: &str) -> bool {
    getter_suffix(name).is_some()
}

/// The property a getter exposes: `getName` -> `name`, `getURL` -> `URL`.
///
/// Names that are not getters are returned unchanged.
pub fn property_name(method_name: &str) -> String {
    match getter_suffix(method_name) {
        Some(rest) => decapitalize(rest),
        None => method_name.to_string(),
    }
}

fn getter_suffix(name: &str) -> Option<&str> {
    name.strip_prefix(GET_PREFIX)
        .or_else(|| name.strip_prefix(IS_PREFIX))
        .filter(|rest| !rest.is_empty())
}

/// Lower-cases the first character unless the first two are both upper-case.
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if first.is_uppercase() && chars.clone().next().is_some_and(char::is_uppercase) {
        return name.to_string();
    }
    first.to_lowercase().chain(chars).collect()
}

/// Last segment of a qualified type name.
pub fn simple_name(type_name: &str) -> &str {
    type_name
        .rsplit_once(SEPARATOR)
        .map_or(type_name, |(_, simple)| simple)
}

/// Everything before the last segment; empty for unqualified names.
pub fn namespace_of(type_name: &str) -> &str {
    type_name
        .rsplit_once(SEPARATOR)
        .map_or("", |(namespace, _)| namespace)
}

pub fn validate_type_name(type_name: &str) -> Result<(), GeneratorError> {
    if type_name.is_empty() {
        return Err(GeneratorError::malformed_type_name(type_name, "empty name"));
    }
    for segment in type_name.split(SEPARATOR) {
        if segment.is_empty() {
            return Err(GeneratorError::malformed_type_name(type_name, "empty segment"));
        }
        if !is_identifier(segment) {
            return Err(GeneratorError::malformed_type_name(
                type_name,
                format!("'{segment}' is not an identifier"),
            ));
        }
    }
    Ok(())
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Namespace and name of the artifact generated for `info`.
///
/// Inner types are named `Enclosing_Simple` and live in the enclosing
/// type's namespace. Reserved namespaces are replaced by the fallback one.
pub fn artifact_name(
    info: &TypeInfo,
    settings: &GeneratorSettings,
) -> Result<(String, String), GeneratorError> {
    validate_type_name(&info.name)?;

    let (namespace, base_name) = match &info.nesting {
        Nesting::TopLevel => (
            namespace_of(&info.name),
            simple_name(&info.name).to_string(),
        ),
        Nesting::Inner { enclosing } => {
            validate_type_name(enclosing)?;
            (
                namespace_of(enclosing),
                format!("{}_{}", simple_name(enclosing), simple_name(&info.name)),
            )
        }
        nesting @ (Nesting::Local | Nesting::Anonymous) => {
            return Err(GeneratorError::unsupported_nesting(
                &info.name,
                nesting.as_str(),
            ));
        }
    };

    let namespace = if settings.is_reserved(namespace) {
        settings.fallback_namespace.clone()
    } else {
        namespace.to_string()
    };

    Ok((namespace, format!("{base_name}{}", settings.suffix)))
}

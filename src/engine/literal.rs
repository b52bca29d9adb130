/// Literal recognizer.
///
/// Classifies a raw token as a compile-time literal so the resolver chain
/// never has to be consulted for it.
use super::value::{Resolved, Value};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static INT_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d{1,10}$").expect("valid int literal pattern"));

static LONG_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d{1,19}[lL]$").expect("valid long literal pattern"));

pub fn is_string_delimiter(c: char) -> bool {
    c == '\'' || c == '"'
}

/// Returns the literal value of `token`, or `NotFound` if it is not a literal.
///
/// Precedence: quoted string, `true`/`false`, `null`, 32-bit integer,
/// 64-bit integer with an `L` suffix. A numeral matching a pattern that still
/// fails to parse (overflow) is logged and treated as not a literal.
pub fn get_literal(token: &str) -> Resolved {
    let Some(first) = token.chars().next() else {
        return Resolved::NotFound;
    };

    if is_string_delimiter(first) {
        return Resolved::Found(Value::Str(unquote(token)));
    }

    match token {
        "true" => return Resolved::Found(Value::Bool(true)),
        "false" => return Resolved::Found(Value::Bool(false)),
        "null" => return Resolved::Found(Value::Null),
        _ => {}
    }

    if INT_LITERAL.is_match(token) {
        return match token.parse::<i32>() {
            Ok(value) => Resolved::Found(Value::Int(value)),
            Err(e) => {
                warn!(token, error = %e, "unable to parse integer literal");
                Resolved::NotFound
            }
        };
    }

    if LONG_LITERAL.is_match(token) {
        let digits = &token[..token.len() - 1];
        return match digits.parse::<i64>() {
            Ok(value) => Resolved::Found(Value::Long(value)),
            Err(e) => {
                warn!(token, error = %e, "unable to parse long literal");
                Resolved::NotFound
            }
        };
    }

    Resolved::NotFound
}

/// Strips the first and last character of a quoted token.
fn unquote(token: &str) -> String {
    let mut chars = token.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

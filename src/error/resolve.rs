use thiserror::Error;

/// A genuine fault raised while resolving an access.
///
/// "No binding" is never an error: resolvers report it as
/// [`Resolved::NotFound`](crate::engine::Resolved::NotFound).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("failed to evaluate '{expression}': {message}")]
    Evaluation { expression: String, message: String },

    #[error("invocation of {type_name}::{member} failed: {message}")]
    Invocation {
        type_name: String,
        member: String,
        message: String,
    },

    #[error("{type_name} does not expose member '{member}' declared in its metadata")]
    MissingMember { type_name: String, member: String },
}

impl ResolveError {
    pub fn evaluation(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Evaluation {
            expression: expression.into(),
            message: message.into(),
        }
    }

    pub fn invocation(
        type_name: impl Into<String>,
        member: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Invocation {
            type_name: type_name.into(),
            member: member.into(),
            message: message.into(),
        }
    }

    pub fn missing_member(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self::MissingMember {
            type_name: type_name.into(),
            member: member.into(),
        }
    }
}

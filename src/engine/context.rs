/// The per-access record handed to every resolver.
///
/// A context borrows everything it exposes: the base value, the accessor
/// name, the raw parameter expressions and the evaluator used to evaluate
/// them on demand. Resolvers never retain any of it past one resolution.
use super::literal;
use super::value::{HostObject, Resolved, Value};
use crate::error::ResolveError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// A raw, unevaluated parameter expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    raw: String,
    parts: Vec<String>,
    literal: Resolved,
}

impl Expression {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let literal = literal::get_literal(&raw);
        let parts = if literal.is_found() {
            vec![raw.clone()]
        } else {
            raw.split('.').map(str::to_string).collect()
        };
        Self {
            raw,
            parts,
            literal,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// The literal value of this expression, or `NotFound` if it is not one.
    pub fn literal(&self) -> &Resolved {
        &self.literal
    }

    pub fn is_literal(&self) -> bool {
        self.literal.is_found()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Expression {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Callback into the expression evaluator.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, expression: &Expression) -> Result<Resolved, ResolveError>;
}

pub struct EvalContext<'a> {
    base: &'a Resolved,
    name: &'a str,
    params: &'a [Expression],
    evaluator: &'a dyn Evaluator,
}

impl<'a> EvalContext<'a> {
    pub fn new(
        base: &'a Resolved,
        name: &'a str,
        params: &'a [Expression],
        evaluator: &'a dyn Evaluator,
    ) -> Self {
        Self {
            base,
            name,
            params,
            evaluator,
        }
    }

    /// The object being accessed; may itself be `NotFound`.
    pub fn base(&self) -> &'a Resolved {
        self.base
    }

    pub fn base_value(&self) -> Option<&'a Value> {
        self.base.value()
    }

    pub fn base_object(&self) -> Option<&'a Arc<dyn HostObject>> {
        self.base_value().and_then(Value::as_object)
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn params(&self) -> &'a [Expression] {
        self.params
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub async fn evaluate(&self, expression: &Expression) -> Result<Resolved, ResolveError> {
        self.evaluator.evaluate(expression).await
    }
}

impl fmt::Debug for EvalContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalContext")
            .field("base", self.base)
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

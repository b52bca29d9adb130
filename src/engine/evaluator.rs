/// Reference evaluators.
///
/// The real expression evaluator belongs to the template engine. These two
/// cover the literal fast path and plain dotted paths, which is enough to
/// drive resolvers end to end.
use super::context::{EvalContext, Evaluator, Expression};
use super::value::{Resolved, Value};
use super::ResolverChain;
use crate::error::ResolveError;
use async_trait::async_trait;

/// Evaluates literals; every other expression is `NotFound`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralEvaluator;

#[async_trait]
impl Evaluator for LiteralEvaluator {
    async fn evaluate(&self, expression: &Expression) -> Result<Resolved, ResolveError> {
        Ok(expression.literal().clone())
    }
}

/// Evaluates literals, then dotted paths against a root value.
///
/// Each part of the path is resolved through the chain with the previous
/// part's result as base. Parameters inside a path are not supported; that
/// requires the template parser.
pub struct ChainEvaluator {
    chain: ResolverChain,
    root: Resolved,
}

impl ChainEvaluator {
    pub fn new(chain: ResolverChain, root: impl Into<Value>) -> Self {
        Self {
            chain,
            root: Resolved::Found(root.into()),
        }
    }

    pub fn chain(&self) -> &ResolverChain {
        &self.chain
    }

    /// Resolves a single access against `base` with raw parameters.
    pub async fn access(
        &self,
        base: &Resolved,
        name: &str,
        params: &[Expression],
    ) -> Result<Resolved, ResolveError> {
        let ctx = EvalContext::new(base, name, params, self);
        self.chain.resolve(&ctx).await
    }
}

#[async_trait]
impl Evaluator for ChainEvaluator {
    async fn evaluate(&self, expression: &Expression) -> Result<Resolved, ResolveError> {
        if expression.is_literal() {
            return Ok(expression.literal().clone());
        }

        let mut current = self.root.clone();
        for part in expression.parts() {
            current = self.access(&current, part, &[]).await?;
            if current.is_not_found() {
                break;
            }
        }
        Ok(current)
    }
}

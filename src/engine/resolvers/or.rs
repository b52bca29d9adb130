use crate::engine::{EvalContext, Resolved, Resolver};
use crate::error::ResolveError;
use async_trait::async_trait;

pub const OR: &str = "or";
pub const ELVIS: &str = "?:";

/// Null coalescing: `foo.or(bar)`, `foo or true`, `name ?: 'elvis'`.
pub struct OrResolver;

impl Default for OrResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OrResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolver for OrResolver {
    fn name(&self) -> &str {
        OR
    }

    fn applies_to(&self, ctx: &EvalContext<'_>) -> bool {
        ctx.param_count() == 1 && (ctx.name() == OR || ctx.name() == ELVIS)
    }

    async fn resolve(&self, ctx: &EvalContext<'_>) -> Result<Resolved, ResolveError> {
        let [fallback] = ctx.params() else {
            return Ok(Resolved::NotFound);
        };
        if ctx.base().is_absent() {
            return ctx.evaluate(fallback).await;
        }
        Ok(ctx.base().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::resolvers::test_support::Bindings;
    use crate::engine::{Expression, LiteralEvaluator, Value};

    async fn resolve(base: Resolved, name: &str) -> Resolved {
        let params = [Expression::new("'fallback'")];
        let ctx = EvalContext::new(&base, name, &params, &LiteralEvaluator);
        OrResolver::new().resolve(&ctx).await.unwrap()
    }

    #[tokio::test]
    async fn test_absent_base_uses_fallback() {
        assert_eq!(
            resolve(Resolved::NotFound, "or").await,
            Resolved::found("fallback")
        );
        assert_eq!(
            resolve(Resolved::Found(Value::Null), "?:").await,
            Resolved::found("fallback")
        );
    }

    #[tokio::test]
    async fn test_present_base_wins() {
        assert_eq!(resolve(Resolved::found("x"), "or").await, Resolved::found("x"));
        assert_eq!(resolve(Resolved::found(false), "?:").await, Resolved::found(false));
    }

    #[tokio::test]
    async fn test_present_base_skips_evaluation() {
        let eval = Bindings::default();
        let base = Resolved::found("x");
        let params = [Expression::new("'fallback'")];
        let ctx = EvalContext::new(&base, "or", &params, &eval);
        OrResolver::new().resolve(&ctx).await.unwrap();
        assert_eq!(eval.calls(), 0);
    }

    #[test]
    fn test_applies_with_exactly_one_param() {
        let base = Resolved::NotFound;
        let one = [Expression::new("1")];
        let two = [Expression::new("1"), Expression::new("2")];
        let resolver = OrResolver::new();

        assert!(resolver.applies_to(&EvalContext::new(&base, "or", &one, &LiteralEvaluator)));
        assert!(resolver.applies_to(&EvalContext::new(&base, "?:", &one, &LiteralEvaluator)));
        assert!(!resolver.applies_to(&EvalContext::new(&base, "or", &[], &LiteralEvaluator)));
        assert!(!resolver.applies_to(&EvalContext::new(&base, "or", &two, &LiteralEvaluator)));
        assert!(!resolver.applies_to(&EvalContext::new(&base, "and", &one, &LiteralEvaluator)));
    }

    #[tokio::test]
    async fn test_missing_fallback_declines() {
        let base = Resolved::NotFound;
        let ctx = EvalContext::new(&base, "or", &[], &LiteralEvaluator);
        assert_eq!(OrResolver::new().resolve(&ctx).await.unwrap(), Resolved::NotFound);

        let two = [Expression::new("1"), Expression::new("2")];
        let ctx = EvalContext::new(&base, "?:", &two, &LiteralEvaluator);
        assert_eq!(OrResolver::new().resolve(&ctx).await.unwrap(), Resolved::NotFound);
    }
}

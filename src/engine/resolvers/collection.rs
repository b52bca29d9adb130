use crate::engine::{EvalContext, Resolved, Resolver, Value};
use crate::error::ResolveError;
use async_trait::async_trait;

/// `size`, `isEmpty`/`empty` and `contains(x)` on [`Value::List`].
pub struct CollectionResolver;

impl Default for CollectionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolver for CollectionResolver {
    fn name(&self) -> &str {
        "collection"
    }

    fn applies_to(&self, ctx: &EvalContext<'_>) -> bool {
        matches!(ctx.base_value(), Some(Value::List(_)))
    }

    async fn resolve(&self, ctx: &EvalContext<'_>) -> Result<Resolved, ResolveError> {
        let Some(Value::List(items)) = ctx.base_value() else {
            return Ok(Resolved::NotFound);
        };

        match ctx.name() {
            "size" => Ok(Resolved::found(items.len())),
            "isEmpty" | "empty" => Ok(Resolved::found(items.is_empty())),
            "contains" if ctx.param_count() == 1 => {
                let needle = ctx.evaluate(&ctx.params()[0]).await?;
                let present = needle.value().is_some_and(|v| items.contains(v));
                Ok(Resolved::found(present))
            }
            _ => Ok(Resolved::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::resolvers::test_support::Bindings;
    use crate::engine::{Expression, LiteralEvaluator};

    fn three() -> Resolved {
        Resolved::found(vec!["a", "b", "c"])
    }

    async fn resolve(base: &Resolved, name: &str, params: &[Expression]) -> Resolved {
        let ctx = EvalContext::new(base, name, params, &LiteralEvaluator);
        CollectionResolver::new().resolve(&ctx).await.unwrap()
    }

    #[tokio::test]
    async fn test_size_and_empty() {
        assert_eq!(resolve(&three(), "size", &[]).await, Resolved::found(3));
        assert_eq!(resolve(&three(), "empty", &[]).await, Resolved::found(false));

        let empty = Resolved::Found(Value::List(vec![]));
        assert_eq!(resolve(&empty, "isEmpty", &[]).await, Resolved::found(true));
    }

    #[tokio::test]
    async fn test_contains_matches_membership() {
        let b = [Expression::new("'b'")];
        let z = [Expression::new("'z'")];
        assert_eq!(resolve(&three(), "contains", &b).await, Resolved::found(true));
        assert_eq!(resolve(&three(), "contains", &z).await, Resolved::found(false));
    }

    #[tokio::test]
    async fn test_contains_not_found_argument() {
        let eval = Bindings::default();
        let base = three();
        let params = [Expression::new("unbound")];
        let ctx = EvalContext::new(&base, "contains", &params, &eval);
        let result = CollectionResolver::new().resolve(&ctx).await.unwrap();
        assert_eq!(result, Resolved::found(false));
    }

    #[tokio::test]
    async fn test_contains_without_param_declines() {
        assert_eq!(resolve(&three(), "contains", &[]).await, Resolved::NotFound);
    }

    #[tokio::test]
    async fn test_no_param_evaluation_for_size() {
        let eval = Bindings::default();
        let base = three();
        let params = [Expression::new("ignored")];
        let ctx = EvalContext::new(&base, "size", &params, &eval);
        CollectionResolver::new().resolve(&ctx).await.unwrap();
        assert_eq!(eval.calls(), 0);
    }

    #[test]
    fn test_does_not_apply_to_maps() {
        let base = Resolved::found(crate::engine::ValueMap::new());
        let ctx = EvalContext::new(&base, "size", &[], &LiteralEvaluator);
        assert!(!CollectionResolver::new().applies_to(&ctx));
    }
}

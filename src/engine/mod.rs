pub mod context;
pub mod evaluator;
pub mod literal;
pub mod resolvers;
pub mod value;

pub use context::{EvalContext, Evaluator, Expression};
pub use evaluator::{ChainEvaluator, LiteralEvaluator};
pub use value::{HostObject, Invocation, MapEntry, Resolved, Value, ValueMap};

use crate::error::ResolveError;
use async_trait::async_trait;
use resolvers::{CollectionResolver, MapEntryResolver, MapResolver, OrResolver, ThisResolver};
use std::sync::Arc;
use tracing::trace;

/// A resolution strategy.
///
/// `applies_to` is a pure predicate evaluated before `resolve`. `resolve`
/// may still decline by returning [`Resolved::NotFound`]; an `Err` is a
/// genuine fault and is never used for "no binding". Implementations hold no
/// per-call state and are shared across concurrent evaluations.
#[async_trait]
pub trait Resolver: Send + Sync {
    fn name(&self) -> &str;
    fn applies_to(&self, ctx: &EvalContext<'_>) -> bool;
    async fn resolve(&self, ctx: &EvalContext<'_>) -> Result<Resolved, ResolveError>;
}

/// Ordered resolvers tried in sequence until one produces a value.
#[derive(Clone)]
pub struct ResolverChain {
    resolvers: Vec<Arc<dyn Resolver>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self {
            resolvers: Self::default_resolvers(),
        }
    }

    /// The built-in resolvers, in the order they are consulted.
    pub fn default_resolvers() -> Vec<Arc<dyn Resolver>> {
        vec![
            Arc::new(MapResolver::new()),
            Arc::new(MapEntryResolver::new()),
            Arc::new(CollectionResolver::new()),
            Arc::new(ThisResolver::new()),
            Arc::new(OrResolver::new()),
        ]
    }

    pub fn builder() -> ResolverChainBuilder {
        ResolverChainBuilder::new()
    }

    pub async fn resolve(&self, ctx: &EvalContext<'_>) -> Result<Resolved, ResolveError> {
        for resolver in &self.resolvers {
            if !resolver.applies_to(ctx) {
                continue;
            }
            let result = resolver.resolve(ctx).await?;
            if result.is_found() {
                trace!(resolver = resolver.name(), name = ctx.name(), "resolved");
                return Ok(result);
            }
        }
        Ok(Resolved::NotFound)
    }

    pub fn resolver_count(&self) -> usize {
        self.resolvers.len()
    }

    pub fn resolver_names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }
}

impl Default for ResolverChain {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ResolverChainBuilder {
    resolvers: Vec<Arc<dyn Resolver>>,
    include_defaults: bool,
}

impl ResolverChainBuilder {
    pub fn new() -> Self {
        Self {
            resolvers: Vec::new(),
            include_defaults: true,
        }
    }

    pub fn with_resolver<R: Resolver + 'static>(mut self, resolver: R) -> Self {
        self.resolvers.push(Arc::new(resolver));
        self
    }

    pub fn with_resolvers<I>(mut self, resolvers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Resolver>>,
    {
        self.resolvers.extend(resolvers);
        self
    }

    pub fn without_defaults(mut self) -> Self {
        self.include_defaults = false;
        self
    }

    /// Custom resolvers come first; the built-ins are appended unless
    /// `without_defaults` was called.
    pub fn build(mut self) -> ResolverChain {
        if self.include_defaults {
            self.resolvers.extend(ResolverChain::default_resolvers());
        }
        ResolverChain {
            resolvers: self.resolvers,
        }
    }
}

impl Default for ResolverChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Declining {
        applies: bool,
    }

    #[async_trait]
    impl Resolver for Declining {
        fn name(&self) -> &str {
            "declining"
        }

        fn applies_to(&self, _ctx: &EvalContext<'_>) -> bool {
            self.applies
        }

        async fn resolve(&self, _ctx: &EvalContext<'_>) -> Result<Resolved, ResolveError> {
            Ok(Resolved::NotFound)
        }
    }

    struct Fixed(&'static str);

    #[async_trait]
    impl Resolver for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        fn applies_to(&self, _ctx: &EvalContext<'_>) -> bool {
            true
        }

        async fn resolve(&self, _ctx: &EvalContext<'_>) -> Result<Resolved, ResolveError> {
            Ok(Resolved::found(self.0))
        }
    }

    struct Failing;

    #[async_trait]
    impl Resolver for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn applies_to(&self, _ctx: &EvalContext<'_>) -> bool {
            true
        }

        async fn resolve(&self, ctx: &EvalContext<'_>) -> Result<Resolved, ResolveError> {
            Err(ResolveError::evaluation(ctx.name(), "boom"))
        }
    }

    #[test]
    fn test_chain_default() {
        let chain = ResolverChain::new();
        assert_eq!(chain.resolver_count(), 5);
        assert_eq!(
            chain.resolver_names(),
            vec!["map", "map-entry", "collection", "this", "or"]
        );
    }

    #[test]
    fn test_builder_without_defaults() {
        let chain = ResolverChain::builder().without_defaults().build();
        assert_eq!(chain.resolver_count(), 0);
    }

    #[test]
    fn test_builder_custom_first() {
        let chain = ResolverChain::builder().with_resolver(Fixed("custom")).build();
        assert_eq!(chain.resolver_names()[0], "custom");
        assert_eq!(chain.resolver_count(), 6);
    }

    #[tokio::test]
    async fn test_all_declining_is_not_found() {
        let chain = ResolverChain::builder()
            .without_defaults()
            .with_resolver(Declining { applies: false })
            .with_resolver(Declining { applies: true })
            .build();

        let base = Resolved::found("x");
        let ctx = EvalContext::new(&base, "anything", &[], &LiteralEvaluator);
        assert_eq!(chain.resolve(&ctx).await, Ok(Resolved::NotFound));
    }

    #[tokio::test]
    async fn test_first_found_wins() {
        let chain = ResolverChain::builder()
            .without_defaults()
            .with_resolver(Declining { applies: true })
            .with_resolver(Fixed("first"))
            .with_resolver(Fixed("second"))
            .build();

        let base = Resolved::NotFound;
        let ctx = EvalContext::new(&base, "x", &[], &LiteralEvaluator);
        assert_eq!(chain.resolve(&ctx).await, Ok(Resolved::found("first")));
    }

    #[tokio::test]
    async fn test_fault_stops_chain() {
        let chain = ResolverChain::builder()
            .without_defaults()
            .with_resolver(Failing)
            .with_resolver(Fixed("unreached"))
            .build();

        let base = Resolved::found(1);
        let ctx = EvalContext::new(&base, "x", &[], &LiteralEvaluator);
        assert!(chain.resolve(&ctx).await.is_err());
    }
}

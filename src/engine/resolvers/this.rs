use crate::engine::{EvalContext, Resolved, Resolver};
use crate::error::ResolveError;
use async_trait::async_trait;

pub const THIS: &str = "this";

/// `this` evaluates to the base itself.
pub struct ThisResolver;

impl Default for ThisResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ThisResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolver for ThisResolver {
    fn name(&self) -> &str {
        THIS
    }

    fn applies_to(&self, ctx: &EvalContext<'_>) -> bool {
        ctx.name() == THIS
    }

    async fn resolve(&self, ctx: &EvalContext<'_>) -> Result<Resolved, ResolveError> {
        Ok(ctx.base().clone())
    }
}

use crate::engine::{EvalContext, Resolved, Resolver, Value};
use crate::error::ResolveError;
use async_trait::async_trait;

pub struct MapEntryResolver;

impl Default for MapEntryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MapEntryResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolver for MapEntryResolver {
    fn name(&self) -> &str {
        "map-entry"
    }

    fn applies_to(&self, ctx: &EvalContext<'_>) -> bool {
        matches!(ctx.base_value(), Some(Value::Entry(_)))
    }

    async fn resolve(&self, ctx: &EvalContext<'_>) -> Result<Resolved, ResolveError> {
        let Some(Value::Entry(entry)) = ctx.base_value() else {
            return Ok(Resolved::NotFound);
        };

        Ok(match ctx.name() {
            "key" | "getKey" => Resolved::Found(entry.key.clone()),
            "value" | "getValue" => Resolved::Found(entry.value.clone()),
            _ => Resolved::NotFound,
        })
    }
}
